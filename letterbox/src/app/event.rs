//! 显示会话事件
//!
//! 显示协议的各种回调（toplevel configure、configure_bounds、
//! xdg_surface configure、close）先翻译成 `DisplayEvent` 入队，
//! 再由主循环在一次 dispatch 之后统一交给 `PresentationDriver`。
//! 协议细节（ping/pong、configure serial）留在会话层，不进入核心。

use std::collections::VecDeque;

/// 显示会话产生的事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayEvent {
    /// 目标尺寸变化（0 = 该维不变）
    DestinationSizeChanged { width: i32, height: i32 },

    /// 尺寸上限变化（0 = 该维不变）
    BoundsChanged { width: i32, height: i32 },

    /// configure 已确认，需要重新呈现
    ConfigureAcknowledged,

    /// 窗口关闭（终止）
    Closed,
}

/// 事件队列
///
/// 单线程使用：会话回调里 `push`，主循环里 `drain`
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<DisplayEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, event: DisplayEvent) {
        self.events.push_back(event);
    }

    /// 取出所有事件（按到达顺序）
    pub fn drain(&mut self) -> std::collections::vec_deque::Drain<'_, DisplayEvent> {
        self.events.drain(..)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_queue_preserves_order() {
        let mut queue = EventQueue::new();
        queue.push(DisplayEvent::BoundsChanged {
            width: 800,
            height: 600,
        });
        queue.push(DisplayEvent::DestinationSizeChanged {
            width: 400,
            height: 300,
        });
        queue.push(DisplayEvent::ConfigureAcknowledged);
        assert_eq!(queue.len(), 3);

        let events: Vec<_> = queue.drain().collect();
        assert_eq!(
            events,
            vec![
                DisplayEvent::BoundsChanged {
                    width: 800,
                    height: 600
                },
                DisplayEvent::DestinationSizeChanged {
                    width: 400,
                    height: 300
                },
                DisplayEvent::ConfigureAcknowledged,
            ]
        );
        assert!(queue.is_empty());
    }
}
