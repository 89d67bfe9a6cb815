//! PresentationDriver - 呈现驱动
//!
//! 职责：把事件变成尺寸状态的变化，把状态变化变成"合成"和"呈现"
//!
//! 每轮主循环：
//!
//! ```text
//! blocking dispatch ─→ handle_event(...) × N ─→ render(presenter)
//!                                              │
//!                       needs_resize ──────────┼─→ 扩容 → 合成 → flush → 记录 buffer
//!                       needs_commit ──────────┴─→ present(buffer) → commit
//! ```
//!
//! 合成失败（资源错误）时直接返回，不会呈现半成品帧。

use crate::app::event::DisplayEvent;
use crate::app::presenter::{BufferDescriptor, Presenter};
use crate::compositor::{composite, FrameView, Letterbox};
use crate::config::ViewerConfig;
use crate::domain::{Image, WindowSizeState};
use crate::error::{ResourceError, Result};
use crate::infra::{FrameBufferPool, SharedStorage};

/// 事件处理后主循环该怎么走
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// 计数（调试和测试用）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverStats {
    pub composites: u64,
    pub presents: u64,
    pub commits: u64,
}

pub struct PresentationDriver<S> {
    image: Image,
    state: WindowSizeState,
    pool: FrameBufferPool<S>,
    /// 最近一次合成好的 buffer（首次合成前为 None）
    frame: Option<BufferDescriptor>,
    /// 最近一次合成的布局
    layout: Option<Letterbox>,
    stats: DriverStats,
}

impl<S: SharedStorage> PresentationDriver<S> {
    /// 创建驱动，初始尺寸按配置放大，首轮 `render` 会先合成一次
    pub fn new(image: Image, pool: FrameBufferPool<S>, config: &ViewerConfig) -> Self {
        let initial = config.initial_size(image.size());
        let state = WindowSizeState::new(image.size(), initial);
        tracing::info!(
            "[Driver] image {:?}, initial surface {:?}",
            image.size(),
            state.size()
        );
        Self {
            image,
            state,
            pool,
            frame: None,
            layout: None,
            stats: DriverStats::default(),
        }
    }

    /// 处理一个显示事件
    pub fn handle_event(&mut self, event: DisplayEvent) -> Control {
        tracing::trace!("[Driver] event {:?}", event);
        match event {
            DisplayEvent::DestinationSizeChanged { width, height } => {
                self.state.request_size(width, height);
            }
            DisplayEvent::BoundsChanged { width, height } => {
                self.state.set_bounds(width, height);
            }
            DisplayEvent::ConfigureAcknowledged => {
                self.state.acknowledge_configure();
            }
            DisplayEvent::Closed => {
                tracing::info!("[Driver] closed");
                return Control::Exit;
            }
        }
        Control::Continue
    }

    /// 按顺序处理一批事件，遇到 `Closed` 立即停止（后续事件丢弃）
    pub fn handle_events<I>(&mut self, events: I) -> Control
    where
        I: IntoIterator<Item = DisplayEvent>,
    {
        for event in events {
            if self.handle_event(event) == Control::Exit {
                return Control::Exit;
            }
        }
        Control::Continue
    }

    /// 做完当前脏标记要求的工作：先合成，再呈现
    pub fn render<P: Presenter>(&mut self, presenter: &mut P) -> Result<()> {
        if self.state.needs_resize() {
            self.recomposite()?;
            self.state.clear_resize();
        }

        if self.state.needs_commit() {
            if let Some(frame) = self.frame {
                presenter.present(&frame, self.pool.capacity())?;
                self.stats.presents += 1;
            }
            presenter.commit();
            self.stats.commits += 1;
            self.state.clear_commit();
        }

        Ok(())
    }

    /// 按当前有效尺寸重新合成到池里
    fn recomposite(&mut self) -> Result<(), ResourceError> {
        let size = self.state.size().at_least(self.image.size());
        let bytes = size.byte_len().ok_or(ResourceError::TooLarge {
            width: size.width,
            height: size.height,
        })?;

        let layout = {
            let mapped = self.pool.ensure_capacity(bytes)?;
            let mut view = FrameView::new(mapped, size)?;
            composite(&self.image, &mut view)
        };
        self.pool.flush()?;

        self.frame = Some(BufferDescriptor::for_frame(size, self.pool.capacity())?);
        self.layout = Some(layout);
        self.stats.composites += 1;

        tracing::debug!(
            "[Driver] composited {:?}: scale={} padding l={} t={} r={} b={}",
            size,
            layout.scale,
            layout.x_padding,
            layout.y_padding,
            layout.right_padding(size),
            layout.bottom_padding(size)
        );
        Ok(())
    }

    #[inline]
    pub fn state(&self) -> &WindowSizeState {
        &self.state
    }

    #[inline]
    pub fn pool(&self) -> &FrameBufferPool<S> {
        &self.pool
    }

    #[inline]
    pub fn image(&self) -> &Image {
        &self.image
    }

    #[inline]
    pub fn frame(&self) -> Option<BufferDescriptor> {
        self.frame
    }

    #[inline]
    pub fn layout(&self) -> Option<Letterbox> {
        self.layout
    }

    #[inline]
    pub fn stats(&self) -> DriverStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SurfaceSize;
    use crate::infra::HeapStorage;

    #[derive(Default)]
    struct NullPresenter {
        presented: Vec<BufferDescriptor>,
        commits: usize,
    }

    impl Presenter for NullPresenter {
        fn present(
            &mut self,
            buffer: &BufferDescriptor,
            _pool_bytes: usize,
        ) -> Result<(), ResourceError> {
            self.presented.push(*buffer);
            Ok(())
        }

        fn commit(&mut self) {
            self.commits += 1;
        }
    }

    fn driver(width: u32, height: u32) -> PresentationDriver<HeapStorage> {
        let pixels = vec![0xFFFF_FFFF; (width * height) as usize];
        let image = Image::from_argb(width, height, pixels).unwrap();
        PresentationDriver::new(
            image,
            FrameBufferPool::new(HeapStorage::new()),
            &ViewerConfig::default(),
        )
    }

    #[test]
    fn test_initial_size_is_scaled() {
        let d = driver(10, 10);
        assert_eq!(d.state().size(), SurfaceSize::new(160, 160));
        assert!(d.state().needs_resize());
        assert!(d.frame().is_none());
    }

    /// 测试：首次 render 只合成不提交（还没有 configure 确认）
    #[test]
    fn test_first_render_composites_without_commit() {
        let mut d = driver(10, 10);
        let mut presenter = NullPresenter::default();
        d.render(&mut presenter).unwrap();

        assert_eq!(d.stats().composites, 1);
        assert_eq!(presenter.commits, 0);
        assert_eq!(d.pool().capacity(), 160 * 160 * 4);
        assert!(!d.state().needs_resize());
    }

    /// 测试：默认 16 倍对 2000x2000 的源图过大，初始窗口降到能放进一帧的尺寸
    #[test]
    fn test_large_image_initial_surface_fits_frame() {
        let d = driver(2000, 2000);
        let size = d.state().size();
        assert_eq!(size, SurfaceSize::new(22_000, 22_000));
        assert!(size.byte_len().unwrap() <= i32::MAX as usize);
        assert!(BufferDescriptor::for_frame(size, usize::MAX).is_ok());
    }

    #[test]
    fn test_closed_exits() {
        let mut d = driver(10, 10);
        assert_eq!(d.handle_event(DisplayEvent::Closed), Control::Exit);
    }

    /// 测试：Closed 之后的事件不再处理
    #[test]
    fn test_events_after_close_are_dropped() {
        let mut d = driver(10, 10);
        let control = d.handle_events([
            DisplayEvent::Closed,
            DisplayEvent::ConfigureAcknowledged,
        ]);
        assert_eq!(control, Control::Exit);
        assert!(!d.state().needs_commit());
    }

    #[test]
    fn test_ack_presents_and_commits() {
        let mut d = driver(10, 10);
        let mut presenter = NullPresenter::default();
        d.handle_event(DisplayEvent::ConfigureAcknowledged);
        d.render(&mut presenter).unwrap();

        assert_eq!(presenter.commits, 1);
        assert_eq!(presenter.presented.len(), 1);
        assert_eq!(presenter.presented[0].size(), SurfaceSize::new(160, 160));
        assert!(d.state().dirty().is_empty());
    }
}
