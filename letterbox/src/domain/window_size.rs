//! WindowSizeState - 窗口尺寸状态机
//!
//! 状态隐含在两个脏标记里：
//! - `RESIZE`: 有效尺寸变了，需要重新合成
//! - `COMMIT`: 收到 configure 确认，需要重新呈现
//!
//! 转移：
//!
//! ```text
//! DestinationSizeChanged(w, h) ─→ 更新请求尺寸，钳制后有变化才置 RESIZE
//! BoundsChanged(w, h)          ─→ 更新上限，当前尺寸超限则收缩并置 RESIZE
//! ConfigureAcknowledged        ─→ 无条件置 COMMIT（保留已有的 RESIZE）
//! Closed                       ─→ 由驱动层处理，不经过这里
//! ```
//!
//! 标记只由 PresentationDriver 在完成对应工作后清除。
//!
//! 有效尺寸 = `min(请求尺寸, 上限)`，等比缩小到单帧字节上限以内
//! （`4 * w * h <= i32::MAX`），再逐维抬高到不小于源图（缩放倍数 >= 1）。
//! 上限一旦收缩了有效尺寸，之后放宽上限也不会隐式地把尺寸长回去，
//! 只有新的尺寸请求才能让窗口变大。

use bitflags::bitflags;

use super::primitives::{ImageSize, SurfaceSize};

/// 未设置上限时的取值（协议层 i32 的最大值）
pub const UNBOUNDED: u32 = i32::MAX as u32;

bitflags! {
    /// 待处理工作的脏标记
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Dirty: u8 {
        const RESIZE = 0b01;
        const COMMIT = 0b10;
    }
}

/// 窗口尺寸状态
#[derive(Debug, Clone)]
pub struct WindowSizeState {
    /// 源图尺寸（有效尺寸的下限）
    image: ImageSize,
    /// 最近一次请求的尺寸
    requested: SurfaceSize,
    /// 外部施加的尺寸上限
    bounds: SurfaceSize,
    /// 当前有效（显示）尺寸
    current: SurfaceSize,
    dirty: Dirty,
}

impl WindowSizeState {
    /// 创建状态，初始请求尺寸为 `initial`
    ///
    /// 首帧总要合成一次，所以初始带 `RESIZE`
    pub fn new(image: ImageSize, initial: SurfaceSize) -> Self {
        let bounds = SurfaceSize::new(UNBOUNDED, UNBOUNDED);
        let current = Self::effective(initial, bounds, image);
        Self {
            image,
            requested: initial,
            bounds,
            current,
            dirty: Dirty::RESIZE,
        }
    }

    /// 处理目标尺寸变化（0 = 该维保持不变）
    pub fn request_size(&mut self, width: i32, height: i32) {
        let width = self.sanitize_request(width, self.requested.width, self.image.width, "width");
        let height =
            self.sanitize_request(height, self.requested.height, self.image.height, "height");
        self.requested = SurfaceSize::new(width, height);
        self.refresh();
    }

    /// 处理尺寸上限变化（0 = 该维保持不变）
    pub fn set_bounds(&mut self, width: i32, height: i32) {
        let width = Self::sanitize_bound(width, self.bounds.width, "width");
        let height = Self::sanitize_bound(height, self.bounds.height, "height");

        // 先把请求尺寸折叠到旧上限内：放宽上限不能让窗口隐式长回去
        self.requested = self.requested.min(self.bounds);
        self.bounds = SurfaceSize::new(width, height);
        self.refresh();
    }

    /// 处理 configure 确认
    #[inline]
    pub fn acknowledge_configure(&mut self) {
        self.dirty.insert(Dirty::COMMIT);
    }

    #[inline]
    pub fn needs_resize(&self) -> bool {
        self.dirty.contains(Dirty::RESIZE)
    }

    #[inline]
    pub fn needs_commit(&self) -> bool {
        self.dirty.contains(Dirty::COMMIT)
    }

    #[inline]
    pub fn clear_resize(&mut self) {
        self.dirty.remove(Dirty::RESIZE);
    }

    #[inline]
    pub fn clear_commit(&mut self) {
        self.dirty.remove(Dirty::COMMIT);
    }

    #[inline]
    pub fn dirty(&self) -> Dirty {
        self.dirty
    }

    /// 当前有效尺寸（始终 >= 源图尺寸）
    #[inline]
    pub fn size(&self) -> SurfaceSize {
        self.current
    }

    #[inline]
    pub fn requested(&self) -> SurfaceSize {
        self.requested
    }

    #[inline]
    pub fn bounds(&self) -> SurfaceSize {
        self.bounds
    }

    #[inline]
    pub fn image_size(&self) -> ImageSize {
        self.image
    }

    /// 重新计算有效尺寸，有变化才置 RESIZE
    fn refresh(&mut self) {
        let next = Self::effective(self.requested, self.bounds, self.image);
        if next != self.current {
            tracing::debug!("[WindowSize] {:?} -> {:?}", self.current, next);
            self.current = next;
            self.dirty.insert(Dirty::RESIZE);
        }
    }

    fn effective(requested: SurfaceSize, bounds: SurfaceSize, image: ImageSize) -> SurfaceSize {
        let limited = requested.min(bounds);
        let capped = limited.capped_to_frame();
        if capped != limited {
            tracing::debug!(
                "[WindowSize] {:?} exceeds frame limit, using {:?}",
                limited,
                capped
            );
        }
        capped.at_least(image)
    }

    /// 负的请求尺寸钳制到源图尺寸（最小合法值）
    fn sanitize_request(&self, value: i32, current: u32, minimum: u32, axis: &str) -> u32 {
        match value {
            0 => current,
            v if v < 0 => {
                tracing::warn!(
                    "[WindowSize] negative requested {} {}, clamping to {}",
                    axis,
                    v,
                    minimum
                );
                minimum
            }
            v => v as u32,
        }
    }

    /// 负的上限保留最近一次的合法上限
    fn sanitize_bound(value: i32, current: u32, axis: &str) -> u32 {
        match value {
            0 => current,
            v if v < 0 => {
                tracing::warn!(
                    "[WindowSize] negative bound {} {}, keeping {}",
                    axis,
                    v,
                    current
                );
                current
            }
            v => v as u32,
        }
    }
}
