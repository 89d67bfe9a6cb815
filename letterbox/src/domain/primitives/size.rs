use std::marker::PhantomData;

/// 源图像素空间标记（解码后的图像坐标）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSpace;

/// 窗口表面像素空间标记（合成输出坐标）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSpace;

/// 每个像素占用的字节数（ARGB / XRGB 8888）
pub const BYTES_PER_PIXEL: usize = 4;

/// 单帧最大字节数（wl_shm 的 size / stride 参数是 i32）
pub const MAX_FRAME_BYTES: usize = i32::MAX as usize;

/// 单帧最大像素数
pub const MAX_FRAME_PIXELS: u64 = (MAX_FRAME_BYTES / BYTES_PER_PIXEL) as u64;

/// 尺寸值对象（width + height）
///
/// 使用 Phantom Type 在编译期区分尺寸类型：
/// - `Size<ImageSpace>`: 源图尺寸
/// - `Size<SurfaceSpace>`: 窗口表面尺寸
///
/// 两者只能通过 [`ImageSize::scaled`] / [`SurfaceSize::at_least`] 这类显式
/// 操作互相转换，避免把源图尺寸误当成窗口尺寸传给合成器。
pub struct Size<Space> {
    pub width: u32,
    pub height: u32,
    _marker: PhantomData<Space>,
}

pub type ImageSize = Size<ImageSpace>;
pub type SurfaceSize = Size<SurfaceSpace>;

// 手动实现，避免给 Space 标记加上多余的 trait bound
impl<T> Clone for Size<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Size<T> {}

impl<T> PartialEq for Size<T> {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }
}

impl<T> Eq for Size<T> {}

impl<T> std::fmt::Debug for Size<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl<T> Size<T> {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            _marker: PhantomData,
        }
    }

    /// 像素总数
    #[inline]
    pub fn area(self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// 存储该尺寸所需的字节数（4 * width * height）
    ///
    /// 超出 `usize` 时返回 `None`
    pub fn byte_len(self) -> Option<usize> {
        usize::try_from(self.area())
            .ok()?
            .checked_mul(BYTES_PER_PIXEL)
    }

    /// 每行字节数
    #[inline]
    pub fn stride(self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// 逐维取较小值
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.width.min(other.width), self.height.min(other.height))
    }

    /// 一帧能否放进 `MAX_FRAME_BYTES`
    #[inline]
    pub fn fits_frame(self) -> bool {
        self.area() <= MAX_FRAME_PIXELS
    }
}

impl ImageSize {
    /// 整数倍放大到表面空间（饱和乘法）
    pub fn scaled(self, factor: u32) -> SurfaceSize {
        SurfaceSize::new(
            self.width.saturating_mul(factor),
            self.height.saturating_mul(factor),
        )
    }
}

impl SurfaceSize {
    /// 逐维抬高到不小于源图尺寸（保证缩放倍数至少为 1）
    pub fn at_least(self, image: ImageSize) -> Self {
        Self::new(self.width.max(image.width), self.height.max(image.height))
    }

    /// 等比缩小到 `MAX_FRAME_PIXELS` 以内（已经放得下时原样返回）
    pub fn capped_to_frame(self) -> Self {
        if self.fits_frame() {
            return self;
        }
        let ratio = (MAX_FRAME_PIXELS as f64 / self.area() as f64).sqrt();
        let height = ((self.height as f64 * ratio) as u64).clamp(1, MAX_FRAME_PIXELS);
        // 宽度按高度反推，保证乘积不超限（浮点舍入也不会越界）
        let width = ((self.width as f64 * ratio) as u64).clamp(1, MAX_FRAME_PIXELS / height);
        Self::new(width as u32, height as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_len_and_stride() {
        let size = SurfaceSize::new(10, 4);
        assert_eq!(size.byte_len(), Some(160));
        assert_eq!(size.stride(), 40);
    }

    #[test]
    fn test_byte_len_overflow() {
        let size = SurfaceSize::new(u32::MAX, u32::MAX);
        if usize::BITS == 64 {
            // 4 * (2^32-1)^2 超出 u64
            assert_eq!(size.byte_len(), None);
        }
    }

    #[test]
    fn test_scaled_saturates() {
        let image = ImageSize::new(3, u32::MAX);
        let surface = image.scaled(16);
        assert_eq!(surface, SurfaceSize::new(48, u32::MAX));
    }

    #[test]
    fn test_at_least_raises_each_dimension() {
        let image = ImageSize::new(10, 10);
        assert_eq!(SurfaceSize::new(1, 1).at_least(image), SurfaceSize::new(10, 10));
        assert_eq!(SurfaceSize::new(30, 2).at_least(image), SurfaceSize::new(30, 10));
    }

    #[test]
    fn test_small_size_is_not_capped() {
        let size = SurfaceSize::new(1920, 1080);
        assert!(size.fits_frame());
        assert_eq!(size.capped_to_frame(), size);
    }

    /// 测试：32000x32000 需要 4096000000 字节，超出 i32，等比缩小后放得下
    #[test]
    fn test_oversized_square_is_capped() {
        let size = SurfaceSize::new(32_000, 32_000);
        assert!(!size.fits_frame());

        let capped = size.capped_to_frame();
        assert!(capped.fits_frame());
        assert!(capped.byte_len().unwrap() <= i32::MAX as usize);
        assert_eq!(capped.width, capped.height);
        // 只去掉舍入需要的那一点
        assert!(capped.width > 23_000);
    }

    #[test]
    fn test_degenerate_strip_is_capped() {
        let capped = SurfaceSize::new(1, u32::MAX).capped_to_frame();
        assert!(capped.fits_frame());
        assert_eq!(capped.width, 1);
        assert_eq!(capped.height as u64, MAX_FRAME_PIXELS);
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", SurfaceSize::new(640, 480)), "640x480");
    }
}
