//! FrameView - 合成目标（带边界检查的可写视图）
//!
//! 包装帧缓冲池映射出来的字节切片，只暴露 `width * height` 个像素。
//! 所有写入都按行号索引，并对本次合成的尺寸做校验，
//! 不会写到映射区域之外。

use crate::compositor::pixel::PixelFormat;
use crate::domain::{SurfaceSize, BYTES_PER_PIXEL};
use crate::error::ResourceError;

pub struct FrameView<'a> {
    bytes: &'a mut [u8],
    size: SurfaceSize,
    format: PixelFormat,
}

impl<'a> FrameView<'a> {
    /// 在 `bytes` 的开头划出一帧 `size` 大小的视图（offset 恒为 0）
    pub fn new(bytes: &'a mut [u8], size: SurfaceSize) -> Result<Self, ResourceError> {
        let required = size.byte_len().ok_or(ResourceError::TooLarge {
            width: size.width,
            height: size.height,
        })?;
        let available = bytes.len();
        if required > available {
            return Err(ResourceError::FrameOutOfBounds {
                width: size.width,
                height: size.height,
                required,
                available,
            });
        }
        Ok(Self {
            bytes: &mut bytes[..required],
            size,
            format: PixelFormat::OUTPUT,
        })
    }

    #[inline]
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// 第 `y` 行的可写字节
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        assert!(y < self.size.height, "row {y} outside {:?}", self.size);
        let stride = self.size.stride();
        let start = y as usize * stride;
        &mut self.bytes[start..start + stride]
    }

    /// 整行填充同一颜色
    pub fn fill_row(&mut self, y: u32, pixel: u32) {
        let encoded = self.format.encode(pixel);
        for px in self.row_mut(y).chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&encoded);
        }
    }

    /// 把第 `src` 行复制到第 `dst` 行
    pub fn copy_row(&mut self, src: u32, dst: u32) {
        assert!(
            src < self.size.height && dst < self.size.height,
            "rows {src}->{dst} outside {:?}",
            self.size
        );
        let stride = self.size.stride();
        let from = src as usize * stride;
        self.bytes.copy_within(from..from + stride, dst as usize * stride);
    }

    /// 已写入的全部字节（`4 * width * height`）
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes
    }
}
