//! Presenter - 显示端接口
//!
//! 核心只通过两个调用与显示端交互：
//! - `present`: 用池里当前的内容描述一个 buffer 并 attach
//! - `commit`: 提交 surface
//!
//! 池可能在两次呈现之间增长，所以 `present` 同时带上池的当前容量，
//! 显示端据此决定是否需要扩大它那一侧的共享池。

use crate::compositor::PixelFormat;
use crate::domain::SurfaceSize;
use crate::error::ResourceError;

/// 可呈现 buffer 的描述
///
/// 只在 `for_frame` 中构造，保证 `offset + stride * height` 不超出池容量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferDescriptor {
    pub offset: usize,
    pub width: u32,
    pub height: u32,
    pub stride: usize,
    pub format: PixelFormat,
}

impl BufferDescriptor {
    /// 描述从池起始处开始、刚合成好的一帧
    pub fn for_frame(size: SurfaceSize, pool_capacity: usize) -> Result<Self, ResourceError> {
        let required = size.byte_len().ok_or(ResourceError::TooLarge {
            width: size.width,
            height: size.height,
        })?;
        if required > pool_capacity {
            return Err(ResourceError::FrameOutOfBounds {
                width: size.width,
                height: size.height,
                required,
                available: pool_capacity,
            });
        }
        Ok(Self {
            offset: 0,
            width: size.width,
            height: size.height,
            stride: size.stride(),
            format: PixelFormat::OUTPUT,
        })
    }

    /// buffer 覆盖的字节数
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.stride * self.height as usize
    }

    #[inline]
    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.width, self.height)
    }
}

/// 显示端
pub trait Presenter {
    /// attach 一个覆盖 `buffer` 的显示 buffer，`pool_bytes` 为池当前容量
    fn present(&mut self, buffer: &BufferDescriptor, pool_bytes: usize)
        -> Result<(), ResourceError>;

    /// 提交 surface
    fn commit(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_for_frame() {
        let desc = BufferDescriptor::for_frame(SurfaceSize::new(10, 4), 1000).unwrap();
        assert_eq!(desc.offset, 0);
        assert_eq!(desc.stride, 40);
        assert_eq!(desc.byte_len(), 160);
        assert_eq!(desc.format, PixelFormat::Xrgb8888);
        assert_eq!(desc.size(), SurfaceSize::new(10, 4));
    }

    /// 测试：池容量不足时拒绝描述（不能让显示端读到映射区之外）
    #[test]
    fn test_descriptor_rejects_frame_larger_than_pool() {
        let err = BufferDescriptor::for_frame(SurfaceSize::new(10, 4), 159).unwrap_err();
        assert!(matches!(
            err,
            ResourceError::FrameOutOfBounds {
                required: 160,
                available: 159,
                ..
            }
        ));
    }
}
