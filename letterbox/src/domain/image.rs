//! Image - 解码后的源图（不可变）
//!
//! 像素按行主序存储为打包的 ARGB8888（`0xAARRGGBB`），进程生命周期内不变。
//! 解码本身交给 `image` crate：任何格式都先归一化为 8 位 RGBA
//! （灰度展开、16 位缩减、缺失的 alpha 补 0xFF），再打包成 ARGB。

use std::path::Path;

use super::primitives::ImageSize;
use crate::error::DecodeError;

/// 源图
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    size: ImageSize,
    pixels: Vec<u32>,
}

impl Image {
    /// 从打包好的 ARGB 像素构造
    ///
    /// 宽高必须非零，`pixels.len()` 必须等于 `width * height`
    pub fn from_argb(width: u32, height: u32, pixels: Vec<u32>) -> Result<Self, DecodeError> {
        if width == 0 || height == 0 {
            return Err(DecodeError::Empty { width, height });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(DecodeError::Length {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            size: ImageSize::new(width, height),
            pixels,
        })
    }

    /// 从 RGBA8 字节流构造（每像素 4 字节，R G B A 顺序）
    pub fn from_rgba8(width: u32, height: u32, rgba: &[u8]) -> Result<Self, DecodeError> {
        // 不完整的尾部像素不能被 chunks_exact 悄悄丢掉
        if rgba.len() % 4 != 0 {
            return Err(DecodeError::Length {
                width,
                height,
                expected: width as usize * height as usize,
                actual: rgba.len() / 4,
            });
        }
        let pixels = rgba
            .chunks_exact(4)
            .map(|px| u32::from_be_bytes([px[3], px[0], px[1], px[2]]))
            .collect::<Vec<_>>();
        Self::from_argb(width, height, pixels)
    }

    /// 读取并解码图像文件
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DecodeError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| DecodeError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::decode(&bytes)
    }

    /// 解码内存中的图像数据（格式由内容探测）
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let decoded = image_rs::load_from_memory(bytes)?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        let image = Self::from_rgba8(width, height, rgba.as_raw())?;
        tracing::info!("[Image] decoded {:?}", image.size);
        Ok(image)
    }

    #[inline]
    pub fn size(&self) -> ImageSize {
        self.size
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// 行主序的全部像素
    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// 取第 `y` 行
    #[inline]
    pub fn row(&self, y: u32) -> &[u32] {
        let width = self.size.width as usize;
        let start = y as usize * width;
        &self.pixels[start..start + width]
    }

    /// 取单个像素（越界 panic）
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        self.row(y)[x as usize]
    }
}
