//! Letterbox - 整数缩放 + 居中留边的几何计算
//!
//! 比较 `dest_w / dest_h` 与 `image_w / image_h` 决定受限维度：
//! - 目标更"宽"：高度受限，倍数取 `dest_h / image_h`，主要留边在左右
//! - 否则：宽度受限，倍数取 `dest_w / image_w`，主要留边在上下
//!
//! 两个方向的余量都对半分：受限维度也可能剩下不足一个倍数的余量，
//! 这部分同样居中，整张图始终落在目标正中。
//!
//! 比较用 u64 交叉相乘（`dest_w * image_h > image_w * dest_h`），
//! 是精确的有理数比较，不存在浮点误差导致的分支抖动。

use std::ops::Range;

use crate::domain::{ImageSize, SurfaceSize};

/// 一次合成的布局
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Letterbox {
    /// 整数缩放倍数（>= 1）
    pub scale: u32,
    /// 左侧留边（右侧留边可能多 1 像素）
    pub x_padding: u32,
    /// 上方留边（下方留边可能多 1 像素）
    pub y_padding: u32,
    /// 放大后图像占据的区域尺寸
    pub interior: SurfaceSize,
}

impl Letterbox {
    /// 计算布局
    ///
    /// `dest` 应当已经不小于源图（由 `WindowSizeState` 保证）。
    /// 若不满足，倍数取 1、留边取 0，超出部分在合成时被裁掉。
    pub fn compute(image: ImageSize, dest: SurfaceSize) -> Self {
        let (iw, ih) = (image.width as u64, image.height as u64);
        let (dw, dh) = (dest.width as u64, dest.height as u64);

        // 分母为 0 视为该分支不成立
        let height_limited = dh != 0 && ih != 0 && dw * ih > iw * dh;

        let scale = if height_limited {
            dh / ih
        } else {
            dw.checked_div(iw).unwrap_or(1)
        }
        .max(1);

        // 受限维度的整除余量（< 源图该维尺寸）同样居中分配
        let x_padding = dw.saturating_sub(iw * scale) / 2;
        let y_padding = dh.saturating_sub(ih * scale) / 2;

        // dest >= image 时 interior <= dest；否则 scale = 1，interior = image
        let interior = SurfaceSize::new((iw * scale) as u32, (ih * scale) as u32);

        Self {
            scale: scale as u32,
            x_padding: x_padding as u32,
            y_padding: y_padding as u32,
            interior,
        }
    }

    /// 图像占据的列区间（已按 `dest` 裁剪）
    pub fn columns(&self, dest: SurfaceSize) -> Range<u32> {
        let end = self.x_padding.saturating_add(self.interior.width);
        self.x_padding.min(dest.width)..end.min(dest.width)
    }

    /// 图像占据的行区间（已按 `dest` 裁剪）
    pub fn rows(&self, dest: SurfaceSize) -> Range<u32> {
        let end = self.y_padding.saturating_add(self.interior.height);
        self.y_padding.min(dest.height)..end.min(dest.height)
    }

    /// 右侧留边宽度
    pub fn right_padding(&self, dest: SurfaceSize) -> u32 {
        dest.width.saturating_sub(self.x_padding + self.interior.width)
    }

    /// 下方留边高度
    pub fn bottom_padding(&self, dest: SurfaceSize) -> u32 {
        dest.height.saturating_sub(self.y_padding + self.interior.height)
    }

    /// 目标列 `dx` 对应的源图列（落在留边上时为 `None`）
    #[inline]
    pub fn source_column(&self, dest: SurfaceSize, dx: u32) -> Option<u32> {
        self.columns(dest)
            .contains(&dx)
            .then(|| (dx - self.x_padding) / self.scale)
    }

    /// 目标行 `dy` 对应的源图行（落在留边上时为 `None`）
    #[inline]
    pub fn source_row(&self, dest: SurfaceSize, dy: u32) -> Option<u32> {
        self.rows(dest)
            .contains(&dy)
            .then(|| (dy - self.y_padding) / self.scale)
    }
}
