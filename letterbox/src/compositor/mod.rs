//! Compositor Domain
//!
//! 职责：把源图按整数倍最近邻放大，居中贴进目标帧，其余区域填黑
//!
//! 核心原则：
//! - 纯函数：输出只取决于 `(image, dest_width, dest_height)`
//! - 每次都重绘整帧，不做差分
//! - 只写 CPU 内存，不涉及 GPU
//!
//! 核心概念：
//! - `Letterbox`: 值对象，缩放倍数 + 留边
//! - `FrameView`: 带边界检查的目标视图
//! - `PixelFormat`: 输出像素格式（XRGB8888）
//!
//! 合成流程：
//!
//! ```text
//! Image (ARGB) ──┐
//!                ├─→ Letterbox::compute ─→ 逐行写入 FrameView
//! dest size ─────┘         │
//!                          └─ 同一源行放大出的 scale 行只算一次，其余整行复制
//! ```

pub mod frame_view;
pub mod letterbox;
pub mod pixel;

pub use frame_view::FrameView;
pub use letterbox::Letterbox;
pub use pixel::{over_black, PixelFormat, OPAQUE_BLACK};

use crate::domain::{Image, BYTES_PER_PIXEL};

/// 合成一帧，返回使用的布局
///
/// 目标尺寸取自 `frame.size()`，整块 `width * height` 像素都会被覆盖
pub fn composite(image: &Image, frame: &mut FrameView<'_>) -> Letterbox {
    let dest = frame.size();
    let layout = Letterbox::compute(image.size(), dest);
    let format = frame.format();

    let mut previous_source_row = None;
    for dy in 0..dest.height {
        let Some(sy) = layout.source_row(dest, dy) else {
            frame.fill_row(dy, OPAQUE_BLACK);
            previous_source_row = None;
            continue;
        };

        if previous_source_row == Some(sy) {
            frame.copy_row(dy - 1, dy);
            continue;
        }

        let source = image.row(sy);
        let row = frame.row_mut(dy);
        for (dx, px) in (0u32..).zip(row.chunks_exact_mut(BYTES_PER_PIXEL)) {
            let pixel = match layout.source_column(dest, dx) {
                Some(sx) => over_black(source[sx as usize]),
                None => OPAQUE_BLACK,
            };
            px.copy_from_slice(&format.encode(pixel));
        }
        previous_source_row = Some(sy);
    }

    layout
}
