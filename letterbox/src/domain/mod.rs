//! Viewer Domain
//!
//! 职责：描述"要显示什么"和"窗口多大"
//!
//! 核心概念：
//! - `Image`: 值对象，解码后的源图，不可变
//! - `WindowSizeState`: 状态机，请求尺寸 + 上限 + 脏标记
//! - `Size<Space>`: 带坐标空间标记的尺寸（源图 / 表面）
//!
//! 本层不知道共享内存和显示协议的存在。

pub mod primitives;
pub mod image;
pub mod window_size;

pub use image::Image;
pub use primitives::{ImageSize, SurfaceSize, BYTES_PER_PIXEL, MAX_FRAME_BYTES, MAX_FRAME_PIXELS};
pub use window_size::{Dirty, WindowSizeState, UNBOUNDED};
