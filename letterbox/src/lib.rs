//! letterbox
//!
//! 尺寸驱动的合成引擎：把一张解码后的图片按整数倍最近邻放大、
//! 居中、黑边填充，写进只增不减的共享帧缓冲，交给显示端呈现。
//!
//! ```text
//! ┌──────────┐   ┌──────────────┐   ┌────────────┐   ┌───────────┐
//! │  Image   │──→│ WindowSize   │──→│ composite  │──→│ FramePool │──→ Presenter
//! │ (domain) │   │ State(domain)│   │(compositor)│   │  (infra)  │    (app)
//! └──────────┘   └──────────────┘   └────────────┘   └───────────┘
//! ```

pub mod app;
pub mod compositor;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;

pub use app::{
    BufferDescriptor, Control, DisplayEvent, DriverStats, EventQueue, PresentationDriver,
    Presenter,
};
pub use compositor::{composite, FrameView, Letterbox, PixelFormat};
pub use config::ViewerConfig;
pub use domain::{Image, ImageSize, SurfaceSize, WindowSizeState};
pub use error::{DecodeError, Error, ResourceError, Result};
pub use infra::{FrameBufferPool, HeapStorage, SharedStorage};

#[cfg(target_os = "linux")]
pub use infra::MemfdStorage;
