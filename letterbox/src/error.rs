//! 错误类型
//!
//! - `DecodeError`: 图像无法加载/解码（致命，进入事件循环前退出）
//! - `ResourceError`: 共享内存无法增长/映射（致命，不允许呈现半帧）
//!
//! 协议层的非法数值（负尺寸等）不在这里：它们由 `WindowSizeState` 就地
//! 钳制并记录 warn 日志，永远不会向上传播。

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to read image {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode image: {0}")]
    Format(#[from] image_rs::ImageError),

    #[error("image has an empty dimension ({width}x{height})")]
    Empty { width: u32, height: u32 },

    #[error("pixel data holds {actual} entries, expected {expected} for {width}x{height}")]
    Length {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("failed to create shared memory: {0}")]
    Create(#[source] io::Error),

    #[error("failed to grow shared memory to {bytes} bytes: {source}")]
    Grow {
        bytes: usize,
        #[source]
        source: io::Error,
    },

    #[error("failed to map shared memory: {0}")]
    Map(#[source] io::Error),

    #[error("failed to flush shared memory: {0}")]
    Flush(#[source] io::Error),

    #[error("a {width}x{height} frame does not fit the addressable range")]
    TooLarge { width: u32, height: u32 },

    #[error("a {width}x{height} frame needs {required} bytes but only {available} are mapped")]
    FrameOutOfBounds {
        width: u32,
        height: u32,
        required: usize,
        available: usize,
    },
}

/// 核心层统一错误
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Resource(#[from] ResourceError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
