//! Infrastructure Layer - 基础设施层
//!
//! 职责：提供帧缓冲的底层内存
//!
//! 模块：
//! - storage: 存储 trait + 进程内实现
//! - memfd: memfd 共享内存（Linux）
//! - frame_pool: 只增不减的帧缓冲池

pub mod storage;
pub mod frame_pool;

#[cfg(target_os = "linux")]
pub mod memfd;

pub use frame_pool::FrameBufferPool;
pub use storage::{HeapStorage, SharedStorage};

#[cfg(target_os = "linux")]
pub use memfd::MemfdStorage;
