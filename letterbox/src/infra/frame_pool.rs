//! FrameBufferPool - 只增不减的帧缓冲池
//!
//! 不变量：`capacity_bytes` 在池的整个生命周期内单调不减。
//! 请求的字节数不超过当前容量时不做任何重新分配。
//!
//! 增长可能让之前交给显示端的 buffer 失效，所以每次呈现都要用
//! 当前这次合成的 `(width, height, stride)` 重新描述 buffer。

use super::storage::SharedStorage;
use crate::error::ResourceError;

pub struct FrameBufferPool<S> {
    storage: S,
    capacity_bytes: usize,
}

impl<S: SharedStorage> FrameBufferPool<S> {
    /// 用空的存储创建池（容量取存储当前长度，通常为 0）
    pub fn new(storage: S) -> Self {
        let capacity_bytes = storage.len();
        Self {
            storage,
            capacity_bytes,
        }
    }

    /// 确保容量不少于 `bytes`，返回映射出的全部可写字节
    ///
    /// - `bytes <= capacity`：不做任何事
    /// - 否则：增长到恰好 `bytes`
    pub fn ensure_capacity(&mut self, bytes: usize) -> Result<&mut [u8], ResourceError> {
        if bytes > self.capacity_bytes {
            tracing::debug!(
                "[FramePool] grow {} -> {} bytes",
                self.capacity_bytes,
                bytes
            );
            self.storage.grow(bytes)?;
            self.capacity_bytes = bytes;
        }
        Ok(self.storage.bytes_mut())
    }

    /// 同步写入（呈现前调用）
    #[inline]
    pub fn flush(&self) -> Result<(), ResourceError> {
        self.storage.flush()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity_bytes
    }

    #[inline]
    pub fn storage(&self) -> &S {
        &self.storage
    }
}
