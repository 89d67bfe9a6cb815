//! 帧缓冲的底层存储
//!
//! 帧缓冲池只依赖这个 trait：
//! - `MemfdStorage`（Linux）：memfd + mmap，与显示端共享
//! - `HeapStorage`：进程内 Vec，用于测试和离屏合成

use crate::error::ResourceError;

/// 可增长的字节存储
///
/// 实现只需要支持"增长到恰好 `new_len` 字节"，池保证不会传入更小的值。
/// 增长后旧区间之外的内容未定义，下一次整帧合成会全部覆盖。
pub trait SharedStorage {
    /// 增长到 `new_len` 字节（可以重新映射）
    fn grow(&mut self, new_len: usize) -> Result<(), ResourceError>;

    /// 当前映射的全部字节
    fn bytes_mut(&mut self) -> &mut [u8];

    /// 同步写入，保证显示端随后读取时能看到完整的帧
    fn flush(&self) -> Result<(), ResourceError>;

    /// 当前大小
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 进程内存储
#[derive(Debug, Default)]
pub struct HeapStorage {
    bytes: Vec<u8>,
    /// 增长次数（测试用来确认没有多余的重新分配）
    grow_count: usize,
}

impl HeapStorage {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn grow_count(&self) -> usize {
        self.grow_count
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl SharedStorage for HeapStorage {
    fn grow(&mut self, new_len: usize) -> Result<(), ResourceError> {
        let additional = new_len.saturating_sub(self.bytes.len());
        self.bytes
            .try_reserve_exact(additional)
            .map_err(|e| ResourceError::Grow {
                bytes: new_len,
                source: std::io::Error::new(std::io::ErrorKind::OutOfMemory, e),
            })?;
        self.bytes.resize(new_len, 0);
        self.grow_count += 1;
        Ok(())
    }

    #[inline]
    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    #[inline]
    fn flush(&self) -> Result<(), ResourceError> {
        Ok(())
    }

    #[inline]
    fn len(&self) -> usize {
        self.bytes.len()
    }
}
