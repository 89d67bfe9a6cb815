//! MemfdStorage - 基于 memfd 的共享内存
//!
//! 匿名文件（`memfd_create(MFD_CLOEXEC)`）+ `MAP_SHARED` 映射。
//! 文件描述符交给显示端（`wl_shm.create_pool`），双方映射同一块内存。
//!
//! 增长：先 `ftruncate` 到新长度，再整体重新映射。旧映射在新映射成功后释放。

use std::ffi::CString;
use std::fs::File;
use std::io;
use std::os::fd::{FromRawFd, OwnedFd};

use memmap2::{MmapMut, MmapOptions};

use super::storage::SharedStorage;
use crate::error::ResourceError;

pub struct MemfdStorage {
    file: File,
    map: Option<MmapMut>,
    len: usize,
}

impl MemfdStorage {
    /// 创建空的 memfd（长度 0，尚未映射）
    pub fn new(name: &str) -> Result<Self, ResourceError> {
        let name = CString::new(name).map_err(|e| {
            ResourceError::Create(io::Error::new(io::ErrorKind::InvalidInput, e))
        })?;

        // SAFETY: `name` 是以 NUL 结尾的有效 C 字符串，调用期间一直存活
        let fd = unsafe { libc::memfd_create(name.as_ptr(), libc::MFD_CLOEXEC) };
        if fd < 0 {
            return Err(ResourceError::Create(io::Error::last_os_error()));
        }

        // SAFETY: fd 刚由 memfd_create 返回，有效且没有其他所有者
        let file = unsafe { File::from_raw_fd(fd) };
        tracing::debug!("[Memfd] created fd={}", fd);

        Ok(Self {
            file,
            map: None,
            len: 0,
        })
    }

    /// 复制一份描述符，由显示会话独立持有
    pub fn try_clone_fd(&self) -> Result<OwnedFd, ResourceError> {
        self.file
            .try_clone()
            .map(OwnedFd::from)
            .map_err(ResourceError::Create)
    }
}

impl SharedStorage for MemfdStorage {
    fn grow(&mut self, new_len: usize) -> Result<(), ResourceError> {
        self.file
            .set_len(new_len as u64)
            .map_err(|source| ResourceError::Grow {
                bytes: new_len,
                source,
            })?;

        // SAFETY: memfd 只被本进程和显示端映射，显示端只读；
        // 本进程对这块内存的访问全部经过 `self.map`
        let map = unsafe { MmapOptions::new().len(new_len).map_mut(&self.file) }
            .map_err(ResourceError::Map)?;

        self.map = Some(map);
        self.len = new_len;
        Ok(())
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        match self.map.as_mut() {
            Some(map) => &mut map[..],
            None => &mut [],
        }
    }

    fn flush(&self) -> Result<(), ResourceError> {
        if let Some(map) = &self.map {
            map.flush().map_err(ResourceError::Flush)?;
        }
        Ok(())
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memfd_starts_empty() {
        let mut storage = MemfdStorage::new("letterbox-test").unwrap();
        assert!(storage.is_empty());
        assert!(storage.bytes_mut().is_empty());
        storage.flush().unwrap();
    }

    #[test]
    fn test_memfd_grow_keeps_contents() {
        let mut storage = MemfdStorage::new("letterbox-test").unwrap();
        storage.grow(4096).unwrap();
        storage.bytes_mut()[..3].copy_from_slice(&[7, 8, 9]);
        storage.flush().unwrap();

        storage.grow(8192).unwrap();
        assert_eq!(storage.len(), 8192);
        assert_eq!(&storage.bytes_mut()[..3], &[7, 8, 9]);
    }

    /// 测试：通过另一个描述符映射能看到同一份数据（模拟显示端）
    #[test]
    fn test_memfd_is_shared_across_descriptors() {
        let mut storage = MemfdStorage::new("letterbox-test").unwrap();
        storage.grow(64).unwrap();
        storage.bytes_mut()[10] = 0x5A;
        storage.flush().unwrap();

        let other = File::from(storage.try_clone_fd().unwrap());
        let view = unsafe { MmapOptions::new().len(64).map(&other) }.unwrap();
        assert_eq!(view[10], 0x5A);
    }

    #[test]
    fn test_name_with_nul_is_rejected() {
        let err = MemfdStorage::new("bad\0name").err().unwrap();
        assert!(matches!(err, ResourceError::Create(_)));
    }
}
