//! Byte sources for LWO data.
//!
//! The decoder only needs random access into a fully resident buffer, so a
//! source is anything that can hand out bounded slices. Files are either
//! memory-mapped or read into memory up front.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use memmap2::Mmap;

use super::format::HEADER_SIZE;
use crate::util::{Error, Result};

/// Random-access supplier of bytes.
pub trait ByteSource {
    /// Total number of bytes available.
    fn total_size(&self) -> u64;

    /// Borrow `len` bytes starting at `offset`.
    ///
    /// Fails with [`Error::UnexpectedEof`] if the range runs past the end.
    fn slice_at(&self, offset: u64, len: usize) -> Result<&[u8]>;
}

fn bounded(data: &[u8], offset: u64, len: usize) -> Result<&[u8]> {
    let end = offset
        .checked_add(len as u64)
        .ok_or(Error::UnexpectedEof(u64::MAX))?;
    if end > data.len() as u64 {
        return Err(Error::UnexpectedEof(end));
    }
    Ok(&data[offset as usize..end as usize])
}

impl ByteSource for [u8] {
    fn total_size(&self) -> u64 {
        self.len() as u64
    }

    fn slice_at(&self, offset: u64, len: usize) -> Result<&[u8]> {
        bounded(self, offset, len)
    }
}

impl ByteSource for Vec<u8> {
    fn total_size(&self) -> u64 {
        self.len() as u64
    }

    fn slice_at(&self, offset: u64, len: usize) -> Result<&[u8]> {
        bounded(self, offset, len)
    }
}

/// Input stream for reading LWO data.
/// Supports both memory-mapped and buffered I/O modes.
pub struct IStreams {
    inner: StreamsInner,
}

enum StreamsInner {
    /// Memory-mapped file (preferred for large files)
    Mmap(Mmap),
    /// Whole file read into memory
    Buffered(Vec<u8>),
}

impl IStreams {
    /// Open a file for reading, memory-mapped when the `mmap` feature is on.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_opts(path, cfg!(feature = "mmap"))
    }

    /// Open a file with optional memory mapping.
    pub fn open_opts(path: impl AsRef<Path>, use_mmap: bool) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;

        let size = file.metadata()?.len();
        if size < HEADER_SIZE as u64 {
            return Err(Error::UnexpectedEof(size));
        }

        let inner = if use_mmap {
            // Safety: file is opened read-only and the map lives as long as self
            let mmap = unsafe { Mmap::map(&file) }.map_err(|e| Error::MmapFailed(e.to_string()))?;
            StreamsInner::Mmap(mmap)
        } else {
            let mut buf = Vec::with_capacity(size as usize);
            file.read_to_end(&mut buf)?;
            StreamsInner::Buffered(buf)
        };

        tracing::debug!(path = %path.display(), size, use_mmap, "opened LWO source");
        Ok(Self { inner })
    }

    /// Wrap bytes that are already in memory.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { inner: StreamsInner::Buffered(data) }
    }

    /// True when backed by a memory map.
    #[inline]
    pub fn is_mmap(&self) -> bool {
        matches!(self.inner, StreamsInner::Mmap(_))
    }

    /// Get the total size.
    #[inline]
    pub fn size(&self) -> u64 {
        self.as_bytes().len() as u64
    }

    /// The whole source as one slice.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.inner {
            StreamsInner::Mmap(mmap) => &mmap[..],
            StreamsInner::Buffered(buf) => &buf[..],
        }
    }
}

impl ByteSource for IStreams {
    fn total_size(&self) -> u64 {
        self.size()
    }

    fn slice_at(&self, offset: u64, len: usize) -> Result<&[u8]> {
        bounded(self.as_bytes(), offset, len)
    }
}

impl std::fmt::Debug for IStreams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IStreams")
            .field("mmap", &self.is_mmap())
            .field("size", &self.size())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_slice_bounds() {
        let data: Vec<u8> = (0u8..16).collect();
        assert_eq!(data.total_size(), 16);
        assert_eq!(data.slice_at(4, 3).unwrap(), &[4, 5, 6]);
        assert_eq!(data.slice_at(16, 0).unwrap(), &[] as &[u8]);
        assert!(matches!(data.slice_at(14, 3), Err(Error::UnexpectedEof(17))));
        assert!(data.slice_at(u64::MAX, 2).is_err());

        let slice: &[u8] = &data[..8];
        assert!(slice.slice_at(6, 4).is_err());
    }

    #[test]
    fn test_open_missing_file() {
        let err = IStreams::open("/definitely/not/here.lwo").unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }

    #[test]
    fn test_open_modes() -> Result<()> {
        let mut tmp = tempfile::NamedTempFile::new()?;
        tmp.write_all(b"FORM\0\0\0\x04LWO2")?;
        tmp.flush()?;

        for use_mmap in [true, false] {
            let streams = IStreams::open_opts(tmp.path(), use_mmap)?;
            assert_eq!(streams.is_mmap(), use_mmap);
            assert_eq!(streams.total_size(), 12);
            assert_eq!(streams.slice_at(8, 4)?, b"LWO2");
        }
        Ok(())
    }

    #[test]
    fn test_open_too_small() -> Result<()> {
        let mut tmp = tempfile::NamedTempFile::new()?;
        tmp.write_all(b"FORM")?;
        tmp.flush()?;
        assert!(matches!(IStreams::open_opts(tmp.path(), false), Err(Error::UnexpectedEof(4))));
        Ok(())
    }
}
