//! Backing store abstraction: three interchangeable ways to answer
//! `read(offset, len)`, plus a fast path for vector-index cells that two
//! of the three variants can serve without touching the file at all.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::codec::u32_le;
use crate::error::XdbError;
use crate::header::{HEADER_SIZE, VECTOR_INDEX_OFFSET, VECTOR_INDEX_SIZE};
use crate::vector::cell_offset;

/// Uniform read contract shared by all three backing-store variants.
///
/// `read`/`vector_cell` take `&mut self` because the file-backed variants
/// carry a seek position and a per-query I/O counter; callers must not
/// share one store across threads without external synchronization
/// (`spec.md` §5).
pub trait Store {
    fn read(&mut self, offset: u64, len: usize) -> Result<Vec<u8>, XdbError>;

    /// Number of I/O operations issued against the backing file since the
    /// last `reset_io_count`.
    fn io_count(&self) -> u32;

    /// Reset the per-query I/O counter; called at the start of every
    /// query so it reports per-query cost.
    fn reset_io_count(&mut self);

    /// Total size of the underlying file/buffer, in bytes.
    fn len(&self) -> u64;

    /// Approximate resident memory this store holds beyond the file
    /// itself (0 for file-only, the vector-index size for
    /// vector-index-preloaded, the full file size for fully-buffered).
    /// Exists only as the minimal interface an external memory-usage
    /// accessor would consume (`spec.md` §1); not a statistics subsystem.
    fn resident_bytes(&self) -> u64;

    /// Release any held file handle. Idempotent.
    fn close(&mut self) -> Result<(), XdbError>;

    /// Look up a vector-index cell `(i, j)`, returning `(sPtr, ePtr)`.
    /// The default implementation goes through `read`; stores that can
    /// answer without general I/O override it.
    fn vector_cell(&mut self, i: u8, j: u8) -> Result<(u32, u32), XdbError> {
        let buf = self.read(cell_offset(i, j), 8)?;
        Ok((u32_le(&buf, 0)?, u32_le(&buf, 4)?))
    }
}

/// Construction-time opens map their own I/O errors directly to
/// `OpenFailed`; this covers the query-time case, where a failed seek is
/// operationally indistinguishable from a failed read (`SPEC_FULL.md` §7).
fn io_error_to_xdb(err: std::io::Error) -> XdbError {
    XdbError::ShortRead(err)
}

/// File-only store: every read issues a seek + read_exact and increments
/// the I/O counter. No data is preloaded.
pub struct FileStore {
    file: Option<File>,
    size: u64,
    io_count: u32,
}

impl FileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, XdbError> {
        let file = File::open(path).map_err(XdbError::OpenFailed)?;
        let size = file.metadata().map_err(XdbError::OpenFailed)?.len();
        Ok(Self {
            file: Some(file),
            size,
            io_count: 0,
        })
    }

    fn file_mut(&mut self) -> Result<&mut File, XdbError> {
        self.file.as_mut().ok_or(XdbError::Closed)
    }

    fn read_at(&mut self, offset: u64, len: usize) -> Result<Vec<u8>, XdbError> {
        let file = self.file_mut()?;
        file.seek(SeekFrom::Start(offset))
            .map_err(io_error_to_xdb)?;
        let mut buf = vec![0u8; len];
        file.read_exact(&mut buf)
            .map_err(io_error_to_xdb)?;
        self.io_count += 1;
        Ok(buf)
    }
}

impl Store for FileStore {
    fn read(&mut self, offset: u64, len: usize) -> Result<Vec<u8>, XdbError> {
        self.read_at(offset, len)
    }

    fn io_count(&self) -> u32 {
        self.io_count
    }

    fn reset_io_count(&mut self) {
        self.io_count = 0;
    }

    fn len(&self) -> u64 {
        self.size
    }

    fn resident_bytes(&self) -> u64 {
        0
    }

    fn close(&mut self) -> Result<(), XdbError> {
        self.file = None;
        Ok(())
    }
}

/// File store with a caller-preloaded vector index: general reads still
/// hit the file, but `vector_cell` is served from the preloaded slice
/// without I/O or counting.
pub struct VectorIndexStore {
    inner: FileStore,
    vector_index: Vec<u8>,
}

impl VectorIndexStore {
    pub fn open(path: impl AsRef<Path>, vector_index: Vec<u8>) -> Result<Self, XdbError> {
        if vector_index.len() != VECTOR_INDEX_SIZE {
            return Err(XdbError::ShortBuffer);
        }
        Ok(Self {
            inner: FileStore::open(path)?,
            vector_index,
        })
    }
}

impl Store for VectorIndexStore {
    fn read(&mut self, offset: u64, len: usize) -> Result<Vec<u8>, XdbError> {
        self.inner.read(offset, len)
    }

    fn io_count(&self) -> u32 {
        self.inner.io_count()
    }

    fn reset_io_count(&mut self) {
        self.inner.reset_io_count();
    }

    fn len(&self) -> u64 {
        self.inner.len()
    }

    fn resident_bytes(&self) -> u64 {
        self.vector_index.len() as u64
    }

    fn close(&mut self) -> Result<(), XdbError> {
        self.inner.close()
    }

    fn vector_cell(&mut self, i: u8, j: u8) -> Result<(u32, u32), XdbError> {
        let start = cell_offset(i, j) - VECTOR_INDEX_OFFSET;
        let start = start as usize;
        let buf = self
            .vector_index
            .get(start..start + 8)
            .ok_or(XdbError::ShortBuffer)?;
        Ok((u32_le(buf, 0)?, u32_le(buf, 4)?))
    }
}

/// Fully-buffered store: the whole file is resident; every read is a
/// bounded slice. The I/O counter never moves off zero.
pub struct BufferStore {
    buffer: Vec<u8>,
    closed: bool,
}

impl BufferStore {
    pub fn new(buffer: Vec<u8>) -> Self {
        Self {
            buffer,
            closed: false,
        }
    }
}

impl Store for BufferStore {
    fn read(&mut self, offset: u64, len: usize) -> Result<Vec<u8>, XdbError> {
        if self.closed {
            return Err(XdbError::Closed);
        }
        let start = usize::try_from(offset).map_err(|_| XdbError::ShortBuffer)?;
        let end = start.checked_add(len).ok_or(XdbError::ShortBuffer)?;
        self.buffer
            .get(start..end)
            .map(|s| s.to_vec())
            .ok_or(XdbError::ShortBuffer)
    }

    fn io_count(&self) -> u32 {
        0
    }

    fn reset_io_count(&mut self) {}

    fn len(&self) -> u64 {
        self.buffer.len() as u64
    }

    fn resident_bytes(&self) -> u64 {
        self.buffer.len() as u64
    }

    fn close(&mut self) -> Result<(), XdbError> {
        self.closed = true;
        Ok(())
    }
}
