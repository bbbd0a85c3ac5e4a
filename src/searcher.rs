//! Search façade: orchestrates header → vector index → segment binary
//! search → payload read behind three construction styles.

use std::path::Path;

use crate::error::XdbError;
use crate::header::{decode_header, verify, Header, HEADER_SIZE};
use crate::ip::parse_ip;
use crate::segment;
use crate::store::{BufferStore, FileStore, Store, VectorIndexStore};
use crate::version::IpVersion;

/// A constructed, ready-to-query XDB engine.
///
/// One engine owns one backing store and is read-only after
/// construction: nothing mutates between queries except the per-query
/// I/O counter (`spec.md` §4.8).
pub struct XdbSearcher {
    store: Box<dyn Store>,
    header: Header,
    version: IpVersion,
    closed: bool,
}

impl XdbSearcher {
    /// Open a file-only engine: every read seeks and reads the file
    /// directly, counting each one.
    pub fn open(version: IpVersion, path: impl AsRef<Path>) -> Result<Self, XdbError> {
        let mut store = FileStore::open(path)?;
        let header = Self::read_and_verify(&mut store)?;
        Ok(Self::assemble(store, header, version))
    }

    /// Open a file-backed engine with a caller-preloaded vector index:
    /// vector-cell lookups are served from `vector_index` without I/O.
    pub fn open_with_vector_index(
        version: IpVersion,
        path: impl AsRef<Path>,
        vector_index: Vec<u8>,
    ) -> Result<Self, XdbError> {
        let mut store = VectorIndexStore::open(path, vector_index)?;
        let header = Self::read_and_verify(&mut store)?;
        Ok(Self::assemble(store, header, version))
    }

    /// Open a fully-buffered engine: `content` is the entire file,
    /// already resident; no file handle is held.
    pub fn open_with_buffer(version: IpVersion, content: Vec<u8>) -> Result<Self, XdbError> {
        let mut store = BufferStore::new(content);
        let header = Self::read_and_verify(&mut store)?;
        Ok(Self::assemble(store, header, version))
    }

    fn read_and_verify(store: &mut dyn Store) -> Result<Header, XdbError> {
        let raw = store.read(0, HEADER_SIZE)?;
        let header = decode_header(&raw)?;
        verify(&header, store.len())?;
        Ok(header)
    }

    fn assemble(store: impl Store + 'static, header: Header, version: IpVersion) -> Self {
        log::debug!(
            "opened xdb engine: structure_version={} declared_ip_version={:?} requested_version={:?}",
            header.structure_version,
            header.effective_ip_version(),
            version
        );
        Self {
            store: Box::new(store),
            header,
            version,
            closed: false,
        }
    }

    /// Parse `ip_text`, verify it matches this engine's version, and
    /// search. Returns the opaque region payload, empty on a
    /// well-formed miss.
    pub fn search_text(&mut self, ip_text: &str) -> Result<Vec<u8>, XdbError> {
        self.ensure_open()?;
        let key = parse_ip(ip_text)?;
        if key.version() != self.version {
            return Err(XdbError::VersionMismatch);
        }
        self.search_bytes(key.as_bytes())
    }

    /// Search with an already-parsed key of exactly this engine's key
    /// width. Returns the opaque region payload, empty on a
    /// well-formed miss.
    pub fn search_bytes(&mut self, key: &[u8]) -> Result<Vec<u8>, XdbError> {
        self.ensure_open()?;

        if key.len() != self.version.key_bytes() {
            return Err(XdbError::VersionMismatch);
        }
        if self.header.effective_ip_version() != Some(self.version) {
            log::warn!(
                "engine opened as {:?} but file declares {:?}",
                self.version,
                self.header.effective_ip_version()
            );
            return Err(XdbError::VersionMismatch);
        }

        self.store.reset_io_count();

        let (s_ptr, e_ptr) = self.store.vector_cell(key[0], key[1])?;
        if s_ptr == e_ptr {
            return Ok(Vec::new());
        }

        let hit = segment::search(self.store.as_mut(), self.version, key, s_ptr, e_ptr)?;
        match hit {
            Some(hit) if hit.data_len > 0 => {
                self.store.read(hit.data_ptr as u64, hit.data_len as usize)
            }
            _ => Ok(Vec::new()),
        }
    }

    /// I/O operations issued against the backing file during the most
    /// recent query. Always 0 for the fully-buffered store.
    pub fn io_count(&self) -> u32 {
        self.store.io_count()
    }

    /// Approximate resident memory held by the backing store beyond the
    /// file itself.
    pub fn resident_bytes(&self) -> u64 {
        self.store.resident_bytes()
    }

    /// Release the underlying file handle, if any. Idempotent; any
    /// operation afterwards fails with `XdbError::Closed`.
    pub fn close(&mut self) -> Result<(), XdbError> {
        if self.closed {
            return Ok(());
        }
        log::debug!("closing xdb engine");
        self.store.close()?;
        self.closed = true;
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), XdbError> {
        if self.closed {
            Err(XdbError::Closed)
        } else {
            Ok(())
        }
    }
}

impl Drop for XdbSearcher {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
