//! A pure-Rust reader for the XDB IP-region index format: a binary file
//! mapping IPv4 or IPv6 addresses to geographic regions, built around a
//! two-byte vector-index prefilter and a bounded binary search over a
//! sorted segment index.
//!
//! Three construction styles trade memory footprint for I/O:
//! [`XdbSearcher::open`] touches the file on every read,
//! [`XdbSearcher::open_with_vector_index`] preloads just the 512 KiB
//! vector index, and [`XdbSearcher::open_with_buffer`] keeps the whole
//! file resident. All three answer identical queries identically.
//!
//! ```no_run
//! use xdb::{IpVersion, XdbSearcher};
//!
//! let mut engine = XdbSearcher::open(IpVersion::V4, "ip2region.xdb")?;
//! let region = engine.search_text("1.2.3.4")?;
//! # Ok::<(), xdb::XdbError>(())
//! ```

mod codec;
mod error;
mod header;
mod ip;
mod searcher;
mod segment;
mod store;
mod vector;
mod version;

pub use error::XdbError;
pub use header::{Header, HEADER_SIZE, VECTOR_INDEX_SIZE};
pub use ip::{parse_ip, IpKey};
pub use searcher::XdbSearcher;
pub use store::{BufferStore, FileStore, Store, VectorIndexStore};
pub use version::IpVersion;
