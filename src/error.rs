use thiserror::Error;

/// Everything that can go wrong while opening or querying an XDB file.
#[derive(Error, Debug)]
pub enum XdbError {
    #[error("invalid IP address")]
    InvalidAddress,

    #[error("key width does not match the engine's IP version")]
    VersionMismatch,

    #[error("unsupported XDB structure version")]
    UnsupportedStructure,

    #[error("file size exceeds the pointer width declared in the header")]
    FileTooLarge,

    #[error("failed to open the database file")]
    OpenFailed(#[source] std::io::Error),

    #[error("short read from the backing store")]
    ShortRead(#[source] std::io::Error),

    #[error("decode requested bytes past the end of the buffer")]
    ShortBuffer,

    #[error("engine is closed")]
    Closed,
}
