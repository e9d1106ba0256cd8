//! Error types for ASH0 decoding

use thiserror::Error;

/// Result type for ASH0 operations
pub type Result<T> = std::result::Result<T, Error>;

/// ASH0 error types
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid ASH0 magic bytes
    #[error("Invalid ASH0 magic: expected 'ASH0', got {0:?}")]
    InvalidMagic([u8; 4]),

    /// Truncated data
    #[error("Truncated data: expected {expected} bytes, got {actual}")]
    TruncatedData { expected: usize, actual: usize },

    /// Header fields are out of range for the stream
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// A bit stream ended before decoding completed
    #[error("Bit stream exhausted mid-decode")]
    BitstreamExhausted,

    /// The serialized code tree is malformed
    #[error("Corrupt code tree: {0}")]
    CorruptTree(String),

    /// A back-reference points before the start of the output
    #[error("Back-reference distance {distance} exceeds {available} bytes of output")]
    InvalidBackreference { distance: usize, available: usize },

    /// A match would overrun the declared decompressed size
    #[error("Output overrun: {produced} bytes produced, {declared} declared")]
    OutputOverrun { declared: usize, produced: usize },
}
