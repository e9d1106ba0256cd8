//! Error types for WARC parsing

use thiserror::Error;

/// Result type for WARC operations
pub type Result<T> = std::result::Result<T, Error>;

/// WARC error types
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record did not start with a `WARC/` version line
    #[error("Invalid WARC version line: {0:?}")]
    InvalidVersion(String),

    /// Header line without a `name: value` separator
    #[error("Invalid WARC header line: {0:?}")]
    InvalidHeaderLine(String),

    /// Record has no Content-Length header
    #[error("Record is missing a Content-Length header")]
    MissingContentLength,

    /// Content-Length header is not a valid length
    #[error("Invalid Content-Length: {0:?}")]
    InvalidContentLength(String),

    /// Record body ended before the declared length
    #[error("Record body truncated: expected {expected} bytes")]
    Truncated { expected: usize },

    /// The stream ended in the middle of a record
    #[error("Unexpected end of stream while reading {0}")]
    UnexpectedEof(&'static str),
}
