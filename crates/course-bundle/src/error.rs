//! Error types for bundle splitting and repackaging

use thiserror::Error;

/// Result type for bundle operations
pub type Result<T> = std::result::Result<T, Error>;

/// Bundle error types
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload contains no bundle marker at all
    #[error("No ASH0 bundle marker found in payload")]
    MarkerNotFound,

    /// The payload split into the wrong number of segments
    #[error("Expected 4 bundle segments, found {found}")]
    SegmentCount { found: usize },

    /// Vendor decoder failure
    #[error("Segment decode failed: {0}")]
    Ash(#[from] ash0::Error),

    /// A segment decoded successfully but produced no bytes
    #[error("Segment {name} decoded to an empty buffer")]
    EmptySegment { name: &'static str },
}

impl Error {
    /// Whether this error condemns only the current record.
    ///
    /// Format and decode failures are properties of one captured payload;
    /// IO failures mean the storage underneath is broken and the caller
    /// should consider halting the whole run.
    pub fn is_record_scoped(&self) -> bool {
        !matches!(self, Error::Io(_))
    }
}
