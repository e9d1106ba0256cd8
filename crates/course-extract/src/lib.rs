//! Library surface of the course extraction tool.
//!
//! The binary is a thin wrapper: input discovery lives in [`discover`],
//! the per-record conversion loop in [`pipeline`].

pub mod discover;
pub mod pipeline;

pub use discover::{ArchivePair, discover};
pub use pipeline::{ExtractOptions, ExtractStats};
