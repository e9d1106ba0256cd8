//! ASH0 Compressed Stream Decoder
//!
//! ASH0 is the vendor compression scheme used for the sub-files of captured
//! course bundles. A stream is a 12-byte big-endian header followed by two
//! MSB-first bit streams: one carrying a Huffman-coded mix of literal bytes
//! and match lengths, the other carrying the match distances. This crate
//! provides the decoding direction only; the service never ships anything
//! we would need to re-encode.

pub mod bits;
pub mod decompress;
pub mod error;

pub use decompress::decompress;
pub use error::{Error, Result};

/// ASH0 magic bytes
pub const ASH0_MAGIC: [u8; 4] = *b"ASH0";
