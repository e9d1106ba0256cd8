//! Course Bundle Splitting and Repackaging
//!
//! A captured course payload embeds four ASH0-compressed sub-files, each
//! introduced by the 4-byte `ASH0` marker: the main-world preview, the
//! main-world course data, the sub-world course data, and the course
//! thumbnail. This crate locates the markers, splits the payload into its
//! four segments, decodes each through a [`SegmentDecoder`], and writes the
//! results into one `tar.zst` archive with fixed entry names.
//!
//! The decoder is an injected capability: production code uses
//! [`Ash0Decoder`], tests substitute synthetic decoders and never touch the
//! real codec.

pub mod decode;
pub mod error;
pub mod pack;
pub mod split;

pub use decode::{Ash0Decoder, SegmentDecoder};
pub use error::{Error, Result};
pub use pack::{DecodedBundle, ENTRY_NAMES};
pub use split::{Bundle, SEGMENT_COUNT, Segment, split_segments};

/// Marker introducing each sub-bundle within a payload.
pub const BUNDLE_MAGIC: [u8; 4] = ash0::ASH0_MAGIC;
