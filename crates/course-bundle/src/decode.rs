//! Segment decoding capability

use tracing::trace;

use crate::pack::DecodedBundle;
use crate::split::Bundle;
use crate::{ENTRY_NAMES, Error, Result};

/// Decompression capability for one bundle segment.
///
/// The pipeline only needs a deterministic bytes-to-bytes transform with an
/// explicit failure signal. Keeping it behind a trait lets the splitter and
/// repackager be exercised with synthetic decoders.
pub trait SegmentDecoder {
    /// Decode one segment, marker included.
    fn decode(&self, segment: &[u8]) -> Result<Vec<u8>>;
}

/// Production decoder backed by the vendor ASH0 scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ash0Decoder;

impl SegmentDecoder for Ash0Decoder {
    fn decode(&self, segment: &[u8]) -> Result<Vec<u8>> {
        Ok(ash0::decompress(segment)?)
    }
}

impl Bundle<'_> {
    /// Decode all four segments in order.
    ///
    /// A decoder failure fails the whole bundle, as does a segment that
    /// decodes to nothing: every slot of a well-formed course is non-empty,
    /// so an empty result means the capture is unusable even if the codec
    /// technically accepted it.
    pub fn decode(&self, decoder: &impl SegmentDecoder) -> Result<DecodedBundle> {
        let mut files: [Vec<u8>; crate::SEGMENT_COUNT] = Default::default();
        for (index, segment) in self.segments().iter().enumerate() {
            let decoded = decoder.decode(segment.as_bytes())?;
            if decoded.is_empty() {
                return Err(Error::EmptySegment {
                    name: ENTRY_NAMES[index],
                });
            }
            trace!(
                "decoded {}: {} -> {} bytes",
                ENTRY_NAMES[index],
                segment.as_bytes().len(),
                decoded.len()
            );
            files[index] = decoded;
        }
        Ok(DecodedBundle::new(files))
    }
}
