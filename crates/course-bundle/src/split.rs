//! Payload splitting at bundle markers

use tracing::trace;

use crate::{BUNDLE_MAGIC, Error, Result};

/// Every captured payload carries exactly this many sub-bundles.
pub const SEGMENT_COUNT: usize = 4;

/// One marker-delimited byte range of a payload.
///
/// A segment always begins with the 4-byte marker; [`Segment::as_bytes`]
/// is the full range as the vendor decoder consumes it, while
/// [`Segment::payload`] strips the marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    bytes: &'a [u8],
}

impl<'a> Segment<'a> {
    /// The segment including its leading marker.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// The segment content with the marker stripped.
    ///
    /// May be empty for a bare-marker segment; that case is rejected later
    /// by the decode stage's non-empty check, not here.
    pub fn payload(&self) -> &'a [u8] {
        &self.bytes[BUNDLE_MAGIC.len()..]
    }
}

/// Split a payload at every marker occurrence.
///
/// Bytes before the first marker (HTTP response headers, in practice) are
/// ignored. Each segment runs from one marker up to the next, the last one
/// to the end of the buffer. A payload without any marker is a format
/// error; this never fabricates a whole-buffer segment.
pub fn split_segments(data: &[u8]) -> Result<Vec<Segment<'_>>> {
    let mut starts = Vec::new();
    // Windowed scan: at the last 3 positions no 4-byte match can fit, and
    // none of them is ever read.
    let mut i = 0;
    while i + BUNDLE_MAGIC.len() <= data.len() {
        if data[i..i + BUNDLE_MAGIC.len()] == BUNDLE_MAGIC {
            starts.push(i);
        }
        i += 1;
    }

    if starts.is_empty() {
        return Err(Error::MarkerNotFound);
    }

    let mut segments = Vec::with_capacity(starts.len());
    for (index, &start) in starts.iter().enumerate() {
        let end = starts.get(index + 1).copied().unwrap_or(data.len());
        segments.push(Segment {
            bytes: &data[start..end],
        });
    }

    trace!(
        "split {} byte payload into {} segments (first marker at {})",
        data.len(),
        segments.len(),
        starts[0]
    );
    Ok(segments)
}

/// A payload split into exactly [`SEGMENT_COUNT`] ordered segments.
#[derive(Debug)]
pub struct Bundle<'a> {
    segments: [Segment<'a>; SEGMENT_COUNT],
}

impl<'a> Bundle<'a> {
    /// Split a payload and enforce the four-segment layout.
    ///
    /// Any other segment count is a format error scoped to this payload.
    pub fn split(data: &'a [u8]) -> Result<Self> {
        let segments = split_segments(data)?;
        let found = segments.len();
        let segments: [Segment<'a>; SEGMENT_COUNT] = segments
            .try_into()
            .map_err(|_| Error::SegmentCount { found })?;
        Ok(Self { segments })
    }

    /// The four segments in payload order.
    pub fn segments(&self) -> &[Segment<'a>; SEGMENT_COUNT] {
        &self.segments
    }
}
