//! Repackaging decoded bundles as tar.zst archives

use std::fs::File;
use std::path::Path;
use tracing::debug;

use crate::Result;
use crate::split::SEGMENT_COUNT;

/// Entry names by segment position. The slot order is part of the format:
/// position 0 of the split sequence is always the main-world preview, and
/// so on.
pub const ENTRY_NAMES: [&str; SEGMENT_COUNT] = [
    "thumbnail0.tnl",      // main-world preview, 8-byte checksum + JPEG
    "course_data.cdt",     // main-world course data
    "course_data_sub.cdt", // sub-world course data
    "thumbnail1.tnl",      // course thumbnail, 8-byte checksum + JPEG
];

/// Archival batch workload: ratio over speed.
const ZSTD_LEVEL: i32 = 19;

const ENTRY_MODE: u32 = 0o644;

/// Fixed so repeated runs produce byte-identical archives.
const ENTRY_MTIME: u64 = 0;

/// The four decoded sub-files of one captured course, in slot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBundle {
    files: [Vec<u8>; SEGMENT_COUNT],
}

impl DecodedBundle {
    pub(crate) fn new(files: [Vec<u8>; SEGMENT_COUNT]) -> Self {
        Self { files }
    }

    /// The decoded sub-files in slot order (see [`ENTRY_NAMES`]).
    pub fn files(&self) -> &[Vec<u8>; SEGMENT_COUNT] {
        &self.files
    }

    /// Write the bundle as a zstd-compressed tar archive at `path`.
    ///
    /// An existing file at `path` is truncated: the output directory is a
    /// last-writer-wins namespace keyed by record identifier. On success
    /// the archive holds exactly four entries, named and ordered per
    /// [`ENTRY_NAMES`]. On error the partial file is left in place for the
    /// caller to deal with.
    pub fn write_archive(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let encoder = zstd::Encoder::new(file, ZSTD_LEVEL)?;
        let mut builder = tar::Builder::new(encoder);

        for (name, data) in ENTRY_NAMES.iter().zip(&self.files) {
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(ENTRY_MODE);
            header.set_mtime(ENTRY_MTIME);
            builder.append_data(&mut header, name, data.as_slice())?;
        }

        // Tear down inside-out: tar terminator blocks, then the zstd
        // frame, so the handle is released with everything flushed.
        let encoder = builder.into_inner()?;
        encoder.finish()?;

        debug!(
            "wrote {:?}: {} entries, {} bytes decoded",
            path,
            SEGMENT_COUNT,
            self.files.iter().map(Vec::len).sum::<usize>()
        );
        Ok(())
    }
}
