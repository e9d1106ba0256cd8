//! CDX companion index handling
//!
//! Crawls ship a `.warc.os.cdx.gz` next to each `.warc.gz`: a gzipped text
//! index with one header line followed by one line per captured record. The
//! only thing the extraction pipeline needs from it is the record count, to
//! size the progress display before reading the archive itself.

use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

use crate::Result;

/// Count the records listed in a CDX index file.
///
/// Counts newline-separated lines and subtracts the leading ` CDX ...`
/// header line.
pub fn count_records<P: AsRef<Path>>(path: P) -> Result<usize> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(MultiGzDecoder::new(file));

    let mut lines = 0usize;
    for line in reader.split(b'\n') {
        line?;
        lines += 1;
    }

    let count = lines.saturating_sub(1);
    debug!("CDX index {:?}: {count} records", path.as_ref());
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    fn write_cdx(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let file = File::create(&path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(content.as_bytes()).unwrap();
        encoder.finish().unwrap();
        path
    }

    #[test]
    fn test_counts_data_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_cdx(
            dir.path(),
            "a.warc.os.cdx.gz",
            " CDX N b a m s k r M S V g\nline one\nline two\nline three\n",
        );
        assert_eq!(count_records(&path).unwrap(), 3);
    }

    #[test]
    fn test_header_only_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_cdx(dir.path(), "b.warc.os.cdx.gz", " CDX N b a m s k r\n");
        assert_eq!(count_records(&path).unwrap(), 0);
    }

    #[test]
    fn test_empty_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_cdx(dir.path(), "c.warc.os.cdx.gz", "");
        assert_eq!(count_records(&path).unwrap(), 0);
    }

    #[test]
    fn test_missing_file() {
        assert!(count_records("/nonexistent/x.warc.os.cdx.gz").is_err());
    }
}
