//! Round-trip tests for archive writing: everything written must re-read
//! with the fixed names, order, and exact contents.

use std::fs;
use std::io::Read;
use std::path::Path;

use course_bundle::{Bundle, ENTRY_NAMES, Error, Result, SegmentDecoder};
use pretty_assertions::assert_eq;

/// Strips the marker, passes the payload through unchanged.
struct Passthrough;

impl SegmentDecoder for Passthrough {
    fn decode(&self, segment: &[u8]) -> Result<Vec<u8>> {
        Ok(segment[4..].to_vec())
    }
}

fn bundle_of(parts: &[&[u8]]) -> Vec<u8> {
    let mut data = Vec::new();
    for part in parts {
        data.extend_from_slice(b"ASH0");
        data.extend_from_slice(part);
    }
    data
}

fn read_archive(path: &Path) -> Vec<(String, Vec<u8>)> {
    let file = fs::File::open(path).unwrap();
    let decoder = zstd::Decoder::new(file).unwrap();
    let mut archive = tar::Archive::new(decoder);

    let mut entries = Vec::new();
    for entry in archive.entries().unwrap() {
        let mut entry = entry.unwrap();
        let name = entry.path().unwrap().to_string_lossy().into_owned();
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        entries.push((name, content));
    }
    entries
}

#[test]
fn test_roundtrip_names_order_and_content() {
    let parts: [&[u8]; 4] = [
        b"\x01\x02\x03\x04\x05\x06\x07\x08jpeg-bytes",
        b"main course data blob",
        b"sub course data blob",
        b"\x08\x07\x06\x05\x04\x03\x02\x01more-jpeg",
    ];
    let payload = bundle_of(&parts);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("1234.tar.zst");

    let decoded = Bundle::split(&payload).unwrap().decode(&Passthrough).unwrap();
    decoded.write_archive(&out).unwrap();

    let entries = read_archive(&out);
    assert_eq!(entries.len(), 4);
    for (slot, (name, content)) in entries.iter().enumerate() {
        assert_eq!(name, ENTRY_NAMES[slot]);
        assert_eq!(content.as_slice(), parts[slot]);
    }
}

#[test]
fn test_rewrite_is_byte_identical() {
    let payload = bundle_of(&[b"aaaa", b"bbbb", b"cccc", b"dddd"]);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("idempotent.tar.zst");

    let decoded = Bundle::split(&payload).unwrap().decode(&Passthrough).unwrap();
    decoded.write_archive(&out).unwrap();
    let first = fs::read(&out).unwrap();

    decoded.write_archive(&out).unwrap();
    let second = fs::read(&out).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_overwrites_stale_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("stale.tar.zst");
    fs::write(&out, vec![0xFF; 1 << 16]).unwrap();

    let payload = bundle_of(&[b"1", b"2", b"3", b"4"]);
    let decoded = Bundle::split(&payload).unwrap().decode(&Passthrough).unwrap();
    decoded.write_archive(&out).unwrap();

    // Truncated, not appended: the stale megafile is gone.
    let entries = read_archive(&out);
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0].1, b"1");
}

#[test]
fn test_wrong_segment_count_writes_nothing() {
    let payload = bundle_of(&[b"a", b"b", b"c"]);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never.tar.zst");

    let err = Bundle::split(&payload).unwrap_err();
    assert!(matches!(err, Error::SegmentCount { found: 3 }));
    assert!(!out.exists());
}

#[test]
fn test_write_into_missing_directory_is_io_error() {
    let payload = bundle_of(&[b"a", b"b", b"c", b"d"]);
    let decoded = Bundle::split(&payload).unwrap().decode(&Passthrough).unwrap();

    let err = decoded
        .write_archive(Path::new("/nonexistent-dir/x.tar.zst"))
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(!err.is_record_scoped());
}
