//! Per-record conversion pipeline
//!
//! Walks every record of a capture pair, converts each qualifying response
//! into one `tar.zst` archive, and keeps error scoping strict: a malformed
//! record is skipped, broken storage halts the run (unless `--keep-going`).

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use url::Url;

use course_bundle::{Ash0Decoder, Bundle};
use warc_parser::{WarcReader, WarcRecord, cdx};

use crate::discover::ArchivePair;

/// Settings shared by the whole run.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Directory receiving `<id>.tar.zst` files.
    pub output_dir: PathBuf,
    /// Continue past storage errors on individual records instead of
    /// halting the run.
    pub keep_going: bool,
}

/// Per-run record counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractStats {
    /// Response records the pipeline tried to convert.
    pub attempted: u64,
    /// Archives written.
    pub converted: u64,
    /// Records skipped without error (non-200 captures).
    pub skipped: u64,
    /// Records that failed with a record-scoped error.
    pub failed: u64,
}

impl ExtractStats {
    fn absorb(&mut self, other: ExtractStats) {
        self.attempted += other.attempted;
        self.converted += other.converted;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

/// Process every capture pair in order.
pub fn run(pairs: &[ArchivePair], options: &ExtractOptions) -> Result<ExtractStats> {
    let mut totals = ExtractStats::default();
    for (index, pair) in pairs.iter().enumerate() {
        info!("Processing {} ({}/{})", pair.name(), index + 1, pairs.len());
        let stats = extract_pair(pair, options)?;
        info!(
            "Finished {}: {} converted, {} skipped, {} failed of {} attempted",
            pair.name(),
            stats.converted,
            stats.skipped,
            stats.failed,
            stats.attempted
        );
        totals.absorb(stats);
    }
    Ok(totals)
}

/// Convert every qualifying record of one capture pair.
pub fn extract_pair(pair: &ArchivePair, options: &ExtractOptions) -> Result<ExtractStats> {
    let total = cdx::count_records(pair.cdx_path())
        .with_context(|| format!("reading CDX index for {}", pair.name()))?;

    let mut reader = WarcReader::from_gzip_path(pair.warc_path())
        .with_context(|| format!("opening {}", pair.warc_path().display()))?;

    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
            .progress_chars("#>-"),
    );
    bar.set_message(pair.name());

    let mut stats = ExtractStats::default();
    while let Some(record) = reader
        .next_record()
        .with_context(|| format!("reading record from {}", pair.warc_path().display()))?
    {
        // Only captured responses carry course payloads; requests,
        // warcinfo and the rest are passed over without side effects.
        if record.record_type() != Some("response") {
            continue;
        }

        stats.attempted += 1;
        bar.inc(1);
        convert_record(&record, options, &mut stats)?;
    }

    bar.finish();
    Ok(stats)
}

/// Convert one response record, updating `stats` per the outcome.
fn convert_record(
    record: &WarcRecord,
    options: &ExtractOptions,
    stats: &mut ExtractStats,
) -> Result<()> {
    let Some(uri) = record.target_uri() else {
        warn!("response record without WARC-Target-URI, skipping");
        stats.failed += 1;
        return Ok(());
    };

    let Some(id) = derive_identifier(uri) else {
        warn!("cannot derive course id from {uri:?}, skipping");
        stats.failed += 1;
        return Ok(());
    };

    if !http_status_is_success(record.body()) {
        debug!("{id}: capture is not a 200 response, skipping");
        stats.skipped += 1;
        return Ok(());
    }

    let out_path = options.output_dir.join(format!("{id}.tar.zst"));
    match convert_payload(record.body(), &out_path) {
        Ok(()) => {
            debug!("{id}: wrote {}", out_path.display());
            stats.converted += 1;
        }
        Err(err) if err.is_record_scoped() => {
            warn!("{id}: {err}, skipping record");
            stats.failed += 1;
        }
        Err(err) if options.keep_going => {
            warn!("{id}: {err} (--keep-going, continuing)");
            stats.failed += 1;
        }
        Err(err) => {
            return Err(anyhow::Error::new(err)
                .context(format!("writing archive for course {id}")));
        }
    }
    Ok(())
}

/// Split, decode and repackage one payload.
///
/// The splitter discards everything before the first marker, which is what
/// skips the captured HTTP status line and headers.
fn convert_payload(body: &[u8], out_path: &Path) -> course_bundle::Result<()> {
    let bundle = Bundle::split(body)?;
    let decoded = bundle.decode(&Ash0Decoder)?;
    decoded.write_archive(out_path)
}

/// Derive the output base name: the final path segment of the target URI.
fn derive_identifier(uri: &str) -> Option<String> {
    let url = Url::parse(uri).ok()?;
    let segment = url.path_segments()?.next_back()?;
    if segment.is_empty() {
        None
    } else {
        Some(segment.to_string())
    }
}

/// Whether the captured HTTP response was a 200.
///
/// Captures store the raw response; the status line is its first line.
fn http_status_is_success(body: &[u8]) -> bool {
    let end = body.iter().position(|&b| b == b'\n').unwrap_or(body.len());
    String::from_utf8_lossy(&body[..end]).contains("200")
}
