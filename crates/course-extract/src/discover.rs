//! Input discovery: capture pairs and directory batching
//!
//! A capture is a pair of companion files sharing a base name:
//! `<base>.warc.gz` (the records) and `<base>.warc.os.cdx.gz` (the index).
//! The tool accepts either companion, or a directory holding any number of
//! pairs.

use anyhow::{Context, Result, bail};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const WARC_SUFFIX: &str = ".warc.gz";
const CDX_SUFFIX: &str = ".warc.os.cdx.gz";

/// One capture: the shared base path of a `.warc.gz` / `.warc.os.cdx.gz`
/// companion pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ArchivePair {
    base: PathBuf,
}

impl ArchivePair {
    fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Path of the record file.
    pub fn warc_path(&self) -> PathBuf {
        self.with_suffix(WARC_SUFFIX)
    }

    /// Path of the index companion.
    pub fn cdx_path(&self) -> PathBuf {
        self.with_suffix(CDX_SUFFIX)
    }

    /// Display name: the base file name without directories.
    pub fn name(&self) -> String {
        self.base
            .file_name()
            .map_or_else(|| self.base.display().to_string(), |n| {
                n.to_string_lossy().into_owned()
            })
    }

    fn with_suffix(&self, suffix: &str) -> PathBuf {
        let mut path = OsString::from(self.base.clone());
        path.push(suffix);
        PathBuf::from(path)
    }

    /// Both companions must exist before any record is processed.
    fn verify(&self) -> Result<()> {
        for path in [self.warc_path(), self.cdx_path()] {
            if !path.is_file() {
                bail!(
                    "missing companion file {} (both {WARC_SUFFIX} and {CDX_SUFFIX} \
                     must sit in the same directory)",
                    path.display()
                );
            }
        }
        Ok(())
    }
}

/// Resolve the input argument into verified capture pairs.
///
/// A path ending in either companion suffix names a single pair; a
/// directory is scanned for `*.warc.gz` entries, processed in lexical
/// order. Anything else is a startup error.
pub fn discover(input: &Path) -> Result<Vec<ArchivePair>> {
    let text = input.to_string_lossy();

    let pairs = if let Some(base) = text.strip_suffix(WARC_SUFFIX) {
        vec![ArchivePair::new(base)]
    } else if let Some(base) = text.strip_suffix(CDX_SUFFIX) {
        vec![ArchivePair::new(base)]
    } else {
        let meta = fs::metadata(input)
            .with_context(|| format!("cannot read input {}", input.display()))?;
        if !meta.is_dir() {
            bail!(
                "invalid input {}: expected a {WARC_SUFFIX} or {CDX_SUFFIX} file, \
                 or a directory of capture pairs",
                input.display()
            );
        }

        let mut pairs = Vec::new();
        for entry in fs::read_dir(input)
            .with_context(|| format!("cannot list directory {}", input.display()))?
        {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if let Some(base) = name.strip_suffix(WARC_SUFFIX) {
                pairs.push(ArchivePair::new(input.join(base)));
            }
        }
        if pairs.is_empty() {
            bail!("no {WARC_SUFFIX} captures found in {}", input.display());
        }
        pairs.sort();
        pairs
    };

    for pair in &pairs {
        pair.verify()?;
    }

    debug!("discovered {} capture pair(s)", pairs.len());
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn touch_pair(dir: &Path, base: &str) {
        File::create(dir.join(format!("{base}{WARC_SUFFIX}"))).unwrap();
        File::create(dir.join(format!("{base}{CDX_SUFFIX}"))).unwrap();
    }

    #[test]
    fn test_warc_suffix_names_a_pair() {
        let dir = tempfile::tempdir().unwrap();
        touch_pair(dir.path(), "crawl-00");

        let pairs = discover(&dir.path().join("crawl-00.warc.gz")).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].name(), "crawl-00");
        assert!(pairs[0].warc_path().is_file());
        assert!(pairs[0].cdx_path().is_file());
    }

    #[test]
    fn test_cdx_suffix_names_the_same_pair() {
        let dir = tempfile::tempdir().unwrap();
        touch_pair(dir.path(), "crawl-01");

        let pairs = discover(&dir.path().join("crawl-01.warc.os.cdx.gz")).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].name(), "crawl-01");
    }

    #[test]
    fn test_missing_companion_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("lonely.warc.gz")).unwrap();

        let err = discover(&dir.path().join("lonely.warc.gz")).unwrap_err();
        assert!(err.to_string().contains("missing companion"));
    }

    #[test]
    fn test_directory_scan_is_lexically_ordered() {
        let dir = tempfile::tempdir().unwrap();
        touch_pair(dir.path(), "b-crawl");
        touch_pair(dir.path(), "a-crawl");
        touch_pair(dir.path(), "c-crawl");

        let pairs = discover(dir.path()).unwrap();
        let names: Vec<String> = pairs.iter().map(ArchivePair::name).collect();
        assert_eq!(names, ["a-crawl", "b-crawl", "c-crawl"]);
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(dir.path()).is_err());
    }

    #[test]
    fn test_unrecognized_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        File::create(&path).unwrap();
        let err = discover(&path).unwrap_err();
        assert!(err.to_string().contains("invalid input"));
    }

    #[test]
    fn test_nonexistent_input_is_an_error() {
        let err = discover(Path::new("/nonexistent/path")).unwrap_err();
        assert!(err.to_string().contains("cannot read input"));
    }
}
