//! Sequential WARC record reading

use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::Path;
use tracing::trace;

use crate::record::WarcRecord;
use crate::{Error, Result};

/// Reads WARC records one at a time from any buffered byte source.
#[derive(Debug)]
pub struct WarcReader<R> {
    input: R,
}

impl WarcReader<BufReader<MultiGzDecoder<File>>> {
    /// Open a `.warc.gz` file.
    ///
    /// Crawlers typically write one gzip member per record;
    /// [`MultiGzDecoder`] decodes the whole member sequence as one stream.
    pub fn from_gzip_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(MultiGzDecoder::new(file))))
    }
}

impl<R: BufRead> WarcReader<R> {
    /// Wrap an already-buffered source.
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Read the next record, or `None` at end of stream.
    ///
    /// Blank lines between records are skipped. Any malformed record aborts
    /// the stream with an error; WARC gives no way to resynchronize past a
    /// record whose length cannot be trusted.
    pub fn next_record(&mut self) -> Result<Option<WarcRecord>> {
        let version = loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            if !line.is_empty() {
                break line;
            }
        };

        if !version.starts_with("WARC/") {
            return Err(Error::InvalidVersion(version));
        }

        let mut headers = Vec::new();
        loop {
            let line = self
                .read_line()?
                .ok_or(Error::UnexpectedEof("record headers"))?;
            if line.is_empty() {
                break;
            }
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| Error::InvalidHeaderLine(line.clone()))?;
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }

        let length = headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case("Content-Length"))
            .map(|(_, v)| v.as_str())
            .ok_or(Error::MissingContentLength)?;
        let length: usize = length
            .parse()
            .map_err(|_| Error::InvalidContentLength(length.to_string()))?;

        let mut body = vec![0u8; length];
        self.input.read_exact(&mut body).map_err(|e| {
            if e.kind() == ErrorKind::UnexpectedEof {
                Error::Truncated { expected: length }
            } else {
                Error::Io(e)
            }
        })?;

        trace!("read WARC record: {} headers, {length} byte body", headers.len());

        Ok(Some(WarcRecord {
            version,
            headers,
            body,
        }))
    }

    /// Read one line, stripping the trailing CRLF. `None` at end of stream.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        while matches!(raw.last(), Some(b'\n' | b'\r')) {
            raw.pop();
        }
        Ok(Some(String::from_utf8_lossy(&raw).into_owned()))
    }
}
