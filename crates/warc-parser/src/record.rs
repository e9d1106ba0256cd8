//! A single parsed WARC record

/// One WARC record: version, named headers, raw content body.
///
/// The body is the captured payload exactly as stored in the archive; for
/// `response` records that is a full HTTP response including its status
/// line and headers.
#[derive(Debug, Clone)]
pub struct WarcRecord {
    pub(crate) version: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Vec<u8>,
}

impl WarcRecord {
    /// The version string from the record's first line, e.g. `WARC/1.0`.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Look up a header by name, case-insensitively.
    ///
    /// WARC header names are defined case-insensitive; crawlers disagree on
    /// the casing they emit.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The `WARC-Type` header, if present.
    pub fn record_type(&self) -> Option<&str> {
        self.header("WARC-Type")
    }

    /// The `WARC-Target-URI` header, if present.
    pub fn target_uri(&self) -> Option<&str> {
        self.header("WARC-Target-URI")
    }

    /// The raw content body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consume the record, returning its body.
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}
