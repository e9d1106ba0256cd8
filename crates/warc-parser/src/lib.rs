//! # warc-parser
//!
//! Sequential reader for WARC (Web ARChive) captures as produced by crawl
//! tooling, plus line counting for the `.warc.os.cdx.gz` companion index.
//!
//! A WARC file is a concatenation of records, each a version line, a block
//! of `Name: value` headers, a blank line, and `Content-Length` bytes of
//! raw body:
//!
//! ```text
//! WARC/1.0
//! WARC-Type: response
//! WARC-Target-URI: https://example.invalid/courses/1234
//! Content-Length: 5
//!
//! hello
//! ```
//!
//! Records are separated by blank lines. `.warc.gz` files are multi-member
//! gzip streams (one member per record is common), which
//! [`WarcReader::from_gzip_path`] handles transparently.
//!
//! ## Quick Start
//!
//! ```rust
//! use warc_parser::WarcReader;
//!
//! let data = b"WARC/1.0\r\nWARC-Type: response\r\nContent-Length: 5\r\n\r\nhello\r\n\r\n";
//! let mut reader = WarcReader::new(&data[..]);
//!
//! while let Some(record) = reader.next_record()? {
//!     println!("{:?}: {} bytes", record.record_type(), record.body().len());
//! }
//! # Ok::<(), warc_parser::Error>(())
//! ```

pub mod cdx;
pub mod error;
pub mod reader;
pub mod record;

pub use error::{Error, Result};
pub use reader::WarcReader;
pub use record::WarcRecord;
