//! Record-source parsing.
//!
//! The input is a `;`-delimited table with three columns (IP entries,
//! domain names, URLs) where each column holds zero or more values
//! separated by `" | "`. The first line is an update banner and is
//! skipped. Short rows are reported and skipped; no single bad record
//! aborts a run.

use std::fs;
use std::path::Path;

use tracing::warn;
use url::Url;

use crate::error::{PacError, Result};

/// Multi-value field separator inside one column.
const FIELD_SEPARATOR: &str = " | ";

/// Column separator between record fields.
const COLUMN_SEPARATOR: char = ';';

/// One dump record: raw tokens, not yet normalized.
#[derive(Debug, Clone)]
pub struct SourceRecord {
    /// Raw IP/CIDR tokens
    pub ips: Vec<String>,
    /// Raw domain tokens
    pub domains: Vec<String>,
    /// Raw URL tokens
    pub urls: Vec<String>,
    /// 1-based line number in the source text (for diagnostics)
    pub line: usize,
}

/// Parsed dump table.
#[derive(Debug, Clone, Default)]
pub struct SourceTable {
    records: Vec<SourceRecord>,
}

impl SourceTable {
    /// Parse dump text. The first line is an update banner ("Updated on
    /// ...") and is skipped unconditionally.
    pub fn parse(text: &str) -> Self {
        let mut records = Vec::new();

        for (line_num, line) in text.lines().enumerate().skip(1) {
            let line_num = line_num + 1; // 1-based line numbers

            if line.trim().is_empty() {
                continue;
            }

            let mut columns = line.split(COLUMN_SEPARATOR);
            let (Some(ips), Some(domains), Some(urls)) =
                (columns.next(), columns.next(), columns.next())
            else {
                warn!(line = line_num, "record has fewer than 3 columns");
                continue;
            };

            records.push(SourceRecord {
                ips: split_field(ips),
                domains: split_field(domains),
                urls: split_field(urls),
                line: line_num,
            });
        }

        Self { records }
    }

    /// Parse a dump file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            PacError::ParseError(format!(
                "Failed to read dump file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self::parse(&text))
    }

    pub fn records(&self) -> &[SourceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Split a `" | "`-separated multi-value field, dropping empty items.
fn split_field(field: &str) -> Vec<String> {
    field
        .split(FIELD_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Extract the hostname from a URL token, assuming `http` when the token
/// carries no scheme.
///
/// Returns `None` when no hostname can be found; the caller records the
/// diagnostic.
pub fn hostname_from_url(raw: &str) -> Option<String> {
    match Url::parse(raw) {
        Ok(url) => url.host_str().map(String::from),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("http://{}", raw))
            .ok()?
            .host_str()
            .map(String::from),
        Err(_) => None,
    }
}
