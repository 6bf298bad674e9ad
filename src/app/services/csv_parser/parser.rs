//! Structural CSV parsing
//!
//! Turns normalized text into an ordered sequence of header-keyed records.
//! Quoting, escaping and embedded newlines are handled by the `csv` reader;
//! a row that cannot be tokenized yields one [`ParsingError`] and parsing
//! continues with the next row. Only a whole-file failure (no readable
//! header) short-circuits, and even that is reported as a row-0 error
//! rather than returned as an `Err`.

use super::delimiter::{detect_delimiter, strip_bom};
use super::stats::{ParsedCsv, ParsedRecord, ParsingError};
use crate::app::models::RawRecord;
use crate::constants::columns;
use tracing::{debug, warn};

/// Parse raw file content into header-keyed records
///
/// The first line is the header; each subsequent non-blank line becomes one
/// record keyed by trimmed headers with trimmed values. Alternate header
/// spellings are rewritten to their canonical column names, so records are
/// always keyed by [`columns`] constants. Blank lines are skipped and do
/// not count toward `total_rows`. Row numbers are 1-based with the header
/// as row 1.
pub fn parse_structure(content: &str) -> ParsedCsv {
    let content = strip_bom(content);
    let delimiter = detect_delimiter(content);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    // An unreadable header poisons the whole file: report a single row-0
    // error and an empty record set.
    let headers: Vec<String> = match reader.headers() {
        Ok(headers) => headers
            .iter()
            .map(|h| columns::canonical(h).to_string())
            .collect(),
        Err(e) => {
            warn!("CSV header could not be read: {}", e);
            return ParsedCsv {
                headers: Vec::new(),
                records: Vec::new(),
                errors: vec![ParsingError::structural(
                    0,
                    format!("CSV parsing failed: {}", e),
                )],
                total_rows: 0,
            };
        }
    };

    let mut records = Vec::new();
    let mut errors = Vec::new();
    let mut row = 1; // header row

    for result in reader.records() {
        row += 1;
        match result {
            Ok(record) => {
                let mut fields = RawRecord::with_capacity(headers.len());
                for (header, value) in headers.iter().zip(record.iter()) {
                    fields.insert(header.clone(), value.to_string());
                }
                records.push(ParsedRecord { row, fields });
            }
            Err(e) => {
                debug!("Row {} could not be tokenized: {}", row, e);
                errors.push(ParsingError::structural(row, e.to_string()));
            }
        }
    }

    let total_rows = records.len() + errors.len();
    debug!(
        "Structural parse complete: {} records, {} errors, {} total rows",
        records.len(),
        errors.len(),
        total_rows
    );

    ParsedCsv {
        headers,
        records,
        errors,
        total_rows,
    }
}

/// Result of a header preflight check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCheck {
    /// True when every required column header is present
    pub valid: bool,

    /// Required headers that are absent
    pub missing: Vec<String>,
}

/// Check that all required column headers are present
///
/// Optional columns are always allowed; only the four required headers are
/// enforced. Comparison is against trimmed, canonicalized header names, so
/// an alternate spelling satisfies the column it aliases.
pub fn validate_headers(headers: &[String]) -> HeaderCheck {
    let missing: Vec<String> = columns::REQUIRED
        .iter()
        .filter(|required| {
            !headers
                .iter()
                .any(|h| columns::canonical(h.trim()) == **required)
        })
        .map(|required| required.to_string())
        .collect();

    HeaderCheck {
        valid: missing.is_empty(),
        missing,
    }
}

/// Estimate the number of data rows in raw content
///
/// Counts non-blank lines minus the header. Used for upload metadata before
/// full parsing; multi-line quoted fields make this an approximation.
pub fn estimate_row_count(content: &str) -> usize {
    strip_bom(content)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .count()
        .saturating_sub(1)
}
