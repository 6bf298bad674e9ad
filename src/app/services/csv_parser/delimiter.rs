//! Delimiter and encoding normalization for CSV input
//!
//! Spreadsheet exports arrive with a UTF-8 BOM and regional delimiter
//! conventions (semicolons from European Excel locales, tabs from
//! copy-paste). Both are normalized here before structural parsing.

use crate::constants::{DEFAULT_DELIMITER, DELIMITER_CANDIDATES};
use tracing::debug;

/// Strip a leading UTF-8 byte-order mark, if present
pub fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

/// Detect the field delimiter from the header line
///
/// Counts occurrences of comma, semicolon and tab in the first line and
/// picks the most frequent, defaulting to comma on a tie or when no
/// candidate appears. Best-effort: there is no error path.
pub fn detect_delimiter(content: &str) -> u8 {
    let first_line = content.lines().next().unwrap_or("");

    let mut detected = DEFAULT_DELIMITER;
    let mut max_count = 0;

    for &candidate in DELIMITER_CANDIDATES {
        let count = first_line.bytes().filter(|&b| b == candidate).count();
        if count > max_count {
            max_count = count;
            detected = candidate;
        }
    }

    debug!(
        "Detected delimiter {:?} ({} occurrences in header)",
        detected as char, max_count
    );
    detected
}
