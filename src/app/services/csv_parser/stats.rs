//! Parsing error and result structures for CSV ingestion
//!
//! This module provides the types that carry per-row parse and validation
//! outcomes to the caller. Errors are accumulated, never thrown; a file
//! full of bad rows still produces a complete, reportable result.

use crate::app::models::{RawRecord, ValidatedRow};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A localized parsing or validation error
///
/// `row` is 1-based and counts the header line as row 1, so the first data
/// row is row 2. Row 0 marks a catastrophic failure before any record could
/// be read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsingError {
    /// 1-based row number (header is row 1); 0 for whole-file failures
    pub row: usize,

    /// Column header the error refers to, when attributable to one field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Human-readable description
    pub message: String,

    /// Offending source value, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<String>,
}

impl ParsingError {
    /// Error for a whole row that could not be tokenized
    pub fn structural(row: usize, message: impl Into<String>) -> Self {
        Self {
            row,
            field: None,
            message: message.into(),
            raw_value: None,
        }
    }

    /// Error for a single field within a row
    pub fn field(
        row: usize,
        field: impl Into<String>,
        message: impl Into<String>,
        raw_value: Option<String>,
    ) -> Self {
        Self {
            row,
            field: Some(field.into()),
            message: message.into(),
            raw_value,
        }
    }
}

/// One data record as tokenized by the structural parser
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    /// 1-based row number, counting the header as row 1
    pub row: usize,

    /// Trimmed values keyed by trimmed column header
    pub fields: RawRecord,
}

/// Output of the structural parsing stage
#[derive(Debug, Clone, Default)]
pub struct ParsedCsv {
    /// Column headers in source order, trimmed
    pub headers: Vec<String>,

    /// Successfully tokenized records in source order
    pub records: Vec<ParsedRecord>,

    /// Structural errors, one per untokenizable row
    pub errors: Vec<ParsingError>,

    /// Number of non-blank data rows encountered (tokenized or not)
    pub total_rows: usize,
}

/// Row counts for a validation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseMeta {
    /// Non-blank data rows encountered by the structural parser
    pub total_rows: usize,

    /// Rows that passed schema validation
    pub valid_rows: usize,

    /// Rows with at least one structural or validation error
    pub invalid_rows: usize,

    /// Rows not otherwise classified (blank/filtered)
    pub skipped_rows: usize,
}

/// Output of the validation stage
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// Canonicalized column headers from the structural parse
    pub headers: Vec<String>,

    /// Typed rows that passed validation, in source order
    pub valid_rows: Vec<ValidatedRow>,

    /// Structural and validation errors, in source order
    pub errors: Vec<ParsingError>,

    /// Row counts
    pub meta: ParseMeta,
}

/// Aggregated view of parse errors for reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorSummary {
    /// Human-readable headline ("Found 3 errors in CSV file")
    pub message: String,

    /// Total number of errors
    pub total_errors: usize,

    /// Error count per row number
    pub errors_by_row: HashMap<usize, usize>,

    /// Error count per field name
    pub errors_by_field: HashMap<String, usize>,
}

impl ErrorSummary {
    /// Summarize a list of parse errors by row and field
    pub fn from_errors(errors: &[ParsingError]) -> Self {
        let mut errors_by_row: HashMap<usize, usize> = HashMap::new();
        let mut errors_by_field: HashMap<String, usize> = HashMap::new();

        for error in errors {
            *errors_by_row.entry(error.row).or_insert(0) += 1;
            if let Some(field) = &error.field {
                *errors_by_field.entry(field.clone()).or_insert(0) += 1;
            }
        }

        let total_errors = errors.len();
        let message = match total_errors {
            0 => "No parsing errors".to_string(),
            1 => "Found 1 error in CSV file".to_string(),
            n => format!("Found {} errors in CSV file", n),
        };

        Self {
            message,
            total_errors,
            errors_by_row,
            errors_by_field,
        }
    }
}
