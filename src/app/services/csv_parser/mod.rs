//! CSV parsing and validation for sprint exports
//!
//! This module covers the first three pipeline stages for Azure DevOps CSV
//! exports: encoding/delimiter normalization, structural parsing and schema
//! validation. The stages are pure transformations over in-memory text;
//! nothing here touches storage.
//!
//! ## Architecture
//!
//! - [`delimiter`] - BOM stripping and delimiter detection
//! - [`parser`] - Structural parsing into header-keyed records
//! - [`validator`] - Field schema validation and type coercion
//! - [`stats`] - Error and result structures
//!
//! ## Usage
//!
//! ```rust
//! use sprint_ingest::app::services::csv_parser;
//!
//! let content = "ID,Title,Work Item Type,State\n1,Fix login,Bug,Active\n";
//! let result = csv_parser::parse_and_validate(content);
//!
//! assert_eq!(result.meta.valid_rows, 1);
//! assert!(result.errors.is_empty());
//! ```

pub mod delimiter;
pub mod parser;
pub mod stats;
pub mod validator;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use delimiter::{detect_delimiter, strip_bom};
pub use parser::{estimate_row_count, parse_structure, validate_headers, HeaderCheck};
pub use stats::{ErrorSummary, ParseMeta, ParsedCsv, ParsedRecord, ParsingError, ValidationResult};
pub use validator::{validate_records, validate_row};

/// Parse and validate CSV content in one pass
///
/// Convenience composition of [`parse_structure`] and [`validate_records`];
/// structural and validation errors land in one ordered list.
pub fn parse_and_validate(content: &str) -> ValidationResult {
    validate_records(parse_structure(content))
}
