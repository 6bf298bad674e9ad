//! Sprint Ingest Library
//!
//! A Rust library for ingesting Azure DevOps sprint CSV exports into a
//! work-item store with deterministic, auditable per-row outcomes.
//!
//! This library provides tools for:
//! - Normalizing loosely-structured CSV exports (BOM stripping, delimiter detection)
//! - Structural parsing with quoting/escaping support and per-row error isolation
//! - Schema validation with required-field enforcement and lenient numeric coercion
//! - Deriving reporting fields (feature name, tags, dates, status indicators, flags)
//! - Reconciling batches against existing records via chunked, idempotent upserts
//! - Comprehensive error handling and recovery

pub mod config;
pub mod constants;
pub mod pipeline;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod csv_parser;
        pub mod record_reconciler;
        pub mod row_transformer;
    }
    pub mod adapters {
        pub mod json_file;
        pub mod memory;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{StatusIndicator, WorkItem};
pub use config::Config;
pub use pipeline::{ImportPipeline, ImportReport};

/// Result type alias for sprint ingestion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for sprint ingestion operations
///
/// Data-quality problems (malformed rows, missing fields, unparseable dates)
/// are never represented here; those travel as structured error lists inside
/// stage results. This enum covers the truly exceptional conditions that
/// abort an import: missing parent sprint, storage connectivity, bad
/// configuration, unreadable input.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV reader failed before any record could be produced
    #[error("CSV parsing error: {message}")]
    CsvParsing {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Sprint not found in the store
    #[error("Sprint not found: {sprint_id}")]
    SprintNotFound { sprint_id: String },

    /// Storage operation failed
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::CsvParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a sprint-not-found error
    pub fn sprint_not_found(sprint_id: impl Into<String>) -> Self {
        Self::SprintNotFound {
            sprint_id: sprint_id.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}
