//! Import pipeline orchestration
//!
//! Composes the five ingestion stages into a single run: normalize and
//! parse, validate, transform, reconcile. Stages execute strictly forward
//! and sequentially within a run; persistence calls in the reconciler are
//! the only suspension points. Data-quality problems never abort a run;
//! only a missing sprint or a broken store surfaces as an `Err`.

use crate::app::models::ValidatedRow;
use crate::app::services::csv_parser::{self, ErrorSummary, ParsingError, ValidationResult};
use crate::app::services::record_reconciler::{Reconciler, StorageResult, WorkItemStore};
use crate::app::services::row_transformer;
use crate::config::Config;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Parsing section of an import or preview report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsingReport {
    pub total_rows: usize,
    pub valid_rows: usize,
    pub invalid_rows: usize,
    pub skipped_rows: usize,

    /// Required column headers absent from the file
    ///
    /// A missing required column invalidates every data row, so this is
    /// reported ahead of the per-row errors it causes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_headers: Vec<String>,

    /// Itemized structural and validation errors, in row order
    pub errors: Vec<ParsingError>,

    /// Aggregate error tallies; present only when errors occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_summary: Option<ErrorSummary>,
}

impl ParsingReport {
    fn from_validation(result: &ValidationResult) -> Self {
        let error_summary = if result.errors.is_empty() {
            None
        } else {
            Some(ErrorSummary::from_errors(&result.errors))
        };

        // A file whose header could not be read at all already carries a
        // row-0 error; listing every required column as missing on top of
        // that is noise.
        let missing_headers = if result.headers.is_empty() {
            Vec::new()
        } else {
            csv_parser::validate_headers(&result.headers).missing
        };

        Self {
            total_rows: result.meta.total_rows,
            valid_rows: result.meta.valid_rows,
            invalid_rows: result.meta.invalid_rows,
            skipped_rows: result.meta.skipped_rows,
            missing_headers,
            errors: result.errors.clone(),
            error_summary,
        }
    }
}

/// Transformation section of an import report
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TransformationReport {
    /// Number of work items produced (always equals valid row count)
    pub record_count: usize,
}

/// Complete outcome of one import run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub parsing: ParsingReport,
    pub transformation: TransformationReport,
    pub storage: StorageResult,
}

/// Outcome of a validate-only run (no storage involved)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewReport {
    pub parsing: ParsingReport,

    /// Bounded sample of valid rows for caller-side display
    pub sample: Vec<ValidatedRow>,
}

/// Parse and validate content without touching storage
///
/// Used for upload preflight: the caller gets counts, itemized errors and
/// a small sample of the rows that would be imported.
pub fn preview(content: &str, config: &Config) -> PreviewReport {
    let result = csv_parser::parse_and_validate(content);
    let parsing = ParsingReport::from_validation(&result);

    let sample = result
        .valid_rows
        .into_iter()
        .take(config.preview_rows)
        .collect();

    PreviewReport { parsing, sample }
}

/// The five-stage CSV import pipeline bound to a work item store
pub struct ImportPipeline<S: WorkItemStore + ?Sized> {
    store: Arc<S>,
    config: Config,
}

impl<S: WorkItemStore + ?Sized> ImportPipeline<S> {
    /// Create a pipeline over a store with the given configuration
    pub fn new(store: Arc<S>, config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    /// Import CSV content into the given sprint
    ///
    /// The sprint must already exist; a missing sprint is a caller-level
    /// error, not a data-quality outcome. With `replace_existing` set, all
    /// of the sprint's work items are deleted before reconciliation.
    pub async fn import(&self, sprint_id: &str, content: &str) -> Result<ImportReport> {
        if !self.store.sprint_exists(sprint_id).await? {
            return Err(Error::sprint_not_found(sprint_id));
        }

        if self.config.replace_existing {
            let removed = self.store.delete_by_sprint(sprint_id).await?;
            info!(
                "Replace mode: removed {} existing work items from sprint {}",
                removed, sprint_id
            );
        }

        let validation = csv_parser::parse_and_validate(content);
        debug!(
            "Parsed sprint {} upload: {} valid, {} invalid of {} rows",
            sprint_id,
            validation.meta.valid_rows,
            validation.meta.invalid_rows,
            validation.meta.total_rows
        );

        let items = row_transformer::transform_rows(&validation.valid_rows, sprint_id);

        let reconciler = Reconciler::new(self.store.clone(), &self.config.storage);
        let storage = reconciler.bulk_store(sprint_id, &items).await;

        Ok(ImportReport {
            parsing: ParsingReport::from_validation(&validation),
            transformation: TransformationReport {
                record_count: items.len(),
            },
            storage,
        })
    }
}
