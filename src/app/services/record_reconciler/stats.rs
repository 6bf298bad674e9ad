//! Storage reconciliation result structures

use serde::{Deserialize, Serialize};

/// A per-record storage failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageFailure {
    /// Natural key of the record that failed
    pub work_item_id: String,

    /// Failure description from the store
    pub message: String,
}

/// Outcome of reconciling one batch against the store
///
/// Accumulated across chunks; every record in the input batch ends in
/// exactly one of inserted, updated or failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageResult {
    /// Records written under a previously unseen key
    pub inserted: usize,

    /// Records that overwrote an existing key
    pub updated: usize,

    /// Records that could not be persisted
    pub failed: usize,

    /// Per-record failures, in processing order
    pub errors: Vec<StorageFailure>,
}

impl StorageResult {
    /// Fold another (per-chunk) result into this one
    pub fn merge(&mut self, other: StorageResult) {
        self.inserted += other.inserted;
        self.updated += other.updated;
        self.failed += other.failed;
        self.errors.extend(other.errors);
    }

    /// Record a single failed work item
    pub fn record_failure(&mut self, work_item_id: impl Into<String>, message: impl Into<String>) {
        self.failed += 1;
        self.errors.push(StorageFailure {
            work_item_id: work_item_id.into(),
            message: message.into(),
        });
    }

    /// Total number of records accounted for
    pub fn total(&self) -> usize {
        self.inserted + self.updated + self.failed
    }
}
