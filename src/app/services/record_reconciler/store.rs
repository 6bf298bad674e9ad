//! Storage port for work item persistence
//!
//! The relational store is an external collaborator; the pipeline only
//! depends on this trait. Adapters live in `app::adapters`, and tests
//! inject fakes to exercise the reconciler's fallback paths.

use crate::app::models::WorkItem;
use crate::Result;
use async_trait::async_trait;
use std::collections::HashSet;

/// Operations the reconciler requires from a work item store
///
/// Uniqueness is scoped by `(sprint_id, work_item_id)`; `upsert_batch` must
/// update in place on conflict, never duplicate. Each method is atomic from
/// the caller's perspective: all-or-error, not partial.
#[async_trait]
pub trait WorkItemStore: Send + Sync {
    /// Confirm the parent sprint exists
    async fn sprint_exists(&self, sprint_id: &str) -> Result<bool>;

    /// Conflict-aware bulk write keyed on `(sprint_id, work_item_id)`
    ///
    /// Existing keys are overwritten in place; new keys are inserted. The
    /// primitive does not report an insert/update split.
    async fn upsert_batch(&self, items: &[WorkItem]) -> Result<()>;

    /// Which of the given work item ids already exist for the sprint
    async fn find_existing(
        &self,
        sprint_id: &str,
        work_item_ids: &[String],
    ) -> Result<HashSet<String>>;

    /// Insert a single work item; errors if the key already exists
    async fn insert_one(&self, item: &WorkItem) -> Result<()>;

    /// Update a single existing work item; errors if the key is absent
    async fn update_one(&self, sprint_id: &str, work_item_id: &str, item: &WorkItem)
        -> Result<()>;

    /// Delete all work items for a sprint, returning the count removed
    ///
    /// Invoked by callers for full-replace re-imports; the reconciler
    /// itself never deletes.
    async fn delete_by_sprint(&self, sprint_id: &str) -> Result<usize>;

    /// Count work items for a sprint
    async fn count_by_sprint(&self, sprint_id: &str) -> Result<usize>;
}
