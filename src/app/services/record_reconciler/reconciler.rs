//! Chunked, conflict-aware work item reconciliation
//!
//! Writes a batch of transformed work items against the store's
//! `(sprint_id, work_item_id)` uniqueness constraint. The correctness-
//! critical write is always the single upsert; the existence probe before
//! it exists only to attribute insert vs update counts, and any failure
//! along the bulk path degrades to per-record processing so one bad record
//! cannot sink its siblings.
//!
//! Chunks are processed sequentially so the fallback path of one chunk can
//! never race a later chunk's probe against the same sprint.

use super::stats::StorageResult;
use super::store::WorkItemStore;
use crate::app::models::WorkItem;
use crate::config::StorageConfig;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Storage reconciler for transformed work item batches
pub struct Reconciler<S: WorkItemStore + ?Sized> {
    store: Arc<S>,
    chunk_size: usize,
}

impl<S: WorkItemStore + ?Sized> Reconciler<S> {
    /// Create a reconciler over a store with the given chunking config
    pub fn new(store: Arc<S>, config: &StorageConfig) -> Self {
        Self {
            store,
            chunk_size: config.chunk_size.max(1),
        }
    }

    /// Reconcile a batch of work items belonging to one sprint
    ///
    /// Never returns an error: storage failures are captured per record in
    /// the result. An empty batch short-circuits without any storage call.
    pub async fn bulk_store(&self, sprint_id: &str, items: &[WorkItem]) -> StorageResult {
        if items.is_empty() {
            return StorageResult::default();
        }

        let mut result = StorageResult::default();
        for chunk in items.chunks(self.chunk_size) {
            let chunk_result = self.store_chunk(sprint_id, chunk).await;
            result.merge(chunk_result);
        }

        info!(
            "Reconciled {} work items for sprint {}: {} inserted, {} updated, {} failed",
            items.len(),
            sprint_id,
            result.inserted,
            result.updated,
            result.failed
        );
        result
    }

    /// Write one chunk via the bulk path, degrading on any failure
    ///
    /// The probe runs before the upsert because the upsert primitive cannot
    /// report which keys it inserted vs overwrote. The probe is attribution
    /// only; the upsert alone decides what gets written.
    async fn store_chunk(&self, sprint_id: &str, chunk: &[WorkItem]) -> StorageResult {
        let keys: Vec<String> = chunk.iter().map(|item| item.work_item_id.clone()).collect();

        let existing = match self.store.find_existing(sprint_id, &keys).await {
            Ok(existing) => existing,
            Err(e) => {
                warn!(
                    "Existence probe failed for sprint {}, degrading to per-record writes: {}",
                    sprint_id, e
                );
                return self.store_individually(sprint_id, chunk).await;
            }
        };

        if let Err(e) = self.store.upsert_batch(chunk).await {
            warn!(
                "Bulk upsert rejected for sprint {}, degrading to per-record writes: {}",
                sprint_id, e
            );
            return self.store_individually(sprint_id, chunk).await;
        }

        let mut result = StorageResult::default();
        for item in chunk {
            if existing.contains(&item.work_item_id) {
                result.updated += 1;
            } else {
                result.inserted += 1;
            }
        }
        result
    }

    /// Degraded fallback: probe and write each record on its own
    ///
    /// A failure here is recorded against the offending work item and does
    /// not stop processing of the remaining records.
    async fn store_individually(&self, sprint_id: &str, chunk: &[WorkItem]) -> StorageResult {
        debug!(
            "Storing {} work items individually for sprint {}",
            chunk.len(),
            sprint_id
        );

        let mut result = StorageResult::default();
        for item in chunk {
            let key = std::slice::from_ref(&item.work_item_id);

            let exists = match self.store.find_existing(sprint_id, key).await {
                Ok(existing) => existing.contains(&item.work_item_id),
                Err(e) => {
                    result.record_failure(&item.work_item_id, e.to_string());
                    continue;
                }
            };

            let outcome = if exists {
                self.store
                    .update_one(sprint_id, &item.work_item_id, item)
                    .await
            } else {
                self.store.insert_one(item).await
            };

            match outcome {
                Ok(()) if exists => result.updated += 1,
                Ok(()) => result.inserted += 1,
                Err(e) => result.record_failure(&item.work_item_id, e.to_string()),
            }
        }
        result
    }
}
