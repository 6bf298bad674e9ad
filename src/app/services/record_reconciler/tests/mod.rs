//! Test utilities and failure-injecting store for reconciler testing

use crate::app::adapters::memory::MemoryStore;
use crate::app::models::{StatusIndicator, WorkItem};
use crate::app::services::record_reconciler::WorkItemStore;
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;


/// Build a minimal work item for a sprint
pub fn work_item(sprint_id: &str, work_item_id: &str) -> WorkItem {
    WorkItem {
        sprint_id: sprint_id.to_string(),
        work_item_id: work_item_id.to_string(),
        title: format!("Item {}", work_item_id),
        work_item_type: "User Story".to_string(),
        state: "Active".to_string(),
        story_points: Some(3),
        assigned_to: None,
        area_path: None,
        feature_name: None,
        tags: Vec::new(),
        created_date: None,
        changed_date: None,
        closed_date: None,
        iteration_path: None,
        is_pi_commitment: false,
        is_sprint_goal: false,
        is_highlight: false,
        status_indicator: StatusIndicator::Ongoing,
        raw_data: json!({}),
    }
}

/// Build a batch of sequentially numbered work items
pub fn work_items(sprint_id: &str, count: usize) -> Vec<WorkItem> {
    (1..=count)
        .map(|n| work_item(sprint_id, &n.to_string()))
        .collect()
}

/// Store wrapper with switchable failure injection
///
/// Delegates to an in-memory store while allowing tests to reject bulk
/// upserts, existence probes or writes for specific work item ids.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_bulk: AtomicBool,
    pub fail_probe: AtomicBool,
    pub fail_writes_for: Mutex<HashSet<String>>,
    pub bulk_calls: AtomicUsize,
    pub probe_calls: AtomicUsize,
}

impl FlakyStore {
    pub fn new() -> Self {
        let store = Self::default();
        store.inner.create_sprint("sprint-1");
        store
    }

    pub fn block_writes_for(&self, work_item_id: &str) {
        self.fail_writes_for
            .lock()
            .unwrap()
            .insert(work_item_id.to_string());
    }

    fn write_blocked(&self, work_item_id: &str) -> bool {
        self.fail_writes_for.lock().unwrap().contains(work_item_id)
    }
}

#[async_trait]
impl WorkItemStore for FlakyStore {
    async fn sprint_exists(&self, sprint_id: &str) -> Result<bool> {
        self.inner.sprint_exists(sprint_id).await
    }

    async fn upsert_batch(&self, items: &[WorkItem]) -> Result<()> {
        self.bulk_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_bulk.load(Ordering::SeqCst) {
            return Err(Error::storage("bulk upsert rejected"));
        }
        self.inner.upsert_batch(items).await
    }

    async fn find_existing(
        &self,
        sprint_id: &str,
        work_item_ids: &[String],
    ) -> Result<HashSet<String>> {
        self.probe_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_probe.load(Ordering::SeqCst) {
            return Err(Error::storage("probe rejected"));
        }
        self.inner.find_existing(sprint_id, work_item_ids).await
    }

    async fn insert_one(&self, item: &WorkItem) -> Result<()> {
        if self.write_blocked(&item.work_item_id) {
            return Err(Error::storage("insert rejected"));
        }
        self.inner.insert_one(item).await
    }

    async fn update_one(
        &self,
        sprint_id: &str,
        work_item_id: &str,
        item: &WorkItem,
    ) -> Result<()> {
        if self.write_blocked(work_item_id) {
            return Err(Error::storage("update rejected"));
        }
        self.inner.update_one(sprint_id, work_item_id, item).await
    }

    async fn delete_by_sprint(&self, sprint_id: &str) -> Result<usize> {
        self.inner.delete_by_sprint(sprint_id).await
    }

    async fn count_by_sprint(&self, sprint_id: &str) -> Result<usize> {
        self.inner.count_by_sprint(sprint_id).await
    }
}
