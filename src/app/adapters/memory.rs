//! In-memory work item store
//!
//! Backs the storage port with process-local maps. Used as the test double
//! for pipeline and reconciler tests and as a throwaway target for dry-run
//! imports. Uniqueness of `(sprint_id, work_item_id)` is enforced the same
//! way a relational unique constraint would be.

use crate::app::models::WorkItem;
use crate::app::services::record_reconciler::WorkItemStore;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Debug, Default)]
struct Inner {
    sprints: HashSet<String>,
    // Keyed by (sprint_id, work_item_id)
    items: HashMap<(String, String), WorkItem>,
}

/// Process-local implementation of [`WorkItemStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sprint so imports against it pass the existence check
    pub fn create_sprint(&self, sprint_id: impl Into<String>) {
        self.inner.lock().unwrap().sprints.insert(sprint_id.into());
    }

    /// All work items for a sprint, ordered by work item id
    pub fn items_for_sprint(&self, sprint_id: &str) -> Vec<WorkItem> {
        let inner = self.inner.lock().unwrap();
        let mut items: Vec<WorkItem> = inner
            .items
            .iter()
            .filter(|((sprint, _), _)| sprint == sprint_id)
            .map(|(_, item)| item.clone())
            .collect();
        items.sort_by(|a, b| a.work_item_id.cmp(&b.work_item_id));
        items
    }
}

#[async_trait]
impl WorkItemStore for MemoryStore {
    async fn sprint_exists(&self, sprint_id: &str) -> Result<bool> {
        Ok(self.inner.lock().unwrap().sprints.contains(sprint_id))
    }

    async fn upsert_batch(&self, items: &[WorkItem]) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        for item in items {
            inner.items.insert(
                (item.sprint_id.clone(), item.work_item_id.clone()),
                item.clone(),
            );
        }
        Ok(())
    }

    async fn find_existing(
        &self,
        sprint_id: &str,
        work_item_ids: &[String],
    ) -> Result<HashSet<String>> {
        let inner = self.inner.lock().unwrap();
        Ok(work_item_ids
            .iter()
            .filter(|id| {
                inner
                    .items
                    .contains_key(&(sprint_id.to_string(), id.to_string()))
            })
            .cloned()
            .collect())
    }

    async fn insert_one(&self, item: &WorkItem) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let key = (item.sprint_id.clone(), item.work_item_id.clone());
        if inner.items.contains_key(&key) {
            return Err(Error::storage(format!(
                "duplicate key (sprint {}, work item {})",
                item.sprint_id, item.work_item_id
            )));
        }
        inner.items.insert(key, item.clone());
        Ok(())
    }

    async fn update_one(
        &self,
        sprint_id: &str,
        work_item_id: &str,
        item: &WorkItem,
    ) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let key = (sprint_id.to_string(), work_item_id.to_string());
        match inner.items.get_mut(&key) {
            Some(existing) => {
                *existing = item.clone();
                Ok(())
            }
            None => Err(Error::storage(format!(
                "no work item {} in sprint {}",
                work_item_id, sprint_id
            ))),
        }
    }

    async fn delete_by_sprint(&self, sprint_id: &str) -> Result<usize> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.items.len();
        inner.items.retain(|(sprint, _), _| sprint != sprint_id);
        Ok(before - inner.items.len())
    }

    async fn count_by_sprint(&self, sprint_id: &str) -> Result<usize> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .items
            .keys()
            .filter(|(sprint, _)| sprint == sprint_id)
            .count())
    }
}
