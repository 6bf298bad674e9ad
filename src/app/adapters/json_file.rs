//! JSON-file-backed work item store
//!
//! Persists each sprint's work items as one JSON document under a data
//! directory, giving the CLI a durable import target without a database.
//! The same port contract applies: `(sprint_id, work_item_id)` is unique
//! and upserts overwrite in place.

use crate::app::models::WorkItem;
use crate::app::services::record_reconciler::WorkItemStore;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Filesystem implementation of [`WorkItemStore`]
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .map_err(|e| Error::io(format!("Failed to create data directory {:?}", root), e))?;
        Ok(Self { root })
    }

    /// Register a sprint, creating its (empty) document if absent
    pub fn create_sprint(&self, sprint_id: &str) -> Result<()> {
        let path = self.sprint_path(sprint_id)?;
        if !path.exists() {
            debug!("Creating sprint document {:?}", path);
            self.save(&path, &[])?;
        }
        Ok(())
    }

    fn sprint_path(&self, sprint_id: &str) -> Result<PathBuf> {
        // Sprint ids become file names; path separators would escape the root
        if sprint_id.is_empty() || sprint_id.contains(['/', '\\', '.']) {
            return Err(Error::data_validation(format!(
                "Invalid sprint id for file store: '{}'",
                sprint_id
            )));
        }
        Ok(self.root.join(format!("{}.json", sprint_id)))
    }

    fn load(&self, path: &Path) -> Result<Vec<WorkItem>> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read sprint document {:?}", path), e))?;
        serde_json::from_str(&content).map_err(|e| {
            Error::serialization(format!("Corrupt sprint document {:?}", path), e)
        })
    }

    fn save(&self, path: &Path, items: &[WorkItem]) -> Result<()> {
        let content = serde_json::to_string_pretty(items)?;
        std::fs::write(path, content)
            .map_err(|e| Error::io(format!("Failed to write sprint document {:?}", path), e))
    }

    fn load_sprint(&self, sprint_id: &str) -> Result<(PathBuf, Vec<WorkItem>)> {
        let path = self.sprint_path(sprint_id)?;
        if !path.exists() {
            return Err(Error::sprint_not_found(sprint_id));
        }
        let items = self.load(&path)?;
        Ok((path, items))
    }
}

#[async_trait]
impl WorkItemStore for JsonFileStore {
    async fn sprint_exists(&self, sprint_id: &str) -> Result<bool> {
        Ok(self.sprint_path(sprint_id)?.exists())
    }

    async fn upsert_batch(&self, items: &[WorkItem]) -> Result<()> {
        let Some(first) = items.first() else {
            return Ok(());
        };
        let (path, mut stored) = self.load_sprint(&first.sprint_id)?;

        for item in items {
            match stored
                .iter_mut()
                .find(|existing| existing.work_item_id == item.work_item_id)
            {
                Some(existing) => *existing = item.clone(),
                None => stored.push(item.clone()),
            }
        }
        self.save(&path, &stored)
    }

    async fn find_existing(
        &self,
        sprint_id: &str,
        work_item_ids: &[String],
    ) -> Result<HashSet<String>> {
        let (_, stored) = self.load_sprint(sprint_id)?;
        Ok(stored
            .iter()
            .filter(|item| work_item_ids.contains(&item.work_item_id))
            .map(|item| item.work_item_id.clone())
            .collect())
    }

    async fn insert_one(&self, item: &WorkItem) -> Result<()> {
        let (path, mut stored) = self.load_sprint(&item.sprint_id)?;
        if stored
            .iter()
            .any(|existing| existing.work_item_id == item.work_item_id)
        {
            return Err(Error::storage(format!(
                "duplicate key (sprint {}, work item {})",
                item.sprint_id, item.work_item_id
            )));
        }
        stored.push(item.clone());
        self.save(&path, &stored)
    }

    async fn update_one(
        &self,
        sprint_id: &str,
        work_item_id: &str,
        item: &WorkItem,
    ) -> Result<()> {
        let (path, mut stored) = self.load_sprint(sprint_id)?;
        match stored
            .iter_mut()
            .find(|existing| existing.work_item_id == work_item_id)
        {
            Some(existing) => {
                *existing = item.clone();
                self.save(&path, &stored)
            }
            None => Err(Error::storage(format!(
                "no work item {} in sprint {}",
                work_item_id, sprint_id
            ))),
        }
    }

    async fn delete_by_sprint(&self, sprint_id: &str) -> Result<usize> {
        let (path, stored) = self.load_sprint(sprint_id)?;
        self.save(&path, &[])?;
        Ok(stored.len())
    }

    async fn count_by_sprint(&self, sprint_id: &str) -> Result<usize> {
        let (_, stored) = self.load_sprint(sprint_id)?;
        Ok(stored.len())
    }
}
