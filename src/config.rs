//! Configuration management and validation.
//!
//! Provides configuration for the ingestion pipeline: storage chunk sizing,
//! replace-vs-merge import mode and preview sampling. Values are
//! serde-compatible so callers can layer them from files or flags.

use crate::constants::{DEFAULT_CHUNK_SIZE, PREVIEW_SAMPLE_ROWS};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Top-level configuration for an import run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Storage reconciliation settings
    pub storage: StorageConfig,

    /// Delete existing work items for the sprint before importing
    ///
    /// When false (the default), re-imports merge: existing (sprint,
    /// work item id) pairs are updated in place.
    pub replace_existing: bool,

    /// Number of valid rows echoed back in preview reports
    pub preview_rows: usize,
}

/// Storage reconciliation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Number of records written per bulk round-trip
    ///
    /// Batches larger than this are split; chunks are written sequentially.
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            replace_existing: false,
            preview_rows: PREVIEW_SAMPLE_ROWS,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Config {
    /// Validate configuration values for consistency
    pub fn validate(&self) -> Result<()> {
        if self.storage.chunk_size == 0 {
            return Err(Error::configuration(
                "storage.chunk_size must be greater than zero",
            ));
        }

        debug!(
            "Configuration validated: chunk_size={}, replace_existing={}",
            self.storage.chunk_size, self.replace_existing
        );
        Ok(())
    }
}
