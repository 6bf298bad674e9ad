//! Storage reconciliation for transformed work items
//!
//! Fifth and final pipeline stage, and the only one with side effects.
//! Reconciles a batch of work items against existing persisted records via
//! idempotent upserts: re-submitting the same `(sprint, work item id)` pair
//! updates in place, never duplicates.
//!
//! ## Architecture
//!
//! - [`store`] - The storage port the pipeline depends on
//! - [`reconciler`] - Chunked bulk writes with per-record fallback
//! - [`stats`] - Batch outcome accounting

pub mod reconciler;
pub mod stats;
pub mod store;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use reconciler::Reconciler;
pub use stats::{StorageFailure, StorageResult};
pub use store::WorkItemStore;
