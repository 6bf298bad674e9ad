//! Data models for sprint ingestion
//!
//! This module contains the core data structures for representing validated
//! CSV rows and persisted work items, following the shape of Azure DevOps
//! query exports.

use crate::constants::columns;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;

// =============================================================================
// Status Indicator
// =============================================================================

/// At-a-glance classification symbol for a work item
///
/// Derived from state and tags with a fixed priority order: a "Team Focus"
/// tag always wins, then terminal states, then active states, then the
/// catch-all. See [`determine_status_indicator`] for the derivation.
///
/// [`determine_status_indicator`]: crate::app::services::row_transformer::determine_status_indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusIndicator {
    /// Tagged as a team focus item (`*`)
    #[serde(rename = "*")]
    TeamFocus,
    /// State is Closed, Done or Completed (`✓`)
    #[serde(rename = "✓")]
    Done,
    /// State is Active, Resolved or In Progress (`|`)
    #[serde(rename = "|")]
    Ongoing,
    /// Any other state (`✗`)
    #[serde(rename = "✗")]
    NotDone,
}

impl StatusIndicator {
    /// Single-character symbol used in dashboard tables
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::TeamFocus => "*",
            Self::Done => "✓",
            Self::Ongoing => "|",
            Self::NotDone => "✗",
        }
    }

    /// Human-readable name of the indicator
    pub fn label(&self) -> &'static str {
        match self {
            Self::TeamFocus => "Team Focus",
            Self::Done => "Done",
            Self::Ongoing => "Ongoing",
            Self::NotDone => "Not Done",
        }
    }
}

impl std::fmt::Display for StatusIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// =============================================================================
// Validated Row
// =============================================================================

/// One CSV row that passed schema validation
///
/// The four required fields are guaranteed non-empty after trimming.
/// Optional fields keep their source string form; derivation into typed
/// values (dates, tags, flags) happens in the transformer so that every
/// failure-prone parse is isolated there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedRow {
    /// External work item identifier (natural key within a sprint)
    pub work_item_id: String,

    /// Work item title
    pub title: String,

    /// Work item type (e.g., "User Story", "Bug")
    pub work_item_type: String,

    /// Workflow state (e.g., "Active", "Closed")
    pub state: String,

    /// Story points; non-numeric source values coerce silently to `None`
    pub story_points: Option<i32>,

    /// Assignee display name
    pub assigned_to: Option<String>,

    /// Hierarchical area path (e.g., "Project\\Feature\\Component")
    pub area_path: Option<String>,

    /// Raw comma-separated tag list
    pub tags: Option<String>,

    /// Creation date as exported (unparsed)
    pub created_date: Option<String>,

    /// Last-change date as exported (unparsed)
    pub changed_date: Option<String>,

    /// Closed date as exported (unparsed)
    pub closed_date: Option<String>,

    /// Iteration path label
    pub iteration_path: Option<String>,
}

impl ValidatedRow {
    /// Verbatim snapshot of the source fields, keyed by column header
    ///
    /// Stored alongside the transformed work item so the original export
    /// values remain auditable after derivation.
    pub fn audit_snapshot(&self) -> serde_json::Value {
        json!({
            columns::WORK_ITEM_ID: self.work_item_id,
            columns::TITLE: self.title,
            columns::WORK_ITEM_TYPE: self.work_item_type,
            columns::STATE: self.state,
            columns::STORY_POINTS: self.story_points,
            columns::ASSIGNED_TO: self.assigned_to,
            columns::AREA_PATH: self.area_path,
            columns::TAGS: self.tags,
            columns::CREATED_DATE: self.created_date,
            columns::CHANGED_DATE: self.changed_date,
            columns::CLOSED_DATE: self.closed_date,
            columns::ITERATION_PATH: self.iteration_path,
        })
    }
}

// =============================================================================
// Work Item
// =============================================================================

/// Transformed work item in its persisted shape
///
/// Uniqueness is scoped by the `(sprint_id, work_item_id)` pair; re-importing
/// the same pair updates the existing record rather than duplicating it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Owning sprint identifier
    pub sprint_id: String,

    /// External work item identifier (natural key within the sprint)
    pub work_item_id: String,

    /// Work item title
    pub title: String,

    /// Work item type
    pub work_item_type: String,

    /// Workflow state
    pub state: String,

    /// Story points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_points: Option<i32>,

    /// Assignee display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,

    /// Source area path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_path: Option<String>,

    /// Feature name derived from the area path's second segment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_name: Option<String>,

    /// Parsed tags, source order preserved
    pub tags: Vec<String>,

    /// Parsed creation timestamp; unparseable source dates become `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,

    /// Parsed last-change timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_date: Option<DateTime<Utc>>,

    /// Parsed closed timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_date: Option<DateTime<Utc>>,

    /// Iteration path label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iteration_path: Option<String>,

    /// Tagged as a PI commitment
    pub is_pi_commitment: bool,

    /// Tagged as a sprint goal
    pub is_sprint_goal: bool,

    /// Tagged as a highlight / key achievement
    pub is_highlight: bool,

    /// Derived at-a-glance classification
    pub status_indicator: StatusIndicator,

    /// Verbatim copy of the source row for audit
    pub raw_data: serde_json::Value,
}

// =============================================================================
// Raw Record
// =============================================================================

/// Untyped CSV record keyed by trimmed column header
///
/// Produced by the structural parser and discarded after validation; no
/// untyped data flows past the validator.
pub type RawRecord = HashMap<String, String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_indicator_symbols_match_dashboard_legend() {
        assert_eq!(StatusIndicator::TeamFocus.symbol(), "*");
        assert_eq!(StatusIndicator::Done.symbol(), "✓");
        assert_eq!(StatusIndicator::Ongoing.symbol(), "|");
        assert_eq!(StatusIndicator::NotDone.symbol(), "✗");
    }

    #[test]
    fn status_indicator_serializes_as_symbol() {
        let json = serde_json::to_string(&StatusIndicator::Done).unwrap();
        assert_eq!(json, "\"✓\"");

        let back: StatusIndicator = serde_json::from_str("\"*\"").unwrap();
        assert_eq!(back, StatusIndicator::TeamFocus);
    }

    #[test]
    fn audit_snapshot_preserves_source_values() {
        let row = ValidatedRow {
            work_item_id: "12345".to_string(),
            title: "Test Story".to_string(),
            work_item_type: "User Story".to_string(),
            state: "Active".to_string(),
            story_points: Some(5),
            assigned_to: None,
            area_path: Some("Proj\\Search".to_string()),
            tags: Some("Sprint Goal".to_string()),
            created_date: Some("2024-01-15".to_string()),
            changed_date: None,
            closed_date: None,
            iteration_path: None,
        };

        let snapshot = row.audit_snapshot();
        assert_eq!(snapshot["ID"], "12345");
        assert_eq!(snapshot["Story Points"], 5);
        assert_eq!(snapshot["Area Path"], "Proj\\Search");
        assert!(snapshot["Assigned To"].is_null());
    }
}
