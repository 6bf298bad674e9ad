//! Application constants for sprint ingestion
//!
//! This module contains column names, classification vocabularies and
//! default values used throughout the ingestion pipeline. The vocabularies
//! match what Azure DevOps query exports actually produce.

// =============================================================================
// CSV Column Names
// =============================================================================

/// Column headers recognized in Azure DevOps CSV exports
pub mod columns {
    pub const WORK_ITEM_ID: &str = "ID";
    pub const TITLE: &str = "Title";
    pub const WORK_ITEM_TYPE: &str = "Work Item Type";
    pub const STATE: &str = "State";
    pub const STORY_POINTS: &str = "Story Points";
    pub const ASSIGNED_TO: &str = "Assigned To";
    pub const AREA_PATH: &str = "Area Path";
    pub const TAGS: &str = "Tags";
    pub const CREATED_DATE: &str = "Created Date";
    pub const CHANGED_DATE: &str = "Changed Date";
    pub const CLOSED_DATE: &str = "Closed Date";
    pub const ITERATION_PATH: &str = "Iteration Path";

    /// Columns that must be present and non-empty for a row to be valid
    pub const REQUIRED: &[&str] = &[WORK_ITEM_ID, TITLE, WORK_ITEM_TYPE, STATE];

    /// Map alternate header spellings seen in exports to the canonical name
    ///
    /// Query exports label the id column "ID" or "Work Item ID" depending on
    /// the export path, and hand-edited files abbreviate "Work Item Type"
    /// and "Story Points". Unknown headers pass through unchanged.
    pub fn canonical(header: &str) -> &str {
        match header {
            "Work Item ID" => WORK_ITEM_ID,
            "Type" => WORK_ITEM_TYPE,
            "Points" => STORY_POINTS,
            other => other,
        }
    }

    /// All columns preserved in the audit snapshot of a work item
    pub const ALL: &[&str] = &[
        WORK_ITEM_ID,
        TITLE,
        WORK_ITEM_TYPE,
        STATE,
        STORY_POINTS,
        ASSIGNED_TO,
        AREA_PATH,
        TAGS,
        CREATED_DATE,
        CHANGED_DATE,
        CLOSED_DATE,
        ITERATION_PATH,
    ];
}

// =============================================================================
// Delimiter Detection
// =============================================================================

/// Candidate field delimiters, inspected on the header line only
pub const DELIMITER_CANDIDATES: &[u8] = &[b',', b';', b'\t'];

/// Delimiter used when detection finds no candidate or a tie
pub const DEFAULT_DELIMITER: u8 = b',';

// =============================================================================
// State and Tag Vocabularies
// =============================================================================

/// Work item states treated as terminal ("done") for reporting
///
/// Matching is case-insensitive and exact (no substring matching); a
/// custom state like "Closed - Wontfix" does not count as done.
pub mod states {
    pub const DONE: &[&str] = &["closed", "done", "completed"];
    pub const ONGOING: &[&str] = &["active", "resolved", "in progress"];
}

/// Marker phrases looked up in the free-text tag list
///
/// All matching over tags is case-insensitive substring matching, so
/// "2024 PI Commitment (Q3)" counts as a PI commitment.
pub mod tag_markers {
    pub const TEAM_FOCUS: &str = "team focus";
    pub const PI_COMMITMENT: &str = "pi commitment";
    pub const SPRINT_GOAL: &str = "sprint goal";
    pub const HIGHLIGHT: &str = "highlight";
    pub const KEY_ACHIEVEMENT: &str = "key achievement";
}

// =============================================================================
// Storage Reconciliation
// =============================================================================

/// Number of work items written per storage round-trip
pub const DEFAULT_CHUNK_SIZE: usize = 100;

// =============================================================================
// Upload Admission
// =============================================================================

/// Maximum accepted upload size; a caller-side gate, not a pipeline rule
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

// =============================================================================
// Reporting
// =============================================================================

/// Maximum number of valid rows included in a preview report
pub const PREVIEW_SAMPLE_ROWS: usize = 5;
