//! Field derivation functions for work item transformation
//!
//! Each function is pure and total: every unparseable input has a defined
//! fallback (`None`, an empty list or the default indicator). Nothing here
//! can fail, which keeps the transform stage error-free by construction.

use crate::app::models::StatusIndicator;
use crate::constants::{states, tag_markers};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

/// Extract the feature name from a hierarchical area path
///
/// Area paths encode `Project\Feature\SubFeature`; both backslash and
/// forward slash separators are accepted. The feature is the second
/// non-empty segment. A single-segment path has no project prefix to strip,
/// so it yields `None`.
pub fn extract_feature_name(area_path: Option<&str>) -> Option<String> {
    let path = area_path?.trim();
    if path.is_empty() {
        return None;
    }

    let segments: Vec<&str> = path
        .split(['\\', '/'])
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.len() >= 2 {
        Some(segments[1].to_string())
    } else {
        None
    }
}

/// Parse a free-text comma-separated tag list
///
/// Pieces are trimmed and empty pieces dropped; surviving tags keep their
/// source order. Null, empty and whitespace-only input all yield `[]`.
pub fn parse_tags(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}

/// Best-effort parse of a heterogeneous date string
///
/// Accepts ISO 8601 with or without time, the US slash format and bare
/// dates. Returns `None` for empty or unparseable input; callers cannot
/// distinguish "not supplied" from "unparseable".
pub fn parse_date(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }

    for format in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            let naive = date.and_hms_opt(0, 0, 0)?;
            return Some(DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }

    debug!("Unparseable date value: '{}'", raw);
    None
}

/// Derive the status indicator from state and tags
///
/// Priority order: a "Team Focus" tag beats everything, then terminal
/// states, then active states, then the catch-all. Tag matching is
/// case-insensitive substring; state matching is case-insensitive exact.
pub fn determine_status_indicator(state: &str, tags: &[String]) -> StatusIndicator {
    if tags_contain(tags, tag_markers::TEAM_FOCUS) {
        return StatusIndicator::TeamFocus;
    }

    let state = state.to_lowercase();
    if states::DONE.contains(&state.as_str()) {
        StatusIndicator::Done
    } else if states::ONGOING.contains(&state.as_str()) {
        StatusIndicator::Ongoing
    } else {
        StatusIndicator::NotDone
    }
}

/// True when any tag marks the item as a PI commitment
pub fn is_pi_commitment(tags: &[String]) -> bool {
    tags_contain(tags, tag_markers::PI_COMMITMENT)
}

/// True when any tag marks the item as a sprint goal
pub fn is_sprint_goal(tags: &[String]) -> bool {
    tags_contain(tags, tag_markers::SPRINT_GOAL)
}

/// True when any tag marks the item as a highlight or key achievement
pub fn is_highlight(tags: &[String]) -> bool {
    tags_contain(tags, tag_markers::HIGHLIGHT) || tags_contain(tags, tag_markers::KEY_ACHIEVEMENT)
}

/// Case-insensitive substring search over the tag list
fn tags_contain(tags: &[String], marker: &str) -> bool {
    tags.iter().any(|tag| tag.to_lowercase().contains(marker))
}
