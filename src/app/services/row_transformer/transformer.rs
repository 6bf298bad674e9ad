//! Validated row to work item transformation
//!
//! Maps each [`ValidatedRow`] into the persisted [`WorkItem`] shape. The
//! transform always succeeds: every failure-prone parse was isolated into
//! the null-returning helpers in [`fields`](super::fields).

use super::fields::{
    determine_status_indicator, extract_feature_name, is_highlight, is_pi_commitment,
    is_sprint_goal, parse_date, parse_tags,
};
use crate::app::models::{ValidatedRow, WorkItem};
use tracing::debug;

/// Transform one validated row into a work item owned by `sprint_id`
pub fn transform_row(row: &ValidatedRow, sprint_id: &str) -> WorkItem {
    let tags = parse_tags(row.tags.as_deref());
    let status_indicator = determine_status_indicator(&row.state, &tags);

    WorkItem {
        sprint_id: sprint_id.to_string(),
        work_item_id: row.work_item_id.clone(),
        title: row.title.clone(),
        work_item_type: row.work_item_type.clone(),
        state: row.state.clone(),
        story_points: row.story_points,
        assigned_to: row.assigned_to.clone(),
        area_path: row.area_path.clone(),
        feature_name: extract_feature_name(row.area_path.as_deref()),
        created_date: parse_date(row.created_date.as_deref()),
        changed_date: parse_date(row.changed_date.as_deref()),
        closed_date: parse_date(row.closed_date.as_deref()),
        iteration_path: row.iteration_path.clone(),
        is_pi_commitment: is_pi_commitment(&tags),
        is_sprint_goal: is_sprint_goal(&tags),
        is_highlight: is_highlight(&tags),
        status_indicator,
        raw_data: row.audit_snapshot(),
        tags,
    }
}

/// Transform a batch of validated rows for one sprint
pub fn transform_rows(rows: &[ValidatedRow], sprint_id: &str) -> Vec<WorkItem> {
    let items: Vec<WorkItem> = rows.iter().map(|row| transform_row(row, sprint_id)).collect();
    debug!(
        "Transformed {} rows into work items for sprint {}",
        items.len(),
        sprint_id
    );
    items
}
