//! Test fixtures for work item transformation

use crate::app::models::ValidatedRow;


/// A validated row with every optional field populated
pub fn full_row() -> ValidatedRow {
    ValidatedRow {
        work_item_id: "12345".to_string(),
        title: "Implement search".to_string(),
        work_item_type: "User Story".to_string(),
        state: "Active".to_string(),
        story_points: Some(5),
        assigned_to: Some("Ada Lovelace".to_string()),
        area_path: Some("Proj\\Search\\API".to_string()),
        tags: Some("Sprint Goal, Team Focus".to_string()),
        created_date: Some("2024-01-15".to_string()),
        changed_date: Some("2024-01-20T10:30:00Z".to_string()),
        closed_date: None,
        iteration_path: Some("Proj\\Sprint 42".to_string()),
    }
}

/// A validated row with only the required fields
pub fn minimal_row() -> ValidatedRow {
    ValidatedRow {
        work_item_id: "12345".to_string(),
        title: "Test Story".to_string(),
        work_item_type: "User Story".to_string(),
        state: "Active".to_string(),
        story_points: None,
        assigned_to: None,
        area_path: None,
        tags: None,
        created_date: None,
        changed_date: None,
        closed_date: None,
        iteration_path: None,
    }
}

/// Build a tag list from string literals
pub fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}
