//! Row validation against the work item field schema
//!
//! Projects untyped header-keyed records into typed [`ValidatedRow`]s.
//! Required fields produce one error per missing field and drop the row;
//! optional numeric fields coerce silently to `None` on garbage input;
//! real exports carry placeholder text in numeric columns.

use super::stats::{ParseMeta, ParsedCsv, ParsingError, ValidationResult};
use crate::app::models::{RawRecord, ValidatedRow};
use crate::constants::columns;
use tracing::debug;

/// Validate a single record, producing a typed row or field-level errors
///
/// `row` is the record's 1-based position (header is row 1). Never panics
/// or returns a crate error; bad data always comes back as `Err(errors)`.
pub fn validate_row(fields: &RawRecord, row: usize) -> Result<ValidatedRow, Vec<ParsingError>> {
    let mut errors = Vec::new();

    let work_item_id = required_field(fields, columns::WORK_ITEM_ID, row, &mut errors);
    let title = required_field(fields, columns::TITLE, row, &mut errors);
    let work_item_type = required_field(fields, columns::WORK_ITEM_TYPE, row, &mut errors);
    let state = required_field(fields, columns::STATE, row, &mut errors);

    let (Some(work_item_id), Some(title), Some(work_item_type), Some(state)) =
        (work_item_id, title, work_item_type, state)
    else {
        return Err(errors);
    };

    Ok(ValidatedRow {
        work_item_id,
        title,
        work_item_type,
        state,
        story_points: optional_i32(fields, columns::STORY_POINTS),
        assigned_to: optional_field(fields, columns::ASSIGNED_TO),
        area_path: optional_field(fields, columns::AREA_PATH),
        tags: optional_field(fields, columns::TAGS),
        created_date: optional_field(fields, columns::CREATED_DATE),
        changed_date: optional_field(fields, columns::CHANGED_DATE),
        closed_date: optional_field(fields, columns::CLOSED_DATE),
        iteration_path: optional_field(fields, columns::ITERATION_PATH),
    })
}

/// Validate all structurally parsed records
///
/// Structural errors from the parse stage are carried forward into the
/// result, and their rows count as invalid. `skipped_rows` covers rows not
/// otherwise classified.
pub fn validate_records(parsed: ParsedCsv) -> ValidationResult {
    let mut valid_rows = Vec::new();
    let mut errors = parsed.errors;
    let mut invalid_rows = errors.len();

    for record in &parsed.records {
        match validate_row(&record.fields, record.row) {
            Ok(row) => valid_rows.push(row),
            Err(row_errors) => {
                invalid_rows += 1;
                errors.extend(row_errors);
            }
        }
    }

    let meta = ParseMeta {
        total_rows: parsed.total_rows,
        valid_rows: valid_rows.len(),
        invalid_rows,
        skipped_rows: parsed
            .total_rows
            .saturating_sub(valid_rows.len() + invalid_rows),
    };

    debug!(
        "Validation complete: {} valid, {} invalid of {} rows",
        meta.valid_rows, meta.invalid_rows, meta.total_rows
    );

    ValidationResult {
        headers: parsed.headers,
        valid_rows,
        errors,
        meta,
    }
}

/// Extract a required field, recording an error when missing or empty
fn required_field(
    fields: &RawRecord,
    name: &str,
    row: usize,
    errors: &mut Vec<ParsingError>,
) -> Option<String> {
    match fields.get(name).map(|v| v.trim()) {
        Some(value) if !value.is_empty() => Some(value.to_string()),
        other => {
            errors.push(ParsingError::field(
                row,
                name,
                format!("{} is required", name),
                other.map(|v| v.to_string()),
            ));
            None
        }
    }
}

/// Extract an optional string field; empty values become `None`
fn optional_field(fields: &RawRecord, name: &str) -> Option<String> {
    fields
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

/// Extract an optional integer field with silent coercion
///
/// Unparseable values become `None` without surfacing an error; exports
/// routinely carry placeholder text like "TBD" in the points column.
fn optional_i32(fields: &RawRecord, name: &str) -> Option<i32> {
    let value = optional_field(fields, name)?;
    match value.parse::<i32>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            debug!("Dropping non-numeric {} value: '{}'", name, value);
            None
        }
    }
}
