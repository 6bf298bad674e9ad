//! Test fixtures and helpers for CSV parser testing
//!
//! Fixture content mirrors what Azure DevOps query exports actually emit,
//! including BOM prefixes, semicolon locales and quoted multi-line fields.

use crate::app::models::RawRecord;


/// Standard header line used across fixtures
pub const HEADER: &str = "ID,Title,Work Item Type,State,Story Points,Assigned To,Area Path,Tags,Created Date,Changed Date,Closed Date,Iteration Path";

/// A complete, well-formed export with two rows
pub fn well_formed_csv() -> String {
    format!(
        "{HEADER}\n\
         12345,Implement search,User Story,Active,5,Ada Lovelace,Proj\\Search\\API,\"Sprint Goal, Team Focus\",2024-01-15,2024-01-20,,Proj\\Sprint 42\n\
         12346,Fix login crash,Bug,Closed,3,Grace Hopper,Proj\\Auth,,2024-01-10,2024-01-18,2024-01-18,Proj\\Sprint 42\n"
    )
}

/// Minimal export with only the required columns
pub fn minimal_csv() -> String {
    "ID,Title,Work Item Type,State\n12345,Test Story,User Story,Active\n".to_string()
}

/// Build a raw record from header/value pairs
pub fn raw_record(pairs: &[(&str, &str)]) -> RawRecord {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// A raw record with all required fields populated
pub fn complete_record() -> RawRecord {
    raw_record(&[
        ("ID", "12345"),
        ("Title", "Test Story"),
        ("Work Item Type", "User Story"),
        ("State", "Active"),
        ("Story Points", "5"),
    ])
}
