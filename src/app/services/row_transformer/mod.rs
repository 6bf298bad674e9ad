//! Work item transformation for validated CSV rows
//!
//! Fourth pipeline stage: derives the reporting fields a sprint dashboard
//! needs from each validated row. All derivations are pure functions with
//! defined fallbacks, so a batch of validated rows always transforms in
//! full with no error path.
//!
//! ## Architecture
//!
//! - [`fields`] - Independent derivation functions (feature name, tags,
//!   dates, status indicator, classification flags)
//! - [`transformer`] - Composition into the persisted work item shape

pub mod fields;
pub mod transformer;

#[cfg(test)]
pub mod tests;

// Re-export main functions for easy access
pub use fields::{
    determine_status_indicator, extract_feature_name, is_highlight, is_pi_commitment,
    is_sprint_goal, parse_date, parse_tags,
};
pub use transformer::{transform_row, transform_rows};
