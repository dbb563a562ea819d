// src/reporting/json.rs
use crate::types::{AnalysisResult, ComponentOverview};

/// Pretty JSON for the full result.
///
/// # Errors
/// Returns error if serialization fails.
pub fn render_json(result: &AnalysisResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

/// Pretty JSON for the component overview alone.
///
/// # Errors
/// Returns error if serialization fails.
pub fn render_components_json(components: &[ComponentOverview]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(components)
}
