// src/reporting/mod.rs
//! Rendering of analysis results.

pub mod console;
pub mod json;

pub use console::{render_components, render_report};
pub use json::render_json;

pub(crate) fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
