// src/reporting/console.rs
//! Console output: summary, component overview, issues grouped by severity.

use std::fmt::Write;

use colored::Colorize;

use super::pluralize;
use crate::types::{AnalysisResult, ComponentOverview, DependencyIssue, Severity};

const RULE: &str = "==================================================";

/// Renders the full console report.
#[must_use]
pub fn render_report(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "seamcheck dependency report".bold());
    let _ = writeln!(out, "{RULE}\n");

    write_summary(&mut out, result);
    out.push_str(&render_components(&result.components));

    if result.issues.is_empty() {
        let _ = writeln!(out, "{}", "✓ No dependency issues found.".green().bold());
        return out;
    }

    let _ = writeln!(out, "Issues found:");
    let _ = writeln!(out, "---------------");
    for severity in [Severity::Error, Severity::Warning, Severity::Info] {
        write_group(&mut out, result, severity);
    }
    out
}

fn write_summary(out: &mut String, result: &AnalysisResult) {
    let s = &result.summary;
    let _ = writeln!(out, "Components analyzed: {}", result.components.len());
    let _ = writeln!(
        out,
        "Issues found: {} ({} {}, {} {}, {} info)",
        s.total(),
        s.errors,
        pluralize("error", s.errors),
        s.warnings,
        pluralize("warning", s.warnings),
        s.info
    );
    if result.recovered > 0 {
        let _ = writeln!(
            out,
            "{}",
            format!(
                "{} {} could not be read and were analyzed as empty",
                result.recovered,
                pluralize("artifact", result.recovered)
            )
            .yellow()
        );
    }
    out.push('\n');
}

/// Renders the component overview block.
#[must_use]
pub fn render_components(components: &[ComponentOverview]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Component overview:");
    let _ = writeln!(out, "--------------------");
    for c in components {
        let _ = writeln!(out, "• {}", c.name.cyan());
        let _ = writeln!(out, "  Files: {}", c.file_count);
        let _ = writeln!(out, "  Provides: {} {}", c.provided.len(), pluralize("interface", c.provided.len()));
        let _ = writeln!(out, "  Requires: {} {}", c.required.len(), pluralize("interface", c.required.len()));
        out.push('\n');
    }
    out
}

fn write_group(out: &mut String, result: &AnalysisResult, severity: Severity) {
    let group: Vec<&DependencyIssue> = result
        .issues
        .iter()
        .filter(|i| i.severity == severity)
        .collect();
    if group.is_empty() {
        return;
    }

    let title = match severity {
        Severity::Error => "ERRORS:".red().bold(),
        Severity::Warning => "WARNINGS:".yellow().bold(),
        Severity::Info => "INFO:".dimmed(),
    };
    let _ = writeln!(out, "\n{title}");

    for issue in group {
        let _ = writeln!(out, "• [{}] {}", issue.component, issue.message);
        if !issue.interface.is_empty() {
            let _ = writeln!(out, "  {} {}", "Interface:".blue(), issue.interface);
        }
        if let Some(path) = &issue.file_path {
            let _ = writeln!(out, "  {} {}", "File:".blue(), path.display());
        }
    }
}
