// src/aggregate.rs
//! Merges findings into one deterministically ordered issue list.

use std::cmp::Ordering;

use sha2::{Digest, Sha256};

use crate::types::{DependencyIssue, Severity, Summary};

/// Concatenates issue batches and sorts them: errors first, then by
/// component, interface, message and file, so the order never depends on
/// upstream iteration order.
#[must_use]
pub fn aggregate<I>(batches: I) -> Vec<DependencyIssue>
where
    I: IntoIterator<Item = Vec<DependencyIssue>>,
{
    let mut issues: Vec<DependencyIssue> = batches.into_iter().flatten().collect();
    issues.sort_by(compare_issues);
    issues
}

fn compare_issues(a: &DependencyIssue, b: &DependencyIssue) -> Ordering {
    a.severity
        .cmp(&b.severity)
        .then_with(|| a.component.cmp(&b.component))
        .then_with(|| a.interface.cmp(&b.interface))
        .then_with(|| a.message.cmp(&b.message))
        .then_with(|| a.file_path.cmp(&b.file_path))
        .then_with(|| a.kind.cmp(&b.kind))
}

#[must_use]
pub fn summarize(issues: &[DependencyIssue]) -> Summary {
    let mut summary = Summary::default();
    for issue in issues {
        match issue.severity {
            Severity::Error => summary.errors += 1,
            Severity::Warning => summary.warnings += 1,
            Severity::Info => summary.info += 1,
        }
    }
    summary
}

/// SHA-256 of the ordered issue list. Equal lists hash equally.
#[must_use]
pub fn fingerprint(issues: &[DependencyIssue]) -> String {
    let mut hasher = Sha256::new();
    for issue in issues {
        let file = issue
            .file_path
            .as_ref()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default();
        hasher.update(issue.severity.label().as_bytes());
        for field in [&issue.component, &issue.interface, &issue.message, &file] {
            hasher.update(b"\x1f");
            hasher.update(field.as_bytes());
        }
        hasher.update(b"\n");
    }
    format!("{:x}", hasher.finalize())
}
