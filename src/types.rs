// src/types.rs
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

/// Issue severity. Declaration order is the report order: errors first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which check produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// A required interface has no provider.
    Unresolved,
    /// Components depend on each other in a loop.
    Cycle,
    /// More than one component provides the same interface.
    Ownership,
    /// A symbol disappeared between two revisions.
    Breaking,
    /// Two artifacts inside one component share an interface name.
    Shadowed,
}

/// A single finding of the analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyIssue {
    pub severity: Severity,
    pub kind: IssueKind,
    /// Component name, or a comma-joined list when several share blame.
    pub component: String,
    /// Interface name; empty for graph-level issues.
    pub interface: String,
    pub message: String,
    pub file_path: Option<PathBuf>,
}

impl DependencyIssue {
    #[must_use]
    pub fn new(
        severity: Severity,
        kind: IssueKind,
        component: impl Into<String>,
        interface: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            kind,
            component: component.into(),
            interface: interface.into(),
            message: message.into(),
            file_path: None,
        }
    }

    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }
}

/// Files owned by one component after pattern resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentFiles {
    pub name: String,
    pub files: BTreeSet<PathBuf>,
}

/// A component with its resolved interface surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Component {
    pub name: String,
    pub files: BTreeSet<PathBuf>,
    pub provided: BTreeSet<String>,
    pub required: BTreeSet<String>,
    /// Artifact backing each provided interface.
    pub sources: BTreeMap<String, PathBuf>,
}

impl Component {
    #[must_use]
    pub fn provides(&self, interface: &str) -> bool {
        self.provided.contains(interface)
    }

    #[must_use]
    pub fn overview(&self) -> ComponentOverview {
        ComponentOverview {
            name: self.name.clone(),
            file_count: self.files.len(),
            provided: self.provided.iter().cloned().collect(),
            required: self.required.iter().cloned().collect(),
        }
    }
}

/// Reporting view of a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentOverview {
    pub name: String,
    pub file_count: usize,
    pub provided: Vec<String>,
    pub required: Vec<String>,
}

/// Per-severity issue counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
}

impl Summary {
    #[must_use]
    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.info
    }
}

/// Final output of a run, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub summary: Summary,
    /// SHA-256 over the ordered issue list.
    pub fingerprint: String,
    pub components: Vec<ComponentOverview>,
    /// Artifacts that could not be read and were analysed as empty.
    pub recovered: usize,
    pub issues: Vec<DependencyIssue>,
}

impl AnalysisResult {
    /// Returns true if any error-severity issue was found.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.summary.errors > 0
    }
}
