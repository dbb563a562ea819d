// src/compat.rs
//! Backward-compatibility check between two revisions of an interface.
//!
//! Only removals are breaking. A rename looks like a removal plus an
//! addition and is flagged as the removal.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::extract::{interface_name, Extractor, InterfaceDescriptor};
use crate::source::{fetch_with_retry, RevisionSource};
use crate::types::{Component, DependencyIssue, IssueKind, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SymbolKind {
    Function,
    Structure,
    Constant,
}

impl SymbolKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Function => "Function",
            Self::Structure => "Structure",
            Self::Constant => "Constant",
        }
    }
}

/// One symbol present in the previous revision and missing now.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BreakingChange {
    pub kind: SymbolKind,
    pub symbol: String,
}

impl fmt::Display for BreakingChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' was removed - this is a breaking change",
            self.kind.label(),
            self.symbol
        )
    }
}

/// Symbols of `previous` missing from `current`, ordered by kind then name.
#[must_use]
pub fn compare(previous: &InterfaceDescriptor, current: &InterfaceDescriptor) -> Vec<BreakingChange> {
    let mut changes = Vec::new();
    removed(SymbolKind::Function, &previous.functions, &current.functions, &mut changes);
    removed(SymbolKind::Structure, &previous.structures, &current.structures, &mut changes);
    removed(SymbolKind::Constant, &previous.constants, &current.constants, &mut changes);
    changes
}

fn removed(
    kind: SymbolKind,
    before: &BTreeSet<String>,
    after: &BTreeSet<String>,
    out: &mut Vec<BreakingChange>,
) {
    out.extend(
        before
            .difference(after)
            .map(|symbol| BreakingChange { kind, symbol: symbol.clone() }),
    );
}

/// Compares current interface artifacts against a base revision.
pub struct CompatibilityDiffer<'a> {
    extractor: Extractor,
    revisions: &'a dyn RevisionSource,
    revision: String,
}

impl<'a> CompatibilityDiffer<'a> {
    #[must_use]
    pub fn new(extractor: Extractor, revisions: &'a dyn RevisionSource, revision: impl Into<String>) -> Self {
        Self {
            extractor,
            revisions,
            revision: revision.into(),
        }
    }

    /// Emits one error per removed symbol across all owned interface
    /// artifacts. Artifacts without history are skipped.
    #[must_use]
    pub fn check_changes(
        &self,
        components: &[Component],
        current: &BTreeMap<PathBuf, InterfaceDescriptor>,
    ) -> Vec<DependencyIssue> {
        let owners = owners_by_path(components);
        let changed = self.changed_set();

        let mut issues = Vec::new();
        for (path, descriptor) in current {
            if changed.as_ref().is_some_and(|set| !set.contains(path)) {
                continue;
            }
            let Some(previous) = self.previous(path) else {
                debug!(path = %path.display(), "no history, skipping");
                continue;
            };
            let component = owners.get(path.as_path()).map(|o| o.join(", ")).unwrap_or_default();
            for change in compare(&previous, descriptor) {
                issues.push(
                    DependencyIssue::new(
                        Severity::Error,
                        IssueKind::Breaking,
                        component.clone(),
                        descriptor.name.clone(),
                        change.to_string(),
                    )
                    .with_file(path.clone()),
                );
            }
        }
        issues
    }

    fn changed_set(&self) -> Option<BTreeSet<PathBuf>> {
        match self.revisions.changed_paths(&self.revision) {
            Ok(Some(paths)) => Some(paths.into_iter().collect()),
            Ok(None) => None,
            Err(e) => {
                warn!(revision = %self.revision, "cannot list changed files, comparing all: {e}");
                None
            }
        }
    }

    fn previous(&self, path: &Path) -> Option<InterfaceDescriptor> {
        let bytes = fetch_with_retry(self.revisions, path, &self.revision)?;
        let content = String::from_utf8_lossy(&bytes);
        Some(self.extractor.parse(&interface_name(path), &content))
    }
}

fn owners_by_path(components: &[Component]) -> BTreeMap<&Path, Vec<&str>> {
    let mut owners: BTreeMap<&Path, Vec<&str>> = BTreeMap::new();
    for component in components {
        for file in &component.files {
            owners.entry(file.as_path()).or_default().push(&component.name);
        }
    }
    owners
}
