// src/analysis.rs
//! Pipeline orchestration: registry, graph build, validation, compatibility
//! check and aggregation over one snapshot of the tree.

use tracing::info;

use crate::aggregate::{aggregate, fingerprint, summarize};
use crate::compat::CompatibilityDiffer;
use crate::config::Config;
use crate::error::Result;
use crate::extract::Extractor;
use crate::graph::{GraphBuild, GraphBuilder};
use crate::registry::ComponentRegistry;
use crate::source::{FileTree, RevisionSource};
use crate::types::{AnalysisResult, Component, DependencyIssue};
use crate::validate::DependencyValidator;

/// Base revision to compare interfaces against.
struct History<'a> {
    source: &'a dyn RevisionSource,
    revision: String,
}

/// Runs the full analysis. Holds no state between runs.
pub struct Analyzer<'a> {
    config: Config,
    tree: &'a dyn FileTree,
    history: Option<History<'a>>,
}

impl<'a> Analyzer<'a> {
    #[must_use]
    pub fn new(config: Config, tree: &'a dyn FileTree) -> Self {
        Self {
            config,
            tree,
            history: None,
        }
    }

    /// Enables the compatibility check against `revision`.
    #[must_use]
    pub fn with_history(mut self, source: &'a dyn RevisionSource, revision: impl Into<String>) -> Self {
        self.history = Some(History {
            source,
            revision: revision.into(),
        });
        self
    }

    /// Resolves components and their interface sets without validating.
    ///
    /// # Errors
    /// Returns a configuration error if the configuration is invalid.
    pub fn discover(&self) -> Result<GraphBuild> {
        self.config.validate()?;

        info!("Discovering components...");
        let owned = ComponentRegistry::new(&self.config).resolve(self.tree);

        info!(components = owned.len(), "Analyzing component interfaces...");
        Ok(GraphBuilder::new(&self.config).build(self.tree, &owned))
    }

    /// Runs every check and returns the aggregated result.
    ///
    /// # Errors
    /// Returns a configuration error if the configuration is invalid. No
    /// other condition aborts the run.
    pub fn run(&self) -> Result<AnalysisResult> {
        let build = self.discover()?;

        info!("Validating dependencies...");
        let validation = DependencyValidator::new(&self.config).validate(&build.components);
        let breaking = self.check_history(&build);

        let issues = aggregate([build.issues.clone(), validation, breaking]);
        let summary = summarize(&issues);
        info!(
            errors = summary.errors,
            warnings = summary.warnings,
            info = summary.info,
            "analysis complete"
        );

        Ok(AnalysisResult {
            summary,
            fingerprint: fingerprint(&issues),
            components: build.components.iter().map(Component::overview).collect(),
            recovered: build.warnings.len(),
            issues,
        })
    }

    fn check_history(&self, build: &GraphBuild) -> Vec<DependencyIssue> {
        let Some(history) = &self.history else {
            return Vec::new();
        };
        info!(revision = %history.revision, "Checking interface changes...");
        CompatibilityDiffer::new(
            Extractor::new(&self.config.rules),
            history.source,
            history.revision.clone(),
        )
        .check_changes(&build.components, &build.descriptors)
    }
}
