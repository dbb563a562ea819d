// src/validate.rs
//! Cross-component dependency checks.

use tracing::debug;

use crate::config::Config;
use crate::graph::{detect_cycles, provider_map, DependencyGraph, ProviderMap};
use crate::types::{Component, DependencyIssue, IssueKind, Severity};

/// Runs unresolved-interface, cycle and ownership checks. Holds no state
/// between runs.
#[derive(Debug, Clone)]
pub struct DependencyValidator {
    config: Config,
}

impl DependencyValidator {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self { config: config.clone() }
    }

    #[must_use]
    pub fn validate(&self, components: &[Component]) -> Vec<DependencyIssue> {
        let providers = provider_map(components);

        let mut issues = check_unresolved(components, &providers);
        issues.extend(check_cycles(components, &providers));
        issues.extend(self.check_ownership(&providers));

        debug!(
            components = components.len(),
            interfaces = providers.len(),
            issues = issues.len(),
            "validated dependencies"
        );
        issues
    }

    fn check_ownership(&self, providers: &ProviderMap) -> Vec<DependencyIssue> {
        providers
            .iter()
            .filter(|(_, owners)| owners.len() > 1)
            .map(|(interface, owners)| {
                let severity = if self.config.is_critical(interface) {
                    Severity::Error
                } else {
                    Severity::Warning
                };
                let joined = owners.join(", ");
                DependencyIssue::new(
                    severity,
                    IssueKind::Ownership,
                    joined.clone(),
                    interface.clone(),
                    format!("Interface '{interface}' is provided by multiple components: {joined}"),
                )
            })
            .collect()
    }
}

fn check_unresolved(components: &[Component], providers: &ProviderMap) -> Vec<DependencyIssue> {
    let mut issues = Vec::new();
    for component in components {
        for required in &component.required {
            if providers.get(required).map_or(true, Vec::is_empty) {
                issues.push(DependencyIssue::new(
                    Severity::Error,
                    IssueKind::Unresolved,
                    component.name.clone(),
                    required.clone(),
                    format!("Required interface '{required}' is not provided by any component"),
                ));
            }
        }
    }
    issues
}

fn check_cycles(components: &[Component], providers: &ProviderMap) -> Vec<DependencyIssue> {
    let graph = DependencyGraph::build(components, providers);
    detect_cycles(&graph)
        .into_iter()
        .map(|cycle| {
            DependencyIssue::new(
                Severity::Error,
                IssueKind::Cycle,
                cycle.root.clone(),
                "",
                format!(
                    "Circular dependency detected involving component '{}' ({})",
                    cycle.root,
                    cycle.display_path()
                ),
            )
        })
        .collect()
}
