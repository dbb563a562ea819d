// src/graph/dependency.rs
//! Component-level dependency graph, derived fresh from each run's components.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::Component;

/// Interface name to the components providing it, in encounter order.
pub type ProviderMap = BTreeMap<String, Vec<String>>;

/// Builds the provider map. Components are visited in the given order, so
/// provider lists follow input order.
#[must_use]
pub fn provider_map(components: &[Component]) -> ProviderMap {
    let mut providers: ProviderMap = BTreeMap::new();
    for component in components {
        for interface in &component.provided {
            providers
                .entry(interface.clone())
                .or_default()
                .push(component.name.clone());
        }
    }
    providers
}

/// Directed graph: `a -> b` iff `a` requires an interface `b` provides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    adjacency: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    #[must_use]
    pub fn build(components: &[Component], providers: &ProviderMap) -> Self {
        let mut adjacency: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for component in components {
            let targets = adjacency.entry(component.name.clone()).or_default();
            for required in &component.required {
                let Some(owners) = providers.get(required) else {
                    continue;
                };
                targets.extend(
                    owners
                        .iter()
                        .filter(|owner| **owner != component.name)
                        .cloned(),
                );
            }
        }
        Self { adjacency }
    }

    /// Nodes in name order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// Direct dependencies of `node`, in name order.
    pub fn neighbors(&self, node: &str) -> impl Iterator<Item = &str> {
        self.adjacency
            .get(node)
            .into_iter()
            .flat_map(|targets| targets.iter().map(String::as_str))
    }

    #[must_use]
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.adjacency.get(from).is_some_and(|t| t.contains(to))
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum()
    }
}
