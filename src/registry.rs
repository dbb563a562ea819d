// src/registry.rs
//! Resolves the ownership configuration into concrete owned files.

use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::Config;
use crate::source::{normalize_pattern, FileTree};
use crate::types::ComponentFiles;

/// Maps component names to the files they own.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    config: Config,
}

impl ComponentRegistry {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self { config: config.clone() }
    }

    /// Resolves every component's patterns. Components that own no files
    /// are dropped. Output is ordered by component name.
    #[must_use]
    pub fn resolve(&self, tree: &dyn FileTree) -> Vec<ComponentFiles> {
        self.config
            .components
            .iter()
            .filter_map(|(name, patterns)| {
                let files = self.resolve_patterns(tree, name, patterns);
                if files.is_empty() {
                    debug!(component = %name, "component owns no files, dropped");
                    return None;
                }
                debug!(component = %name, files = files.len(), "discovered component");
                Some(ComponentFiles { name: name.clone(), files })
            })
            .collect()
    }

    fn resolve_patterns(
        &self,
        tree: &dyn FileTree,
        component: &str,
        patterns: &[String],
    ) -> BTreeSet<PathBuf> {
        let mut files = BTreeSet::new();
        for pattern in patterns {
            let listed = match tree.list_files(pattern) {
                Ok(listed) => listed,
                Err(e) => {
                    warn!(component, pattern = %pattern, "cannot resolve pattern: {e}");
                    continue;
                }
            };
            let exact = normalize_pattern(pattern);
            files.extend(
                listed
                    .into_iter()
                    .filter(|p| *p == exact || self.config.is_source_artifact(p)),
            );
        }
        files
    }
}
