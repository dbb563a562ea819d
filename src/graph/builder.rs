// src/graph/builder.rs
//! Interface graph construction: per-component provided/required sets.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use tracing::debug;

use crate::config::Config;
use crate::extract::{ExtractionWarning, Extractor, InterfaceDescriptor};
use crate::source::FileTree;
use crate::types::{Component, ComponentFiles, DependencyIssue, IssueKind, Severity};

/// Everything the builder learned about the tree.
#[derive(Debug, Default)]
pub struct GraphBuild {
    pub components: Vec<Component>,
    /// Descriptor of every readable interface artifact, keyed by path.
    pub descriptors: BTreeMap<PathBuf, InterfaceDescriptor>,
    pub warnings: Vec<ExtractionWarning>,
    /// Shadowed-interface findings.
    pub issues: Vec<DependencyIssue>,
}

/// Result of scanning a single file.
#[derive(Debug)]
struct FileScan {
    descriptor: Option<InterfaceDescriptor>,
    references: BTreeSet<String>,
    warning: Option<ExtractionWarning>,
}

/// Builds [`Component`] records from owned files.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    extractor: Extractor,
    config: Config,
}

impl GraphBuilder {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            extractor: Extractor::new(&config.rules),
            config: config.clone(),
        }
    }

    /// Extracts every owned file in parallel, then assembles components
    /// from the collected scans in component order.
    #[must_use]
    pub fn build(&self, tree: &dyn FileTree, owned: &[ComponentFiles]) -> GraphBuild {
        let scans = self.scan_all(tree, owned);

        let mut build = GraphBuild::default();
        for files in owned {
            let component = self.assemble(files, &scans, &mut build.issues);
            build.components.push(component);
        }

        for (path, scan) in scans {
            match (scan.warning, scan.descriptor) {
                (Some(warning), _) => build.warnings.push(warning),
                (None, Some(descriptor)) => {
                    build.descriptors.insert(path, descriptor);
                }
                (None, None) => {}
            }
        }
        build
    }

    fn scan_all(&self, tree: &dyn FileTree, owned: &[ComponentFiles]) -> BTreeMap<PathBuf, FileScan> {
        let unique: Vec<&PathBuf> = owned
            .iter()
            .flat_map(|c| c.files.iter())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        debug!(files = unique.len(), "extracting artifacts");

        // Fan-in: nothing is assembled until every scan is done.
        unique
            .par_iter()
            .map(|path| ((*path).clone(), self.scan_file(tree, path)))
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    }

    fn scan_file(&self, tree: &dyn FileTree, path: &Path) -> FileScan {
        if self.config.is_interface_artifact(path) {
            let extraction = self.extractor.extract_artifact(tree, path);
            FileScan {
                references: extraction.descriptor.references.clone(),
                descriptor: Some(extraction.descriptor),
                warning: extraction.warning,
            }
        } else {
            let (references, warning) = self.extractor.scan_references(tree, path);
            FileScan { descriptor: None, references, warning }
        }
    }

    fn assemble(
        &self,
        files: &ComponentFiles,
        scans: &BTreeMap<PathBuf, FileScan>,
        issues: &mut Vec<DependencyIssue>,
    ) -> Component {
        let mut component = Component {
            name: files.name.clone(),
            files: files.files.clone(),
            ..Component::default()
        };

        for path in &files.files {
            let Some(descriptor) = scans.get(path).and_then(|s| s.descriptor.as_ref()) else {
                continue;
            };
            match component.sources.entry(descriptor.name.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(path.clone());
                    component.provided.insert(descriptor.name.clone());
                }
                Entry::Occupied(kept) => {
                    issues.push(shadowed_issue(&files.name, &descriptor.name, kept.get(), path));
                }
            }
        }

        for path in &files.files {
            if let Some(scan) = scans.get(path) {
                component.required.extend(scan.references.iter().cloned());
            }
        }
        let provided = &component.provided;
        component.required.retain(|name| !provided.contains(name));

        debug!(
            component = %component.name,
            provided = component.provided.len(),
            required = component.required.len(),
            "analysed component interfaces"
        );
        component
    }
}

fn shadowed_issue(component: &str, interface: &str, kept: &Path, ignored: &Path) -> DependencyIssue {
    DependencyIssue::new(
        Severity::Info,
        IssueKind::Shadowed,
        component,
        interface,
        format!(
            "Interface '{interface}' is declared by more than one artifact in component \
             '{component}'; using {} and ignoring {}",
            kept.display(),
            ignored.display()
        ),
    )
    .with_file(ignored)
}
