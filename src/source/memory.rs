// src/source/memory.rs
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use super::{normalize_pattern, FileTree};
use crate::error::{Result, SeamError};

/// An in-memory [`FileTree`]. Paths are kept sorted so listings are stable.
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    files: BTreeMap<PathBuf, Vec<u8>>,
    unreadable: BTreeSet<PathBuf>,
}

impl MemoryTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), content.into());
    }

    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    /// Registers a file that is listed but fails to read.
    #[must_use]
    pub fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.files.entry(path.clone()).or_default();
        self.unreadable.insert(path);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileTree for MemoryTree {
    fn list_files(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let rel = normalize_pattern(pattern);
        if self.files.contains_key(&rel) {
            return Ok(vec![rel]);
        }
        Ok(self
            .files
            .keys()
            .filter(|p| p.starts_with(&rel))
            .cloned()
            .collect())
    }

    fn read_file(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        if self.unreadable.contains(path) {
            return Err(SeamError::Io {
                source: io::Error::new(io::ErrorKind::PermissionDenied, "unreadable"),
                path: path.to_path_buf(),
            });
        }
        Ok(self.files.get(path).cloned())
    }
}
