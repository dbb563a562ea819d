// src/source/mod.rs
//! Access to the analysed file tree and its revision history.
//!
//! The core never touches the file system or version control directly;
//! everything goes through [`FileTree`] and [`RevisionSource`].

pub mod memory;
pub mod revision;

pub use memory::MemoryTree;
pub use revision::{fetch_with_retry, GitRevisions, RevisionError, RevisionSource, StaticRevisions};

use std::fs;
use std::io::ErrorKind;
use std::path::{Component as PathComponent, Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Result, SeamError};

/// Directories never descended into when a pattern names a directory.
pub const PRUNE_DIRS: &[&str] = &[".git", ".hg", ".svn", "node_modules", "target", ".cache"];

/// Read access to a snapshot of the project tree. All paths are relative
/// to the tree root.
pub trait FileTree: Sync {
    /// Resolves one ownership pattern. An existing file resolves to itself,
    /// a directory to every file below it, anything else to nothing.
    ///
    /// # Errors
    /// Returns error if the tree cannot be listed at all.
    fn list_files(&self, pattern: &str) -> Result<Vec<PathBuf>>;

    /// Reads a file. `Ok(None)` means the file does not exist.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read.
    fn read_file(&self, path: &Path) -> Result<Option<Vec<u8>>>;
}

/// A [`FileTree`] backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct DiskTree {
    root: PathBuf,
}

impl DiskTree {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Lists files below `dir`. Failing to open `dir` itself is an error;
    /// unreadable entries deeper down are skipped.
    fn walk(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let walker = WalkDir::new(dir)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !should_prune(&e.file_name().to_string_lossy()));

        let mut paths = Vec::new();
        for item in walker {
            match item {
                Ok(entry) if entry.file_type().is_file() => {
                    paths.push(relative_to(entry.path(), &self.root));
                }
                Ok(_) => {}
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => warn!(dir = %dir.display(), "skipping unreadable entry: {e}"),
            }
        }
        Ok(paths)
    }
}

impl FileTree for DiskTree {
    fn list_files(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let rel = normalize_pattern(pattern);
        let full = self.root.join(&rel);

        if full.is_file() {
            return Ok(vec![rel]);
        }
        if full.is_dir() {
            return self.walk(&full);
        }
        debug!(pattern, "pattern matches nothing");
        Ok(Vec::new())
    }

    fn read_file(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        let full = self.root.join(path);
        match fs::read(&full) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SeamError::Io { source, path: full }),
        }
    }
}

#[must_use]
pub fn should_prune(name: &str) -> bool {
    PRUNE_DIRS.contains(&name)
}

/// Turns a configured pattern into a clean relative path: `./kernel/` and
/// `kernel` both become `kernel`.
#[must_use]
pub fn normalize_pattern(pattern: &str) -> PathBuf {
    Path::new(pattern.trim())
        .components()
        .filter(|c| matches!(c, PathComponent::Normal(_)))
        .collect()
}

fn relative_to(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root)
        .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
}

/// Normalizes a path to forward slashes for display and version control.
#[must_use]
pub fn slash_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
