// src/source/revision.rs
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::debug;

use super::slash_path;

/// Failure to obtain historical content.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RevisionError {
    /// May succeed if attempted again (lock contention, interrupted process).
    #[error("transient revision source failure: {0}")]
    Transient(String),
    /// History cannot be obtained for this run.
    #[error("revision history unavailable: {0}")]
    Unavailable(String),
}

/// Historical view of the tree, used only by the compatibility check.
pub trait RevisionSource: Sync {
    /// Content of `path` at `revision`. `Ok(None)` means the file did not
    /// exist at that revision.
    ///
    /// # Errors
    /// Returns `Transient` or `Unavailable` if history cannot be read.
    fn content_at(&self, path: &Path, revision: &str) -> Result<Option<Vec<u8>>, RevisionError>;

    /// Paths changed between `revision` and the current tree. `Ok(None)`
    /// means the source cannot tell, so every artifact is compared.
    ///
    /// # Errors
    /// Returns error if the source fails to compute the change set.
    fn changed_paths(&self, revision: &str) -> Result<Option<Vec<PathBuf>>, RevisionError> {
        let _ = revision;
        Ok(None)
    }
}

/// Fetches historical content, retrying once on a transient failure.
/// Any remaining failure is reported as "no history".
pub fn fetch_with_retry(
    source: &dyn RevisionSource,
    path: &Path,
    revision: &str,
) -> Option<Vec<u8>> {
    let first = source.content_at(path, revision);
    let outcome = match first {
        Err(RevisionError::Transient(msg)) => {
            debug!(path = %path.display(), "retrying after transient failure: {msg}");
            source.content_at(path, revision)
        }
        other => other,
    };

    match outcome {
        Ok(content) => content,
        Err(e) => {
            debug!(path = %path.display(), revision, "no history, skipping: {e}");
            None
        }
    }
}

/// Reads history by shelling out to `git` in the project root. The root may
/// sit anywhere inside the repository; paths stay relative to it.
#[derive(Debug, Clone)]
pub struct GitRevisions {
    root: PathBuf,
}

impl GitRevisions {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn git(&self, args: &[&str]) -> Result<std::process::Output, RevisionError> {
        Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| RevisionError::Unavailable(format!("failed to run git: {e}")))
    }
}

impl RevisionSource for GitRevisions {
    fn content_at(&self, path: &Path, revision: &str) -> Result<Option<Vec<u8>>, RevisionError> {
        // `./` makes git resolve the path from `root`, not the repository top.
        let object = format!("{revision}:./{}", slash_path(path));
        let output = self.git(&["show", &object])?;

        if output.status.success() {
            return Ok(Some(output.stdout));
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        classify_show_failure(stderr.trim())
    }

    fn changed_paths(&self, revision: &str) -> Result<Option<Vec<PathBuf>>, RevisionError> {
        let output = self.git(&["diff", "--name-only", "--relative", revision, "--"])?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RevisionError::Unavailable(stderr.trim().to_string()));
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        let paths = stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(PathBuf::from)
            .collect();
        Ok(Some(paths))
    }
}

fn classify_show_failure(stderr: &str) -> Result<Option<Vec<u8>>, RevisionError> {
    const MISSING: &[&str] = &["does not exist in", "exists on disk, but not in"];
    const FATAL: &[&str] = &[
        "not a git repository",
        "unknown revision",
        "bad revision",
        "invalid object name",
    ];

    if MISSING.iter().any(|m| stderr.contains(m)) {
        return Ok(None);
    }
    if FATAL.iter().any(|m| stderr.contains(m)) {
        return Err(RevisionError::Unavailable(stderr.to_string()));
    }
    Err(RevisionError::Transient(stderr.to_string()))
}

/// Fixed historical content, independent of the revision id asked for.
#[derive(Debug, Clone, Default)]
pub struct StaticRevisions {
    files: BTreeMap<PathBuf, Vec<u8>>,
    changed: Option<Vec<PathBuf>>,
}

impl StaticRevisions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Restricts the reported change set.
    #[must_use]
    pub fn with_changed(mut self, paths: Vec<PathBuf>) -> Self {
        self.changed = Some(paths);
        self
    }
}

impl RevisionSource for StaticRevisions {
    fn content_at(&self, path: &Path, _revision: &str) -> Result<Option<Vec<u8>>, RevisionError> {
        Ok(self.files.get(path).cloned())
    }

    fn changed_paths(&self, _revision: &str) -> Result<Option<Vec<PathBuf>>, RevisionError> {
        Ok(self.changed.clone())
    }
}
