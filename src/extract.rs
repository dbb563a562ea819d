// src/extract.rs
//! Structural extraction of interface artifacts (C/C++ headers).
//!
//! Extraction is regex based and best effort: anything that does not match a
//! known declaration shape is ignored, never reported as an error.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::InterfaceRules;
use crate::source::FileTree;

pub const DEFAULT_VERSION: &str = "1.0.0";

static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)/\*.*?\*/|//[^\n]*").unwrap_or_else(|_| panic!("Invalid Regex"))
});
static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Za-z_]\w*)(?:\s*\*+\s*|\s+)([A-Za-z_]\w*)\s*\(([^()]*)\)\s*;")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static STRUCT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\btypedef\s+struct\s+([A-Za-z_]\w*)\s*\{")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static DEFINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*#[ \t]*define[ \t]+([A-Z_][A-Z0-9_]*)(?:\s|$)")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static INCLUDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*#[ \t]*include[ \t]*([<"])([^>"\n]+)[>"]"#)
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*#[ \t]*define[ \t]+\w*VERSION\w*[ \t]+"([^"\n]+)""#)
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Words that can precede `name(...);` without being a return type.
const NOT_A_TYPE: &[&str] = &[
    "return", "else", "case", "goto", "sizeof", "do", "throw", "new", "delete", "define",
];

/// Structural summary of one interface artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InterfaceDescriptor {
    pub name: String,
    pub functions: BTreeSet<String>,
    pub structures: BTreeSet<String>,
    pub constants: BTreeSet<String>,
    /// Local interfaces this artifact includes.
    pub references: BTreeSet<String>,
    pub version: String,
}

impl InterfaceDescriptor {
    /// An otherwise-empty descriptor, used when the artifact is unreadable.
    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: DEFAULT_VERSION.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn symbol_count(&self) -> usize {
        self.functions.len() + self.structures.len() + self.constants.len()
    }
}

/// Non-fatal problem reading an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionWarning {
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for ExtractionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not read {}: {}", self.path.display(), self.reason)
    }
}

/// Outcome of extracting one artifact.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub descriptor: InterfaceDescriptor,
    pub warning: Option<ExtractionWarning>,
}

/// Stable interface identity of an artifact: its file name.
#[must_use]
pub fn interface_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.to_string_lossy().into_owned(), |n| n.to_string_lossy().into_owned())
}

/// Parses headers into [`InterfaceDescriptor`]s.
#[derive(Debug, Clone)]
pub struct Extractor {
    interface_extensions: Vec<String>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(&InterfaceRules::default())
    }
}

impl Extractor {
    #[must_use]
    pub fn new(rules: &InterfaceRules) -> Self {
        Self {
            interface_extensions: rules
                .interface_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    /// Parses artifact text.
    #[must_use]
    pub fn parse(&self, name: &str, content: &str) -> InterfaceDescriptor {
        let code = blank_comments(content);

        let descriptor = InterfaceDescriptor {
            name: name.to_string(),
            functions: extract_functions(&code),
            structures: capture_all(&STRUCT_RE, &code),
            constants: capture_all(&DEFINE_RE, &code),
            references: self.references(&code),
            version: VERSION_RE
                .captures(&code)
                .and_then(|c| c.get(1))
                .map_or_else(|| DEFAULT_VERSION.to_string(), |m| m.as_str().to_string()),
        };

        debug!(
            interface = name,
            functions = descriptor.functions.len(),
            structures = descriptor.structures.len(),
            constants = descriptor.constants.len(),
            "parsed interface"
        );
        descriptor
    }

    /// Local interface names included by `content`. System includes and
    /// non-interface targets are skipped.
    #[must_use]
    pub fn references(&self, content: &str) -> BTreeSet<String> {
        INCLUDE_RE
            .captures_iter(content)
            .filter_map(|caps| self.local_reference(&caps))
            .collect()
    }

    fn local_reference(&self, caps: &Captures<'_>) -> Option<String> {
        let quoted = caps.get(1)?.as_str() == "\"";
        let target = caps.get(2)?.as_str().trim();

        if target.starts_with("std") || target.starts_with("sys/") {
            return None;
        }
        if !quoted && !target.contains('/') {
            return None;
        }
        let path = Path::new(target);
        if !self.is_interface_path(path) {
            return None;
        }
        Some(interface_name(path))
    }

    fn is_interface_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.interface_extensions
                    .iter()
                    .any(|want| want.eq_ignore_ascii_case(ext))
            })
    }

    /// Reads and parses an artifact. Read failures yield an empty descriptor
    /// and a warning, never an error.
    #[must_use]
    pub fn extract_artifact(&self, tree: &dyn FileTree, path: &Path) -> Extraction {
        let name = interface_name(path);
        match read_text(tree, path) {
            Ok(content) => Extraction {
                descriptor: self.parse(&name, &content),
                warning: None,
            },
            Err(reason) => {
                let warning = ExtractionWarning { path: path.to_path_buf(), reason };
                warn!("{warning}");
                Extraction {
                    descriptor: InterfaceDescriptor::empty(name),
                    warning: Some(warning),
                }
            }
        }
    }

    /// Reads a non-interface file and returns only its references.
    #[must_use]
    pub fn scan_references(&self, tree: &dyn FileTree, path: &Path) -> (BTreeSet<String>, Option<ExtractionWarning>) {
        match read_text(tree, path) {
            Ok(content) => (self.references(&blank_comments(&content)), None),
            Err(reason) => {
                let warning = ExtractionWarning { path: path.to_path_buf(), reason };
                warn!("{warning}");
                (BTreeSet::new(), Some(warning))
            }
        }
    }
}

fn read_text(tree: &dyn FileTree, path: &Path) -> Result<String, String> {
    match tree.read_file(path) {
        Ok(Some(bytes)) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Ok(None) => Err("file not found".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

/// Replaces comments with spaces, keeping newlines so `^` anchors still work.
fn blank_comments(content: &str) -> String {
    COMMENT_RE
        .replace_all(content, |caps: &Captures<'_>| {
            caps[0]
                .chars()
                .map(|c| if c == '\n' { '\n' } else { ' ' })
                .collect::<String>()
        })
        .into_owned()
}

fn extract_functions(code: &str) -> BTreeSet<String> {
    FUNCTION_RE
        .captures_iter(code)
        .filter(|caps| !NOT_A_TYPE.contains(&&caps[1]))
        .map(|caps| caps[2].to_string())
        .collect()
}

fn capture_all(re: &Regex, code: &str) -> BTreeSet<String> {
    re.captures_iter(code).map(|caps| caps[1].to_string()).collect()
}
