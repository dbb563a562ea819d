// tests/determinism.rs
//! Results must not depend on component declaration order, listing order or
//! the order in which parallel scans complete.

use seamcheck_core::analysis::Analyzer;
use seamcheck_core::config::Config;
use seamcheck_core::error::Result;
use seamcheck_core::source::{FileTree, MemoryTree};
use seamcheck_core::types::IssueKind;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

const FILES: &[(&str, &str)] = &[
    ("net/net_interface.h", "#include \"memory_interface.h\"\nint net_send(int fd);\n"),
    ("net/tcp.c", "#include \"net_interface.h\"\n#include \"timer_interface.h\"\n"),
    ("mm/memory_interface.h", "#include \"net_interface.h\"\nvoid *kmalloc(int n);\n"),
    ("mm/page.c", "#include \"memory_interface.h\"\n"),
    ("fs/vfs_interface.h", "int vfs_open(const char *p);\n"),
    ("fs/alt/vfs_interface.h", "int vfs_open(const char *p);\n"),
    ("compat/vfs_interface.h", "int vfs_open(const char *p);\n"),
];

fn tree(order: &[usize]) -> MemoryTree {
    let mut tree = MemoryTree::new();
    for &i in order {
        let (path, content) = FILES[i];
        tree.insert(path, content);
    }
    tree
}

fn config(reversed: bool) -> Config {
    let mut entries = vec![
        ("compat", "compat/vfs_interface.h"),
        ("fs", "fs/"),
        ("mm", "mm/"),
        ("net", "net"),
    ];
    if reversed {
        entries.reverse();
    }
    let mut text = String::from("[components]\n");
    for (name, pattern) in entries {
        text.push_str(&format!("{name} = [\"{pattern}\"]\n"));
    }
    Config::from_toml_str(&text).unwrap()
}

/// Lists files in reverse and delays reads so parallel scans finish in a
/// different order than they start.
struct Jittered(MemoryTree);

impl FileTree for Jittered {
    fn list_files(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let mut files = self.0.list_files(pattern)?;
        files.reverse();
        Ok(files)
    }

    fn read_file(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        let delay = (path.as_os_str().len() % 4) as u64 * 5;
        thread::sleep(Duration::from_millis(delay));
        self.0.read_file(path)
    }
}

#[test]
fn test_declaration_order_independent() {
    let forward = tree(&[0, 1, 2, 3, 4, 5, 6]);
    let shuffled = tree(&[5, 2, 6, 0, 3, 1, 4]);

    let a = Analyzer::new(config(false), &forward).run().unwrap();
    let b = Analyzer::new(config(true), &shuffled).run().unwrap();

    assert_eq!(a.issues, b.issues);
    assert_eq!(a.fingerprint, b.fingerprint);
    assert_eq!(a.components, b.components);
}

#[test]
fn test_completion_order_independent() {
    let plain = tree(&[0, 1, 2, 3, 4, 5, 6]);
    let jittered = Jittered(tree(&[0, 1, 2, 3, 4, 5, 6]));

    let a = Analyzer::new(config(false), &plain).run().unwrap();
    for _ in 0..3 {
        let b = Analyzer::new(config(false), &jittered).run().unwrap();
        assert_eq!(a.issues, b.issues);
        assert_eq!(a.fingerprint, b.fingerprint);
        assert_eq!(a.components, b.components);
    }
}

#[test]
fn test_expected_findings() {
    let t = tree(&[0, 1, 2, 3, 4, 5, 6]);
    let result = Analyzer::new(config(false), &t).run().unwrap();

    let count = |kind| result.issues.iter().filter(|i| i.kind == kind).count();
    assert_eq!(count(IssueKind::Unresolved), 1);
    assert_eq!(count(IssueKind::Cycle), 1);
    assert_eq!(count(IssueKind::Ownership), 1);
    assert_eq!(count(IssueKind::Shadowed), 1);

    let ownership = result
        .issues
        .iter()
        .find(|i| i.kind == IssueKind::Ownership)
        .unwrap();
    assert_eq!(ownership.component, "compat, fs");
    assert_eq!(ownership.interface, "vfs_interface.h");
}

#[test]
fn test_repeated_runs_share_no_state() {
    let t = tree(&[0, 1, 2, 3, 4, 5, 6]);
    let analyzer = Analyzer::new(config(false), &t);
    let fingerprints: Vec<String> = (0..5).map(|_| analyzer.run().unwrap().fingerprint).collect();
    assert!(fingerprints.windows(2).all(|w| w[0] == w[1]));
}
