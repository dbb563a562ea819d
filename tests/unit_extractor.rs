// tests/unit_extractor.rs
use seamcheck_core::extract::{interface_name, Extractor, DEFAULT_VERSION};
use seamcheck_core::source::MemoryTree;
use std::path::Path;

const MEMORY_H: &str = r#"
#ifndef MEMORY_INTERFACE_H
#define MEMORY_INTERFACE_H

#include <stdint.h>
#include <sys/types.h>
#include "hal/hal_interface.h"
#include "process_interface.h"

#define MEMORY_INTERFACE_VERSION "2.1.0"
#define PAGE_SIZE 4096

/* void legacy_alloc(int n); */
typedef struct page_frame {
    uint64_t addr;
} page_frame_t;

void *kmalloc(size_t size);
void kfree(void *ptr);
int map_page(page_frame_t *frame, uint64_t vaddr);

#endif
"#;

#[test]
fn test_full_header() {
    let d = Extractor::default().parse("memory_interface.h", MEMORY_H);

    assert_eq!(d.name, "memory_interface.h");
    assert_eq!(d.version, "2.1.0");
    for f in ["kmalloc", "kfree", "map_page"] {
        assert!(d.functions.contains(f), "missing function {f}");
    }
    assert!(!d.functions.contains("legacy_alloc"));
    assert!(d.structures.contains("page_frame"));
    assert!(d.constants.contains("PAGE_SIZE"));
    assert!(d.constants.contains("MEMORY_INTERFACE_H"));
    assert!(d.references.contains("hal_interface.h"));
    assert!(d.references.contains("process_interface.h"));
    assert!(!d.references.contains("stdint.h"));
    assert!(!d.references.contains("types.h"));
}

#[test]
fn test_empty_header_defaults() {
    let d = Extractor::default().parse("empty.h", "");
    assert_eq!(d.symbol_count(), 0);
    assert!(d.references.is_empty());
    assert_eq!(d.version, DEFAULT_VERSION);
}

#[test]
fn test_unreadable_artifact_is_recovered() {
    let tree = MemoryTree::new().with_unreadable("kernel/broken.h");
    let out = Extractor::default().extract_artifact(&tree, Path::new("kernel/broken.h"));
    assert_eq!(out.descriptor.name, "broken.h");
    assert_eq!(out.descriptor.symbol_count(), 0);
    assert!(out.warning.is_some());
}

#[test]
fn test_interface_name_is_file_name() {
    assert_eq!(interface_name(Path::new("a/b/net_interface.h")), "net_interface.h");
}

#[test]
fn test_invalid_utf8_is_decoded_lossily() {
    let tree = MemoryTree::new().with_file("hal/hal_interface.h", b"int f(void);\xff\nvoid g(int x);\n".to_vec());
    let out = Extractor::default().extract_artifact(&tree, Path::new("hal/hal_interface.h"));
    assert!(out.warning.is_none());
    assert!(out.descriptor.functions.contains("f"));
    assert!(out.descriptor.functions.contains("g"));
}
