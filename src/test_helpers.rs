//! Shared test utilities for the md-site-index test suite.
//!
//! Provides fixture setup, lookup helpers, and navigation tree assertions
//! that work with builder output (`TreeNode`, `SearchIndexEntry`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let nodes = load_navigation(tmp.path());
//!
//! let guide = find_node(&nodes, "User Guide");
//! assert_eq!(guide.path, "/guide");
//!
//! assert_tree_shape(&nodes, &[
//!     ("Welcome", &[]),
//!     ("User Guide", &["Installation", "Configuration"]),
//! ]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::navigation::TreeNode;
use crate::search::SearchIndexEntry;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Lookups (panic with a clear message on miss)
// =========================================================================

/// Find a top-level node by title. Panics if not found.
pub fn find_node<'a>(nodes: &'a [TreeNode], title: &str) -> &'a TreeNode {
    nodes.iter().find(|n| n.title == title).unwrap_or_else(|| {
        let titles = node_titles(nodes);
        panic!("node '{title}' not found. Available: {titles:?}")
    })
}

/// Find a search index entry by URL path. Panics if not found.
pub fn find_entry<'a>(index: &'a [SearchIndexEntry], path: &str) -> &'a SearchIndexEntry {
    index.iter().find(|e| e.path == path).unwrap_or_else(|| {
        let paths = entry_paths(index);
        panic!("entry '{path}' not found. Available: {paths:?}")
    })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// Node titles in order.
pub fn node_titles(nodes: &[TreeNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.title.as_str()).collect()
}

/// Node paths in order.
pub fn node_paths(nodes: &[TreeNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.path.as_str()).collect()
}

/// Search index paths in order.
pub fn entry_paths(index: &[SearchIndexEntry]) -> Vec<&str> {
    index.iter().map(|e| e.path.as_str()).collect()
}

// =========================================================================
// Tree shape
// =========================================================================

/// Assert that a node list matches an expected two-level shape.
///
/// Each entry is `(title, child titles)`. Use `&[]` for nodes without
/// children. Titles must be unique at the top level for the child lookup.
pub fn assert_tree_shape(nodes: &[TreeNode], expected: &[(&str, &[&str])]) {
    let expected_titles: Vec<&str> = expected.iter().map(|(t, _)| *t).collect();
    assert_eq!(node_titles(nodes), expected_titles, "top-level titles mismatch");

    for (node, (title, children)) in nodes.iter().zip(expected) {
        let actual_children = node.children.as_deref().map(node_titles).unwrap_or_default();
        assert_eq!(
            actual_children,
            children.to_vec(),
            "children of '{title}' mismatch"
        );
    }
}
