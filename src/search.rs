//! Search index construction.
//!
//! Walks the content directory, extracts metadata from every published
//! markdown file, and emits one flat [`SearchIndexEntry`] per page.
//!
//! ## What Gets Indexed
//!
//! - Files ending in `.md`, at any depth.
//! - Not files ending in `.draft.md`. Drafts stay reachable from the menu but
//!   never show up in search.
//! - Not files without a `# Title` line; they are skipped with a warning.
//!
//! ## Ordering
//!
//! Directory entries are visited in file-name order, depth first, so two runs
//! over the same tree produce identical output. Per-file extraction runs on the
//! rayon pool; results are collected back in traversal order.

use crate::markdown::{extract_excerpt, extract_metadata};
use crate::paths::url_path_for;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Suffix marking unpublished pages.
pub const DRAFT_SUFFIX: &str = ".draft.md";

/// One searchable page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchIndexEntry {
    /// URL path, e.g. `/guide/install` (`/` for the root page).
    pub path: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

/// Build the search index for a content directory.
///
/// A missing content directory yields an empty index.
pub fn build_search_index(content_dir: &Path) -> Vec<SearchIndexEntry> {
    if !content_dir.is_dir() {
        tracing::warn!(dir = %content_dir.display(), "Content directory not found, search index is empty");
        return Vec::new();
    }

    let files = collect_markdown_files(content_dir);
    tracing::debug!(files = files.len(), "Indexing markdown files");

    files
        .par_iter()
        .filter_map(|path| index_file(content_dir, path))
        .collect()
}

/// Every indexable markdown file under `content_dir`, in traversal order.
pub fn collect_markdown_files(content_dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(content_dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable directory entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file() && is_indexable(&e.file_name().to_string_lossy()))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Whether a file name is a published markdown page.
pub fn is_indexable(file_name: &str) -> bool {
    file_name.ends_with(".md") && !file_name.ends_with(DRAFT_SUFFIX)
}

fn index_file(content_dir: &Path, path: &Path) -> Option<SearchIndexEntry> {
    let relative = path.strip_prefix(content_dir).unwrap_or(path);

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %relative.display(), error = %e, "Failed to read markdown file, skipping");
            return None;
        }
    };

    let metadata = extract_metadata(&content);
    let Some(title) = metadata.title else {
        tracing::warn!(path = %relative.display(), "No H1 found, excluding from search index");
        return None;
    };

    Some(SearchIndexEntry {
        path: url_path_for(relative),
        title,
        description: metadata.description,
        keywords: metadata.keywords,
        excerpt: extract_excerpt(&content),
    })
}
