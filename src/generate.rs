//! Artifact generation.
//!
//! Runs the navigation and search builders against a content directory and
//! writes their results as JSON:
//!
//! ```text
//! public/
//! ├── _navigation.json     # TreeNode array, menu order
//! └── _search-index.json   # SearchIndexEntry array, traversal order
//! ```
//!
//! Both files are plain JSON arrays (2-space indent, trailing newline) and are
//! overwritten on every run. The builders only read content and share no
//! state, so [`collect`] runs them side by side with `rayon::join`.
//!
//! Builder problems (missing menu, unreadable pages) never surface here; they
//! degrade the output and are logged. Only writing the artifacts can fail.

use crate::config::BuildPaths;
use crate::navigation::{TreeNode, count_nodes, load_navigation};
use crate::search::{SearchIndexEntry, build_search_index};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the navigation tree artifact.
pub const NAVIGATION_FILE: &str = "_navigation.json";

/// File name of the search index artifact.
pub const SEARCH_INDEX_FILE: &str = "_search-index.json";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Both artifacts, built in memory.
#[derive(Debug)]
pub struct Collected {
    pub navigation: Vec<TreeNode>,
    pub search_index: Vec<SearchIndexEntry>,
}

/// A written artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactReport {
    pub path: PathBuf,
    pub bytes: u64,
    /// Menu items (counted recursively) or indexed pages.
    pub items: usize,
}

/// Result of a full run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub navigation: ArtifactReport,
    pub search_index: ArtifactReport,
}

/// Build both artifacts without writing anything.
pub fn collect(paths: &BuildPaths) -> Collected {
    let (navigation, search_index) = rayon::join(
        || load_navigation(&paths.content_dir),
        || build_search_index(&paths.content_dir),
    );
    Collected {
        navigation,
        search_index,
    }
}

/// Build and write both artifacts.
pub fn generate(paths: &BuildPaths) -> Result<GenerateReport, GenerateError> {
    let collected = collect(paths);
    Ok(GenerateReport {
        navigation: write_navigation(&paths.output_dir, &collected.navigation)?,
        search_index: write_search_index(&paths.output_dir, &collected.search_index)?,
    })
}

/// Build and write the navigation tree only.
pub fn generate_navigation(paths: &BuildPaths) -> Result<ArtifactReport, GenerateError> {
    let tree = load_navigation(&paths.content_dir);
    write_navigation(&paths.output_dir, &tree)
}

/// Build and write the search index only.
pub fn generate_search_index(paths: &BuildPaths) -> Result<ArtifactReport, GenerateError> {
    let index = build_search_index(&paths.content_dir);
    write_search_index(&paths.output_dir, &index)
}

fn write_navigation(output_dir: &Path, tree: &[TreeNode]) -> Result<ArtifactReport, GenerateError> {
    let report = write_json(output_dir, NAVIGATION_FILE, tree, count_nodes(tree))?;
    tracing::info!(
        path = %report.path.display(),
        bytes = report.bytes,
        items = report.items,
        "Navigation tree generated"
    );
    Ok(report)
}

fn write_search_index(
    output_dir: &Path,
    index: &[SearchIndexEntry],
) -> Result<ArtifactReport, GenerateError> {
    let report = write_json(output_dir, SEARCH_INDEX_FILE, index, index.len())?;
    tracing::info!(
        path = %report.path.display(),
        bytes = report.bytes,
        pages = report.items,
        "Search index generated"
    );
    Ok(report)
}

fn write_json<T: Serialize + ?Sized>(
    output_dir: &Path,
    file_name: &str,
    value: &T,
    items: usize,
) -> Result<ArtifactReport, GenerateError> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(file_name);
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    fs::write(&path, &json)?;
    Ok(ArtifactReport {
        path,
        bytes: json.len() as u64,
        items,
    })
}
