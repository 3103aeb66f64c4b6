//! CLI output formatting.
//!
//! Output is **information-centric**: menu entries and indexed pages lead with
//! a positional index and their title, with paths shown as secondary context.
//!
//! ## Build
//!
//! ```text
//! Navigation → public/_navigation.json (2.41 KB, 15 items)
//! Search index → public/_search-index.json (1.87 KB, 6 pages)
//! ```
//!
//! ## Check
//!
//! ```text
//! Navigation
//! 001 Welcome → /index
//! 002 ---
//! 003 Getting Started (header)
//! 004 User Guide → /guide
//!     001 Installation → /guide/install
//!     002 Setup Help → /guide/install (alias)
//! 005 GitHub → https://github.com/example (external)
//!
//! Search index
//! 001 Welcome → /
//!     Project documentation home
//!
//! 15 menu items, 6 indexed pages
//! ```
//!
//! Each view has a pure `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::generate::{ArtifactReport, Collected, GenerateReport};
use crate::navigation::{NodeType, TreeNode, count_nodes};
use crate::search::SearchIndexEntry;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Human-readable size in kilobytes with two decimals.
fn format_size(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

fn artifact_line(label: &str, report: &ArtifactReport, unit: &str) -> String {
    format!(
        "{} \u{2192} {} ({}, {} {})",
        label,
        report.path.display(),
        format_size(report.bytes),
        report.items,
        unit
    )
}

// ============================================================================
// Build output
// ============================================================================

/// Format the summary of a navigation artifact.
pub fn format_navigation_report(report: &ArtifactReport) -> String {
    artifact_line("Navigation", report, "items")
}

/// Format the summary of a search index artifact.
pub fn format_search_index_report(report: &ArtifactReport) -> String {
    artifact_line("Search index", report, "pages")
}

/// Format the summary of a full build.
pub fn format_generate_report(report: &GenerateReport) -> Vec<String> {
    vec![
        format_navigation_report(&report.navigation),
        format_search_index_report(&report.search_index),
    ]
}

/// Print build summary to stdout.
pub fn print_generate_report(report: &GenerateReport) {
    for line in format_generate_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

fn node_line(node: &TreeNode) -> String {
    match node.node_type {
        NodeType::Separator => node.title.clone(),
        NodeType::Header => format!("{} (header)", node.title),
        NodeType::External => format!("{} \u{2192} {} (external)", node.title, node.path),
        NodeType::Link if node.is_primary == Some(false) => {
            format!("{} \u{2192} {} (alias)", node.title, node.path)
        }
        NodeType::Link => format!("{} \u{2192} {}", node.title, node.path),
    }
}

fn format_tree(nodes: &[TreeNode], depth: usize, lines: &mut Vec<String>) {
    for (i, node) in nodes.iter().enumerate() {
        lines.push(format!(
            "{}{} {}",
            indent(depth),
            format_index(i + 1),
            node_line(node)
        ));
        if let Some(children) = &node.children {
            format_tree(children, depth + 1, lines);
        }
    }
}

/// Format the navigation tree as an indented listing.
pub fn format_navigation(nodes: &[TreeNode]) -> Vec<String> {
    let mut lines = vec!["Navigation".to_string()];
    if nodes.is_empty() {
        lines.push("    (no menu)".to_string());
    }
    format_tree(nodes, 0, &mut lines);
    lines
}

/// Format the search index: one line per page plus a description preview.
pub fn format_search_index(index: &[SearchIndexEntry]) -> Vec<String> {
    let mut lines = vec!["Search index".to_string()];
    for (i, entry) in index.iter().enumerate() {
        lines.push(format!(
            "{} {} \u{2192} {}",
            format_index(i + 1),
            entry.title,
            entry.path
        ));
        if let Some(desc) = &entry.description {
            lines.push(format!("    {}", truncate_desc(desc, 60)));
        }
    }
    lines
}

/// Format the full `check` output.
pub fn format_check_output(collected: &Collected) -> Vec<String> {
    let mut lines = format_navigation(&collected.navigation);
    lines.push(String::new());
    lines.extend(format_search_index(&collected.search_index));
    lines.push(String::new());
    lines.push(format!(
        "{} menu items, {} indexed pages",
        count_nodes(&collected.navigation),
        collected.search_index.len()
    ));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(collected: &Collected) {
    for line in format_check_output(collected) {
        println!("{}", line);
    }
}
