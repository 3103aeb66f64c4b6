//! Site path arithmetic.
//!
//! Two directions are handled here:
//!
//! - **Menu token → site path** ([`resolve_path`]): tokens in `_menu.yaml` are
//!   resolved against the path of the submenu they appear in.
//! - **File → URL path** ([`url_path_for`]): a markdown file's location under
//!   the content root becomes the URL the site serves it at.
//!
//! ```text
//! resolve_path("sub/page",  "/guide")      → /guide/sub/page
//! resolve_path("../other",  "/guide/sub")  → /guide/other
//! resolve_path("/abs/path", "/guide")      → /abs/path
//! resolve_path("./x",       "/")           → /x
//!
//! url_path_for("guide/index.md")           → /guide
//! url_path_for("index.md")                 → /
//! ```
//!
//! Only a single leading `../` is understood. `../../x` pops one segment and
//! keeps `../x` verbatim.

use std::path::Path;

/// Resolve a menu token against the path of its enclosing submenu.
pub fn resolve_path(token: &str, context: &str) -> String {
    if token.starts_with('/') {
        return token.to_string();
    }

    if let Some(rest) = token.strip_prefix("../") {
        let mut segments: Vec<&str> = context.split('/').filter(|s| !s.is_empty()).collect();
        segments.pop();
        return if segments.is_empty() {
            format!("/{rest}")
        } else {
            format!("/{}/{rest}", segments.join("/"))
        };
    }

    let rest = token.strip_prefix("./").unwrap_or(token);
    join_site_path(context, rest)
}

/// Join a relative name under a site path without doubling the root slash.
pub fn join_site_path(context: &str, name: &str) -> String {
    if context == "/" {
        format!("/{name}")
    } else {
        format!("{context}/{name}")
    }
}

/// Last non-empty segment of a site path, if any.
pub fn last_segment(site_path: &str) -> Option<&str> {
    site_path.split('/').filter(|s| !s.is_empty()).next_back()
}

/// Markdown file (relative to the content root) backing a site path.
///
/// Appends `.md` unless the path already carries it.
pub fn markdown_file_for(site_path: &str) -> String {
    let relative = site_path.trim_start_matches('/');
    if relative.ends_with(".md") {
        relative.to_string()
    } else {
        format!("{relative}.md")
    }
}

/// URL path for a markdown file given relative to the content root.
///
/// Strips `.md`, collapses a trailing `index` segment, normalizes separators,
/// and strips trailing slashes. The root page maps to `/`.
pub fn url_path_for(relative: &Path) -> String {
    let path_str = relative.to_string_lossy().replace('\\', "/");
    let without_ext = path_str.strip_suffix(".md").unwrap_or(&path_str);

    let path_part = if without_ext == "index" {
        ""
    } else if let Some(parent) = without_ext.strip_suffix("/index") {
        parent
    } else {
        without_ext
    };

    let trimmed = path_part.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}
