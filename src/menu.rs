//! Menu specification model and YAML loading.
//!
//! The menu lives at the content root as `_menu.yaml` (or `_menu.yml`) and is
//! a list whose entries take one of a handful of shapes:
//!
//! ```yaml
//! - index                      # Label: markdown file, title from its H1
//! - ===                        # Separator
//! -                            # Separator (null entry)
//! - Getting Started: ===       # Header (also `Key:` with no value)
//! - GitHub: https://github.com # External link
//! - Setup Help: guide/install  # Alias: custom title, target path
//! - guide:                     # Submenu: key is the landing page,
//!     - install                #   children resolve under /guide
//!     - ../reference/api
//! ```
//!
//! Each shape becomes one [`MenuItem`] variant, so the tree builder matches on
//! a tag rather than probing YAML value types. A mapping entry with several
//! keys yields several items, in key order.

use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Marker string for separators (as an entry) and headers (as a value).
pub const SEPARATOR_TOKEN: &str = "===";

/// Menu file basename, without extension.
pub const MENU_BASENAME: &str = "_menu";

/// Extensions probed for the menu file, first match wins.
pub const MENU_EXTENSIONS: &[&str] = &["yaml", "yml"];

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Menu must be a list of entries, found {0}")]
    InvalidRoot(&'static str),
}

/// One entry of the menu specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    /// Visual divider.
    Separator,
    /// Markdown file reference; the title comes from the file's H1.
    Label(String),
    /// Non-navigable section label.
    Header(String),
    /// Link leaving the site; `url` is emitted verbatim.
    External { title: String, url: String },
    /// Landing page `key` with nested entries resolved under it.
    Submenu { key: String, items: Vec<MenuItem> },
    /// Link with a custom title pointing at `target`.
    Alias { title: String, target: String },
}

/// Locate the menu file in a content directory.
pub fn find_menu_file(content_dir: &Path) -> Option<PathBuf> {
    MENU_EXTENSIONS
        .iter()
        .map(|ext| content_dir.join(format!("{MENU_BASENAME}.{ext}")))
        .find(|p| p.is_file())
}

/// Read and parse a menu file.
pub fn load_menu(path: &Path) -> Result<Vec<MenuItem>, MenuError> {
    let content = fs::read_to_string(path)?;
    parse_menu(&content)
}

/// Parse menu YAML into items.
///
/// An empty document is an empty menu. A top-level mapping is accepted as a
/// single entry.
pub fn parse_menu(yaml: &str) -> Result<Vec<MenuItem>, MenuError> {
    let root: Value = serde_yaml::from_str(yaml)?;
    match untag(&root) {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(entries) => Ok(parse_entries(entries)),
        mapping @ Value::Mapping(_) => {
            let mut items = Vec::new();
            parse_entry(mapping, &mut items);
            Ok(items)
        }
        other => Err(MenuError::InvalidRoot(value_kind(other))),
    }
}

fn parse_entries(entries: &[Value]) -> Vec<MenuItem> {
    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        parse_entry(entry, &mut items);
    }
    items
}

fn parse_entry(entry: &Value, items: &mut Vec<MenuItem>) {
    match untag(entry) {
        Value::Null => items.push(MenuItem::Separator),
        Value::String(s) if s == SEPARATOR_TOKEN => items.push(MenuItem::Separator),
        Value::Mapping(mapping) => {
            for (key, value) in mapping {
                let Some(key) = scalar_text(key) else {
                    tracing::warn!(kind = value_kind(key), "Skipping menu entry with non-scalar key");
                    continue;
                };
                if let Some(item) = parse_keyed(key, value) {
                    items.push(item);
                }
            }
        }
        other => match scalar_text(other) {
            Some(label) => items.push(MenuItem::Label(label)),
            None => tracing::warn!(kind = value_kind(other), "Skipping unsupported menu entry"),
        },
    }
}

fn parse_keyed(key: String, value: &Value) -> Option<MenuItem> {
    match untag(value) {
        Value::Null => Some(MenuItem::Header(key)),
        Value::Sequence(children) => Some(MenuItem::Submenu {
            key,
            items: parse_entries(children),
        }),
        Value::Mapping(_) => {
            tracing::warn!(entry = %key, "Skipping menu entry with a mapping value");
            None
        }
        other => {
            let text = scalar_text(other)?;
            Some(if text.is_empty() || text == SEPARATOR_TOKEN {
                MenuItem::Header(key)
            } else if text.starts_with("http://") || text.starts_with("https://") {
                MenuItem::External {
                    title: key,
                    url: text,
                }
            } else {
                MenuItem::Alias {
                    title: key,
                    target: text,
                }
            })
        }
    }
}

/// Text of a string, number, or boolean scalar.
fn scalar_text(value: &Value) -> Option<String> {
    match untag(value) {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
