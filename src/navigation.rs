//! Navigation tree construction.
//!
//! Interprets the parsed menu ([`MenuItem`]s) into an ordered tree of
//! [`TreeNode`]s, depth-first and in input order. Nothing is sorted.
//!
//! ## Node Typing
//!
//! | Menu item | Node type | Title | `isPrimary` |
//! |-----------|-----------|-------|-------------|
//! | `Label` | `link` | H1 of the page, else the label | `true` |
//! | `Submenu` | `link` + `children` | H1 of `<key>.md`, else the key | `true` |
//! | `Alias` | `link` | the key, always | `false` |
//! | `Header` | `header` | the key | — |
//! | `External` | `external` | the key | — |
//! | `Separator` | `separator` | `---` | — |
//!
//! ## Ids and Ordering
//!
//! Every node consumes one tick of a per-list order counter, which is embedded
//! in its id (`install-2`, `header-3`, `link-setup-help-4`). The counter starts
//! at zero for each submenu's children, so ids are unique among siblings only.
//!
//! ## Synthetic Paths
//!
//! Separators and headers get a path built from their submenu context and
//! their order, joined like any other site path: `/guide/__separator-3` in a
//! submenu, `/__separator-0` at the root (one slash, never `//__separator-0`).
//!
//! ## Missing Pages
//!
//! Each label reads exactly one file, `<path>.md`; a directory's `index.md` is
//! not consulted. A label whose markdown file is missing or unreadable still
//! produces a node, titled with the literal label and without a description.
//! A warning is logged and the build continues.

use crate::markdown::{PageMetadata, extract_metadata};
use crate::menu::{self, MenuItem};
use crate::paths::{join_site_path, last_segment, markdown_file_for, resolve_path};
use crate::source::{ContentSource, FsSource};
use serde::Serialize;
use std::io;
use std::path::Path;

const SEPARATOR_TITLE: &str = "---";

/// Kind of navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Link,
    Separator,
    Header,
    External,
}

/// One entry of the serialized navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: String,
    pub title: String,
    /// Site path, external URL, or a synthetic `__separator-N`/`__header-N` path.
    pub path: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Set on `link` nodes only; aliases are never primary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
    /// Present on submenu nodes only (possibly empty).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    fn marker(node_type: NodeType, id: String, title: String, path: String) -> Self {
        Self {
            id,
            title,
            path,
            node_type,
            description: None,
            is_primary: None,
            children: None,
        }
    }
}

/// Builds navigation nodes, reading page metadata from a [`ContentSource`].
pub struct NavigationBuilder<'a, S: ContentSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: ContentSource + ?Sized> NavigationBuilder<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Build nodes for `items` resolved against `context`, numbering them
    /// from `start_order`.
    pub fn build(&self, items: &[MenuItem], context: &str, start_order: usize) -> Vec<TreeNode> {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.build_node(item, context, start_order + i))
            .collect()
    }

    fn build_node(&self, item: &MenuItem, context: &str, order: usize) -> TreeNode {
        match item {
            MenuItem::Separator => TreeNode::marker(
                NodeType::Separator,
                format!("separator-{order}"),
                SEPARATOR_TITLE.to_string(),
                join_site_path(context, &format!("__separator-{order}")),
            ),
            MenuItem::Header(title) => TreeNode::marker(
                NodeType::Header,
                format!("header-{order}"),
                title.clone(),
                join_site_path(context, &format!("__header-{order}")),
            ),
            MenuItem::External { title, url } => TreeNode::marker(
                NodeType::External,
                format!("external-{order}"),
                title.clone(),
                url.clone(),
            ),
            MenuItem::Label(label) => self.page_node(label, context, order),
            MenuItem::Submenu { key, items } => {
                let mut node = self.page_node(key, context, order);
                node.children = Some(self.build(items, &node.path, 0));
                node
            }
            MenuItem::Alias { title, target } => {
                let path = resolve_path(target, context);
                let description = self.lookup(&path).and_then(|m| m.description);
                TreeNode {
                    id: format!("link-{}-{order}", alias_slug(title)),
                    title: title.clone(),
                    path,
                    node_type: NodeType::Link,
                    description,
                    is_primary: Some(false),
                    children: None,
                }
            }
        }
    }

    /// Primary link to the page referenced by `label`.
    fn page_node(&self, label: &str, context: &str, order: usize) -> TreeNode {
        let path = resolve_path(label, context);
        let metadata = self.lookup(&path).unwrap_or_default();
        TreeNode {
            id: format!("{}-{order}", last_segment(&path).unwrap_or("home")),
            title: metadata.title.unwrap_or_else(|| label.to_string()),
            path,
            node_type: NodeType::Link,
            description: metadata.description,
            is_primary: Some(true),
            children: None,
        }
    }

    /// Metadata of the page behind a site path, read from `<path>.md`.
    fn lookup(&self, site_path: &str) -> Option<PageMetadata> {
        let file = markdown_file_for(site_path);
        match self.source.read(&file) {
            Ok(content) => Some(extract_metadata(&content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %file, "Menu page not found, using label");
                None
            }
            Err(e) => {
                tracing::warn!(path = %file, error = %e, "Failed to read menu page, using label");
                None
            }
        }
    }
}

/// `Setup  Help` → `setup-help`.
fn alias_slug(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Total number of nodes in a tree, children included.
pub fn count_nodes(nodes: &[TreeNode]) -> usize {
    nodes
        .iter()
        .map(|n| 1 + n.children.as_deref().map_or(0, count_nodes))
        .sum()
}

/// Build the navigation tree for a content directory.
///
/// A missing or unparsable menu file yields an empty tree; the problem is
/// logged, never returned.
pub fn load_navigation(content_dir: &Path) -> Vec<TreeNode> {
    let Some(menu_path) = menu::find_menu_file(content_dir) else {
        tracing::warn!(dir = %content_dir.display(), "No _menu.yaml or _menu.yml found");
        return Vec::new();
    };

    let items = match menu::load_menu(&menu_path) {
        Ok(items) => items,
        Err(e) => {
            tracing::error!(path = %menu_path.display(), error = %e, "Failed to load menu");
            return Vec::new();
        }
    };

    tracing::debug!(path = %menu_path.display(), entries = items.len(), "Building navigation tree");
    NavigationBuilder::new(&FsSource::new(content_dir)).build(&items, "/", 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::parse_menu;
    use crate::source::tests::MemorySource;
    use crate::test_helpers::*;

    fn build(yaml: &str, source: &MemorySource) -> Vec<TreeNode> {
        let items = parse_menu(yaml).unwrap();
        NavigationBuilder::new(source).build(&items, "/", 0)
    }

    fn empty() -> MemorySource {
        MemorySource::default()
    }

    // =========================================================================
    // Node typing
    // =========================================================================

    #[test]
    fn plain_labels_keep_count_and_order() {
        let nodes = build("- zeta\n- alpha\n- mid/page\n", &empty());
        assert_eq!(node_titles(&nodes), vec!["zeta", "alpha", "mid/page"]);
        assert_eq!(node_paths(&nodes), vec!["/zeta", "/alpha", "/mid/page"]);
        assert!(nodes.iter().all(|n| n.node_type == NodeType::Link));
    }

    #[test]
    fn label_title_and_description_from_page() {
        let source = MemorySource::with_files(&[(
            "intro.md",
            "---\ndescription: Start here\n---\n# Introduction\n",
        )]);
        let nodes = build("- intro\n", &source);

        assert_eq!(
            nodes[0],
            TreeNode {
                id: "intro-0".to_string(),
                title: "Introduction".to_string(),
                path: "/intro".to_string(),
                node_type: NodeType::Link,
                description: Some("Start here".to_string()),
                is_primary: Some(true),
                children: None,
            }
        );
    }

    #[test]
    fn page_without_h1_uses_label() {
        let source = MemorySource::with_files(&[("notes.md", "no heading here")]);
        let nodes = build("- notes\n", &source);
        assert_eq!(nodes[0].title, "notes");
    }

    #[test]
    fn separators_have_no_children_or_description() {
        let nodes = build("- ===\n-\n", &empty());
        for (i, node) in nodes.iter().enumerate() {
            assert_eq!(node.node_type, NodeType::Separator);
            assert_eq!(node.id, format!("separator-{i}"));
            assert_eq!(node.title, "---");
            assert!(node.children.is_none());
            assert!(node.description.is_none());
            assert!(node.is_primary.is_none());
        }
        assert_eq!(nodes[0].path, "/__separator-0");
    }

    #[test]
    fn separator_path_embeds_submenu_context() {
        let nodes = build("- guide:\n    - ===\n", &empty());
        let children = nodes[0].children.as_ref().unwrap();
        assert_eq!(children[0].path, "/guide/__separator-0");
    }

    #[test]
    fn header_from_separator_value() {
        let nodes = build("- Foo: ===\n", &empty());
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].node_type, NodeType::Header);
        assert_eq!(nodes[0].title, "Foo");
        assert_eq!(nodes[0].id, "header-0");
    }

    #[test]
    fn external_keeps_url_verbatim() {
        let nodes = build(
            "- Docs: https://docs.example.com/a?b=c\n- Old: http://old.example\n",
            &empty(),
        );
        assert_eq!(nodes[0].node_type, NodeType::External);
        assert_eq!(nodes[0].path, "https://docs.example.com/a?b=c");
        assert_eq!(nodes[1].path, "http://old.example");
        assert_eq!(nodes[1].id, "external-1");
    }

    #[test]
    fn alias_keeps_custom_title_and_is_not_primary() {
        let source = MemorySource::with_files(&[(
            "guide/install.md",
            "---\ndescription: How to install\n---\n# Installation\n",
        )]);
        let nodes = build("- Setup  Help: guide/install\n", &source);

        assert_eq!(nodes[0].title, "Setup  Help");
        assert_eq!(nodes[0].path, "/guide/install");
        assert_eq!(nodes[0].id, "link-setup-help-0");
        assert_eq!(nodes[0].is_primary, Some(false));
        assert_eq!(nodes[0].description.as_deref(), Some("How to install"));
    }

    // =========================================================================
    // Submenus
    // =========================================================================

    #[test]
    fn submenu_resolves_children_under_its_path() {
        let source = MemorySource::with_files(&[
            ("guide.md", "# User Guide"),
            ("guide/install.md", "# Installation"),
            ("reference/api.md", "# API"),
        ]);
        let nodes = build(
            "- guide:\n    - install\n    - ./configure\n    - ../reference/api\n    - /abs\n",
            &source,
        );

        let guide = &nodes[0];
        assert_eq!(guide.title, "User Guide");
        assert_eq!(guide.is_primary, Some(true));
        let children = guide.children.as_ref().unwrap();
        assert_eq!(
            node_paths(children),
            vec!["/guide/install", "/guide/configure", "/reference/api", "/abs"]
        );
        assert_eq!(node_titles(children), vec!["Installation", "./configure", "API", "/abs"]);
    }

    #[test]
    fn submenu_counter_resets() {
        let nodes = build("- a\n- b\n- guide:\n    - x\n    - y\n- c\n", &empty());
        let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a-0", "b-1", "guide-2", "c-3"]);

        let child_ids: Vec<&str> = nodes[2]
            .children
            .as_ref()
            .unwrap()
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(child_ids, vec!["x-0", "y-1"]);
    }

    #[test]
    fn deeply_nested_submenus() {
        let nodes = build(
            "- a:\n    - b:\n        - c:\n            - leaf\n",
            &empty(),
        );
        assert_tree_shape(&nodes, &[("a", &["b"])]);
        let b = &nodes[0].children.as_ref().unwrap()[0];
        let c = &b.children.as_ref().unwrap()[0];
        assert_eq!(c.path, "/a/b/c");
        assert_eq!(c.children.as_ref().unwrap()[0].path, "/a/b/c/leaf");
    }

    #[test]
    fn empty_submenu_has_empty_children() {
        let nodes = build("- guide: []\n", &empty());
        assert_eq!(nodes[0].children.as_deref(), Some(&[][..]));
    }

    #[test]
    fn directory_index_is_not_a_landing_page() {
        let source = MemorySource::with_files(&[(
            "guide/index.md",
            "---\ndescription: Guide overview\n---\n# Guide Home",
        )]);
        let nodes = build("- guide:\n    - install\n- guide\n- /\n", &source);

        assert_eq!(node_titles(&nodes), vec!["guide", "guide", "/"]);
        assert!(nodes.iter().all(|n| n.description.is_none()));
        assert_eq!(
            source.get_reads(),
            vec!["guide.md", "guide/install.md", "guide.md", ".md"]
        );
    }

    #[test]
    fn empty_label_resolves_to_context() {
        let nodes = build("- \"\"\n- sub:\n    - \"\"\n", &empty());
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].path, "/");
        assert_eq!(nodes[0].id, "home-0");
        assert_eq!(nodes[0].title, "");

        let child = &nodes[1].children.as_ref().unwrap()[0];
        assert_eq!(child.path, "/sub/");
        assert_eq!(child.id, "sub-0");
    }

    #[test]
    fn start_order_offsets_ids() {
        let items = parse_menu("- a\n- ===\n").unwrap();
        let nodes = NavigationBuilder::new(&empty()).build(&items, "/docs", 5);
        assert_eq!(nodes[0].id, "a-5");
        assert_eq!(nodes[1].id, "separator-6");
        assert_eq!(nodes[1].path, "/docs/__separator-6");
    }

    // =========================================================================
    // Files and serialization
    // =========================================================================

    #[test]
    fn md_suffixed_label_is_read_directly() {
        let source = MemorySource::with_files(&[("wip.draft.md", "# Work in Progress")]);
        let nodes = build("- wip.draft.md\n", &source);
        assert_eq!(nodes[0].title, "Work in Progress");
        assert_eq!(nodes[0].path, "/wip.draft.md");
        assert_eq!(source.get_reads(), vec!["wip.draft.md"]);
    }

    #[test]
    fn root_label_id_is_home() {
        let nodes = build("- /\n", &empty());
        assert_eq!(nodes[0].id, "home-0");
    }

    #[test]
    fn count_includes_children() {
        let nodes = build("- a\n- g:\n    - x\n    - h:\n        - y\n- ===\n", &empty());
        assert_eq!(count_nodes(&nodes), 6);
        assert_eq!(count_nodes(&[]), 0);
    }

    #[test]
    fn serializes_with_camel_case_and_omits_absent_fields() {
        let nodes = build("- Foo: ===\n- Alias: target\n", &empty());
        let json = serde_json::to_value(&nodes).unwrap();

        assert_eq!(
            json[0],
            serde_json::json!({
                "id": "header-0",
                "title": "Foo",
                "path": "/__header-0",
                "type": "header"
            })
        );
        assert_eq!(json[1]["isPrimary"], serde_json::json!(false));
        assert!(json[1].get("children").is_none());
    }

    #[test]
    fn load_navigation_from_fixtures() {
        let tmp = setup_fixtures();
        let nodes = load_navigation(tmp.path());

        assert_tree_shape(
            &nodes,
            &[
                ("Welcome", &[]),
                ("About Us", &[]),
                ("---", &[]),
                ("Getting Started", &[]),
                (
                    "User Guide",
                    &["Installation", "Configuration", "Roadmap", "Setup Help", "API Reference"],
                ),
                ("Resources", &[]),
                ("API Docs", &[]),
                ("GitHub", &[]),
                ("---", &[]),
                ("missing-page", &[]),
            ],
        );

        let missing = find_node(&nodes, "missing-page");
        assert_eq!(missing.is_primary, Some(true));
        assert!(missing.description.is_none());
        assert_eq!(count_nodes(&nodes), 15);
    }

    #[test]
    fn load_navigation_without_menu_is_empty() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(load_navigation(tmp.path()).is_empty());
    }

    #[test]
    fn load_navigation_with_broken_menu_is_empty() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("_menu.yaml"), "- [broken").unwrap();
        assert!(load_navigation(tmp.path()).is_empty());
    }
}
