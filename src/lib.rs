//! # md-site-index
//!
//! Builds the two JSON files a documentation frontend needs to render a site
//! from a tree of markdown files: a navigation tree and a flat search index.
//! The filesystem is the data source and a hand-written `_menu.yaml` decides
//! what the navigation looks like.
//!
//! # Pipeline
//!
//! ```text
//! content/_menu.yaml + *.md  →  navigation  →  public/_navigation.json
//! content/**/*.md            →  search      →  public/_search-index.json
//! ```
//!
//! The two builders are independent: they read the same content directory,
//! share no state, and run side by side. Neither ever fails on bad content.
//! A missing menu gives an empty tree, a missing page gives a node titled with
//! its label, and a page without a title stays out of the search index. Each
//! case is logged as a warning. Only writing the output can fail.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`markdown`] | Title, frontmatter description/keywords, and excerpt extraction |
//! | [`paths`] | Menu token → site path resolution, file path → URL path mapping |
//! | [`menu`] | `_menu.yaml` discovery and parsing into typed [`menu::MenuItem`]s |
//! | [`source`] | Read access to content files, abstracted for tests |
//! | [`navigation`] | Menu items → ordered [`navigation::TreeNode`] tree |
//! | [`search`] | Content walk → [`search::SearchIndexEntry`] list |
//! | [`generate`] | Runs both builders and writes the JSON artifacts |
//! | [`config`] | `content.config.toml` loading, domain overlays, validation |
//! | [`output`] | CLI output formatting of build results |
//!
//! # Design Decisions
//!
//! ## The Menu Is Authoritative
//!
//! Navigation order comes from `_menu.yaml` alone. Nothing is sorted, and pages
//! missing from the menu are simply not in the tree (they are still searchable).
//! Pages referenced by the menu but missing on disk still get a node, so a
//! broken link is visible in the frontend instead of silently disappearing.
//!
//! ## Drafts
//!
//! Files ending in `.draft.md` can be linked from the menu but are never
//! indexed. This lets a draft be previewed through navigation without leaking
//! into search results.
//!
//! ## Deterministic Output
//!
//! Directory traversal is sorted by file name and parallel results are
//! collected back in traversal order, so repeated runs over unchanged content
//! produce byte-identical files.

pub mod config;
pub mod generate;
pub mod markdown;
pub mod menu;
pub mod navigation;
pub mod output;
pub mod paths;
pub mod search;
pub mod source;

#[cfg(test)]
pub(crate) mod test_helpers;
