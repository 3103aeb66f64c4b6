//! Project configuration.
//!
//! Handles loading, validating, and merging the TOML config files that tell the
//! indexer where content lives and where the JSON artifacts go. Stock defaults
//! are overridden by a base file, which is in turn overridden by an optional
//! per-domain file:
//!
//! ```text
//! project/
//! ├── content.config.toml      # Base config (overrides stock defaults)
//! ├── cms.config.toml          # Domain config (overrides base when --domain cms)
//! └── content/
//!     ├── cms/                 # Content for the `cms` domain
//!     │   ├── _menu.yaml
//!     │   └── ...
//!     └── blog/
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_root = "content"  # Content directory, relative to the project dir
//! # domain = "cms"          # Content domain: a subdirectory of content_root
//! output_dir = "public"     # Where _navigation.json and _search-index.json go
//!
//! [processing]
//! # max_processes = 4       # Search index workers (omit for auto = CPU cores)
//! ```
//!
//! Config files are sparse: set only the keys you want to change. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Basename of the project-wide config file.
pub const BASE_CONFIG_NAME: &str = "content.config";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Project configuration loaded from `content.config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Content directory, relative to the project directory.
    pub content_root: String,
    /// Optional content domain. When set, content is read from
    /// `<content_root>/<domain>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Output directory for the generated JSON files.
    pub output_dir: String,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_root: "content".to_string(),
            domain: None,
            output_dir: "public".to_string(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content_root.trim().is_empty() {
            return Err(ConfigError::Validation(
                "content_root must not be empty".into(),
            ));
        }
        if self.output_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output_dir must not be empty".into(),
            ));
        }
        if let Some(domain) = &self.domain
            && (domain.is_empty() || domain.contains(['/', '\\']) || domain == "..")
        {
            return Err(ConfigError::Validation(format!(
                "domain must be a single directory name, got {domain:?}"
            )));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Resolve the content and output directories against a project directory.
    pub fn build_paths(&self, project_dir: &Path) -> BuildPaths {
        let mut content_dir = project_dir.join(&self.content_root);
        if let Some(domain) = &self.domain {
            content_dir.push(domain);
        }
        BuildPaths {
            content_dir,
            output_dir: project_dir.join(&self.output_dir),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel search index workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_processes: Option<usize>,
}

/// Number of rayon workers for the search index: `max_processes` clamped to
/// the core count, or every core when unset.
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Filesystem locations a build reads from and writes to.
///
/// This is the only configuration the builders see; nothing is read from the
/// process environment below the CLI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPaths {
    /// Root of the markdown tree (holds `_menu.yaml`).
    pub content_dir: PathBuf,
    /// Directory receiving the JSON artifacts.
    pub output_dir: PathBuf,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// `SiteConfig::default()` as a TOML table, the bottom layer of `load_config`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Deep-merge a config layer onto the layers below it.
///
/// A domain file that only sets `[processing] max_processes` keeps the base
/// file's `content_root` and `output_dir`; any non-table value replaces the
/// one underneath.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read `<basename>.toml` from the project directory, unparsed into `SiteConfig`.
///
/// A missing file is `Ok(None)`: both the base and the domain file are optional.
pub fn load_raw_config(dir: &Path, basename: &str) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(format!("{basename}.toml"));
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    tracing::debug!(path = %config_path.display(), "Loaded config file");
    Ok(Some(value))
}

/// Apply the domain layer, if any, and turn the result into a validated `SiteConfig`.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the project config from `project_dir`.
///
/// Layers, lowest to highest priority: stock defaults, `content.config.toml`,
/// and `<domain>.config.toml` when a domain is given. The domain argument
/// itself wins over any `domain` key in the files.
pub fn load_config(project_dir: &Path, domain: Option<&str>) -> Result<SiteConfig, ConfigError> {
    let mut base = stock_defaults_value();
    if let Some(project) = load_raw_config(project_dir, BASE_CONFIG_NAME)? {
        base = merge_toml(base, project);
    }

    let overlay = match domain {
        Some(d) => {
            let mut layer = load_raw_config(project_dir, &format!("{d}.config"))?
                .unwrap_or_else(|| toml::Value::Table(toml::map::Map::new()));
            if let toml::Value::Table(table) = &mut layer {
                table.insert("domain".to_string(), toml::Value::String(d.to_string()));
            }
            Some(layer)
        }
        None => None,
    };

    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `content.config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# md-site-index configuration
# ===========================
# All settings are optional. Values shown below are the defaults.
#
# Files are read from the project directory (--project, default "."):
#   content.config.toml   -> base (overrides stock defaults)
#   <domain>.config.toml  -> domain overlay, used with --domain <domain>
#
# Each file only needs the keys it wants to override.
# Unknown keys will cause an error.

# Content directory, relative to the project directory.
# Must contain _menu.yaml (or _menu.yml) and the markdown pages.
content_root = "content"

# Content domain. When set, pages are read from <content_root>/<domain>.
# Can also be given with --domain or the CONTENT environment variable.
# domain = "cms"

# Where _navigation.json and _search-index.json are written.
output_dir = "public"

[processing]
# Maximum parallel workers for building the search index.
# Omit to use all CPU cores. Values above the core count are clamped.
# max_processes = 4
"##
}
