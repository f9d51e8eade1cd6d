//! Index configuration.
//!
//! Handles loading, validating, and merging `sitemap.toml`. Stock defaults are
//! serialized to a TOML table, the user's file is merged on top, and the
//! result is deserialized with unknown keys rejected.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! root_marker = "tribefactory-main"     # Folder name that marks the site root
//! render_target = "sidebar_container"   # id of the host container element
//! listing_source = "js/sitemap/file_structure.json"  # URL or file path
//! static_prefix = ""                    # Markup written before the list
//! excluded_extensions = [".jpg", ".png", ".css", ".js"]
//! label_style = "name"                  # "name" | "parent_and_name"
//! group_by = "top_folder"               # "top_folder" | "flat"
//! header_icon = "📂"
//! list_class = "sitemap-list"
//! fetch_timeout_secs = 30
//! ```
//!
//! The config is a plain value handed to [`crate::pipeline::build_index`] and
//! [`crate::loader::ListingLoader`]; nothing reads it from global state.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// File name looked up in the config directory.
pub const CONFIG_FILE: &str = "sitemap.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// How the visible text of a link is composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelStyle {
    /// Bare file name: `b.htm`
    #[default]
    Name,
    /// Containing folder and file name: `2023/b.htm`
    ParentAndName,
}

/// How links are partitioned under headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// One header per first-level folder
    #[default]
    TopFolder,
    /// A single headerless list
    Flat,
}

/// Index configuration loaded from `sitemap.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Literal folder name locating the site root inside full paths.
    pub root_marker: String,
    /// Lower-case, dot-prefixed suffixes hidden from the index.
    pub excluded_extensions: Vec<String>,
    /// `id` of the container element receiving the list.
    pub render_target: String,
    /// URL (`http://`, `https://`) or local path of the listing document.
    pub listing_source: String,
    /// Markup written verbatim before the generated list.
    pub static_prefix: String,
    pub label_style: LabelStyle,
    pub group_by: GroupBy,
    /// Prepended to each group header.
    pub header_icon: String,
    /// CSS class of the generated `<ul>`.
    pub list_class: String,
    /// Deadline for retrieving the listing.
    pub fetch_timeout_secs: u64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            root_marker: "tribefactory-main".to_string(),
            excluded_extensions: [
                ".jpg",
                ".png",
                ".svg",
                ".xml",
                ".css",
                ".json",
                ".webmanifest",
                ".ico",
                ".ダウンロード",
                ".js",
                ".ps1",
                ".bat",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            render_target: "sidebar_container".to_string(),
            listing_source: "js/sitemap/file_structure.json".to_string(),
            static_prefix: String::new(),
            label_style: LabelStyle::default(),
            group_by: GroupBy::default(),
            header_icon: "📂".to_string(),
            list_class: "sitemap-list".to_string(),
            fetch_timeout_secs: 30,
        }
    }
}

impl NavConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root_marker.is_empty() {
            return Err(ConfigError::Validation(
                "root_marker must not be empty".into(),
            ));
        }
        if self.root_marker.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "root_marker must be a single folder name, without separators".into(),
            ));
        }
        if self.render_target.is_empty() {
            return Err(ConfigError::Validation(
                "render_target must not be empty".into(),
            ));
        }
        if self.excluded_extensions.iter().any(|e| e.is_empty()) {
            return Err(ConfigError::Validation(
                "excluded_extensions must not contain empty suffixes".into(),
            ));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "fetch_timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(NavConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value
/// entirely (so a user's `excluded_extensions` list replaces the stock one).
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

/// Load `sitemap.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<NavConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: NavConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `sitemap.toml` in the given directory, falling back to
/// stock defaults when the file is absent.
pub fn load_config(dir: &Path) -> Result<NavConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `sitemap.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# sitemap-nav configuration
# ==========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Folder name that marks the site root inside each listed FullName.
# Everything up to and including it is stripped to build link targets.
root_marker = "tribefactory-main"

# id of the container element the list is written into.
render_target = "sidebar_container"

# Where the listing document lives: an http(s) URL or a local path.
listing_source = "js/sitemap/file_structure.json"

# Markup written verbatim before the generated list (may be empty).
static_prefix = ""

# File-name suffixes hidden from the index (compared case-insensitively).
# Setting this replaces the whole list.
excluded_extensions = [
    ".jpg", ".png", ".svg", ".xml", ".css", ".json", ".webmanifest",
    ".ico", ".ダウンロード", ".js", ".ps1", ".bat",
]

# Link text: "name" (b.htm) or "parent_and_name" (2023/b.htm).
label_style = "name"

# Grouping: "top_folder" (one header per first-level folder) or "flat".
group_by = "top_folder"

# Prepended to each group header.
header_icon = "📂"

# CSS class of the generated <ul>.
list_class = "sitemap-list"

# Seconds to wait for the listing before giving up.
fetch_timeout_secs = 30
"##
}
