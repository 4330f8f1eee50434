//! Site configuration module.
//!
//! Handles loading, validating, and merging `publist.toml`. User values are
//! merged on top of stock defaults, so a config file only needs the keys it
//! wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [dataset]
//! path = "/data/publications.json"   # Site-relative path of the dataset
//!
//! [render]
//! placeholder_thumbnail = "/assets/images/publication-placeholder.svg"
//! thumbnail_alt = "Publication thumbnail"
//!
//! [classifier]
//! conference_acronyms = ["IROS", "ICRA", "RSS", "HRI", "CVPR"]
//!
//! [featured]
//! fallback_count = 3        # Newest N shown when nothing is flagged featured
//!
//! [view]
//! animate = true            # false = instant list/grid switching
//! storage_key = "publications-view"
//! max_animated_cards = 12
//! duration_ms = 400
//! cleanup_ms = 420
//! easing = "cubic-bezier(0.25, 0.1, 0.25, 1)"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the site root.
pub const CONFIG_FILENAME: &str = "publist.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `publist.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub render: RenderConfig,
    pub classifier: ClassifierConfig,
    pub featured: FeaturedConfig,
    pub view: ViewConfig,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dataset.path.is_empty() {
            return Err(ConfigError::Validation(
                "dataset.path must not be empty".into(),
            ));
        }
        if self.featured.fallback_count == 0 {
            return Err(ConfigError::Validation(
                "featured.fallback_count must be at least 1".into(),
            ));
        }
        if self.view.storage_key.is_empty() {
            return Err(ConfigError::Validation(
                "view.storage_key must not be empty".into(),
            ));
        }
        if self.view.cleanup_ms < self.view.duration_ms {
            return Err(ConfigError::Validation(
                "view.cleanup_ms must be >= view.duration_ms".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatasetConfig {
    /// Site-relative path of the JSON dataset.
    pub path: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: "/data/publications.json".to_string(),
        }
    }
}

/// Card rendering fallbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Image used when a record has no static thumbnail.
    pub placeholder_thumbnail: String,
    /// Alt text used when a thumbnail carries none.
    pub thumbnail_alt: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            placeholder_thumbnail: "/assets/images/publication-placeholder.svg".to_string(),
            thumbnail_alt: "Publication thumbnail".to_string(),
        }
    }
}

/// Data for the best-effort venue classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Acronyms counted as conferences even without a declared venue type.
    pub conference_acronyms: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            conference_acronyms: ["IROS", "ICRA", "RSS", "HRI", "CVPR"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeaturedConfig {
    /// How many of the newest records to show when none is flagged.
    pub fallback_count: usize,
}

impl Default for FeaturedConfig {
    fn default() -> Self {
        Self { fallback_count: 3 }
    }
}

/// List/grid toggle and transition settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    /// Play the FLIP transition. When false the layout switches instantly.
    pub animate: bool,
    /// Preference store key holding `"list"` or `"grid"`.
    pub storage_key: String,
    /// Cards beyond this index relocate without animating.
    pub max_animated_cards: usize,
    /// Length of the play phase.
    pub duration_ms: u64,
    /// Delay after play before inline overrides are stripped.
    pub cleanup_ms: u64,
    /// CSS timing function for the play phase.
    pub easing: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            animate: true,
            storage_key: "publications-view".to_string(),
            max_animated_cards: 12,
            duration_ms: 400,
            cleanup_ms: 420,
            easing: "cubic-bezier(0.25, 0.1, 0.25, 1)".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(Config::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
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

/// Load `publist.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from the site root: stock defaults, then `publist.toml`.
pub fn load_config(root: &Path) -> Result<Config, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(base, overlay),
        None => base,
    };
    let config: Config = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `publist.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# publist configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Dataset
# ---------------------------------------------------------------------------
[dataset]
# Site-relative path of the publications JSON. Either
# { "publications": [...] } or a bare array.
path = "/data/publications.json"

# ---------------------------------------------------------------------------
# Card rendering
# ---------------------------------------------------------------------------
[render]
# Shown when a publication has no thumbnail.static
placeholder_thumbnail = "/assets/images/publication-placeholder.svg"
# Alt text when thumbnail.alt is missing
thumbnail_alt = "Publication thumbnail"

# ---------------------------------------------------------------------------
# Venue classification (best effort)
# ---------------------------------------------------------------------------
[classifier]
# Venues with one of these acronyms count as conferences for the
# "conference" filter even when venue.type is not set.
conference_acronyms = ["IROS", "ICRA", "RSS", "HRI", "CVPR"]

# ---------------------------------------------------------------------------
# Featured publications (pages without sort/filter controls)
# ---------------------------------------------------------------------------
[featured]
# Number of newest publications shown when none is flagged "featured".
fallback_count = 3

# ---------------------------------------------------------------------------
# List/grid view
# ---------------------------------------------------------------------------
[view]
# Animate the switch between list and grid. false = instant.
animate = true
# Key of the remembered view in the preference store.
storage_key = "publications-view"
# Only the first N cards animate; the rest jump into place.
max_animated_cards = 12
# Animation length and the delay before inline styles are removed.
duration_ms = 400
cleanup_ms = 420
easing = "cubic-bezier(0.25, 0.1, 0.25, 1)"
"##
}
