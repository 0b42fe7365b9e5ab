// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, read from a
//! user-edited `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language
//! - `[viewer]` - Image viewer zoom bounds and step
//! - `[storage]` - Where cards and uploaded images are kept
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()` with explicit path
//! 2. Set `FAREWELL_LENS_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use farewell_lens::config::{self, Config};
//!
//! let (config, warning) = config::load();
//! if let Some(key) = warning {
//!     eprintln!("settings ignored: {key}");
//! }
//! let bounds = config.viewer.zoom_bounds();
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::domain::viewport::ZoomBounds;
use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default)]
    pub language: Option<String>,
}

/// Image viewer settings. Out-of-range values fall back to defaults.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ViewerConfig {
    #[serde(default)]
    pub min_zoom: Option<f32>,

    #[serde(default)]
    pub max_zoom: Option<f32>,

    #[serde(default)]
    pub zoom_step: Option<f32>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            min_zoom: Some(DEFAULT_MIN_ZOOM),
            max_zoom: Some(DEFAULT_MAX_ZOOM),
            zoom_step: Some(DEFAULT_ZOOM_STEP),
        }
    }
}

impl ViewerConfig {
    #[must_use]
    pub fn zoom_bounds(&self) -> ZoomBounds {
        ZoomBounds::from_optional(self.min_zoom, self.max_zoom, self.zoom_step)
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory for `cards.cbor` and `images/`; the platform data dir when unset.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

// =============================================================================
// Load Functions
// =============================================================================

/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "failed to load settings");
                    return (
                        Config::default(),
                        Some("warning-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Tests
// =============================================================================
