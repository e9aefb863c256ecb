// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language
//! - `[gallery]` - Batch rendering and read-ahead tuning
//! - `[viewer]` - Gesture thresholds and timing
//! - `[server]` - Location of the generation and history server
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `LENS_GALLERY_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! `LENS_GALLERY_SERVER_URL` overrides `[server] base_url` after loading.
//!
//! # Examples
//!
//! ```no_run
//! use lens_gallery::config::{self, Config};
//!
//! let (mut config, _warning) = config::load();
//! config.general.language = Some("zh-CN".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::domain::ui::{BatchSize, MaxScale, PreloadCount, Resistance};
use crate::error::{Error, Result};
use crate::gallery::GalleryOptions;
use crate::viewer::ViewerOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Environment variable overriding the server base URL.
pub const ENV_SERVER_URL: &str = "LENS_GALLERY_SERVER_URL";

// =============================================================================
// Section Structs
// =============================================================================

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "zh-CN").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Gallery loader tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryConfig {
    /// Tiles appended per batch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<usize>,

    /// Images force-loaded per read-ahead window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preload_count: Option<usize>,

    /// Margin added around the viewport for visibility checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lazy_margin: Option<f32>,

    /// Sentinel debounce before a batch renders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_debounce_ms: Option<u64>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            batch_size: Some(DEFAULT_BATCH_SIZE),
            preload_count: Some(DEFAULT_PRELOAD_COUNT),
            lazy_margin: Some(DEFAULT_LAZY_MARGIN),
            batch_debounce_ms: Some(DEFAULT_BATCH_DEBOUNCE_MS),
        }
    }
}

/// Viewer gesture tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_tap_delay_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_scale: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swipe_threshold: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_threshold: Option<f32>,

    /// Rubber-band factor at scale 1 (0.05 to 1.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resistance: Option<f32>,

    /// Downward travel over which the backdrop fades out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismiss_fade_distance: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_grace_ms: Option<u64>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            double_tap_delay_ms: Some(DEFAULT_DOUBLE_TAP_DELAY_MS),
            max_scale: Some(DEFAULT_MAX_SCALE),
            swipe_threshold: Some(DEFAULT_SWIPE_THRESHOLD),
            close_threshold: Some(DEFAULT_CLOSE_THRESHOLD),
            resistance: Some(DEFAULT_RESISTANCE),
            dismiss_fade_distance: Some(DEFAULT_DISMISS_FADE_DISTANCE),
            close_grace_ms: Some(DEFAULT_CLOSE_GRACE_MS),
        }
    }
}

/// Data source settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: Some(DEFAULT_SERVER_URL.to_string()),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Crate configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub gallery: GalleryConfig,

    #[serde(default)]
    pub viewer: ViewerConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Builds validated loader options, filling unset fields with defaults.
    #[must_use]
    pub fn gallery_options(&self) -> GalleryOptions {
        let section = &self.gallery;
        GalleryOptions {
            batch_size: BatchSize::new(section.batch_size.unwrap_or(DEFAULT_BATCH_SIZE)),
            preload_count: PreloadCount::new(
                section.preload_count.unwrap_or(DEFAULT_PRELOAD_COUNT),
            ),
            lazy_margin: non_negative(section.lazy_margin, DEFAULT_LAZY_MARGIN),
            batch_debounce: Duration::from_millis(
                section.batch_debounce_ms.unwrap_or(DEFAULT_BATCH_DEBOUNCE_MS),
            ),
        }
    }

    /// Builds validated viewer options, filling unset fields with defaults.
    #[must_use]
    pub fn viewer_options(&self) -> ViewerOptions {
        let section = &self.viewer;
        ViewerOptions {
            double_tap_delay: Duration::from_millis(
                section
                    .double_tap_delay_ms
                    .unwrap_or(DEFAULT_DOUBLE_TAP_DELAY_MS),
            ),
            max_scale: MaxScale::new(section.max_scale.unwrap_or(DEFAULT_MAX_SCALE)),
            swipe_threshold: positive(section.swipe_threshold, DEFAULT_SWIPE_THRESHOLD),
            close_threshold: positive(section.close_threshold, DEFAULT_CLOSE_THRESHOLD),
            resistance: Resistance::new(section.resistance.unwrap_or(DEFAULT_RESISTANCE)),
            dismiss_fade_distance: positive(
                section.dismiss_fade_distance,
                DEFAULT_DISMISS_FADE_DISTANCE,
            ),
            close_grace: Duration::from_millis(
                section.close_grace_ms.unwrap_or(DEFAULT_CLOSE_GRACE_MS),
            ),
        }
    }

    /// Server base URL, honoring the environment override.
    #[must_use]
    pub fn server_url(&self) -> String {
        if let Ok(url) = std::env::var(ENV_SERVER_URL) {
            if !url.is_empty() {
                return url;
            }
        }
        self.server
            .base_url
            .clone()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
    }
}

fn positive(value: Option<f32>, fallback: f32) -> f32 {
    value.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(fallback)
}

fn non_negative(value: Option<f32>, fallback: f32) -> f32 {
    value.filter(|v| v.is_finite() && *v >= 0.0).unwrap_or(fallback)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("failed to read {}: {err}, using defaults", path.display());
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                language: Some("zh-CN".to_string()),
            },
            gallery: GalleryConfig {
                batch_size: Some(24),
                preload_count: Some(6),
                lazy_margin: Some(120.0),
                batch_debounce_ms: Some(150),
            },
            viewer: ViewerConfig {
                max_scale: Some(4.0),
                ..ViewerConfig::default()
            },
            server: ServerConfig {
                base_url: Some("http://10.0.0.2:8081".to_string()),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        assert!(matches!(load_from_path(&config_path), Err(Error::Config(_))));
    }

    #[test]
    fn load_with_override_falls_back_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[gallery\nbatch_size =")
            .expect("failed to write broken config");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config: Config = toml::from_str("[general]\nlanguage = \"en-US\"\n")
            .expect("partial config should parse");
        assert_eq!(config.gallery, GalleryConfig::default());
        assert_eq!(config.viewer, ViewerConfig::default());
    }

    #[test]
    fn options_are_clamped() {
        let config = Config {
            gallery: GalleryConfig {
                batch_size: Some(0),
                preload_count: Some(0),
                lazy_margin: Some(-5.0),
                batch_debounce_ms: None,
            },
            viewer: ViewerConfig {
                resistance: Some(0.0),
                swipe_threshold: Some(f32::NAN),
                ..ViewerConfig::default()
            },
            ..Config::default()
        };

        let gallery = config.gallery_options();
        assert_eq!(gallery.batch_size.value(), MIN_BATCH_SIZE);
        assert_eq!(gallery.preload_count.value(), MIN_PRELOAD_COUNT);
        assert_eq!(gallery.lazy_margin, DEFAULT_LAZY_MARGIN);
        assert_eq!(gallery.batch_debounce, Duration::from_millis(300));

        let viewer = config.viewer_options();
        assert_eq!(viewer.resistance.value(), MIN_RESISTANCE);
        assert_eq!(viewer.swipe_threshold, DEFAULT_SWIPE_THRESHOLD);
    }

    #[test]
    fn default_options_match_defaults() {
        let viewer = Config::default().viewer_options();
        assert_eq!(viewer, ViewerOptions::default());
        let gallery = Config::default().gallery_options();
        assert_eq!(gallery, GalleryOptions::default());
    }
}
