//! Configuration loading for wavepaint.
//!
//! Configuration is loaded from TOML files with environment variable overrides.

use crate::painting::PaintingOptions;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "config.default.toml";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct WavepaintConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub gallery: GalleryConfig,

    #[serde(default)]
    pub painting: PaintingOptions,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: String,

    /// Displayed width of each SVG, in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Displayed height of each SVG, in pixels.
    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default)]
    pub background: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            width: default_width(),
            height: default_height(),
            background: None,
        }
    }
}

fn default_directory() -> String {
    "output".to_string()
}

fn default_width() -> u32 {
    320
}

fn default_height() -> u32 {
    240
}

#[derive(Debug, Clone, Deserialize)]
pub struct GalleryConfig {
    #[serde(default = "default_slots")]
    pub slots: usize,

    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            slots: default_slots(),
            interval_secs: default_interval_secs(),
        }
    }
}

fn default_slots() -> usize {
    12
}

fn default_interval_secs() -> u64 {
    5
}

impl WavepaintConfig {
    /// Layer the default file, `path`, and `WAVEPAINT_*` variables.
    ///
    /// A value of the wrong type anywhere is an error; nothing falls back to
    /// defaults silently.
    ///
    /// Nested keys use a double underscore, e.g. `WAVEPAINT_GALLERY__SLOTS=4`.
    pub fn load(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("WAVEPAINT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let wavepaint_config: WavepaintConfig = config
            .try_deserialize()
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        Ok(wavepaint_config)
    }
}
