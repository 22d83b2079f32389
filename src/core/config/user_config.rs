//! User configuration file handling
//!
//! Manages settings from ~/.config/pixfont/settings.json, or the file given
//! with `--config`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Settings file contents
///
/// Field names match the long CLI options in snake case. These settings
/// override font data and built-in defaults but are overridden by CLI
/// arguments.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    pub verbose: Option<u8>,
    pub quiet: Option<bool>,
    pub log_file: Option<PathBuf>,
    pub units_per_em: Option<u32>,
    pub codepoints: Option<String>,
    pub family_name: Option<String>,
    pub font_version: Option<String>,
    pub weight: Option<u32>,
    pub slope: Option<String>,
    pub width_class: Option<u32>,
    pub copyright: Option<String>,
    pub designer: Option<String>,
    pub designer_url: Option<String>,
    pub manufacturer: Option<String>,
    pub manufacturer_url: Option<String>,
    pub license: Option<String>,
    pub license_url: Option<String>,
    pub ascent: Option<i32>,
    pub descent: Option<i32>,
    pub cap_height: Option<i32>,
    pub x_height: Option<i32>,
    pub underline_position: Option<i32>,
    pub underline_thickness: Option<i32>,
    pub strikeout_position: Option<i32>,
    pub strikeout_thickness: Option<i32>,
    pub axes: Option<String>,
    pub instances: Option<Vec<String>>,
    pub glyph_offset: Option<String>,
    pub jitter_seed: Option<u64>,
    pub quadratic: Option<bool>,
}

impl ConfigFile {
    /// Get the path to the pixfont config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("pixfont")
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Read a settings file, failing on unreadable or malformed JSON
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
        debug!("Loaded settings from {:?}", path);
        Ok(config)
    }

    /// Load configuration from the user config file, if there is a usable one
    pub fn load() -> Option<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return None;
        }
        match Self::load_from(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Ignoring user settings: {:#}", e);
                None
            }
        }
    }

    /// Explicit settings file when given, else the user's one
    pub fn resolve(explicit: Option<&Path>) -> Result<Option<Self>> {
        match explicit {
            Some(path) => Self::load_from(path).map(Some),
            None => Ok(Self::load()),
        }
    }
}
