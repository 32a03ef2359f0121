//! User configuration for the okascii showcase.
//!
//! Settings live in `config.toml` under the platform config directory, for
//! example `~/.config/okascii/config.toml` on Linux. Every field is optional;
//! a missing file means defaults.
//!
//! ```toml
//! preset = "graph"
//! fps = 30
//! scanlines = true
//! color = "#82ca9d"
//! ramp = "blocks"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use okascii_core::{BackdropConfig, ConfigError, Preset, Rgb, named_ramp};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Accepted frame rates.
pub const FPS_RANGE: std::ops::RangeInclusive<u32> = 1..=120;

#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("fps must be between 1 and 120, got {0}")]
    Fps(u32),
    #[error(transparent)]
    Invalid(#[from] ConfigError),
    #[error("no config directory available on this platform")]
    NoConfigDir,
}

/// Contents of `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backdrop shown at startup.
    pub preset: Preset,
    /// Frames per second.
    pub fps: u32,
    /// Fixed seed for procedural presets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Force scanlines on or off for every preset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scanlines: Option<bool>,
    /// Glyph colour for every preset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
    /// A ramp name (`classic`, `blocks`, `dots`, `detailed`) or the ramp
    /// characters themselves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ramp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    /// Log filter used when `OKASCII_LOG` is not set.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            fps: 30,
            seed: None,
            scanlines: None,
            color: None,
            ramp: None,
            resolution: None,
            opacity: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Platform location of `config.toml`.
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "okascii").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load from the platform location.
    pub fn load() -> Result<Self, ConfigFileError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigFileError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to the platform location.
    pub fn save(&self) -> Result<PathBuf, ConfigFileError> {
        let path = Self::path().ok_or(ConfigFileError::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        let io_err = |source| ConfigFileError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(io_err)
    }

    /// Check the fields that do not depend on a preset.
    pub fn validate(&self) -> Result<(), ConfigFileError> {
        if !FPS_RANGE.contains(&self.fps) {
            return Err(ConfigFileError::Fps(self.fps));
        }
        self.backdrop()?;
        Ok(())
    }

    /// Backdrop for the configured preset.
    pub fn backdrop(&self) -> Result<BackdropConfig, ConfigError> {
        self.backdrop_for(self.preset)
    }

    /// Backdrop for `preset` with this file's overrides applied.
    pub fn backdrop_for(&self, preset: Preset) -> Result<BackdropConfig, ConfigError> {
        let mut config = preset.config();
        config.seed = self.seed;
        if let Some(scanlines) = self.scanlines {
            config.style.scanlines = scanlines;
        }
        if let Some(color) = self.color {
            config.style.color = color;
        }
        if let Some(ramp) = &self.ramp {
            config.style.ramp = named_ramp(ramp)
                .map(str::to_string)
                .unwrap_or_else(|| ramp.clone());
        }
        if let Some(resolution) = self.resolution {
            config.style.resolution = resolution;
        }
        if let Some(opacity) = self.opacity {
            config.style.opacity = opacity;
        }
        config.validate()?;
        Ok(config)
    }
}
