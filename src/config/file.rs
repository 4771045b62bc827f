//! Configuration file support for persistent settings.
//!
//! Settings are read from a TOML file located at
//! `~/.config/dimweight/config.toml` (or the platform-specific equivalent).
//! File values act as defaults that command-line arguments override.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! [form]
//! divisor = "5000"   # default preset used by reset and example: "5000" or "6000"
//!
//! [output]
//! json = false
//! color = true
//! ```

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;
use tracing::warn;

use crate::divisor::DivisorPreset;

/// Top-level configuration file structure.
///
/// All fields are `Option<T>` so we can tell which values the file actually
/// sets and layer them under the CLI arguments.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Form defaults
    #[serde(default)]
    pub form: FileFormConfig,

    /// Output options
    #[serde(default)]
    pub output: FileOutputConfig,
}

/// Form defaults from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileFormConfig {
    /// Default divisor preset (`"5000"` or `"6000"`)
    pub divisor: Option<String>,
}

/// Output options from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileOutputConfig {
    /// Print a JSON document instead of the human-readable report
    pub json: Option<bool>,

    /// Colorize human-readable output
    pub color: Option<bool>,
}

impl FileFormConfig {
    /// The configured default preset, if the file sets a usable one.
    ///
    /// Unknown values and `custom` (which cannot be a default, since reset
    /// empties the custom field) are ignored with a warning.
    #[must_use]
    pub fn preset(&self) -> Option<DivisorPreset> {
        let value = self.divisor.as_deref()?;

        match DivisorPreset::from_str(value, true) {
            Ok(DivisorPreset::Custom) => {
                warn!("ignoring divisor = \"custom\" in config: the default must be 5000 or 6000");
                None
            }
            Ok(preset) => Some(preset),
            Err(_) => {
                warn!(value, "ignoring unknown divisor preset in config");
                None
            }
        }
    }
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// The file lives at `<config_dir>/dimweight/config.toml`, where
    /// `<config_dir>` is the platform-specific configuration directory
    /// (e.g., `~/.config` on Linux, `%APPDATA%` on Windows).
    ///
    /// # Returns
    ///
    /// `Some(PathBuf)` with the config file path, or `None` if the config
    /// directory cannot be determined.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dimweight").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// If the config file doesn't exist, returns a default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> anyhow::Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };

        Self::load_from(&path)
    }

    /// Load configuration from an explicit path.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The file contains invalid TOML or unknown keys
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file at {}: {e}", path.display())
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file at {}: {e}", path.display())
        })?;

        Ok(config)
    }
}
