//! Configuration handling
//!
//! Configuration is stored in `~/.config/mealplan/config.toml` (global) or
//! passed explicitly with `--config`. Currently it only carries the export
//! style; every field has a default so an empty file is valid.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::export::ExportStyle;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Style configuration for the export pipeline
    pub export: ExportStyle,
}

impl Config {
    /// Returns the global config file path, if a home directory exists
    pub fn global_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "mealplan").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads configuration from an explicit path, or from the global path,
    /// falling back to defaults when no file exists
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::global_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}
