// Author: kelexine (https://github.com/kelexine)
// config/mod.rs — Global configuration loader

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Represents the structure of the global `config.toml`.
#[derive(Deserialize, Default, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GlobalConfig {
    pub min_lines: Option<usize>,
    pub flat_ignore: Option<bool>,
    pub parallel: Option<bool>,
}

impl GlobalConfig {
    /// `<config dir>/get-lines/config.toml`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("get-lines");
            path.push("config.toml");
            path
        })
    }

    /// Attempt to load the global configuration, returning a default instance if it fails or missing.
    pub fn load() -> Self {
        Self::default_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
