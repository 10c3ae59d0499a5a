use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    logging_config::LoggingConfig, paths::ProjectPaths, scripting_config::ScriptingConfig,
    window_config::WindowConfig,
};

/// Name of the config file looked up in the working directory first
pub const LOCAL_CONFIG_FILE: &str = "hotscript.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Config file not found")]
    NotFound,
    #[error("Failed to parse config {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("IO error reading config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid reload key in {path}: {source}")]
    InvalidKey {
        path: PathBuf,
        #[source]
        source: hotscript_events::ParseKeyError,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotscriptConfig {
    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub scripting: ScriptingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HotscriptConfig {
    /// Path of the per-user config file, if a home directory exists
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectPaths::new("hotscript").map(|p| p.config_dir().join("config.toml"))
    }

    /// Candidate config paths in lookup order
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        paths.extend(Self::user_config_path());
        paths
    }

    /// Load the first config file found on the search path
    pub fn load() -> Result<Self, ConfigLoadError> {
        let path = Self::search_paths()
            .into_iter()
            .find(|p| p.exists())
            .ok_or(ConfigLoadError::NotFound)?;

        Self::load_from(&path)
    }

    /// Like [`HotscriptConfig::load`], but a missing file yields the defaults
    pub fn load_or_default() -> Result<Self, ConfigLoadError> {
        match Self::load() {
            Err(ConfigLoadError::NotFound) => Ok(Self::default()),
            other => other,
        }
    }

    /// Load and validate a specific config file
    pub fn load_from(path: &Path) -> Result<Self, ConfigLoadError> {
        if !path.exists() {
            return Err(ConfigLoadError::NotFound);
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigLoadError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        config
            .scripting
            .reload_key()
            .map_err(|source| ConfigLoadError::InvalidKey {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
