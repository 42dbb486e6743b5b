//! Config file loading.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use super::app_config::AppConfig;

/// Errors raised while locating or writing the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform config directory and no explicit path.
    #[error("failed to determine config file location")]
    ConfigPathNotFound,
    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Default config could not be serialized.
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Owns the location of the TOML config file.
#[derive(Debug, Clone)]
pub struct StorageManager {
    config_path: PathBuf,
}

impl StorageManager {
    /// Uses `path_override` or the platform default location.
    ///
    /// # Errors
    /// Returns error if no override is given and the platform has no config
    /// directory.
    pub fn new(path_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        path_override
            .or_else(AppConfig::default_config_path)
            .map(Self::at)
            .ok_or(ConfigError::ConfigPathNotFound)
    }

    /// Uses the config file at `path`.
    #[must_use]
    pub const fn at(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Returns the config file path.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads the configuration.
    ///
    /// A missing file is written with defaults. A malformed one is kept as is
    /// and defaults are used instead.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or the default cannot be written.
    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        let content = match fs::read_to_string(&self.config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.config_path.display(), "Writing default config");
                let config = AppConfig::default();
                self.write(&config)?;
                return Ok(config);
            }
            Err(e) => return Err(e.into()),
        };

        Ok(toml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %self.config_path.display(), error = %e, "Malformed config, using defaults");
            AppConfig::default()
        }))
    }

    fn write(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let parent = self
            .config_path
            .parent()
            .ok_or_else(|| std::io::Error::other("Invalid config path"))?;
        fs::create_dir_all(parent)?;

        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(toml::to_string_pretty(config)?.as_bytes())?;
        temp_file.persist(&self.config_path).map_err(|e| e.error)?;
        Ok(())
    }
}
