//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_NAME: &str = "storefront";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "storefront";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration from the config file and CLI.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// API base URL override. Takes precedence over the environment.
    #[serde(default)]
    pub base_url: Option<String>,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,

    /// Image verdict cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Show the product category on cards.
    #[serde(default = "default_true")]
    pub show_category: bool,

    /// Card height in terminal rows, borders included.
    #[serde(default = "default_card_height")]
    pub card_height: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_category: true,
            card_height: default_card_height(),
        }
    }
}

/// Image verdict cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Persist verdicts across sessions.
    #[serde(default = "default_true")]
    pub persist: bool,

    /// Hours a verdict stays valid.
    #[serde(default = "default_window_hours")]
    pub window_hours: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            persist: true,
            window_hours: default_window_hours(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_card_height() -> u16 {
    8
}

fn default_window_hours() -> u32 {
    24
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(base_url) = args.base_url {
            self.base_url = Some(base_url);
        }
        if args.no_persist {
            self.cache.persist = false;
        }
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("storefront.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns the verdict cache window.
    #[must_use]
    pub fn cache_window(&self) -> chrono::TimeDelta {
        chrono::TimeDelta::hours(i64::from(self.cache.window_hours.max(1)))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: LogLevel::Info,
            base_url: None,
            ui: UiConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_config_with_sections() {
        let toml_content = r#"
            log_level = "debug"
            base_url = "https://shop.example.com/api"

            [ui]
            show_category = false

            [cache]
            window_hours = 6
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(
            config.base_url.as_deref(),
            Some("https://shop.example.com/api")
        );
        assert!(!config.ui.show_category);
        assert_eq!(config.ui.card_height, 8);
        assert!(config.cache.persist);
        assert_eq!(config.cache_window(), chrono::TimeDelta::hours(6));
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.base_url, None);
        assert!(config.ui.show_category);
        assert!(config.cache.persist);
        assert_eq!(config.cache_window(), chrono::TimeDelta::hours(24));
    }

    #[test]
    fn test_merge_with_args() {
        let mut config = AppConfig::default();
        let args = CliArgs::parse_from([
            "storefront",
            "--log-level",
            "trace",
            "--base-url",
            "http://127.0.0.1:8080/api",
            "--no-persist",
        ]);

        config.merge_with_args(args);

        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.base_url.as_deref(), Some("http://127.0.0.1:8080/api"));
        assert!(!config.cache.persist);
    }
}
