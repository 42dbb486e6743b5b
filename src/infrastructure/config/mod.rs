//! Application configuration.

pub mod api_config;
pub mod app_config;
pub mod args;
pub mod storage;

pub use api_config::{ApiConfig, PRODUCT_ENDPOINTS, ProductEndpoints};
pub use app_config::{AppConfig, CacheConfig, LogLevel, UiConfig};
pub use args::CliArgs;
pub use storage::{ConfigError, StorageManager};
