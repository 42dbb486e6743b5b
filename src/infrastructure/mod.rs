//! Infrastructure layer with external service adapters.

/// Catalog REST API client and URL templating.
pub mod api;
/// Application and API configuration.
pub mod config;
/// Image URL validation (cache, validator, probe).
pub mod image;
/// Key-value persistence adapters.
pub mod storage;

pub use api::{ProductsApiClient, replace_url_params};
pub use config::{ApiConfig, AppConfig, CliArgs, LogLevel, StorageManager};
pub use image::{HttpImageProbe, ImageValidationCache, ImageValidator};
pub use storage::{FileKeyValueStore, MemoryKeyValueStore};
