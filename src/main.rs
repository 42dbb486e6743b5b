use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use storefront::domain::ports::KeyValueStorePort;
use storefront::infrastructure::{
    ApiConfig, AppConfig, CliArgs, FileKeyValueStore, HttpImageProbe, ImageValidationCache,
    ImageValidator, MemoryKeyValueStore, ProductsApiClient, StorageManager,
};
use storefront::presentation::App;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config() -> Result<AppConfig> {
    let args = CliArgs::parse();
    let storage = StorageManager::new(args.config.clone())?;
    let mut config = storage.load_config()?;
    config.merge_with_args(args);
    Ok(config)
}

fn create_store(config: &AppConfig) -> Arc<dyn KeyValueStorePort> {
    if !config.cache.persist {
        return Arc::new(MemoryKeyValueStore::new());
    }

    match FileKeyValueStore::default_location() {
        Ok(store) => {
            info!(path = %store.path().display(), "Using persistent image cache");
            Arc::new(store)
        }
        Err(e) => {
            warn!(error = %e, "Persistent image cache unavailable, keeping verdicts in memory");
            Arc::new(MemoryKeyValueStore::new())
        }
    }
}

fn create_app() -> Result<App> {
    let config = load_config()?;

    init_logging(&config)?;

    info!(version = storefront::VERSION, "Starting Storefront");

    let mut api_config = ApiConfig::from_env();
    if let Some(base_url) = config.base_url.clone() {
        api_config = api_config.with_base_url(base_url);
    }
    info!(base_url = %api_config.base_url, version = %api_config.version, "Using catalog API");

    let api_client = Arc::new(ProductsApiClient::new(api_config)?);
    let probe = Arc::new(HttpImageProbe::new()?);
    let cache = ImageValidationCache::with_window(create_store(&config), config.cache_window());
    let validator = ImageValidator::new(cache, probe);

    Ok(App::new(api_client, validator, config.ui))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let app = create_app()?;

    let mut terminal = ratatui::init();

    let result = app.run(&mut terminal).await;

    ratatui::restore();

    result
}
