//! Catalog REST API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use super::url_template::replace_url_params;
use crate::domain::entities::ProductId;
use crate::domain::errors::CatalogError;
use crate::domain::ports::ProductSourcePort;
use crate::infrastructure::config::api_config::{ApiConfig, DEFAULT_HEADERS, PRODUCT_ENDPOINTS};

const USER_AGENT: &str = concat!("storefront/", env!("CARGO_PKG_VERSION"));
const RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// HTTP client for the products API.
///
/// Transient failures (connect errors, timeouts, 5xx, 429) are retried up to
/// the configured number of attempts with linear backoff.
#[derive(Debug, Clone)]
pub struct ProductsApiClient {
    client: Client,
    config: ApiConfig,
}

impl ProductsApiClient {
    /// Creates a client for the given configuration.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(config: ApiConfig) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();
        for (name, value) in DEFAULT_HEADERS {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| CatalogError::unexpected(format!("invalid header name: {e}")))?;
            headers.insert(name, HeaderValue::from_static(value));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| CatalogError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn get_json(&self, path: &str) -> Result<Value, CatalogError> {
        let url = self.config.endpoint_url(path);
        let attempts = self.config.retry_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.get_once(&url).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < attempts => {
                    warn!(url = %url, attempt, attempts, error = %e, "Request failed, retrying");
                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!(url = %url, attempt, error = %e, "API request failed");
                    return Err(e);
                }
            }
        }
    }

    async fn get_once(&self, url: &str) -> Result<Value, CatalogError> {
        debug!(url = %url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::from_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status));
        }

        response.json::<Value>().await.map_err(|e| {
            warn!(url = %url, error = %e, "Failed to parse response body");
            CatalogError::decode(e.to_string())
        })
    }

    fn status_error(status: StatusCode) -> CatalogError {
        CatalogError::HttpStatus {
            status: status.as_u16(),
        }
    }
}

#[async_trait]
impl ProductSourcePort for ProductsApiClient {
    async fn list_products(&self) -> Result<Value, CatalogError> {
        self.get_json(PRODUCT_ENDPOINTS.list).await
    }

    async fn get_product(&self, id: &ProductId) -> Result<Value, CatalogError> {
        let id = id.to_string();
        let path = replace_url_params(PRODUCT_ENDPOINTS.detail, Some(&[("id", Some(id.as_str()))]))?;
        self.get_json(&path).await
    }
}
