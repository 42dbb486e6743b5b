//! HTTP `HEAD` image probe.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header};
use tracing::trace;

use crate::domain::errors::CatalogError;
use crate::domain::ports::{ImageProbePort, ProbeResponse};

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Probes image URLs with `HEAD` requests.
#[derive(Debug, Clone)]
pub struct HttpImageProbe {
    client: Client,
}

impl HttpImageProbe {
    /// Creates a probe with its own HTTP client.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(PROBE_TIMEOUT)
            .build()
            .map_err(|e| CatalogError::unexpected(format!("failed to create HTTP client: {e}")))?;
        Ok(Self::with_client(client))
    }

    /// Creates a probe sharing an existing HTTP client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageProbePort for HttpImageProbe {
    async fn probe(&self, url: &str) -> Result<ProbeResponse, CatalogError> {
        trace!(url = %url, "Sending HEAD probe");

        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| CatalogError::from_transport(&e))?;

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        Ok(ProbeResponse {
            success: response.status().is_success(),
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_creation() {
        assert!(HttpImageProbe::new().is_ok());
    }

    #[tokio::test]
    async fn test_relative_url_is_a_transport_error() {
        let probe = HttpImageProbe::new().unwrap();
        assert!(probe.probe("test-image-1.jpg").await.is_err());
    }
}
