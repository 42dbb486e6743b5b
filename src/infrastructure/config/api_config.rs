//! Backend API configuration sourced from the environment.

use std::time::Duration;

use tracing::warn;

/// Environment variable holding the API base URL.
pub const ENV_BASE_URL: &str = "STOREFRONT_API_BASE_URL";
/// Environment variable holding the request timeout in milliseconds.
pub const ENV_TIMEOUT: &str = "STOREFRONT_API_TIMEOUT";
/// Environment variable holding the API version path segment.
pub const ENV_VERSION: &str = "STOREFRONT_API_VERSION";
/// Environment variable holding the transport retry attempt count.
pub const ENV_RETRY_ATTEMPTS: &str = "STOREFRONT_API_RETRY_ATTEMPTS";

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Default API version.
pub const DEFAULT_VERSION: &str = "v1";
/// Default transport retry attempts.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Product endpoint path templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductEndpoints {
    /// List all products.
    pub list: &'static str,
    /// Single product.
    pub detail: &'static str,
    /// Create a product.
    pub create: &'static str,
    /// Update a product.
    pub update: &'static str,
    /// Delete a product.
    pub delete: &'static str,
}

/// Product endpoints exposed by the backend.
pub const PRODUCT_ENDPOINTS: ProductEndpoints = ProductEndpoints {
    list: "/products",
    detail: "/products/:id",
    create: "/products",
    update: "/products/:id",
    delete: "/products/:id",
};

/// Headers sent with every API request.
pub const DEFAULT_HEADERS: [(&str, &str); 2] = [
    ("Content-Type", "application/json"),
    ("Accept", "application/json"),
];

/// Connection settings for the catalog backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL, without the version segment.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// API version path segment.
    pub version: String,
    /// Total attempts the transport makes for a transient failure.
    pub retry_attempts: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            version: DEFAULT_VERSION.to_string(),
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
        }
    }
}

impl ApiConfig {
    /// Reads the configuration from process environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary variable lookup.
    ///
    /// Unset or empty strings use the defaults. Numeric values that are not
    /// positive integers silently fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = match lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            Some(url) => url,
            None => {
                warn!(
                    default = DEFAULT_BASE_URL,
                    "API base URL is not configured, using default"
                );
                DEFAULT_BASE_URL.to_string()
            }
        };

        let timeout_ms = parse_positive(lookup(ENV_TIMEOUT)).unwrap_or(DEFAULT_TIMEOUT_MS);
        let retry_attempts = parse_positive(lookup(ENV_RETRY_ATTEMPTS))
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(DEFAULT_RETRY_ATTEMPTS);
        let version = lookup(ENV_VERSION)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_VERSION.to_string());

        Self {
            base_url,
            timeout: Duration::from_millis(timeout_ms),
            version,
            retry_attempts,
        }
    }

    /// Overrides the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Joins the base URL, version and `path` into an absolute endpoint URL.
    #[must_use]
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.version.trim_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Parses a leading run of digits, mirroring lenient integer parsing.
///
/// `"15000ms"` yields `15000`; `"abc"`, `"0"` and `"-5"` yield `None`.
fn parse_positive(raw: Option<String>) -> Option<u64> {
    let raw = raw?;
    let digits: String = raw
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse::<u64>().ok().filter(|v| *v > 0)
}
