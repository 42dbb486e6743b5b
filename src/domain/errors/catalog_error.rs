//! Catalog data access error types.

use thiserror::Error;

use super::UrlTemplateError;

/// Errors raised while talking to the catalog backend.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum CatalogError {
    #[error("network error: {message}")]
    NetworkError { message: String },

    #[error("request timed out: {message}")]
    Timeout { message: String },

    #[error("server responded with HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("failed to decode response: {message}")]
    DecodeError { message: String },

    #[error("invalid data format received from API: expected {expected}")]
    InvalidShape { expected: &'static str },

    #[error(transparent)]
    Template(#[from] UrlTemplateError),

    #[error("unexpected catalog error: {message}")]
    Unexpected { message: String },
}

impl CatalogError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Creates timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::DecodeError {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Maps a reqwest transport error onto the catalog taxonomy.
    #[must_use]
    pub fn from_transport(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::timeout(error.to_string())
        } else if error.is_decode() {
            Self::decode(error.to_string())
        } else if let Some(status) = error.status() {
            Self::HttpStatus {
                status: status.as_u16(),
            }
        } else {
            Self::network(error.to_string())
        }
    }

    /// Returns whether the transport may retry the request.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::NetworkError { .. } | Self::Timeout { .. } => true,
            Self::HttpStatus { status } => *status >= 500 || *status == 429,
            Self::DecodeError { .. }
            | Self::InvalidShape { .. }
            | Self::Template(_)
            | Self::Unexpected { .. } => false,
        }
    }
}
