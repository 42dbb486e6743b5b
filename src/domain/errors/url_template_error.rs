//! URL templating error types.

use thiserror::Error;

/// Programmer errors raised while filling a `:param` path template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlTemplateError {
    /// The template itself was empty.
    #[error("URL is required")]
    MissingUrl,

    /// One or more placeholders had no value.
    #[error("Missing required URL parameters: {}", .0.join(", "))]
    MissingParams(Vec<String>),

    /// A parameter was provided without a value.
    #[error("Invalid value for parameter '{0}'")]
    InvalidValue(String),
}
