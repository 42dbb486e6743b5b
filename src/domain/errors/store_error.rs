//! Key-value persistence error types.

use thiserror::Error;

/// Key-value store error variants.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file could not be encoded.
    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
