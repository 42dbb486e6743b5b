//! Port definition for string key-value persistence.

use crate::domain::errors::StoreError;

/// Synchronous string-to-string store.
///
/// Values are opaque to the store; callers own their encoding.
pub trait KeyValueStorePort: Send + Sync {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns error if the value cannot be persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns error if the removal cannot be persisted.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
