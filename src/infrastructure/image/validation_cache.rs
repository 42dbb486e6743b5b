//! Expiring cache of image URL verdicts over a key-value store.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use tracing::{debug, trace, warn};

use crate::domain::entities::ImageCacheEntry;
use crate::domain::ports::KeyValueStorePort;

/// Prefix applied to every URL before it is used as a store key.
pub const CACHE_KEY_PREFIX: &str = "failed_image_url_";

/// How long a verdict stays usable (24 hours).
pub const DEFAULT_CACHE_WINDOW: TimeDelta = TimeDelta::hours(24);

/// Per-URL validity verdicts with read-time expiry.
///
/// Expired or undecodable entries read as absent and are removed as soon as
/// they are seen; there is no background sweep.
#[derive(Clone)]
pub struct ImageValidationCache {
    store: Arc<dyn KeyValueStorePort>,
    window: TimeDelta,
}

impl ImageValidationCache {
    /// Creates a cache with the default 24 hour window.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self::with_window(store, DEFAULT_CACHE_WINDOW)
    }

    /// Creates a cache with a custom validity window.
    #[must_use]
    pub fn with_window(store: Arc<dyn KeyValueStorePort>, window: TimeDelta) -> Self {
        Self { store, window }
    }

    /// Returns the store key for `url`.
    #[must_use]
    pub fn cache_key(url: &str) -> String {
        format!("{CACHE_KEY_PREFIX}{url}")
    }

    /// Returns the fresh entry for `url`, evicting it if it has expired.
    pub fn get(&self, url: &str) -> Option<ImageCacheEntry> {
        let key = Self::cache_key(url);
        let raw = self.store.get(&key)?;

        let entry = match serde_json::from_str::<ImageCacheEntry>(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(url = %url, error = %e, "Discarding undecodable cache entry");
                return None;
            }
        };

        if entry.is_expired(Utc::now(), self.window) {
            trace!(url = %url, "Image cache entry expired");
            self.remove_key(&key);
            return None;
        }

        trace!(url = %url, is_valid = entry.is_valid, "Image cache hit");
        Some(entry)
    }

    /// Records a verdict for `url`, replacing any previous entry.
    pub fn put(&self, url: &str, is_valid: bool) {
        let entry = ImageCacheEntry::now(is_valid);
        let encoded = match serde_json::to_string(&entry) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to encode cache entry");
                return;
            }
        };

        if let Err(e) = self.store.set(&Self::cache_key(url), &encoded) {
            warn!(url = %url, error = %e, "Failed to store image verdict");
        } else {
            debug!(url = %url, is_valid, "Stored image verdict");
        }
    }

    /// Removes the entry for `url`.
    pub fn invalidate(&self, url: &str) {
        self.remove_key(&Self::cache_key(url));
        debug!(url = %url, "Invalidated image verdict");
    }

    fn remove_key(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            warn!(key = %key, error = %e, "Failed to remove image cache entry");
        }
    }
}

impl std::fmt::Debug for ImageValidationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageValidationCache")
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}
