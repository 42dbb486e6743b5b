//! Cache-first image URL validation.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::ImageProbePort;

use super::validation_cache::ImageValidationCache;

/// Decides whether an image URL is displayable.
///
/// A fresh cached verdict short-circuits the probe. Every probe outcome,
/// positive or negative, is cached so broken URLs are not re-probed within
/// the cache window. Concurrent misses for the same URL may both probe.
#[derive(Clone)]
pub struct ImageValidator {
    cache: ImageValidationCache,
    probe: Arc<dyn ImageProbePort>,
}

impl ImageValidator {
    /// Creates a validator over the given cache and probe.
    #[must_use]
    pub fn new(cache: ImageValidationCache, probe: Arc<dyn ImageProbePort>) -> Self {
        Self { cache, probe }
    }

    /// Resolves the verdict for `url`, probing only on a cache miss.
    pub async fn resolve(&self, url: &str) -> bool {
        if url.is_empty() {
            return false;
        }

        if let Some(is_valid) = self.cached(url).await {
            return is_valid;
        }

        let is_valid = match self.probe.probe(url).await {
            Ok(response) => {
                debug!(
                    url = %url,
                    success = response.success,
                    content_type = ?response.content_type,
                    "Probed image URL"
                );
                response.is_image()
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Image probe failed");
                false
            }
        };

        self.store_verdict(url, is_valid).await;
        is_valid
    }

    // Store access may rewrite the backing file, so it runs on the blocking pool.
    async fn cached(&self, url: &str) -> Option<bool> {
        let cache = self.cache.clone();
        let url = url.to_string();
        match tokio::task::spawn_blocking(move || cache.get(&url)).await {
            Ok(entry) => entry.map(|entry| entry.is_valid),
            Err(e) => {
                warn!(error = %e, "Image cache lookup task failed");
                None
            }
        }
    }

    async fn store_verdict(&self, url: &str, is_valid: bool) {
        let cache = self.cache.clone();
        let url = url.to_string();
        if let Err(e) = tokio::task::spawn_blocking(move || cache.put(&url, is_valid)).await {
            warn!(error = %e, "Image cache write task failed");
        }
    }

    /// Returns the fresh cached verdict for `url` without probing.
    #[must_use]
    pub fn peek_cached(&self, url: &str) -> Option<bool> {
        if url.is_empty() {
            return None;
        }
        self.cache.get(url).map(|entry| entry.is_valid)
    }

    /// Drops the cached verdict for `url`.
    pub fn invalidate(&self, url: &str) {
        self.cache.invalidate(url);
    }
}

impl std::fmt::Debug for ImageValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageValidator")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, Utc};

    use crate::domain::entities::ImageCacheEntry;
    use crate::domain::ports::KeyValueStorePort;
    use crate::domain::ports::mocks::MockImageProbe;
    use crate::infrastructure::storage::MemoryKeyValueStore;

    const URL: &str = "https://example.com/image.jpg";

    fn create_validator(
        probe: MockImageProbe,
    ) -> (ImageValidator, Arc<MockImageProbe>, Arc<MemoryKeyValueStore>) {
        let store = Arc::new(MemoryKeyValueStore::new());
        let probe = Arc::new(probe);
        let validator = ImageValidator::new(ImageValidationCache::new(store.clone()), probe.clone());
        (validator, probe, store)
    }

    fn seed(store: &MemoryKeyValueStore, entry: ImageCacheEntry) {
        store
            .set(
                &ImageValidationCache::cache_key(URL),
                &serde_json::to_string(&entry).unwrap(),
            )
            .unwrap();
    }

    #[tokio::test]
    async fn test_empty_url_is_invalid_without_cache_access() {
        let (validator, probe, store) = create_validator(MockImageProbe::with_content_type("image/png"));

        assert!(!validator.resolve("").await);
        assert_eq!(validator.peek_cached(""), None);
        assert_eq!(probe.calls(), 0);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_fresh_cache_hit_skips_probe() {
        let (validator, probe, store) = create_validator(MockImageProbe::failing());
        seed(&store, ImageCacheEntry::now(true));

        assert!(validator.resolve(URL).await);
        assert_eq!(probe.calls(), 0);
    }

    #[tokio::test]
    async fn test_expired_entry_is_removed_and_revalidated() {
        let (validator, probe, store) = create_validator(MockImageProbe::with_content_type("image/jpeg"));
        seed(
            &store,
            ImageCacheEntry::new(false, Utc::now() - TimeDelta::hours(25)),
        );

        assert!(validator.resolve(URL).await);
        assert_eq!(probe.probed(), vec![URL.to_string()]);
        assert_eq!(validator.peek_cached(URL), Some(true));
    }

    #[tokio::test]
    async fn test_non_image_content_type_is_invalid() {
        let (validator, _probe, _store) = create_validator(MockImageProbe::with_content_type("text/html"));

        assert!(!validator.resolve(URL).await);
        assert_eq!(validator.peek_cached(URL), Some(false));
    }

    #[tokio::test]
    async fn test_error_status_is_invalid() {
        let (validator, _probe, _store) = create_validator(MockImageProbe::not_found());

        assert!(!validator.resolve(URL).await);
    }

    #[tokio::test]
    async fn test_transport_failure_is_cached_as_invalid() {
        let (validator, probe, _store) = create_validator(MockImageProbe::failing());

        assert!(!validator.resolve(URL).await);
        assert!(!validator.resolve(URL).await);

        assert_eq!(probe.calls(), 1);
        assert_eq!(validator.peek_cached(URL), Some(false));
    }

    #[tokio::test]
    async fn test_peek_matches_resolve() {
        for probe in [
            MockImageProbe::with_content_type("image/webp"),
            MockImageProbe::with_content_type("application/json"),
            MockImageProbe::failing(),
        ] {
            let (validator, _probe, _store) = create_validator(probe);
            let verdict = validator.resolve(URL).await;
            assert_eq!(validator.peek_cached(URL), Some(verdict));
        }
    }

    #[tokio::test]
    async fn test_peek_expired_returns_none_and_evicts() {
        let (validator, _probe, store) = create_validator(MockImageProbe::failing());
        seed(
            &store,
            ImageCacheEntry::new(false, Utc::now() - TimeDelta::hours(25)),
        );

        assert_eq!(validator.peek_cached(URL), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_invalidate_forces_new_probe() {
        let (validator, probe, _store) = create_validator(MockImageProbe::failing());
        assert!(!validator.resolve(URL).await);

        probe.set_content_type("image/gif");
        validator.invalidate(URL);

        assert!(validator.resolve(URL).await);
        assert_eq!(probe.calls(), 2);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_verdict_is_stored_before_resolve_returns_on_single_thread() {
        let (validator, probe, store) = create_validator(MockImageProbe::with_content_type("image/png"));

        assert!(validator.resolve(URL).await);

        assert!(store.get(&ImageValidationCache::cache_key(URL)).is_some());
        assert!(validator.resolve(URL).await);
        assert_eq!(probe.calls(), 1);
    }
}
