//! Domain types for product image resolution.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Fallback image path shown whenever no valid image is resolved.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-image.jpg";

/// Alternative text used once an image failed to load at display time.
pub const IMAGE_UNAVAILABLE_ALT: &str = "Image not available";

/// Cached verdict for one image URL.
///
/// Serialized as `{"timestamp": <epoch ms>, "isValid": <bool>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageCacheEntry {
    /// When the verdict was recorded, in milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Whether the URL pointed at a reachable image.
    pub is_valid: bool,
}

impl ImageCacheEntry {
    /// Creates an entry recorded at `at`.
    #[must_use]
    pub fn new(is_valid: bool, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at.timestamp_millis(),
            is_valid,
        }
    }

    /// Creates an entry recorded now.
    #[must_use]
    pub fn now(is_valid: bool) -> Self {
        Self::new(is_valid, Utc::now())
    }

    /// Returns the recording instant.
    #[must_use]
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// Returns true once `now - timestamp >= window`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>, window: TimeDelta) -> bool {
        self.recorded_at()
            .is_none_or(|recorded| now.signed_duration_since(recorded) >= window)
    }
}

/// Image resolution state owned by a single product card.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CardImageState {
    /// Nothing resolved yet.
    #[default]
    Placeholder,
    /// A validation request is in flight.
    Resolving,
    /// A displayable URL has been chosen.
    Resolved(String),
}

impl CardImageState {
    /// Returns true while a validation request is in flight.
    #[must_use]
    pub const fn is_resolving(&self) -> bool {
        matches!(self, Self::Resolving)
    }

    /// Returns the resolved URL, if any.
    #[must_use]
    pub fn resolved_url(&self) -> Option<&str> {
        match self {
            Self::Resolved(url) => Some(url),
            Self::Placeholder | Self::Resolving => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_serializes_with_camel_case_fields() {
        let entry = ImageCacheEntry {
            timestamp: 1_700_000_000_000,
            is_valid: true,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"timestamp":1700000000000,"isValid":true}"#);
    }

    #[test]
    fn test_entry_expiry_boundary() {
        let now = Utc::now();
        let window = TimeDelta::hours(24);

        let fresh = ImageCacheEntry::new(true, now - TimeDelta::hours(23));
        let edge = ImageCacheEntry::new(true, now - window);
        let stale = ImageCacheEntry::new(true, now - TimeDelta::hours(25));

        assert!(!fresh.is_expired(now, window));
        assert!(edge.is_expired(now, window));
        assert!(stale.is_expired(now, window));
    }

    #[test]
    fn test_card_image_state_accessors() {
        assert!(CardImageState::Resolving.is_resolving());
        assert_eq!(CardImageState::Placeholder.resolved_url(), None);
        assert_eq!(
            CardImageState::Resolved("a.png".to_string()).resolved_url(),
            Some("a.png")
        );
    }
}
