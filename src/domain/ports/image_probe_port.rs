//! Port definition for lightweight image existence checks.

use async_trait::async_trait;

use crate::domain::errors::CatalogError;

/// Outcome of probing a URL without downloading its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    /// Whether the server answered with a success status.
    pub success: bool,
    /// The `Content-Type` header, if present.
    pub content_type: Option<String>,
}

impl ProbeResponse {
    /// Creates a probe response.
    #[must_use]
    pub fn new(success: bool, content_type: Option<impl Into<String>>) -> Self {
        Self {
            success,
            content_type: content_type.map(Into::into),
        }
    }

    /// Returns true if the URL answered successfully with an image type.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.success
            && self
                .content_type
                .as_deref()
                .is_some_and(|ct| ct.starts_with("image/"))
    }
}

/// Port for probing image URLs.
#[async_trait]
pub trait ImageProbePort: Send + Sync {
    /// Checks that `url` exists and reports its content type.
    async fn probe(&self, url: &str) -> Result<ProbeResponse, CatalogError>;
}


#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(true, Some("image/jpeg"), true ; "ok_image")]
    #[test_case(true, Some("image/svg+xml"), true ; "ok_svg")]
    #[test_case(true, Some("text/html"), false ; "ok_html")]
    #[test_case(true, None, false ; "ok_no_type")]
    #[test_case(false, Some("image/png"), false ; "error_image")]
    fn test_is_image(success: bool, content_type: Option<&str>, expected: bool) {
        assert_eq!(ProbeResponse::new(success, content_type).is_image(), expected);
    }
}
