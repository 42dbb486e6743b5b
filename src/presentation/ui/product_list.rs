//! Product list controller: fetch, filter and three-state projection.

use std::future::Future;

use tracing::{debug, error};

use crate::application::use_cases::LoadProductsUseCase;
use crate::domain::entities::Product;
use crate::domain::errors::CatalogError;

/// Message shown whenever the listing cannot be loaded.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load products. Please try again later.";
/// Message shown while the listing is loading.
pub const LOADING_MESSAGE: &str = "Loading products...";
/// Message shown when no product survived validation.
pub const EMPTY_MESSAGE: &str = "No products available.";

/// What the product list currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductListState {
    /// A fetch cycle is in progress.
    Loading,
    /// The fetch failed; holds the user-facing message.
    Error(String),
    /// Validated products in backend order. May be empty.
    Ready(Vec<Product>),
}

impl ProductListState {
    /// Returns true while loading.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns the products when ready.
    #[must_use]
    pub fn products(&self) -> Option<&[Product]> {
        match self {
            Self::Ready(products) => Some(products),
            Self::Loading | Self::Error(_) => None,
        }
    }
}

/// Identifies one fetch cycle. Only the latest ticket may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Result of a fetch cycle, tagged with its ticket.
#[derive(Debug)]
pub struct FetchCompletion {
    /// The cycle this result belongs to.
    pub ticket: FetchTicket,
    /// Validated products or the failure cause.
    pub result: Result<Vec<Product>, CatalogError>,
}

/// Drives the `Loading -> {Ready, Error}` cycle for one list view.
///
/// Never retries on its own; a new cycle starts only through
/// [`begin_fetch`](Self::begin_fetch) or [`refresh`](Self::refresh).
pub struct ProductListController {
    use_case: LoadProductsUseCase,
    state: ProductListState,
    generation: u64,
}

impl ProductListController {
    /// Creates a controller in the `Loading` state.
    #[must_use]
    pub const fn new(use_case: LoadProductsUseCase) -> Self {
        Self {
            use_case,
            state: ProductListState::Loading,
            generation: 0,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &ProductListState {
        &self.state
    }

    /// Starts a new fetch cycle, resetting to `Loading`.
    ///
    /// Any cycle still in flight is superseded: its completion will be
    /// discarded.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.state = ProductListState::Loading;
        debug!(generation = self.generation, "Starting product fetch");
        FetchTicket(self.generation)
    }

    /// Returns the fetch work for `ticket`, detached from the controller so it
    /// can run on a background task.
    pub fn fetch_task(
        &self,
        ticket: FetchTicket,
    ) -> impl Future<Output = FetchCompletion> + Send + use<> {
        let use_case = self.use_case.clone();
        async move {
            FetchCompletion {
                ticket,
                result: use_case.execute().await,
            }
        }
    }

    /// Applies a completed fetch. Returns false if it was stale.
    pub fn complete(&mut self, completion: FetchCompletion) -> bool {
        if completion.ticket != FetchTicket(self.generation) {
            debug!(
                ticket = completion.ticket.0,
                current = self.generation,
                "Discarding stale product fetch"
            );
            return false;
        }

        self.state = match completion.result {
            Ok(products) => ProductListState::Ready(products),
            Err(e) => {
                error!(error = %e, "Error fetching products");
                ProductListState::Error(LOAD_ERROR_MESSAGE.to_string())
            }
        };
        true
    }

    /// Runs a whole fetch cycle in place.
    pub async fn refresh(&mut self) -> &ProductListState {
        let ticket = self.begin_fetch();
        let completion = self.fetch_task(ticket).await;
        self.complete(completion);
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;

    use crate::domain::entities::ProductId;
    use crate::domain::ports::mocks::{MockListing, MockProductSource};

    fn controller_for(source: Arc<MockProductSource>) -> ProductListController {
        ProductListController::new(LoadProductsUseCase::new(source))
    }

    #[test]
    fn test_initial_state_is_loading() {
        let controller = controller_for(Arc::new(MockProductSource::hanging()));
        assert!(controller.state().is_loading());
    }

    #[tokio::test]
    async fn test_stays_loading_while_fetch_is_pending() {
        let controller = {
            let mut controller = controller_for(Arc::new(MockProductSource::hanging()));
            let ticket = controller.begin_fetch();
            let pending = tokio::time::timeout(
                Duration::from_millis(20),
                controller.fetch_task(ticket),
            )
            .await;
            assert!(pending.is_err());
            controller
        };
        assert_eq!(controller.state(), &ProductListState::Loading);
    }

    #[tokio::test]
    async fn test_ready_with_validated_products() {
        let source = Arc::new(MockProductSource::responding(json!([
            { "id": 1, "name": "Product 1", "description": "Description 1", "price": 99.99, "image": "image1.jpg" },
            { "id": 2, "name": "Product 2", "description": "Description 2", "price": 149.99, "image": "image2.jpg" }
        ])));
        let mut controller = controller_for(source);

        let state = controller.refresh().await;

        let products = state.products().unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name(), "Product 1");
        assert_eq!(products[1].id(), &ProductId::from(2));
    }

    #[tokio::test]
    async fn test_empty_listing_is_ready_not_error() {
        let mut controller = controller_for(Arc::new(MockProductSource::responding(json!([]))));

        assert_eq!(controller.refresh().await, &ProductListState::Ready(Vec::new()));
    }

    #[tokio::test]
    async fn test_all_invalid_records_is_ready_empty() {
        let mut controller = controller_for(Arc::new(MockProductSource::responding(json!([
            { "id": 1 },
            null,
            "not-an-object"
        ]))));

        assert_eq!(controller.refresh().await, &ProductListState::Ready(Vec::new()));
    }

    #[tokio::test]
    async fn test_rejection_shows_fixed_message() {
        let mut controller =
            controller_for(Arc::new(MockProductSource::failing("500 Internal Server Error")));

        let state = controller.refresh().await;

        assert_eq!(
            state,
            &ProductListState::Error(
                "Failed to load products. Please try again later.".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_non_array_response_shows_fixed_message() {
        let mut controller = controller_for(Arc::new(MockProductSource::responding(
            json!({ "error": "Invalid format" }),
        )));

        assert_eq!(
            controller.refresh().await,
            &ProductListState::Error(LOAD_ERROR_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_stale_completion_is_discarded() {
        let source = Arc::new(MockProductSource::responding(json!([
            { "id": 1, "name": "Old", "price": 1 }
        ])));
        let mut controller = controller_for(source.clone());

        let first = controller.begin_fetch();
        let stale = controller.fetch_task(first).await;

        source
            .set_listing(MockListing::Respond(json!([{ "id": 2, "name": "New", "price": 2 }])))
            .await;
        let second = controller.begin_fetch();
        let fresh = controller.fetch_task(second).await;

        assert!(controller.complete(fresh));
        assert!(!controller.complete(stale));

        let products = controller.state().products().unwrap();
        assert_eq!(products[0].name(), "New");
    }

    #[tokio::test]
    async fn test_refresh_resets_to_loading_and_recovers() {
        let source = Arc::new(MockProductSource::failing("down"));
        let mut controller = controller_for(source.clone());
        assert!(matches!(controller.refresh().await, ProductListState::Error(_)));

        source
            .set_listing(MockListing::Respond(json!([{ "id": 1, "name": "Back", "price": 0 }])))
            .await;
        controller.begin_fetch();
        assert!(controller.state().is_loading());

        let state = controller.refresh().await;
        assert_eq!(state.products().map(<[Product]>::len), Some(1));
        assert_eq!(source.calls(), 2);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<parking_lot::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_failure_cause_is_logged_but_not_shown() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        let mut controller = controller_for(Arc::new(MockProductSource::hanging()));
        let ticket = controller.begin_fetch();

        tracing::subscriber::with_default(subscriber, || {
            controller.complete(FetchCompletion {
                ticket,
                result: Err(CatalogError::network("upstream refused connection")),
            });
        });

        let output = String::from_utf8(logs.0.lock().clone()).unwrap();
        assert!(output.contains("ERROR"));
        assert!(output.contains("Error fetching products"));
        assert!(output.contains("upstream refused connection"));

        let ProductListState::Error(message) = controller.state() else {
            panic!("expected error state");
        };
        assert_eq!(message, LOAD_ERROR_MESSAGE);
        assert!(!message.contains("upstream"));
    }
}
