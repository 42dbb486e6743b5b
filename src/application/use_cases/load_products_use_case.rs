//! Product listing use case.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use crate::domain::entities::Product;
use crate::domain::errors::CatalogError;
use crate::domain::ports::ProductSourcePort;

/// Fetches the product listing and keeps only admissible records.
#[derive(Clone)]
pub struct LoadProductsUseCase {
    source: Arc<dyn ProductSourcePort>,
}

impl LoadProductsUseCase {
    /// Creates new use case over a product source.
    #[must_use]
    pub const fn new(source: Arc<dyn ProductSourcePort>) -> Self {
        Self { source }
    }

    /// Fetches and filters the listing.
    ///
    /// Invalid records are dropped silently and never fail the fetch; the
    /// surviving products keep their input order.
    ///
    /// # Errors
    /// Returns error if the source fails or does not answer with an array.
    pub async fn execute(&self) -> Result<Vec<Product>, CatalogError> {
        debug!("Fetching product listing");

        let data = self.source.list_products().await?;
        let Value::Array(records) = data else {
            return Err(CatalogError::InvalidShape { expected: "array" });
        };

        let products: Vec<Product> = records.iter().filter_map(Product::from_record).collect();

        let dropped = records.len() - products.len();
        if dropped > 0 {
            debug!(dropped, "Dropped inadmissible product records");
        }
        info!(
            received = records.len(),
            admitted = products.len(),
            "Loaded product listing"
        );

        Ok(products)
    }
}
