//! Product data source port definition.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::entities::ProductId;
use crate::domain::errors::CatalogError;

/// Port for reading raw product records from the catalog backend.
///
/// Responses are returned untyped; shape checks belong to the caller.
#[async_trait]
pub trait ProductSourcePort: Send + Sync {
    /// Fetches the full product listing.
    async fn list_products(&self) -> Result<Value, CatalogError>;

    /// Fetches a single product record.
    async fn get_product(&self, id: &ProductId) -> Result<Value, CatalogError>;
}
