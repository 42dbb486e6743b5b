//! Domain layer with core catalog entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{CardImageState, Product, ProductId, is_admissible};
pub use errors::{CatalogError, UrlTemplateError};
pub use ports::{ImageProbePort, KeyValueStorePort, ProductSourcePort};
