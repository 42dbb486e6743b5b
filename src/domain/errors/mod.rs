//! Domain error types.

mod catalog_error;
mod store_error;
mod url_template_error;

pub use catalog_error::CatalogError;
pub use store_error::StoreError;
pub use url_template_error::UrlTemplateError;
