//! Catalog backend API adapters.

pub mod client;
pub mod url_template;

pub use client::ProductsApiClient;
pub use url_template::replace_url_params;
