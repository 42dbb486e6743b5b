//! Storefront - a terminal product catalog client.
//!
//! This crate fetches a product listing from a REST backend, drops records
//! that fail validation and renders the rest as cards. Card images are
//! checked with `HEAD` probes whose verdicts are cached for a fixed window.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "storefront";
