//! Image URL validation infrastructure.
//!
//! This module provides:
//! - An expiring verdict cache over a key-value store
//! - A cache-first validator
//! - The HTTP `HEAD` probe adapter

pub mod probe;
pub mod validation_cache;
pub mod validator;

pub use probe::HttpImageProbe;
pub use validation_cache::{CACHE_KEY_PREFIX, DEFAULT_CACHE_WINDOW, ImageValidationCache};
pub use validator::ImageValidator;
