//! Domain entity definitions.

mod image;
mod product;

pub use image::{CardImageState, IMAGE_UNAVAILABLE_ALT, ImageCacheEntry, PLACEHOLDER_IMAGE};
pub use product::{Product, ProductId, is_admissible};
