mod product_card;
mod status_bar;

pub use product_card::{
    CardGeneration, CardView, DESCRIPTION_FALLBACK, ImageResolution, ImageResolveRequest,
    ProductCard, ProductCardWidget, format_amount, format_price,
};
pub use status_bar::{StatusBar, StatusLevel};
