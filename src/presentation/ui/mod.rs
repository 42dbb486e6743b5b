//! UI screens.

mod app;
mod catalog_screen;
mod product_list;

pub use app::App;
pub use catalog_screen::{CatalogScreen, CatalogScreenState};
pub use product_list::{
    EMPTY_MESSAGE, FetchCompletion, FetchTicket, LOAD_ERROR_MESSAGE, LOADING_MESSAGE,
    ProductListController, ProductListState,
};
