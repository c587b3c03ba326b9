//! Request types: what a surface can ask the app to do. Each type carries
//! the path it is emitted on.

pub mod app;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod showcase;

pub use app::{InitializeReq, NavigateReq};
pub use cart::{
    AddToCartReq, ClearCartReq, DecrementQuantityReq, IncrementQuantityReq, RemoveFromCartReq,
    UpdateQuantityReq,
};
pub use catalog::{CatalogAddToCartReq, FilterCatalogReq, LoadCatalogReq, OpenProductReq};
pub use checkout::{SubmitOrderReq, UpdateFieldReq};
pub use showcase::{LoadShowcaseReq, ShowcaseAddToCartReq};
