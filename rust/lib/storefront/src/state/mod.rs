//! View state types, each stored at its own path in the state engine.
//!
//! | Path | Type |
//! |---|---|
//! | `app/route` | [`AppRoute`] |
//! | `cart/state` | [`CartSnapshot`](crate::cart::CartSnapshot) |
//! | `catalog/state` | [`CatalogState`] |
//! | `showcase/state` | [`ShowcaseState`] |
//! | `showcase/previews/items/{id}` | [`PreviewState`] |
//! | `checkout/state` | [`CheckoutState`] |

pub mod app;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod showcase;

pub use app::{AppRoute, Route, View};
pub use cart::CART_EMPTY_MESSAGE;
pub use catalog::{
    CATALOG_LOAD_FAILED, CATALOG_NO_MATCHES, CatalogPhase, CatalogState, CategoryFilter,
    categories_of,
};
pub use checkout::{
    CheckoutPhase, CheckoutState, EMPTY_CART_MESSAGE, ORDER_PLACED_MESSAGE, ORDER_PLACED_TITLE,
    OrderConfirmation, OrderSummary, SummaryLine,
};
pub use showcase::{
    PreviewState, SHOWCASE_EMPTY, SHOWCASE_LOAD_FAILED, ShowcaseItem, ShowcasePhase,
    ShowcaseState,
};
