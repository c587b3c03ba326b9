//! Catalog view requests.

use storefront_catalog::ProductId;

#[derive(Debug, Clone)]
pub struct LoadCatalogReq;

impl LoadCatalogReq {
    pub const PATH: &'static str = "catalog/load";
}

/// Select a category label; `all` clears the filter.
#[derive(Debug, Clone)]
pub struct FilterCatalogReq {
    pub category: String,
}

impl FilterCatalogReq {
    pub const PATH: &'static str = "catalog/filter";
}

/// Product card clicked: show it on the landing view.
#[derive(Debug, Clone)]
pub struct OpenProductReq {
    pub product_id: ProductId,
}

impl OpenProductReq {
    pub const PATH: &'static str = "catalog/open";
}

/// A card's add-to-cart button. Does not navigate.
#[derive(Debug, Clone)]
pub struct CatalogAddToCartReq {
    pub product_id: ProductId,
}

impl CatalogAddToCartReq {
    pub const PATH: &'static str = "catalog/add-to-cart";
}
