//! Landing view requests.

use storefront_catalog::ProductId;

#[derive(Debug, Clone)]
pub struct LoadShowcaseReq;

impl LoadShowcaseReq {
    pub const PATH: &'static str = "showcase/load";
}

#[derive(Debug, Clone)]
pub struct ShowcaseAddToCartReq {
    pub product_id: ProductId,
}

impl ShowcaseAddToCartReq {
    pub const PATH: &'static str = "showcase/add-to-cart";
}
