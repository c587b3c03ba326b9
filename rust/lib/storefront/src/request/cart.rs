//! Cart view controls.

use storefront_catalog::ProductId;

/// Add one unit of a product, looking it up by id.
#[derive(Debug, Clone)]
pub struct AddToCartReq {
    pub product_id: ProductId,
}

impl AddToCartReq {
    pub const PATH: &'static str = "cart/add";
}

#[derive(Debug, Clone)]
pub struct RemoveFromCartReq {
    pub product_id: ProductId,
}

impl RemoveFromCartReq {
    pub const PATH: &'static str = "cart/remove";
}

/// Set a line's quantity. Values below 1 are ignored.
#[derive(Debug, Clone)]
pub struct UpdateQuantityReq {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl UpdateQuantityReq {
    pub const PATH: &'static str = "cart/update-quantity";
}

/// The `+` button.
#[derive(Debug, Clone)]
pub struct IncrementQuantityReq {
    pub product_id: ProductId,
}

impl IncrementQuantityReq {
    pub const PATH: &'static str = "cart/increment";
}

/// The `-` button; never goes below 1.
#[derive(Debug, Clone)]
pub struct DecrementQuantityReq {
    pub product_id: ProductId,
}

impl DecrementQuantityReq {
    pub const PATH: &'static str = "cart/decrement";
}

#[derive(Debug, Clone)]
pub struct ClearCartReq;

impl ClearCartReq {
    pub const PATH: &'static str = "cart/clear";
}
