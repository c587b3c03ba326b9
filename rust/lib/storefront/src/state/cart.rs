//! Cart view state: the store's snapshot, mirrored at `cart/state`.

use crate::cart::CartSnapshot;

pub const CART_EMPTY_MESSAGE: &str = "Your cart is empty.";

impl CartSnapshot {
    pub const PATH: &'static str = "cart/state";
}
