use serde::{Deserialize, Serialize};
use storefront_catalog::{Product, ProductId};

/// A product plus the quantity held. Serialized flat, as
/// `{...product, "quantity": n}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartLineItem {
    pub fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    pub fn subtotal(&self) -> f64 {
        self.product.price * self.quantity as f64
    }
}

/// Immutable view of the cart with its derived values.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CartSnapshot {
    pub items: Vec<CartLineItem>,
    pub total: f64,
    /// Σ quantity, saturating at `u32::MAX`.
    pub item_count: u32,
}

impl CartSnapshot {
    pub fn from_items(items: Vec<CartLineItem>) -> Self {
        let total = items.iter().map(CartLineItem::subtotal).sum();
        let item_count = items
            .iter()
            .fold(0u32, |n, i| n.saturating_add(i.quantity));
        Self {
            items,
            total,
            item_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn line(&self, id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.product.id == id)
    }
}
