//! Checkout view state: stored at `checkout/state`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cart::CartSnapshot;
use crate::checkout::{CheckoutForm, ValidationErrors};

pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty. Add some products before checkout.";
pub const ORDER_PLACED_TITLE: &str = "Order Placed Successfully!";
pub const ORDER_PLACED_MESSAGE: &str =
    "Thank you for your purchase. You will be redirected to the home page shortly.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutPhase {
    /// Checkout view not mounted.
    Inactive,
    /// Nothing to buy; the view offers a way back to the catalog.
    EmptyCart,
    Editing,
    /// Valid submission accepted, order being placed.
    Processing,
    Placed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryLine {
    pub title: String,
    pub quantity: u32,
    pub subtotal: f64,
}

/// Right-hand order summary. Shipping is always free.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OrderSummary {
    pub lines: Vec<SummaryLine>,
    pub subtotal: f64,
    pub shipping: f64,
    pub total: f64,
}

impl OrderSummary {
    pub fn of(cart: &CartSnapshot) -> Self {
        Self {
            lines: cart
                .items
                .iter()
                .map(|i| SummaryLine {
                    title: i.product.title.clone(),
                    quantity: i.quantity,
                    subtotal: i.subtotal(),
                })
                .collect(),
            subtotal: cart.total,
            shipping: 0.0,
            total: cart.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderConfirmation {
    pub item_count: u32,
    pub total: f64,
    pub placed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutState {
    pub phase: CheckoutPhase,
    pub form: CheckoutForm,
    pub errors: ValidationErrors,
    pub summary: OrderSummary,
    pub confirmation: Option<OrderConfirmation>,
}

impl CheckoutState {
    pub const PATH: &'static str = "checkout/state";

    pub fn inactive() -> Self {
        Self {
            phase: CheckoutPhase::Inactive,
            form: CheckoutForm::default(),
            errors: ValidationErrors::new(),
            summary: OrderSummary::default(),
            confirmation: None,
        }
    }

    /// Fresh form for `cart`.
    pub fn mount(cart: &CartSnapshot) -> Self {
        let mut state = Self::inactive();
        state.phase = CheckoutPhase::EmptyCart;
        state.refresh(cart);
        state
    }

    /// Follow a cart change. Only the pre-submission phases react: once an
    /// order is processing or placed, emptying the cart is expected.
    pub fn refresh(&mut self, cart: &CartSnapshot) {
        if !matches!(self.phase, CheckoutPhase::EmptyCart | CheckoutPhase::Editing) {
            return;
        }
        self.summary = OrderSummary::of(cart);
        self.phase = if cart.is_empty() {
            CheckoutPhase::EmptyCart
        } else {
            CheckoutPhase::Editing
        };
    }
}
