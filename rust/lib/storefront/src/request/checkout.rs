//! Checkout form requests.

use crate::checkout::CheckoutField;

/// Update a checkout form field.
#[derive(Debug, Clone)]
pub struct UpdateFieldReq {
    pub field: CheckoutField,
    pub value: String,
}

impl UpdateFieldReq {
    pub const PATH: &'static str = "checkout/update-field";
}

/// Place Order.
#[derive(Debug, Clone)]
pub struct SubmitOrderReq;

impl SubmitOrderReq {
    pub const PATH: &'static str = "checkout/submit";
}
