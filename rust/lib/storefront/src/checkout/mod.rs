//! Checkout form: field model and validation rules.

mod field;
mod form;
mod validate;

pub use field::{CheckoutField, UnknownField};
pub use form::{CheckoutForm, ValidationErrors};
pub use validate::{
    INVALID_CARD_NUMBER, INVALID_CVV, INVALID_EMAIL, INVALID_EXPIRY, REQUIRED, validate,
};
