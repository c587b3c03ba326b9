use std::sync::LazyLock;

use regex::Regex;

use super::field::CheckoutField;
use super::form::{CheckoutForm, ValidationErrors};

pub const REQUIRED: &str = "This field is required";
pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const INVALID_CARD_NUMBER: &str = "Card number must be 16 digits";
pub const INVALID_EXPIRY: &str = "Use MM/YY format";
pub const INVALID_CVV: &str = "CVV must be 3-4 digits";

// Unanchored: any `text@text.text` run inside the value passes.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap());
static CARD_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{16}$").unwrap());
static EXPIRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/[0-9]{2}$").unwrap());
static CVV: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{3,4}$").unwrap());

/// Check every field of `form`.
///
/// Required-ness looks at the trimmed value. Format rules run on the raw
/// value whenever it is non-empty, and their message replaces "required".
pub fn validate(form: &CheckoutForm) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    for field in CheckoutField::ALL {
        if form.get(field).trim().is_empty() {
            errors.insert(field, REQUIRED);
        }
    }

    if !form.email.is_empty() && !EMAIL.is_match(&form.email) {
        errors.insert(CheckoutField::Email, INVALID_EMAIL);
    }

    if !form.card_number.is_empty() {
        let digits: String = form
            .card_number
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if !CARD_NUMBER.is_match(&digits) {
            errors.insert(CheckoutField::CardNumber, INVALID_CARD_NUMBER);
        }
    }

    if !form.card_expiry.is_empty() && !EXPIRY.is_match(&form.card_expiry) {
        errors.insert(CheckoutField::CardExpiry, INVALID_EXPIRY);
    }

    if !form.card_cvv.is_empty() && !CVV.is_match(&form.card_cvv) {
        errors.insert(CheckoutField::CardCvv, INVALID_CVV);
    }

    errors
}
