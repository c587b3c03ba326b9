use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::field::CheckoutField;

/// Raw checkout input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub card_name: String,
    pub card_number: String,
    pub card_expiry: String,
    #[serde(rename = "cardCVV")]
    pub card_cvv: String,
}

impl CheckoutForm {
    pub fn get(&self, field: CheckoutField) -> &str {
        match field {
            CheckoutField::FirstName => &self.first_name,
            CheckoutField::LastName => &self.last_name,
            CheckoutField::Email => &self.email,
            CheckoutField::Address => &self.address,
            CheckoutField::City => &self.city,
            CheckoutField::PostalCode => &self.postal_code,
            CheckoutField::Country => &self.country,
            CheckoutField::CardName => &self.card_name,
            CheckoutField::CardNumber => &self.card_number,
            CheckoutField::CardExpiry => &self.card_expiry,
            CheckoutField::CardCvv => &self.card_cvv,
        }
    }

    pub fn set(&mut self, field: CheckoutField, value: impl Into<String>) {
        let slot = match field {
            CheckoutField::FirstName => &mut self.first_name,
            CheckoutField::LastName => &mut self.last_name,
            CheckoutField::Email => &mut self.email,
            CheckoutField::Address => &mut self.address,
            CheckoutField::City => &mut self.city,
            CheckoutField::PostalCode => &mut self.postal_code,
            CheckoutField::Country => &mut self.country,
            CheckoutField::CardName => &mut self.card_name,
            CheckoutField::CardNumber => &mut self.card_number,
            CheckoutField::CardExpiry => &mut self.card_expiry,
            CheckoutField::CardCvv => &mut self.card_cvv,
        };
        *slot = value.into();
    }

    /// Builder-style `set`.
    pub fn with(mut self, field: CheckoutField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }
}

/// Validation messages keyed by field. Empty means the form may be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(BTreeMap<CheckoutField, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: CheckoutField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: CheckoutField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Drop the message for `field`, as happens when the shopper edits it.
    pub fn clear(&mut self, field: CheckoutField) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = CheckoutField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CheckoutField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}
