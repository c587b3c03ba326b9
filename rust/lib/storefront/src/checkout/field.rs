use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One input of the checkout form. Wire names are the camelCase input names
/// of the web form (`cardCVV` keeps its capitals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CheckoutField {
    #[serde(rename = "firstName")]
    FirstName,
    #[serde(rename = "lastName")]
    LastName,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "address")]
    Address,
    #[serde(rename = "city")]
    City,
    #[serde(rename = "postalCode")]
    PostalCode,
    #[serde(rename = "country")]
    Country,
    #[serde(rename = "cardName")]
    CardName,
    #[serde(rename = "cardNumber")]
    CardNumber,
    #[serde(rename = "cardExpiry")]
    CardExpiry,
    #[serde(rename = "cardCVV")]
    CardCvv,
}

impl CheckoutField {
    /// Form order: shipping block, then payment block.
    pub const ALL: [CheckoutField; 11] = [
        CheckoutField::FirstName,
        CheckoutField::LastName,
        CheckoutField::Email,
        CheckoutField::Address,
        CheckoutField::City,
        CheckoutField::PostalCode,
        CheckoutField::Country,
        CheckoutField::CardName,
        CheckoutField::CardNumber,
        CheckoutField::CardExpiry,
        CheckoutField::CardCvv,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CheckoutField::FirstName => "firstName",
            CheckoutField::LastName => "lastName",
            CheckoutField::Email => "email",
            CheckoutField::Address => "address",
            CheckoutField::City => "city",
            CheckoutField::PostalCode => "postalCode",
            CheckoutField::Country => "country",
            CheckoutField::CardName => "cardName",
            CheckoutField::CardNumber => "cardNumber",
            CheckoutField::CardExpiry => "cardExpiry",
            CheckoutField::CardCvv => "cardCVV",
        }
    }

    /// Human label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            CheckoutField::FirstName => "First Name",
            CheckoutField::LastName => "Last Name",
            CheckoutField::Email => "Email",
            CheckoutField::Address => "Address",
            CheckoutField::City => "City",
            CheckoutField::PostalCode => "Postal Code",
            CheckoutField::Country => "Country",
            CheckoutField::CardName => "Name on Card",
            CheckoutField::CardNumber => "Card Number",
            CheckoutField::CardExpiry => "Expiry Date (MM/YY)",
            CheckoutField::CardCvv => "CVV",
        }
    }
}

impl fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown checkout field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for CheckoutField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CheckoutField::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back() {
        for field in CheckoutField::ALL {
            assert_eq!(field.name().parse::<CheckoutField>(), Ok(field));
        }
        assert!("cardCvv".parse::<CheckoutField>().is_err());
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&CheckoutField::CardCvv).unwrap();
        assert_eq!(json, "\"cardCVV\"");
        let back: CheckoutField = serde_json::from_str("\"postalCode\"").unwrap();
        assert_eq!(back, CheckoutField::PostalCode);
    }
}
