//! `storefront checkout`: fill the form, submit, print the outcome.

use anyhow::{Context, Result};
use clap::Args;
use storefront::checkout::{CheckoutField, CheckoutForm};
use storefront::request::{SubmitOrderReq, UpdateFieldReq};
use storefront::state::{
    CheckoutPhase, CheckoutState, EMPTY_CART_MESSAGE, ORDER_PLACED_MESSAGE, ORDER_PLACED_TITLE,
    Route,
};

use super::{Session, format_price, print_json};

/// Checkout form input. Flags override values read from `--form`.
#[derive(Args, Debug, Default)]
pub struct FormArgs {
    /// JSON file with form fields (camelCase names, e.g. `cardCVV`).
    #[arg(long = "form")]
    pub form: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub postal_code: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub card_name: Option<String>,
    #[arg(long)]
    pub card_number: Option<String>,
    #[arg(long)]
    pub card_expiry: Option<String>,
    #[arg(long = "card-cvv")]
    pub card_cvv: Option<String>,
}

impl FormArgs {
    pub fn into_form(self) -> Result<CheckoutForm> {
        let mut form = match &self.form {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path))?;
                serde_json::from_str(&content).with_context(|| format!("parsing {}", path))?
            }
            None => CheckoutForm::default(),
        };
        let flags = [
            (CheckoutField::FirstName, self.first_name),
            (CheckoutField::LastName, self.last_name),
            (CheckoutField::Email, self.email),
            (CheckoutField::Address, self.address),
            (CheckoutField::City, self.city),
            (CheckoutField::PostalCode, self.postal_code),
            (CheckoutField::Country, self.country),
            (CheckoutField::CardName, self.card_name),
            (CheckoutField::CardNumber, self.card_number),
            (CheckoutField::CardExpiry, self.card_expiry),
            (CheckoutField::CardCvv, self.card_cvv),
        ];
        for (field, value) in flags {
            if let Some(value) = value {
                form.set(field, value);
            }
        }
        Ok(form)
    }
}

pub async fn place_order(session: &Session, form: CheckoutForm, json: bool) -> Result<()> {
    let app = &session.app;
    app.start(&Route::Checkout.to_path()).await;
    let state = current(session)?;
    if state.phase == CheckoutPhase::EmptyCart {
        anyhow::bail!("{}", EMPTY_CART_MESSAGE);
    }

    for field in CheckoutField::ALL {
        let req = UpdateFieldReq {
            field,
            value: form.get(field).to_string(),
        };
        app.flux().emit(UpdateFieldReq::PATH, req).await;
    }
    eprintln!("Placing order...");
    app.flux().emit(SubmitOrderReq::PATH, SubmitOrderReq).await;

    let state = current(session)?;
    if json {
        return print_json(&state);
    }
    match (&state.phase, &state.confirmation) {
        (CheckoutPhase::Placed, Some(confirmation)) => {
            println!("{}", ORDER_PLACED_TITLE);
            println!("{}", ORDER_PLACED_MESSAGE);
            println!();
            for line in &state.summary.lines {
                println!(
                    "  {} x {:<28} {:>10}",
                    line.quantity,
                    line.title,
                    format_price(line.subtotal)
                );
            }
            println!("  Shipping: Free");
            println!("  Total:    {}", format_price(confirmation.total));
            println!("  Placed:   {}", confirmation.placed_at.to_rfc3339());
            Ok(())
        }
        _ => {
            for (field, message) in state.errors.iter() {
                eprintln!("{}: {}", field.label(), message);
            }
            anyhow::bail!("Order not placed: {} invalid field(s).", state.errors.len())
        }
    }
}

fn current(session: &Session) -> Result<CheckoutState> {
    session
        .app
        .flux()
        .get_as::<CheckoutState>(CheckoutState::PATH)
        .context("checkout view did not load")
}
