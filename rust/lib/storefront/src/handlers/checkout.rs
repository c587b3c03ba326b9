//! Checkout view handlers: form edits, validation, order placement.

use std::sync::Arc;

use chrono::Utc;
use storefront_flux::StateStore;
use tracing::{debug, info, warn};

use crate::cart::CartSnapshot;
use crate::checkout::validate;
use crate::handlers::{StorefrontContext, app};
use crate::request::*;
use crate::state::*;

pub(crate) fn mount(ctx: &StorefrontContext, store: &StateStore) {
    store.set(CheckoutState::PATH, CheckoutState::mount(&ctx.cart.snapshot()));
}

/// Leaving checkout discards the form.
pub(crate) fn unmount(store: &StateStore) {
    store.set(CheckoutState::PATH, CheckoutState::inactive());
}

/// Keep the summary and phase in step with the cart.
pub(crate) fn follow_cart(store: &StateStore, cart: &CartSnapshot) {
    let Some(mut state) = store.get_as::<CheckoutState>(CheckoutState::PATH) else {
        return;
    };
    if !matches!(state.phase, CheckoutPhase::EmptyCart | CheckoutPhase::Editing) {
        return;
    }
    state.refresh(cart);
    store.set(CheckoutState::PATH, state);
}

/// Handle `checkout/update-field`. Editing a field clears its error.
pub async fn handle_update_field(req: &UpdateFieldReq, store: &StateStore) {
    let Some(mut state) = store.get_as::<CheckoutState>(CheckoutState::PATH) else {
        return;
    };
    if state.phase != CheckoutPhase::Editing {
        debug!("checkout/update-field ignored in {:?}", state.phase);
        return;
    }
    state.form.set(req.field, req.value.clone());
    state.errors.clear(req.field);
    store.set(CheckoutState::PATH, state);
}

/// Handle `checkout/submit`.
///
/// Invalid forms get their errors and stay editable. A valid form moves to
/// Processing, waits out the placement delay, then clears the cart and
/// shows the confirmation. Home follows after the redirect delay, unless
/// the shopper has already left.
pub async fn handle_submit(store: &Arc<StateStore>, ctx: &Arc<StorefrontContext>) {
    let Some(ticket) = ctx.lifecycle.ticket(View::Checkout) else {
        debug!("checkout/submit ignored, checkout not mounted");
        return;
    };
    let Some(mut state) = store.get_as::<CheckoutState>(CheckoutState::PATH) else {
        return;
    };
    if state.phase != CheckoutPhase::Editing {
        debug!("checkout/submit ignored in {:?}", state.phase);
        return;
    }

    let errors = validate(&state.form);
    if !errors.is_empty() {
        debug!("checkout form has {} invalid field(s)", errors.len());
        state.errors = errors;
        store.set(CheckoutState::PATH, state);
        return;
    }

    state.errors = errors;
    state.phase = CheckoutPhase::Processing;
    store.set(CheckoutState::PATH, state.clone());

    tokio::time::sleep(ctx.timing.placement_delay()).await;

    let cart = ctx.cart.snapshot();
    let confirmation = OrderConfirmation {
        item_count: cart.item_count,
        total: cart.total,
        placed_at: Utc::now(),
    };
    let current = ctx.lifecycle.is_current(&ticket);
    if current {
        state.phase = CheckoutPhase::Placed;
        state.confirmation = Some(confirmation.clone());
        store.set(CheckoutState::PATH, state);
    }
    if let Err(e) = ctx.cart.clear_cart() {
        warn!("clearing cart after order failed: {}", e);
    }
    info!(
        "order placed: {} item(s), total {:.2}",
        confirmation.item_count, confirmation.total
    );
    if !current {
        return;
    }

    let ctx = Arc::clone(ctx);
    let store = Arc::clone(store);
    tokio::spawn(async move {
        tokio::time::sleep(ctx.timing.redirect_delay()).await;
        if ctx.lifecycle.is_current(&ticket) {
            app::navigate(&ctx, &store, Route::HOME).await;
        }
    });
}
