//! App lifecycle and navigation handlers.

use std::sync::Arc;

use storefront_flux::StateStore;
use tracing::debug;

use crate::cart::CartSnapshot;
use crate::handlers::{StorefrontContext, catalog, checkout, showcase};
use crate::request::*;
use crate::state::*;

/// Handle `app/initialize`.
pub async fn handle_initialize(
    req: &InitializeReq,
    store: &Arc<StateStore>,
    ctx: &Arc<StorefrontContext>,
) {
    store.set(CartSnapshot::PATH, ctx.cart.snapshot());
    store.set(ShowcaseState::PATH, ShowcaseState::idle());
    store.set(CheckoutState::PATH, CheckoutState::inactive());
    navigate(ctx, store, Route::parse(&req.location)).await;
}

/// Handle `app/navigate`.
pub async fn handle_navigate(
    req: &NavigateReq,
    store: &Arc<StateStore>,
    ctx: &Arc<StorefrontContext>,
) {
    navigate(ctx, store, Route::parse(&req.location)).await;
}

/// Switch to `route`: unmount the old view, publish the route, mount the
/// new view. A route that keeps the same view (only the deep link changed)
/// does not remount.
pub async fn navigate(ctx: &Arc<StorefrontContext>, store: &Arc<StateStore>, route: Route) {
    let previous = store.get_as::<AppRoute>(AppRoute::PATH).map(|r| r.0);
    debug!(
        "navigate {} -> {}",
        previous.as_ref().map(Route::to_path).unwrap_or_default(),
        route
    );

    let mounted = ctx.lifecycle.current().map(|t| t.view);
    if mounted == Some(route.view()) {
        store.set(AppRoute::PATH, AppRoute(route.clone()));
        if let Route::Landing { product } = route {
            showcase::apply_focus(store, product);
        }
        return;
    }

    if let Some(view) = ctx.lifecycle.unmount() {
        unmount(ctx, store, view);
    }
    let ticket = ctx.lifecycle.mount(route.view());
    store.set(AppRoute::PATH, AppRoute(route.clone()));

    match route.view() {
        View::Landing => showcase::load(ctx, store, ticket).await,
        View::Catalog => catalog::load(ctx, store, ticket, CategoryFilter::All).await,
        View::Cart => {}
        View::Checkout => checkout::mount(ctx, store),
    }
}

fn unmount(ctx: &StorefrontContext, store: &StateStore, view: View) {
    match view {
        View::Landing => showcase::unmount(ctx, store),
        View::Checkout => checkout::unmount(store),
        View::Catalog | View::Cart => {}
    }
}
