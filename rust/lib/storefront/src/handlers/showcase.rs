//! Landing view handlers: product list, 3D previews, deep-link focus.

use std::sync::Arc;

use storefront_catalog::{Product, ProductId};
use storefront_flux::StateStore;
use tracing::{debug, warn};

use crate::handlers::{StorefrontContext, cart};
use crate::lifecycle::ViewTicket;
use crate::request::*;
use crate::state::*;

/// Handle `showcase/load`: reload while the landing view is mounted.
pub async fn handle_load(store: &Arc<StateStore>, ctx: &Arc<StorefrontContext>) {
    let Some(ticket) = ctx.lifecycle.ticket(View::Landing) else {
        debug!("showcase/load ignored, landing not mounted");
        return;
    };
    load(ctx, store, ticket).await;
}

pub(crate) async fn load(ctx: &StorefrontContext, store: &StateStore, ticket: ViewTicket) {
    release_previews(ctx, store);
    store.set(ShowcaseState::PATH, ShowcaseState::loading());

    let result = ctx.catalog.fetch_products().await;
    if !ctx.lifecycle.is_current(&ticket) {
        debug!("discarding showcase response for unmounted view");
        return;
    }
    let products = match result {
        Ok(products) => products,
        Err(e) => {
            warn!("showcase load failed: {}", e);
            store.set(ShowcaseState::PATH, ShowcaseState::failed());
            return;
        }
    };

    let items: Vec<ShowcaseItem> = products.into_iter().map(|p| resolve(ctx, p)).collect();
    for item in &items {
        store.set(&PreviewState::path(item.product.id), PreviewState::Loading);
    }
    let mut state = ShowcaseState::loaded(items.clone());
    state.focus_on(deep_link(store));
    store.set(ShowcaseState::PATH, state);

    for item in items {
        let id = item.product.id;
        let handle = ctx.scene.load(item.model_url.as_deref()).await;
        if !ctx.lifecycle.is_current(&ticket) {
            debug!("landing unmounted while loading preview {}", id);
            ctx.scene.unload(handle);
            return;
        }
        let Some(presentation) = ctx.scene.presentation(handle) else {
            continue;
        };
        let replaced = ctx.previews.lock().unwrap().insert(id, handle);
        if let Some(old) = replaced {
            ctx.scene.unload(old);
        }
        store.set(
            &PreviewState::path(id),
            PreviewState::Shown {
                handle,
                presentation,
            },
        );
    }
}

/// Handle `showcase/add-to-cart`.
pub async fn handle_add_to_cart(
    req: &ShowcaseAddToCartReq,
    store: &StateStore,
    ctx: &StorefrontContext,
) {
    let product = store
        .get_as::<ShowcaseState>(ShowcaseState::PATH)
        .and_then(|s| s.find(req.product_id).map(|i| i.product.clone()));
    match product {
        Some(product) => cart::add_product(ctx, &product),
        None => warn!("showcase/add-to-cart: product {} not loaded", req.product_id),
    }
}

/// Re-evaluate the deep link against the loaded products.
pub(crate) fn apply_focus(store: &StateStore, product: Option<ProductId>) {
    if let Some(mut state) = store.get_as::<ShowcaseState>(ShowcaseState::PATH) {
        state.focus_on(product);
        store.set(ShowcaseState::PATH, state);
    }
}

pub(crate) fn unmount(ctx: &StorefrontContext, store: &StateStore) {
    release_previews(ctx, store);
    store.set(ShowcaseState::PATH, ShowcaseState::idle());
}

fn release_previews(ctx: &StorefrontContext, store: &StateStore) {
    let handles: Vec<_> = ctx.previews.lock().unwrap().drain().collect();
    for (_, handle) in handles {
        ctx.scene.unload(handle);
    }
    store.remove_prefix(PreviewState::PREFIX);
}

fn resolve(ctx: &StorefrontContext, product: Product) -> ShowcaseItem {
    ShowcaseItem {
        image_url: product.first_image().map(|p| ctx.catalog.resolve_asset(p)),
        model_url: product.model().map(|p| ctx.catalog.resolve_asset(p)),
        product,
    }
}

fn deep_link(store: &StateStore) -> Option<ProductId> {
    match store.get_as::<AppRoute>(AppRoute::PATH) {
        Some(AppRoute(Route::Landing { product })) => product,
        _ => None,
    }
}
