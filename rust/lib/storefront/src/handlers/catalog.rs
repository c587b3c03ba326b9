//! Catalog view handlers.

use std::sync::Arc;

use storefront_flux::StateStore;
use tracing::{debug, warn};

use crate::handlers::{StorefrontContext, app, cart};
use crate::lifecycle::ViewTicket;
use crate::request::*;
use crate::state::*;

/// Handle `catalog/load`: refetch while the catalog is mounted, keeping
/// the selected category.
pub async fn handle_load(store: &Arc<StateStore>, ctx: &Arc<StorefrontContext>) {
    let Some(ticket) = ctx.lifecycle.ticket(View::Catalog) else {
        debug!("catalog/load ignored, catalog not mounted");
        return;
    };
    let filter = current_filter(store).unwrap_or_default();
    load(ctx, store, ticket, filter).await;
}

pub(crate) async fn load(
    ctx: &StorefrontContext,
    store: &StateStore,
    ticket: ViewTicket,
    filter: CategoryFilter,
) {
    store.set(CatalogState::PATH, CatalogState::loading(filter.clone()));

    let result = ctx.catalog.fetch_products().await;
    if !ctx.lifecycle.is_current(&ticket) {
        debug!("discarding catalog response for unmounted view");
        return;
    }

    // The shopper may have picked a category while the fetch was in flight.
    let filter = current_filter(store).unwrap_or(filter);
    let state = match result {
        Ok(products) => CatalogState::loaded(products, filter),
        Err(e) => {
            warn!("catalog load failed: {}", e);
            CatalogState::failed(filter)
        }
    };
    store.set(CatalogState::PATH, state);
}

/// Handle `catalog/filter`.
pub async fn handle_filter(req: &FilterCatalogReq, store: &StateStore) {
    let filter = CategoryFilter::parse(&req.category);
    let state = store
        .get_as::<CatalogState>(CatalogState::PATH)
        .unwrap_or_else(|| CatalogState::loading(CategoryFilter::All));
    store.set(CatalogState::PATH, state.with_filter(filter));
}

/// Handle `catalog/open`: show the product on the landing view.
pub async fn handle_open(
    req: &OpenProductReq,
    store: &Arc<StateStore>,
    ctx: &Arc<StorefrontContext>,
) {
    app::navigate(ctx, store, Route::product(req.product_id)).await;
}

/// Handle `catalog/add-to-cart`.
pub async fn handle_add_to_cart(
    req: &CatalogAddToCartReq,
    store: &StateStore,
    ctx: &StorefrontContext,
) {
    let product = store
        .get_as::<CatalogState>(CatalogState::PATH)
        .and_then(|s| s.find(req.product_id).cloned());
    match product {
        Some(product) => cart::add_product(ctx, &product),
        None => warn!("catalog/add-to-cart: product {} not loaded", req.product_id),
    }
}

fn current_filter(store: &StateStore) -> Option<CategoryFilter> {
    store
        .get_as::<CatalogState>(CatalogState::PATH)
        .map(|s| s.filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartSnapshot;
    use crate::handlers::testing;

    #[tokio::test]
    async fn mount_loads_products_and_categories() {
        let base = testing::catalog_server(testing::products_json()).await;
        let app = testing::app(&base);
        app.start("/products").await;

        let state = app.flux().get_as::<CatalogState>(CatalogState::PATH).unwrap();
        assert_eq!(state.phase, CatalogPhase::Ready);
        assert_eq!(state.visible.len(), 3);
        let labels: Vec<&str> = state.categories.iter().map(CategoryFilter::label).collect();
        assert_eq!(labels, vec!["all", "kitchen", "lighting", "furniture"]);
    }

    #[tokio::test]
    async fn filter_then_clear() {
        let base = testing::catalog_server(testing::products_json()).await;
        let app = testing::app(&base);
        app.start("/products").await;

        let flux = app.flux();
        flux.emit(FilterCatalogReq::PATH, FilterCatalogReq { category: "lighting".into() })
            .await;
        let state = flux.get_as::<CatalogState>(CatalogState::PATH).unwrap();
        assert_eq!(state.visible.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);

        flux.emit(FilterCatalogReq::PATH, FilterCatalogReq { category: "garden".into() })
            .await;
        let state = flux.get_as::<CatalogState>(CatalogState::PATH).unwrap();
        assert_eq!(
            state.phase,
            CatalogPhase::Empty {
                message: CATALOG_NO_MATCHES.into()
            }
        );

        flux.emit(FilterCatalogReq::PATH, FilterCatalogReq { category: "all".into() })
            .await;
        let state = flux.get_as::<CatalogState>(CatalogState::PATH).unwrap();
        assert_eq!(state.visible.len(), 3);
    }

    #[tokio::test]
    async fn fetch_failure_shows_message() {
        let base = testing::failing_server().await;
        let app = testing::app(&base);
        app.start("/products").await;

        let state = app.flux().get_as::<CatalogState>(CatalogState::PATH).unwrap();
        assert_eq!(
            state.phase,
            CatalogPhase::Failed {
                message: CATALOG_LOAD_FAILED.into()
            }
        );
    }

    #[tokio::test]
    async fn remount_resets_filter() {
        let base = testing::catalog_server(testing::products_json()).await;
        let app = testing::app(&base);
        app.start("/products").await;
        app.flux()
            .emit(FilterCatalogReq::PATH, FilterCatalogReq { category: "kitchen".into() })
            .await;

        app.navigate("/cart").await;
        app.navigate("/products").await;
        let state = app.flux().get_as::<CatalogState>(CatalogState::PATH).unwrap();
        assert_eq!(state.filter, CategoryFilter::All);
    }

    #[tokio::test]
    async fn stale_response_is_discarded() {
        let base = testing::catalog_server(testing::products_json()).await;
        let app = testing::app(&base);
        app.start("/products").await;

        let ctx = app.context().clone();
        let store = app.flux().store().clone();
        let ticket = ctx.lifecycle.ticket(View::Catalog).unwrap();

        // The view goes away while a reload is in flight.
        app.navigate("/cart").await;
        load(&ctx, &store, ticket, CategoryFilter::All).await;

        let state = store.get_as::<CatalogState>(CatalogState::PATH).unwrap();
        assert_eq!(state.phase, CatalogPhase::Loading);
    }

    #[tokio::test]
    async fn load_request_needs_mounted_catalog() {
        let base = testing::catalog_server(testing::products_json()).await;
        let app = testing::app(&base);
        app.start("/cart").await;

        app.flux().emit(LoadCatalogReq::PATH, LoadCatalogReq).await;
        assert!(!app.flux().contains(CatalogState::PATH));
    }

    #[tokio::test]
    async fn open_deep_links_landing() {
        let base = testing::catalog_server(testing::products_json()).await;
        let app = testing::app(&base);
        app.start("/products").await;

        app.flux()
            .emit(OpenProductReq::PATH, OpenProductReq { product_id: 2 })
            .await;
        assert_eq!(app.route(), Some(Route::product(2)));
        let showcase = app.flux().get_as::<ShowcaseState>(ShowcaseState::PATH).unwrap();
        assert_eq!(showcase.focus, Some(2));
    }

    #[tokio::test]
    async fn add_to_cart_from_card_stays_on_catalog() {
        let base = testing::catalog_server(testing::products_json()).await;
        let app = testing::app(&base);
        app.start("/products").await;

        let flux = app.flux();
        flux.emit(CatalogAddToCartReq::PATH, CatalogAddToCartReq { product_id: 1 })
            .await;
        flux.emit(CatalogAddToCartReq::PATH, CatalogAddToCartReq { product_id: 1 })
            .await;
        flux.emit(CatalogAddToCartReq::PATH, CatalogAddToCartReq { product_id: 42 })
            .await;

        assert_eq!(app.route(), Some(Route::Catalog));
        let cart = flux.get_as::<CartSnapshot>(CartSnapshot::PATH).unwrap();
        assert_eq!(cart.item_count, 2);
        assert_eq!(cart.total, 16.0);
    }
}
