//! Cart view handlers. State reaches `cart/state` through the store
//! subscription set up in `register_handlers`, not from here.

use storefront_catalog::{Product, ProductId};
use storefront_flux::StateStore;
use tracing::warn;

use crate::cart::{CartError, CartSnapshot};
use crate::handlers::StorefrontContext;
use crate::request::*;
use crate::state::*;

/// Handle `cart/add`.
pub async fn handle_add(req: &AddToCartReq, store: &StateStore, ctx: &StorefrontContext) {
    match find_product(store, ctx, req.product_id).await {
        Some(product) => add_product(ctx, &product),
        None => warn!("cart/add: product {} not found", req.product_id),
    }
}

/// Handle `cart/remove`.
pub async fn handle_remove(req: &RemoveFromCartReq, ctx: &StorefrontContext) {
    report("remove", ctx.cart.remove_from_cart(req.product_id));
}

/// Handle `cart/update-quantity`.
pub async fn handle_update_quantity(req: &UpdateQuantityReq, ctx: &StorefrontContext) {
    report("update", ctx.cart.update_quantity(req.product_id, req.quantity));
}

/// Handle `cart/increment`.
pub async fn handle_increment(req: &IncrementQuantityReq, ctx: &StorefrontContext) {
    if let Some(line) = ctx.cart.line(req.product_id) {
        let quantity = line.quantity.saturating_add(1);
        report("increment", ctx.cart.update_quantity(req.product_id, quantity));
    }
}

/// Handle `cart/decrement`. Stops at 1; removing is a separate action.
pub async fn handle_decrement(req: &DecrementQuantityReq, ctx: &StorefrontContext) {
    if let Some(line) = ctx.cart.line(req.product_id) {
        let quantity = line.quantity.saturating_sub(1).max(1);
        report("decrement", ctx.cart.update_quantity(req.product_id, quantity));
    }
}

/// Handle `cart/clear`.
pub async fn handle_clear(ctx: &StorefrontContext) {
    report("clear", ctx.cart.clear_cart());
}

pub(crate) fn add_product(ctx: &StorefrontContext, product: &Product) {
    report("add", ctx.cart.add_to_cart(product));
}

fn report(op: &str, result: Result<(), CartError>) {
    if let Err(e) = result {
        warn!("cart {}: {}", op, e);
    }
}

/// A product by id: whatever a view already loaded, else the API.
async fn find_product(store: &StateStore, ctx: &StorefrontContext, id: ProductId) -> Option<Product> {
    let loaded = store
        .get_as::<CatalogState>(CatalogState::PATH)
        .and_then(|s| s.find(id).cloned())
        .or_else(|| {
            store
                .get_as::<ShowcaseState>(ShowcaseState::PATH)
                .and_then(|s| s.find(id).map(|i| i.product.clone()))
        })
        .or_else(|| {
            store
                .get_as::<CartSnapshot>(CartSnapshot::PATH)
                .and_then(|c| c.line(id).map(|l| l.product.clone()))
        });
    if loaded.is_some() {
        return loaded;
    }
    ctx.catalog
        .fetch_product(id)
        .await
        .inspect_err(|e| warn!("looking up product {} failed: {}", id, e))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing;

    async fn cart_app() -> crate::Storefront {
        let base = testing::catalog_server(testing::products_json()).await;
        let app = testing::app(&base);
        app.start("/cart").await;
        app
    }

    fn cart_state(app: &crate::Storefront) -> CartSnapshot {
        app.flux().get_as::<CartSnapshot>(CartSnapshot::PATH).unwrap()
    }

    #[tokio::test]
    async fn add_fetches_unknown_products_by_id() {
        let app = cart_app().await;
        let flux = app.flux();

        flux.emit(AddToCartReq::PATH, AddToCartReq { product_id: 3 }).await;
        flux.emit(AddToCartReq::PATH, AddToCartReq { product_id: 3 }).await;
        flux.emit(AddToCartReq::PATH, AddToCartReq { product_id: 404 }).await;

        let cart = cart_state(&app);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].product.title, "Chair");
        assert_eq!(cart.item_count, 2);
        assert_eq!(cart.total, 240.0);
    }

    #[tokio::test]
    async fn plus_minus_and_remove() {
        let app = cart_app().await;
        let flux = app.flux();
        flux.emit(AddToCartReq::PATH, AddToCartReq { product_id: 1 }).await;

        flux.emit(IncrementQuantityReq::PATH, IncrementQuantityReq { product_id: 1 })
            .await;
        flux.emit(IncrementQuantityReq::PATH, IncrementQuantityReq { product_id: 1 })
            .await;
        assert_eq!(cart_state(&app).item_count, 3);

        for _ in 0..5 {
            flux.emit(DecrementQuantityReq::PATH, DecrementQuantityReq { product_id: 1 })
                .await;
        }
        assert_eq!(cart_state(&app).item_count, 1);

        flux.emit(RemoveFromCartReq::PATH, RemoveFromCartReq { product_id: 1 })
            .await;
        assert!(cart_state(&app).is_empty());
    }

    #[tokio::test]
    async fn update_quantity_zero_is_ignored() {
        let app = cart_app().await;
        let flux = app.flux();
        flux.emit(AddToCartReq::PATH, AddToCartReq { product_id: 2 }).await;

        flux.emit(
            UpdateQuantityReq::PATH,
            UpdateQuantityReq { product_id: 2, quantity: 4 },
        )
        .await;
        flux.emit(
            UpdateQuantityReq::PATH,
            UpdateQuantityReq { product_id: 2, quantity: 0 },
        )
        .await;
        let cart = cart_state(&app);
        assert_eq!(cart.item_count, 4);
        assert_eq!(cart.total, 198.0);
    }

    #[tokio::test]
    async fn increment_stops_at_max_quantity() {
        let app = cart_app().await;
        let flux = app.flux();
        flux.emit(AddToCartReq::PATH, AddToCartReq { product_id: 1 }).await;
        flux.emit(
            UpdateQuantityReq::PATH,
            UpdateQuantityReq { product_id: 1, quantity: u32::MAX },
        )
        .await;

        flux.emit(IncrementQuantityReq::PATH, IncrementQuantityReq { product_id: 1 })
            .await;
        flux.emit(AddToCartReq::PATH, AddToCartReq { product_id: 1 }).await;
        flux.emit(AddToCartReq::PATH, AddToCartReq { product_id: 2 }).await;

        let cart = cart_state(&app);
        assert_eq!(cart.items[0].quantity, u32::MAX);
        assert_eq!(cart.items[1].quantity, 1);
        assert_eq!(cart.item_count, u32::MAX);
    }

    #[tokio::test]
    async fn clear_empties_mirror() {
        let app = cart_app().await;
        let flux = app.flux();
        flux.emit(AddToCartReq::PATH, AddToCartReq { product_id: 1 }).await;
        flux.emit(ClearCartReq::PATH, ClearCartReq).await;

        assert!(cart_state(&app).is_empty());
        assert!(app.context().cart.is_empty());
    }

    #[tokio::test]
    async fn cart_survives_restart() {
        let base = testing::catalog_server(testing::products_json()).await;
        let dir = tempfile::tempdir().unwrap();
        let config = testing::config(&base);
        let path = dir.path().join("cart.redb");
        {
            let kv = std::sync::Arc::new(storefront_kv::RedbStore::open(&path).unwrap());
            let app = testing::app_with(&config, kv);
            app.start("/cart").await;
            app.flux().emit(AddToCartReq::PATH, AddToCartReq { product_id: 1 }).await;
            app.flux().emit(AddToCartReq::PATH, AddToCartReq { product_id: 2 }).await;
        }

        let kv = std::sync::Arc::new(storefront_kv::RedbStore::open(&path).unwrap());
        let app = testing::app_with(&config, kv);
        app.start("/cart").await;
        let cart = cart_state(&app);
        assert_eq!(
            cart.items.iter().map(|i| (i.product.id, i.quantity)).collect::<Vec<_>>(),
            vec![(1, 1), (2, 1)]
        );
    }
}
