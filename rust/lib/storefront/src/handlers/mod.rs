//! Handler implementations and Flux wiring.
//!
//! `register_handlers` routes every request path to its handler and mirrors
//! the cart store into the state engine.

pub mod app;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod showcase;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use storefront_catalog::{CatalogClient, CatalogError, ProductId};
use storefront_flux::{Flux, StateStore};
use storefront_kv::KVStore;

use crate::cart::{CartSnapshot, CartStore};
use crate::config::{CheckoutTiming, StorefrontConfig};
use crate::lifecycle::ViewLifecycle;
use crate::request::*;
use crate::scene::{GltfSceneView, SceneHandle, SceneView};

/// Everything handlers need beyond the state store.
pub struct StorefrontContext {
    pub catalog: CatalogClient,
    pub cart: Arc<CartStore>,
    pub scene: Arc<dyn SceneView>,
    pub timing: CheckoutTiming,
    pub lifecycle: ViewLifecycle,
    /// Scene handles owned by the landing view, by product.
    previews: Mutex<HashMap<ProductId, SceneHandle>>,
}

impl StorefrontContext {
    pub fn new(
        catalog: CatalogClient,
        cart: Arc<CartStore>,
        scene: Arc<dyn SceneView>,
        timing: CheckoutTiming,
    ) -> Self {
        Self {
            catalog,
            cart,
            scene,
            timing,
            lifecycle: ViewLifecycle::new(),
            previews: Mutex::new(HashMap::new()),
        }
    }

    /// Wire the bundled collaborators: HTTP catalog, glTF scenes fetched
    /// through the same client, and a cart persisted in `kv`.
    pub fn from_config(
        config: &StorefrontConfig,
        kv: Arc<dyn KVStore>,
    ) -> Result<Self, CatalogError> {
        let catalog = CatalogClient::new(&config.api_base)?;
        let scene = GltfSceneView::new(Arc::new(catalog.clone()), config.scene.clone());
        Ok(Self::new(
            catalog,
            Arc::new(CartStore::open(kv)),
            Arc::new(scene),
            config.checkout.clone(),
        ))
    }

    /// Scene handles currently held by the landing view.
    pub fn preview_handles(&self) -> Vec<(ProductId, SceneHandle)> {
        let mut handles: Vec<_> = self
            .previews
            .lock()
            .unwrap()
            .iter()
            .map(|(id, h)| (*id, *h))
            .collect();
        handles.sort();
        handles
    }
}

/// Register all handlers with a Flux instance.
pub fn register_handlers(flux: &Flux, ctx: Arc<StorefrontContext>) {
    // cart store -> cart/state (+ checkout summary)
    {
        let store = Arc::clone(flux.store());
        ctx.cart.subscribe(move |snapshot: &CartSnapshot| {
            store.set(CartSnapshot::PATH, snapshot.clone());
            checkout::follow_cart(&store, snapshot);
        });
    }

    // app/initialize
    {
        let ctx = ctx.clone();
        flux.on_typed::<InitializeReq, _, _>(InitializeReq::PATH, move |req, store| {
            let ctx = ctx.clone();
            async move {
                app::handle_initialize(&req, &store, &ctx).await;
            }
        });
    }

    // app/navigate
    {
        let ctx = ctx.clone();
        flux.on_typed::<NavigateReq, _, _>(NavigateReq::PATH, move |req, store| {
            let ctx = ctx.clone();
            async move {
                app::handle_navigate(&req, &store, &ctx).await;
            }
        });
    }

    // catalog/load
    {
        let ctx = ctx.clone();
        flux.on(LoadCatalogReq::PATH, move |_, _, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                catalog::handle_load(&store, &ctx).await;
            }
        });
    }

    // catalog/filter
    flux.on_typed::<FilterCatalogReq, _, _>(FilterCatalogReq::PATH, |req, store| async move {
        catalog::handle_filter(&req, &store).await;
    });

    // catalog/open
    {
        let ctx = ctx.clone();
        flux.on_typed::<OpenProductReq, _, _>(OpenProductReq::PATH, move |req, store| {
            let ctx = ctx.clone();
            async move {
                catalog::handle_open(&req, &store, &ctx).await;
            }
        });
    }

    // catalog/add-to-cart
    {
        let ctx = ctx.clone();
        flux.on_typed::<CatalogAddToCartReq, _, _>(CatalogAddToCartReq::PATH, move |req, store| {
            let ctx = ctx.clone();
            async move {
                catalog::handle_add_to_cart(&req, &store, &ctx).await;
            }
        });
    }

    // showcase/load
    {
        let ctx = ctx.clone();
        flux.on(LoadShowcaseReq::PATH, move |_, _, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                showcase::handle_load(&store, &ctx).await;
            }
        });
    }

    // showcase/add-to-cart
    {
        let ctx = ctx.clone();
        flux.on_typed::<ShowcaseAddToCartReq, _, _>(ShowcaseAddToCartReq::PATH, move |req, store| {
            let ctx = ctx.clone();
            async move {
                showcase::handle_add_to_cart(&req, &store, &ctx).await;
            }
        });
    }

    // cart/add
    {
        let ctx = ctx.clone();
        flux.on_typed::<AddToCartReq, _, _>(AddToCartReq::PATH, move |req, store| {
            let ctx = ctx.clone();
            async move {
                cart::handle_add(&req, &store, &ctx).await;
            }
        });
    }

    // cart/remove
    {
        let ctx = ctx.clone();
        flux.on_typed::<RemoveFromCartReq, _, _>(RemoveFromCartReq::PATH, move |req, _| {
            let ctx = ctx.clone();
            async move {
                cart::handle_remove(&req, &ctx).await;
            }
        });
    }

    // cart/update-quantity
    {
        let ctx = ctx.clone();
        flux.on_typed::<UpdateQuantityReq, _, _>(UpdateQuantityReq::PATH, move |req, _| {
            let ctx = ctx.clone();
            async move {
                cart::handle_update_quantity(&req, &ctx).await;
            }
        });
    }

    // cart/increment
    {
        let ctx = ctx.clone();
        flux.on_typed::<IncrementQuantityReq, _, _>(IncrementQuantityReq::PATH, move |req, _| {
            let ctx = ctx.clone();
            async move {
                cart::handle_increment(&req, &ctx).await;
            }
        });
    }

    // cart/decrement
    {
        let ctx = ctx.clone();
        flux.on_typed::<DecrementQuantityReq, _, _>(DecrementQuantityReq::PATH, move |req, _| {
            let ctx = ctx.clone();
            async move {
                cart::handle_decrement(&req, &ctx).await;
            }
        });
    }

    // cart/clear
    {
        let ctx = ctx.clone();
        flux.on(ClearCartReq::PATH, move |_, _, _: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                cart::handle_clear(&ctx).await;
            }
        });
    }

    // checkout/update-field
    flux.on_typed::<UpdateFieldReq, _, _>(UpdateFieldReq::PATH, |req, store| async move {
        checkout::handle_update_field(&req, &store).await;
    });

    // checkout/submit
    flux.on(SubmitOrderReq::PATH, move |_, _, store: Arc<StateStore>| {
        let ctx = ctx.clone();
        async move {
            checkout::handle_submit(&store, &ctx).await;
        }
    });
}
