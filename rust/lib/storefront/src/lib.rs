//! Storefront: headless core of a 3D product shop.
//!
//! Structure:
//! - `cart/`: persistent cart with change notifications
//! - `checkout/`: checkout form model and validation rules
//! - `scene/`: glTF bounds, auto-fit framing, model lifecycle
//! - `state/`: view state types (one path each in the state engine)
//! - `request/`: request types a rendering surface emits
//! - `handlers/`: handler implementations + Flux wiring
//!
//! A surface drives everything through [`Storefront`]:
//!
//! ```ignore
//! let app = Storefront::from_config(&StorefrontConfig::load(&path)?, kv)?;
//! app.start("/?product=3").await;
//! app.flux().emit(AddToCartReq::PATH, AddToCartReq { product_id: 3 }).await;
//! let cart = app.flux().get_as::<CartSnapshot>(CartSnapshot::PATH);
//! ```

pub mod cart;
pub mod checkout;
pub mod config;
pub mod handlers;
pub mod lifecycle;
pub mod request;
pub mod scene;
pub mod state;

use std::sync::Arc;

use storefront_catalog::CatalogError;
use storefront_flux::Flux;
use storefront_kv::KVStore;

pub use config::{CheckoutTiming, ConfigError, StorefrontConfig};
pub use handlers::{StorefrontContext, register_handlers};

use request::{InitializeReq, NavigateReq};
use state::{AppRoute, Route};

/// A state engine with every storefront handler registered.
pub struct Storefront {
    flux: Flux,
    ctx: Arc<StorefrontContext>,
}

impl Storefront {
    pub fn new(ctx: StorefrontContext) -> Self {
        let flux = Flux::new();
        let ctx = Arc::new(ctx);
        register_handlers(&flux, ctx.clone());
        Self { flux, ctx }
    }

    pub fn from_config(
        config: &StorefrontConfig,
        kv: Arc<dyn KVStore>,
    ) -> Result<Self, CatalogError> {
        Ok(Self::new(StorefrontContext::from_config(config, kv)?))
    }

    pub fn flux(&self) -> &Flux {
        &self.flux
    }

    pub fn context(&self) -> &Arc<StorefrontContext> {
        &self.ctx
    }

    /// Publish initial state and mount the view for `location`.
    pub async fn start(&self, location: &str) {
        let req = InitializeReq {
            location: location.to_string(),
        };
        self.flux.emit(InitializeReq::PATH, req).await;
    }

    pub async fn navigate(&self, location: &str) {
        self.flux
            .emit(NavigateReq::PATH, NavigateReq::to(location))
            .await;
    }

    /// Current route, once started.
    pub fn route(&self) -> Option<Route> {
        self.flux.get_as::<AppRoute>(AppRoute::PATH).map(|r| r.0)
    }
}
