use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use crate::router::{Payload, Router};
use crate::store::StateStore;
use crate::value::{StateValue, SubscriptionId};

/// Flux: the state engine handle a rendering surface talks to.
///
/// ```ignore
/// let flux = Flux::new();
///
/// flux.on_typed::<AddToCartReq, _, _>("cart/add", |req, store| async move {
///     store.set("cart/state", ...);
/// });
///
/// flux.subscribe("cart/#", |path, value| {
///     println!("{} changed", path);
/// });
///
/// flux.emit("cart/add", AddToCartReq { product_id: 3 }).await;
/// let cart = flux.get("cart/state").unwrap();
/// ```
pub struct Flux {
    store: Arc<StateStore>,
    router: Router,
}

impl Flux {
    pub fn new() -> Self {
        Self {
            store: Arc::new(StateStore::new()),
            router: Router::new(),
        }
    }

    // ====================================================================
    // State: read
    // ====================================================================

    /// Read the state value at a path (Arc clone, no data copy).
    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.store.get(path)
    }

    /// Typed read, cloned out of the shared value.
    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.store.get_as(path)
    }

    /// Entries strictly below `prefix`, ordered by path.
    pub fn scan(&self, prefix: &str) -> Vec<(String, StateValue)> {
        self.store.scan(prefix)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.store.contains(path)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    // ====================================================================
    // Requests
    // ====================================================================

    /// Emit a request and wait for every matching handler to finish.
    ///
    /// No matching handler is a silent no-op.
    pub async fn emit<T: Any + Send + Sync>(&self, path: &str, payload: T) {
        self.router
            .dispatch(path, Arc::new(payload), Arc::clone(&self.store))
            .await;
    }

    /// Register an untyped async handler for a path pattern.
    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Payload, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.router.on(pattern, handler);
    }

    /// Register an async handler that receives its payload as `Arc<R>`.
    pub fn on_typed<R, F, Fut>(&self, pattern: &str, handler: F)
    where
        R: Any + Send + Sync,
        F: Fn(Arc<R>, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.router.on_typed(pattern, handler);
    }

    /// Whether any handler would receive `path`.
    pub fn has_handler(&self, path: &str) -> bool {
        self.router.matches(path)
    }

    // ====================================================================
    // Subscriptions
    // ====================================================================

    /// Subscribe to state changes; the handler runs on the writer's thread.
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        self.store.subscribe(pattern, handler)
    }

    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) {
        self.store.unsubscribe(pattern, id);
    }

    /// The underlying store, for handlers and tests that write state directly.
    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }
}

impl Default for Flux {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct CartBadge(u32);

    struct BumpReq {
        by: u32,
    }

    fn counter_app() -> Flux {
        let flux = Flux::new();
        flux.on_typed::<BumpReq, _, _>("nav/bump", |req, store| async move {
            let current = store.get_as::<CartBadge>("nav/badge").unwrap_or(CartBadge(0));
            store.set("nav/badge", CartBadge(current.0 + req.by));
        });
        flux
    }

    #[test]
    fn new_flux_is_empty() {
        let flux = Flux::default();
        assert!(flux.is_empty());
        assert!(flux.get("app/route").is_none());
    }

    #[tokio::test]
    async fn emit_updates_state() {
        let flux = counter_app();
        flux.emit("nav/bump", BumpReq { by: 2 }).await;
        flux.emit("nav/bump", BumpReq { by: 3 }).await;

        assert_eq!(flux.get_as::<CartBadge>("nav/badge"), Some(CartBadge(5)));
        assert_eq!(flux.len(), 1);
    }

    #[tokio::test]
    async fn subscribers_see_emitted_changes() {
        let flux = counter_app();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let id = flux.subscribe("nav/#", move |_, value| {
            if let Some(badge) = value.cloned::<CartBadge>() {
                sink.lock().unwrap().push(badge.0);
            }
        });

        flux.emit("nav/bump", BumpReq { by: 1 }).await;
        flux.emit("nav/bump", BumpReq { by: 1 }).await;
        flux.unsubscribe("nav/#", id);
        flux.emit("nav/bump", BumpReq { by: 1 }).await;

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn emit_without_handler_is_silent() {
        let flux = Flux::new();
        flux.emit("nowhere", ()).await;
        assert!(flux.is_empty());
        assert!(!flux.has_handler("nowhere"));
    }

    #[test]
    fn scan_and_contains_delegate_to_store() {
        let flux = Flux::new();
        flux.store().set("showcase/previews/items/1", CartBadge(1));
        flux.store().set("showcase/previews/items/2", CartBadge(2));

        assert_eq!(flux.scan("showcase/previews/items").len(), 2);
        assert!(flux.contains("showcase/previews/items/1"));
    }
}
