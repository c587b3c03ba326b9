use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::store::StateStore;
use crate::trie::Trie;

/// A boxed, `Send`-able future returned by request handlers.
pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Type-erased request payload.
pub type Payload = Arc<dyn Any + Send + Sync>;

/// Owned arguments so the returned future can be `'static`:
/// matched path, payload, state store.
type ErasedHandler = Arc<dyn Fn(String, Payload, Arc<StateStore>) -> BoxFuture + Send + Sync>;

/// Request router: maps path patterns to async handlers via trie matching.
///
/// Several handlers may match one path (via wildcards); they run
/// sequentially in match order.
pub struct Router {
    trie: Trie<ErasedHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self { trie: Trie::new() }
    }

    /// Register an async handler for a path pattern (`+` / `#` allowed).
    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Payload, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handler: ErasedHandler = Arc::new(
            move |path: String, payload: Payload, store: Arc<StateStore>| -> BoxFuture {
                Box::pin(handler(path, payload, store))
            },
        );
        self.trie.insert(pattern, handler);
    }

    /// Register a handler that only accepts payloads of type `R`.
    ///
    /// A payload of any other type is dropped with a warning instead of
    /// reaching the handler.
    pub fn on_typed<R, F, Fut>(&self, pattern: &str, handler: F)
    where
        R: Any + Send + Sync,
        F: Fn(Arc<R>, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handler = Arc::new(handler);
        self.on(pattern, move |path, payload: Payload, store| {
            let handler = handler.clone();
            async move {
                match payload.downcast::<R>() {
                    Ok(req) => handler(req, store).await,
                    Err(_) => warn!(
                        "request {} carried a payload of the wrong type (expected {})",
                        path,
                        std::any::type_name::<R>()
                    ),
                }
            }
        });
    }

    /// Dispatch a request to every matching handler. No match is a no-op.
    pub async fn dispatch(&self, path: &str, payload: Payload, store: Arc<StateStore>) {
        let handlers = self.trie.match_topic(path);
        if handlers.is_empty() {
            debug!("request {} has no handler", path);
            return;
        }
        for handler in handlers {
            handler(path.to_string(), Arc::clone(&payload), Arc::clone(&store)).await;
        }
    }

    /// Whether a handler is registered under exactly `pattern`.
    pub fn has_handler(&self, pattern: &str) -> bool {
        self.trie.has_pattern(pattern)
    }

    /// Whether any handler would receive `path`.
    pub fn matches(&self, path: &str) -> bool {
        !self.trie.match_topic(path).is_empty()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
