//! Flux: the storefront's headless state engine.
//!
//! Rust owns every piece of view state; a rendering surface (browser shell,
//! native shell, the CLI) only reads state and emits requests.
//!
//! # Three Primitives
//!
//! - `get(path)`: read state at a path, Arc zero-copy
//! - `emit(path, payload)`: send a request, trie-routed to handler(s)
//! - `subscribe(pattern)`: observe state changes, trie-matched notifications
//!
//! # Path Addressing
//!
//! State and requests share one flat namespace with `/` as separator:
//! - Global: `app/route`, `cart/state`
//! - Views: `catalog/state`, `checkout/state`
//! - Items: `showcase/previews/items/{product_id}`
//!
//! Patterns use MQTT-style wildcards: `+` matches one level, `#` matches
//! any number of trailing levels.
//!
//! # Example
//!
//! ```ignore
//! use storefront_flux::Flux;
//!
//! let app = Flux::new();
//!
//! app.on("catalog/load", |_, _, store| async move {
//!     store.set("catalog/state", CatalogState::loading());
//! });
//!
//! app.subscribe("catalog/#", |path, _value| {
//!     println!("changed: {}", path);
//! });
//!
//! app.emit("catalog/load", ()).await;
//! ```

pub mod app;
pub mod router;
pub mod store;
pub mod trie;
pub mod value;

pub use app::Flux;
pub use router::{BoxFuture, Payload, Router};
pub use store::{ChangeHandler, StateStore};
pub use value::{StateValue, SubscriptionId};
