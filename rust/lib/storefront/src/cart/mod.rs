//! Cart store: the only durable state of the storefront.
//!
//! `CartStore` is an explicit handle shared by `Arc`. Every mutation
//! rewrites the in-memory cart, persists the full line-item list under
//! [`CART_KEY`], then notifies subscribers with the new [`CartSnapshot`].

mod error;
mod snapshot;

pub use error::CartError;
pub use snapshot::{CartLineItem, CartSnapshot};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use storefront_catalog::{Product, ProductId};
use storefront_kv::KVStore;
use tracing::{debug, warn};

/// Storage key holding the JSON line-item sequence.
pub const CART_KEY: &str = "cart";

/// Callback invoked after every cart change.
pub type CartListener = Arc<dyn Fn(&CartSnapshot) + Send + Sync>;

/// Identifies one cart subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CartSubscription(u64);

pub struct CartStore {
    kv: Arc<dyn KVStore>,
    state: RwLock<CartSnapshot>,
    listeners: RwLock<Vec<(CartSubscription, CartListener)>>,
    next_id: AtomicU64,
}

impl CartStore {
    /// Open the cart persisted in `kv`.
    ///
    /// A missing key, an unreadable store or a payload that does not parse
    /// all open as an empty cart.
    pub fn open(kv: Arc<dyn KVStore>) -> Self {
        let items = match kv.get(CART_KEY) {
            Ok(Some(bytes)) => match serde_json::from_slice::<Vec<CartLineItem>>(&bytes) {
                Ok(items) => normalize(items),
                Err(e) => {
                    warn!("stored cart is malformed, starting empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("reading stored cart failed, starting empty: {}", e);
                Vec::new()
            }
        };
        debug!("cart opened with {} line items", items.len());
        Self {
            kv,
            state: RwLock::new(CartSnapshot::from_items(items)),
            listeners: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    // ====================================================================
    // Mutations
    // ====================================================================

    /// Add one unit of `product`: bump the existing line or append a new one.
    pub fn add_to_cart(&self, product: &Product) -> Result<(), CartError> {
        self.mutate("add", |items| {
            match items.iter_mut().find(|i| i.product.id == product.id) {
                Some(line) if line.quantity == u32::MAX => false,
                Some(line) => {
                    line.quantity += 1;
                    true
                }
                None => {
                    items.push(CartLineItem::new(product.clone(), 1));
                    true
                }
            }
        })
    }

    /// Drop the line for `id`. Absent id is a no-op.
    pub fn remove_from_cart(&self, id: ProductId) -> Result<(), CartError> {
        self.mutate("remove", |items| {
            let before = items.len();
            items.retain(|i| i.product.id != id);
            items.len() != before
        })
    }

    /// Overwrite the quantity of the line for `id`. A quantity below 1 or an
    /// absent id is a no-op.
    pub fn update_quantity(&self, id: ProductId, quantity: u32) -> Result<(), CartError> {
        if quantity < 1 {
            return Ok(());
        }
        self.mutate("update", |items| {
            match items.iter_mut().find(|i| i.product.id == id) {
                Some(line) if line.quantity != quantity => {
                    line.quantity = quantity;
                    true
                }
                _ => false,
            }
        })
    }

    pub fn clear_cart(&self) -> Result<(), CartError> {
        self.mutate("clear", |items| {
            items.clear();
            true
        })
    }

    // ====================================================================
    // Reads
    // ====================================================================

    pub fn snapshot(&self) -> CartSnapshot {
        self.state.read().unwrap().clone()
    }

    pub fn items(&self) -> Vec<CartLineItem> {
        self.state.read().unwrap().items.clone()
    }

    /// Σ price × quantity.
    pub fn total(&self) -> f64 {
        self.state.read().unwrap().total
    }

    /// Σ quantity (the navigation badge).
    pub fn item_count(&self) -> u32 {
        self.state.read().unwrap().item_count
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().unwrap().items.is_empty()
    }

    pub fn line(&self, id: ProductId) -> Option<CartLineItem> {
        self.state.read().unwrap().line(id).cloned()
    }

    // ====================================================================
    // Subscriptions
    // ====================================================================

    /// Observe cart changes. The listener runs on the mutating thread after
    /// the cart has been persisted (or the persist attempt failed).
    pub fn subscribe<F>(&self, listener: F) -> CartSubscription
    where
        F: Fn(&CartSnapshot) + Send + Sync + 'static,
    {
        let id = CartSubscription(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().unwrap().push((id, Arc::new(listener)));
        id
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&self, id: CartSubscription) -> bool {
        let mut listeners = self.listeners.write().unwrap();
        let before = listeners.len();
        listeners.retain(|(sid, _)| *sid != id);
        listeners.len() != before
    }

    // ====================================================================
    // Internals
    // ====================================================================

    /// Apply `change` to the line items. `change` returns false when it left
    /// the cart as it was; then nothing is persisted or notified.
    ///
    /// The state lock is held across the write so durable snapshots land in
    /// mutation order.
    fn mutate<F>(&self, op: &str, change: F) -> Result<(), CartError>
    where
        F: FnOnce(&mut Vec<CartLineItem>) -> bool,
    {
        let (snapshot, persisted) = {
            let mut state = self.state.write().unwrap();
            let mut items = std::mem::take(&mut state.items);
            let changed = change(&mut items);
            *state = CartSnapshot::from_items(items);
            if !changed {
                return Ok(());
            }
            let persisted = self.persist(&state.items);
            (state.clone(), persisted)
        };

        match &persisted {
            Ok(()) => debug!(
                "cart {}: {} lines, {} units, total {:.2}",
                op,
                snapshot.items.len(),
                snapshot.item_count,
                snapshot.total
            ),
            Err(e) => warn!("cart {} applied but not persisted: {}", op, e),
        }
        self.notify(&snapshot);
        persisted
    }

    fn persist(&self, items: &[CartLineItem]) -> Result<(), CartError> {
        let bytes = serde_json::to_vec(items)?;
        self.kv.set(CART_KEY, &bytes)?;
        Ok(())
    }

    fn notify(&self, snapshot: &CartSnapshot) {
        // Clone out so a listener may (un)subscribe without deadlocking.
        let listeners: Vec<CartListener> = self
            .listeners
            .read()
            .unwrap()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener(snapshot);
        }
    }
}

/// Restore the one-line-per-id invariant on data read back from storage:
/// duplicate ids are merged (saturating at `u32::MAX`) and zero quantities
/// dropped.
fn normalize(stored: Vec<CartLineItem>) -> Vec<CartLineItem> {
    let mut items: Vec<CartLineItem> = Vec::with_capacity(stored.len());
    for line in stored {
        if line.quantity == 0 {
            warn!("dropping stored cart line {} with zero quantity", line.product.id);
            continue;
        }
        match items.iter_mut().find(|i| i.product.id == line.product.id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(line.quantity)
            }
            None => items.push(line),
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use storefront_catalog::ImageSet;
    use storefront_kv::{KVError, MemoryStore, RedbStore};

    fn product(id: ProductId, price: f64) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            description: String::new(),
            category: "misc".into(),
            price,
            images: ImageSet::One(format!("/images/{}.png", id)),
            model_path: None,
            featured: None,
        }
    }

    fn memory_cart() -> (Arc<MemoryStore>, CartStore) {
        let kv = Arc::new(MemoryStore::new());
        let cart = CartStore::open(kv.clone());
        (kv, cart)
    }

    /// Store whose writes always fail.
    struct BrokenStore;

    impl KVStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, KVError> {
            Err(KVError::Storage("disk gone".into()))
        }

        fn set(&self, _key: &str, _value: &[u8]) -> Result<(), KVError> {
            Err(KVError::Storage("disk gone".into()))
        }
    }

    fn quantities(cart: &CartStore) -> Vec<(ProductId, u32)> {
        cart.items()
            .iter()
            .map(|i| (i.product.id, i.quantity))
            .collect()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    #[test]
    fn adding_same_product_twice_bumps_quantity() {
        let (_, cart) = memory_cart();
        let mug = product(1, 8.0);

        cart.add_to_cart(&mug).unwrap();
        cart.add_to_cart(&mug).unwrap();

        assert_eq!(quantities(&cart), vec![(1, 2)]);
        assert_eq!(cart.total(), 16.0);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn lines_keep_insertion_order() {
        let (_, cart) = memory_cart();
        cart.add_to_cart(&product(3, 1.0)).unwrap();
        cart.add_to_cart(&product(1, 1.0)).unwrap();
        cart.add_to_cart(&product(3, 1.0)).unwrap();
        cart.add_to_cart(&product(2, 1.0)).unwrap();

        assert_eq!(quantities(&cart), vec![(3, 2), (1, 1), (2, 1)]);
    }

    #[test]
    fn remove_drops_line_and_ignores_unknown() {
        let (_, cart) = memory_cart();
        cart.add_to_cart(&product(1, 8.0)).unwrap();
        cart.add_to_cart(&product(2, 2.5)).unwrap();

        cart.remove_from_cart(1).unwrap();
        assert_eq!(quantities(&cart), vec![(2, 1)]);

        cart.remove_from_cart(99).unwrap();
        assert_eq!(quantities(&cart), vec![(2, 1)]);
        assert_eq!(cart.total(), 2.5);
    }

    #[test]
    fn update_quantity_below_one_is_noop() {
        let (_, cart) = memory_cart();
        cart.add_to_cart(&product(1, 8.0)).unwrap();
        cart.update_quantity(1, 3).unwrap();
        cart.update_quantity(1, 0).unwrap();
        cart.update_quantity(42, 5).unwrap();

        assert_eq!(quantities(&cart), vec![(1, 3)]);
        assert_eq!(cart.total(), 24.0);
    }

    #[test]
    fn clear_empties_cart() {
        let (_, cart) = memory_cart();
        cart.add_to_cart(&product(1, 8.0)).unwrap();
        cart.clear_cart().unwrap();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0.0);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn total_tracks_every_mutation() {
        let (_, cart) = memory_cart();
        let a = product(1, 19.99);
        let b = product(2, 5.25);
        let expected = |cart: &CartStore| -> f64 {
            cart.items()
                .iter()
                .map(|i| i.product.price * i.quantity as f64)
                .sum()
        };

        cart.add_to_cart(&a).unwrap();
        assert_eq!(cart.total(), expected(&cart));
        cart.add_to_cart(&b).unwrap();
        cart.add_to_cart(&b).unwrap();
        assert_eq!(cart.total(), expected(&cart));
        cart.update_quantity(1, 4).unwrap();
        assert_eq!(cart.total(), expected(&cart));
        cart.remove_from_cart(2).unwrap();
        assert_eq!(cart.total(), expected(&cart));
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    #[test]
    fn every_mutation_is_persisted() {
        let (kv, cart) = memory_cart();
        cart.add_to_cart(&product(1, 8.0)).unwrap();
        cart.add_to_cart(&product(1, 8.0)).unwrap();

        let stored: Vec<CartLineItem> =
            serde_json::from_slice(&kv.get(CART_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].quantity, 2);

        cart.clear_cart().unwrap();
        assert_eq!(kv.get(CART_KEY).unwrap().unwrap(), b"[]");
    }

    #[test]
    fn stored_lines_are_flat_product_records() {
        let (kv, cart) = memory_cart();
        cart.add_to_cart(&product(7, 3.0)).unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&kv.get(CART_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(raw[0]["id"], 7);
        assert_eq!(raw[0]["title"], "Product 7");
        assert_eq!(raw[0]["images"], "/images/7.png");
        assert_eq!(raw[0]["quantity"], 1);
    }

    #[test]
    fn reopen_restores_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.redb");
        {
            let cart = CartStore::open(Arc::new(RedbStore::open(&path).unwrap()));
            cart.add_to_cart(&product(1, 8.0)).unwrap();
            cart.add_to_cart(&product(2, 2.0)).unwrap();
            cart.update_quantity(2, 5).unwrap();
        }

        let cart = CartStore::open(Arc::new(RedbStore::open(&path).unwrap()));
        assert_eq!(quantities(&cart), vec![(1, 1), (2, 5)]);
        assert_eq!(cart.total(), 18.0);
    }

    #[test]
    fn malformed_payload_opens_empty() {
        let kv = Arc::new(MemoryStore::new());
        kv.set(CART_KEY, b"{not json").unwrap();

        let cart = CartStore::open(kv);
        assert!(cart.is_empty());
    }

    #[test]
    fn unreadable_store_opens_empty() {
        let cart = CartStore::open(Arc::new(BrokenStore));
        assert!(cart.is_empty());
    }

    #[test]
    fn stored_duplicates_are_merged() {
        let kv = Arc::new(MemoryStore::new());
        kv.set(
            CART_KEY,
            br#"[
                {"id": 1, "title": "Mug", "price": 8, "quantity": 1},
                {"id": 2, "title": "Lamp", "price": 40, "quantity": 0},
                {"id": 1, "title": "Mug", "price": 8, "quantity": 2}
            ]"#,
        )
        .unwrap();

        let cart = CartStore::open(kv);
        assert_eq!(quantities(&cart), vec![(1, 3)]);
    }

    #[test]
    fn stored_quantities_saturate_when_merged() {
        let kv = Arc::new(MemoryStore::new());
        kv.set(
            CART_KEY,
            br#"[
                {"id": 1, "title": "Mug", "price": 1, "quantity": 4294967295},
                {"id": 2, "title": "Lamp", "price": 1, "quantity": 1},
                {"id": 1, "title": "Mug", "price": 1, "quantity": 7}
            ]"#,
        )
        .unwrap();

        let cart = CartStore::open(kv);
        assert_eq!(quantities(&cart), vec![(1, u32::MAX), (2, 1)]);
        assert_eq!(cart.item_count(), u32::MAX);
    }

    #[test]
    fn adding_to_a_full_line_is_noop() {
        let (kv, cart) = memory_cart();
        let mug = product(1, 1.0);
        cart.add_to_cart(&mug).unwrap();
        cart.update_quantity(1, u32::MAX).unwrap();
        let stored = kv.get(CART_KEY).unwrap();

        let count = Arc::new(Mutex::new(0));
        let sink = count.clone();
        cart.subscribe(move |_| *sink.lock().unwrap() += 1);

        cart.add_to_cart(&mug).unwrap();
        assert_eq!(quantities(&cart), vec![(1, u32::MAX)]);
        assert_eq!(*count.lock().unwrap(), 0);
        assert_eq!(kv.get(CART_KEY).unwrap(), stored);

        cart.add_to_cart(&product(2, 1.0)).unwrap();
        assert_eq!(cart.item_count(), u32::MAX);
    }

    #[test]
    fn persist_failure_keeps_memory_and_notifies() {
        let cart = CartStore::open(Arc::new(BrokenStore));
        let notified = Arc::new(Mutex::new(0));
        let sink = notified.clone();
        cart.subscribe(move |_| *sink.lock().unwrap() += 1);

        let err = cart.add_to_cart(&product(1, 8.0)).unwrap_err();
        assert!(matches!(err, CartError::Storage(_)));
        assert_eq!(quantities(&cart), vec![(1, 1)]);
        assert_eq!(*notified.lock().unwrap(), 1);
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    #[test]
    fn subscribers_receive_snapshots() {
        let (_, cart) = memory_cart();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let id = cart.subscribe(move |snap| sink.lock().unwrap().push(snap.item_count));

        cart.add_to_cart(&product(1, 1.0)).unwrap();
        cart.add_to_cart(&product(1, 1.0)).unwrap();
        assert!(cart.unsubscribe(id));
        cart.clear_cart().unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
        assert!(!cart.unsubscribe(id));
    }

    #[test]
    fn noop_mutations_do_not_notify() {
        let (_, cart) = memory_cart();
        cart.add_to_cart(&product(1, 1.0)).unwrap();

        let count = Arc::new(Mutex::new(0));
        let sink = count.clone();
        cart.subscribe(move |_| *sink.lock().unwrap() += 1);

        cart.update_quantity(1, 0).unwrap();
        cart.update_quantity(1, 1).unwrap();
        cart.remove_from_cart(5).unwrap();
        assert_eq!(*count.lock().unwrap(), 0);
    }

    #[test]
    fn listener_may_read_the_store() {
        let (_, cart) = memory_cart();
        let cart = Arc::new(cart);
        let reader = cart.clone();
        let observed = Arc::new(Mutex::new(None));
        let sink = observed.clone();
        cart.subscribe(move |_| *sink.lock().unwrap() = Some(reader.total()));

        cart.add_to_cart(&product(1, 4.5)).unwrap();
        assert_eq!(*observed.lock().unwrap(), Some(4.5));
    }
}
