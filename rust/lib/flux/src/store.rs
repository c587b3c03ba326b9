use std::any::Any;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::trie::Trie;
use crate::value::{StateValue, SubscriptionId};

/// Callback type for state change notifications.
pub type ChangeHandler = Arc<dyn Fn(&str, &StateValue) + Send + Sync>;

/// Per-path state store with trie-routed change notifications.
///
/// - `set(path, value)` stores a value and notifies every matching subscriber.
/// - `get(path)` / `get_as::<T>(path)` read the current value.
/// - `scan(prefix)` lists children under a prefix, ordered by path.
/// - `subscribe(pattern, handler)` / `unsubscribe(pattern, id)`.
pub struct StateStore {
    values: RwLock<BTreeMap<String, StateValue>>,
    handlers: Trie<HandlerEntry>,
    next_id: AtomicU64,
}

#[derive(Clone)]
struct HandlerEntry {
    id: SubscriptionId,
    handler: ChangeHandler,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
            handlers: Trie::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Store a typed value at `path` and notify matching subscribers.
    pub fn set<T: Any + Send + Sync>(&self, path: &str, value: T) {
        self.set_value(path, StateValue::new(value));
    }

    /// Store a pre-built value at `path` and notify matching subscribers.
    ///
    /// The write lock is released before handlers run, so a handler may
    /// read (or write) the store.
    pub fn set_value(&self, path: &str, value: StateValue) {
        self.values
            .write()
            .unwrap()
            .insert(path.to_string(), value.clone());
        for entry in self.handlers.match_topic(path) {
            (entry.handler)(path, &value);
        }
    }

    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.values.read().unwrap().get(path).cloned()
    }

    /// Typed read: the value at `path` cloned out, or `None` when absent or
    /// of a different type.
    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.get(path).and_then(|v| v.cloned::<T>())
    }

    /// Remove the value at `path`. Does NOT notify subscribers.
    pub fn remove(&self, path: &str) -> Option<StateValue> {
        self.values.write().unwrap().remove(path)
    }

    /// Entries strictly below `prefix` (paths starting with `{prefix}/`),
    /// ordered by path.
    pub fn scan(&self, prefix: &str) -> Vec<(String, StateValue)> {
        let values = self.values.read().unwrap();
        let start = format!("{}/", prefix);
        values
            .range(start.clone()..)
            .take_while(|(k, _)| k.starts_with(&start))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Remove every entry strictly below `prefix`. Returns how many were
    /// removed. Does NOT notify subscribers.
    pub fn remove_prefix(&self, prefix: &str) -> usize {
        let start = format!("{}/", prefix);
        let mut values = self.values.write().unwrap();
        let before = values.len();
        values.retain(|k, _| !k.starts_with(&start));
        before - values.len()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.values.read().unwrap().contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.values.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Subscribe to changes on paths matching `pattern`.
    ///
    /// The handler runs synchronously on the thread that calls `set`.
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers.insert(
            pattern,
            HandlerEntry {
                id,
                handler: Arc::new(handler),
            },
        );
        id
    }

    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) {
        self.handlers.remove(pattern, |entry| entry.id == id);
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
