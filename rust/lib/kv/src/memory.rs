use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::KVError;
use crate::traits::KVStore;

/// In-process store. Nothing survives the process; used for ephemeral
/// sessions (`--ephemeral`) and tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KVStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_is_none() {
        let store = MemoryStore::new();
        assert!(store.get("cart").unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn set_overwrites() {
        let store = MemoryStore::new();
        store.set("cart", b"[]").unwrap();
        store.set("cart", b"[1]").unwrap();

        assert_eq!(store.get("cart").unwrap().as_deref(), Some(&b"[1]"[..]));
        assert_eq!(store.len(), 1);
    }
}
