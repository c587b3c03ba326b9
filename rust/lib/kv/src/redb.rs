use std::path::Path;

use redb::{Database, ReadableTable, TableDefinition};
use tracing::debug;

use crate::error::KVError;
use crate::traits::KVStore;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("storefront");

/// KVStore backed by redb, a pure-Rust embedded database. Every `set` is its
/// own committed write transaction, so a value is durable once `set` returns.
pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open or create the database file at `path`, creating parent
    /// directories as needed.
    pub fn open(path: &Path) -> Result<Self, KVError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(KVError::storage)?;
            }
        }
        let db = Database::create(path).map_err(KVError::storage)?;

        // Create the table up front so reads on a fresh file don't fail.
        let txn = db.begin_write().map_err(KVError::storage)?;
        txn.open_table(TABLE).map_err(KVError::storage)?;
        txn.commit().map_err(KVError::storage)?;

        debug!("RedbStore: opened {}", path.display());
        Ok(Self { db })
    }
}

impl KVStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        let txn = self.db.begin_read().map_err(KVError::storage)?;
        let table = txn.open_table(TABLE).map_err(KVError::storage)?;
        let value = table.get(key).map_err(KVError::storage)?;
        Ok(value.map(|v| v.value().to_vec()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        let txn = self.db.begin_write().map_err(KVError::storage)?;
        {
            let mut table = txn.open_table(TABLE).map_err(KVError::storage)?;
            table.insert(key, value).map_err(KVError::storage)?;
        }
        txn.commit().map_err(KVError::storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_database_has_no_cart() {
        let dir = tempfile::tempdir().unwrap();
        let store = RedbStore::open(&dir.path().join("cart.redb")).unwrap();
        assert!(store.get("cart").unwrap().is_none());
    }

    #[test]
    fn value_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.redb");
        {
            let store = RedbStore::open(&path).unwrap();
            store.set("cart", br#"[{"id":1}]"#).unwrap();
        }
        let store = RedbStore::open(&path).unwrap();
        assert_eq!(
            store.get("cart").unwrap().as_deref(),
            Some(&br#"[{"id":1}]"#[..])
        );
    }

    #[test]
    fn open_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/state/cart.redb");
        let store = RedbStore::open(&path).unwrap();
        store.set("cart", b"[]").unwrap();
        assert!(path.exists());
    }
}
