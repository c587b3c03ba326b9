//! Durable key/value storage for the storefront.
//!
//! The cart is the only state that survives a restart. It is written as a
//! single JSON blob under one key, so the storage contract is deliberately
//! small: read a key, overwrite a key.

pub mod error;
pub mod memory;
pub mod redb;
pub mod traits;

pub use error::KVError;
pub use memory::MemoryStore;
pub use redb::RedbStore;
pub use traits::KVStore;
