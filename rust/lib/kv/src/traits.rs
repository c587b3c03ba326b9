use crate::error::KVError;

/// Byte-oriented key/value storage.
///
/// Keys are short, fixed strings (`cart`). Values are opaque bytes; callers
/// own the encoding.
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Overwrite the value stored at `key`.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;
}
