use storefront_kv::KVError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartError {
    /// The cart changed in memory but could not be written back.
    #[error("cart storage: {0}")]
    Storage(#[from] KVError),

    #[error("cart encode: {0}")]
    Encode(#[from] serde_json::Error),
}
