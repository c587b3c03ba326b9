use thiserror::Error;

#[derive(Error, Debug)]
pub enum KVError {
    #[error("storage error: {0}")]
    Storage(String),
}

impl KVError {
    pub(crate) fn storage(err: impl std::fmt::Display) -> Self {
        KVError::Storage(err.to_string())
    }
}
