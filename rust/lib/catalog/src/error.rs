/// Catalog fetch failure. Every variant renders a human-readable message.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("decode: {0}")]
    Decode(String),

    #[error("product {0} not found")]
    NotFound(u64),

    #[error("no products available")]
    NoProducts,

    #[error("invalid API base '{0}'")]
    InvalidBase(String),
}

impl CatalogError {
    /// True when the server answered but the body could not be understood.
    pub fn is_parse(&self) -> bool {
        matches!(self, CatalogError::Decode(_))
    }
}
