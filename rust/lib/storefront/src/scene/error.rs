use thiserror::Error;

/// Why a model could not be presented. Never leaves the scene seam: a
/// failed load turns into a placeholder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("asset fetch failed: {0}")]
    Fetch(String),

    #[error("unreadable model: {0}")]
    Format(String),

    #[error("model has no geometry")]
    Empty,
}
