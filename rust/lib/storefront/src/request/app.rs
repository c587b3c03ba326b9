//! App lifecycle requests.

/// Publish initial state and mount the view at `location`.
#[derive(Debug, Clone)]
pub struct InitializeReq {
    pub location: String,
}

impl InitializeReq {
    pub const PATH: &'static str = "app/initialize";
}

/// Go to `location` (path plus optional query).
#[derive(Debug, Clone)]
pub struct NavigateReq {
    pub location: String,
}

impl NavigateReq {
    pub const PATH: &'static str = "app/navigate";

    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}
