//! 3D preview seam.
//!
//! A [`SceneView`] turns a model reference into something presentable. Its
//! contract: every handle presents *something*. A loaded model comes with
//! a [`Framing`] that centres it and fits it to the camera; a missing path
//! or any failure presents the placeholder cube instead. Loads never panic
//! and never hand an error back to the view.

mod error;
mod fit;
mod gltf;
mod view;

pub use error::SceneError;
pub use fit::{Aabb, Framing, OrbitControls, SceneSettings, auto_fit};
pub use gltf::model_bounds;
pub use view::{AssetSource, GltfSceneView};

use async_trait::async_trait;
use serde::Serialize;

/// Opaque id of one loaded scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SceneHandle(pub u64);

/// What the renderer should draw for a handle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Presentation {
    Model { url: String, framing: Framing },
    /// A unit cube at the origin.
    Placeholder { reason: PlaceholderReason },
}

impl Presentation {
    pub fn is_model(&self) -> bool {
        matches!(self, Presentation::Model { .. })
    }

    pub fn framing(&self) -> Option<&Framing> {
        match self {
            Presentation::Model { framing, .. } => Some(framing),
            Presentation::Placeholder { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderReason {
    /// The product has no model path.
    NoModel,
    /// The asset could not be fetched or read.
    LoadFailed(String),
}

#[async_trait]
pub trait SceneView: Send + Sync {
    /// Load the model at `model_ref` (an absolute URL), or the placeholder
    /// when there is none.
    async fn load(&self, model_ref: Option<&str>) -> SceneHandle;

    /// Current presentation of a live handle.
    fn presentation(&self, handle: SceneHandle) -> Option<Presentation>;

    /// Release a handle. Returns whether it was live.
    fn unload(&self, handle: SceneHandle) -> bool;

    fn settings(&self) -> &SceneSettings;
}
