use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use storefront_catalog::CatalogClient;
use tracing::{debug, warn};

use super::error::SceneError;
use super::fit::{SceneSettings, auto_fit};
use super::gltf::model_bounds;
use super::{PlaceholderReason, Presentation, SceneHandle, SceneView};

/// Where model bytes come from.
#[async_trait]
pub trait AssetSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, SceneError>;
}

#[async_trait]
impl AssetSource for CatalogClient {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, SceneError> {
        self.fetch_asset(url)
            .await
            .map_err(|e| SceneError::Fetch(e.to_string()))
    }
}

/// `SceneView` over glTF assets: fetch, bound, fit.
pub struct GltfSceneView {
    source: Arc<dyn AssetSource>,
    settings: SceneSettings,
    scenes: Mutex<HashMap<SceneHandle, Presentation>>,
    next_id: AtomicU64,
}

impl GltfSceneView {
    pub fn new(source: Arc<dyn AssetSource>, settings: SceneSettings) -> Self {
        Self {
            source,
            settings,
            scenes: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of live handles.
    pub fn live(&self) -> usize {
        self.scenes.lock().unwrap().len()
    }

    async fn present(&self, url: &str) -> Result<Presentation, SceneError> {
        let bytes = self.source.fetch(url).await?;
        let bounds = model_bounds(&bytes)?;
        let framing = auto_fit(&bounds, &self.settings).ok_or(SceneError::Empty)?;
        Ok(Presentation::Model {
            url: url.to_string(),
            framing,
        })
    }
}

#[async_trait]
impl SceneView for GltfSceneView {
    async fn load(&self, model_ref: Option<&str>) -> SceneHandle {
        let model_ref = model_ref.map(str::trim).filter(|r| !r.is_empty());
        let presentation = match model_ref {
            None => Presentation::Placeholder {
                reason: PlaceholderReason::NoModel,
            },
            Some(url) => match self.present(url).await {
                Ok(p) => p,
                Err(e) => {
                    warn!("model {} falls back to placeholder: {}", url, e);
                    Presentation::Placeholder {
                        reason: PlaceholderReason::LoadFailed(e.to_string()),
                    }
                }
            },
        };

        let handle = SceneHandle(self.next_id.fetch_add(1, Ordering::Relaxed));
        debug!(
            "scene {:?} loaded ({})",
            handle,
            if presentation.is_model() { "model" } else { "placeholder" }
        );
        self.scenes.lock().unwrap().insert(handle, presentation);
        handle
    }

    fn presentation(&self, handle: SceneHandle) -> Option<Presentation> {
        self.scenes.lock().unwrap().get(&handle).cloned()
    }

    fn unload(&self, handle: SceneHandle) -> bool {
        let removed = self.scenes.lock().unwrap().remove(&handle).is_some();
        if removed {
            debug!("scene {:?} unloaded", handle);
        }
        removed
    }

    fn settings(&self) -> &SceneSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory assets keyed by URL.
    struct FixedAssets(HashMap<String, Vec<u8>>);

    #[async_trait]
    impl AssetSource for FixedAssets {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, SceneError> {
            self.0
                .get(url)
                .cloned()
                .ok_or_else(|| SceneError::Fetch(format!("404 {}", url)))
        }
    }

    fn box_gltf(half: f64) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "scenes": [{"nodes": [0]}],
            "nodes": [{"mesh": 0}],
            "meshes": [{"primitives": [{"attributes": {"POSITION": 0}}]}],
            "accessors": [{"min": [-half, -half, -half], "max": [half, half, half]}]
        }))
        .unwrap()
    }

    fn view() -> GltfSceneView {
        let mut assets = HashMap::new();
        assets.insert("http://assets/small.gltf".to_string(), box_gltf(0.05));
        assets.insert("http://assets/big.gltf".to_string(), box_gltf(300.0));
        assets.insert("http://assets/broken.glb".to_string(), b"glTF\x09".to_vec());
        GltfSceneView::new(Arc::new(FixedAssets(assets)), SceneSettings::default())
    }

    #[tokio::test]
    async fn model_is_fitted_regardless_of_scale() {
        let view = view();
        let small = view.load(Some("http://assets/small.gltf")).await;
        let big = view.load(Some("http://assets/big.gltf")).await;

        let small = view.presentation(small).unwrap();
        let big = view.presentation(big).unwrap();
        let (fs, fb) = (small.framing().unwrap(), big.framing().unwrap());
        assert!((fs.scale * 0.05 - fb.scale * 300.0).abs() < 1e-9);
        assert_eq!(fs.camera_distance, fb.camera_distance);
    }

    #[tokio::test]
    async fn missing_path_is_placeholder() {
        let view = view();
        for r in [None, Some(""), Some("   ")] {
            let h = view.load(r).await;
            assert_eq!(
                view.presentation(h),
                Some(Presentation::Placeholder {
                    reason: PlaceholderReason::NoModel
                })
            );
        }
    }

    #[tokio::test]
    async fn failures_are_placeholders() {
        let view = view();
        for url in ["http://assets/none.gltf", "http://assets/broken.glb"] {
            let h = view.load(Some(url)).await;
            match view.presentation(h) {
                Some(Presentation::Placeholder {
                    reason: PlaceholderReason::LoadFailed(_),
                }) => {}
                other => panic!("{}: expected load-failed placeholder, got {:?}", url, other),
            }
        }
    }

    #[tokio::test]
    async fn unload_releases_handle() {
        let view = view();
        let h = view.load(Some("http://assets/small.gltf")).await;
        assert_eq!(view.live(), 1);

        assert!(view.unload(h));
        assert!(!view.unload(h));
        assert!(view.presentation(h).is_none());
        assert_eq!(view.live(), 0);
    }

    #[tokio::test]
    async fn handles_are_distinct() {
        let view = view();
        let a = view.load(None).await;
        let b = view.load(None).await;
        assert_ne!(a, b);
    }
}
