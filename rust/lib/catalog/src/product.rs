use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Numeric product identifier, stable across fetches.
pub type ProductId = u64;

/// A product record as served by the catalog API.
///
/// Unknown fields in the payload are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Expected non-negative. Negative prices are kept as served, with a warning.
    #[serde(deserialize_with = "price")]
    pub price: f64,
    #[serde(default)]
    pub images: ImageSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl Product {
    pub fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }

    /// First image path, unresolved.
    pub fn first_image(&self) -> Option<&str> {
        self.images.first()
    }

    /// Model path, if one is set and non-blank.
    pub fn model(&self) -> Option<&str> {
        self.model_path.as_deref().filter(|p| !p.trim().is_empty())
    }
}

fn price<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
    let price = f64::deserialize(de)?;
    if price < 0.0 {
        warn!("product has negative price {}", price);
    }
    Ok(price)
}

/// The API sends either a list of image paths or a single path. Both shapes
/// round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageSet {
    Many(Vec<String>),
    One(String),
}

impl ImageSet {
    pub fn first(&self) -> Option<&str> {
        match self {
            ImageSet::Many(list) => list.first().map(String::as_str),
            ImageSet::One(path) => Some(path.as_str()).filter(|p| !p.is_empty()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let items: &[String] = match self {
            ImageSet::Many(list) => list,
            ImageSet::One(path) => std::slice::from_ref(path),
        };
        items.iter().map(String::as_str)
    }
}

impl Default for ImageSet {
    fn default() -> Self {
        ImageSet::Many(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn decodes_api_record() {
        let json = r#"{
            "id": 3,
            "title": "Desk Lamp",
            "description": "Warm light",
            "category": "lighting",
            "price": 49.5,
            "images": ["/images/lamp.png", "/images/lamp-2.png"],
            "modelPath": "/models/lamp.glb",
            "featured": true,
            "stock": 12
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();

        assert_eq!(p.id, 3);
        assert_eq!(p.category, "lighting");
        assert_eq!(p.first_image(), Some("/images/lamp.png"));
        assert_eq!(p.model(), Some("/models/lamp.glb"));
        assert!(p.is_featured());
    }

    #[test]
    fn single_image_string_is_accepted() {
        let json = r#"{"id": 1, "title": "Mug", "price": 8, "images": "/images/mug.png"}"#;
        let p: Product = serde_json::from_str(json).unwrap();

        assert_eq!(p.images, ImageSet::One("/images/mug.png".into()));
        assert_eq!(p.first_image(), Some("/images/mug.png"));
        assert_eq!(p.images.iter().count(), 1);

        let back = serde_json::to_value(&p).unwrap();
        assert_eq!(back["images"], "/images/mug.png");
    }

    #[test]
    fn optional_fields_default() {
        let json = r#"{"id": 9, "title": "Sticker", "price": 1.25}"#;
        let p: Product = serde_json::from_str(json).unwrap();

        assert_eq!(p.first_image(), None);
        assert_eq!(p.model(), None);
        assert!(!p.is_featured());
        assert!(p.description.is_empty());
    }

    #[test]
    fn blank_model_path_counts_as_absent() {
        let json = r#"{"id": 2, "title": "Chair", "price": 80, "modelPath": " "}"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.model(), None);
    }

    /// Captures formatted log output.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn negative_price_is_kept_with_warning() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let json = r#"{"id": 4, "title": "Refund", "price": -5.5}"#;
        let p: Product =
            tracing::subscriber::with_default(subscriber, || serde_json::from_str(json)).unwrap();

        assert_eq!(p.price, -5.5);
        let out = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(out.contains("WARN"), "{}", out);
        assert!(out.contains("negative price -5.5"), "{}", out);
    }

    #[test]
    fn zero_price_is_not_flagged() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .finish();

        let json = r#"{"id": 5, "title": "Freebie", "price": 0}"#;
        let p: Product =
            tracing::subscriber::with_default(subscriber, || serde_json::from_str(json)).unwrap();

        assert_eq!(p.price, 0.0);
        assert!(logs.0.lock().unwrap().is_empty());
    }
}
