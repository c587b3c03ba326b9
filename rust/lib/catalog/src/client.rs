use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::assets::AssetUrls;
use crate::error::CatalogError;
use crate::product::{Product, ProductId};

/// Read-only client for the product API.
///
/// Endpoints, relative to the configured base:
/// - `GET /api/products`
/// - `GET /api/products/featured`
/// - `GET /api/products/{id}`
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    assets: AssetUrls,
}

/// The by-id endpoint answers with a list; tolerate a bare object too.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Product>),
    One(Box<Product>),
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            http: reqwest::Client::new(),
            assets: AssetUrls::new(base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.assets.base()
    }

    pub fn assets(&self) -> &AssetUrls {
        &self.assets
    }

    /// Resolve an image or model path from a product record.
    pub fn resolve_asset(&self, path: &str) -> String {
        self.assets.resolve(path)
    }

    /// All products.
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let products: Vec<Product> = self
            .get_json("/api/products")
            .await
            .inspect_err(|e| warn!("fetching products failed: {}", e))?;
        debug!("fetched {} products", products.len());
        Ok(products)
    }

    /// The featured product: the first one flagged `featured`, else the first.
    pub async fn fetch_featured_product(&self) -> Result<Product, CatalogError> {
        let products: Vec<Product> = self
            .get_json("/api/products/featured")
            .await
            .inspect_err(|e| warn!("fetching featured product failed: {}", e))?;
        pick_featured(products)
    }

    /// A single product by id.
    pub async fn fetch_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let body: OneOrMany = self
            .get_json(&format!("/api/products/{}", id))
            .await
            .inspect_err(|e| warn!("fetching product {} failed: {}", id, e))?;
        let found = match body {
            OneOrMany::Many(list) => list.into_iter().find(|p| p.id == id),
            OneOrMany::One(p) => Some(*p).filter(|p| p.id == id),
        };
        found.ok_or(CatalogError::NotFound(id))
    }

    /// Raw bytes of an asset (3D model, image). `url` must already be resolved.
    pub async fn fetch_asset(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        let resp = self.http.get(url).send().await?;
        let resp = check_status(resp).await?;
        let bytes = resp.bytes().await?;
        debug!("fetched asset {} ({} bytes)", url, bytes.len());
        Ok(bytes.to_vec())
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, CatalogError> {
        let url = format!("{}{}", self.assets.base(), path);
        let resp = self.http.get(&url).send().await?;
        let resp = check_status(resp).await?;
        resp.json::<R>()
            .await
            .map_err(|e| CatalogError::Decode(format!("{}: {}", path, e)))
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, CatalogError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.text().await.unwrap_or_default();
    Err(CatalogError::Status {
        status: status.as_u16(),
        message,
    })
}

fn pick_featured(products: Vec<Product>) -> Result<Product, CatalogError> {
    let index = products.iter().position(Product::is_featured).unwrap_or(0);
    products
        .into_iter()
        .nth(index)
        .ok_or(CatalogError::NoProducts)
}
