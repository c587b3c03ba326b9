//! Product catalog: the `Product` model and a read-only HTTP client for the
//! storefront's product API.
//!
//! # Usage
//!
//! ```ignore
//! use storefront_catalog::CatalogClient;
//!
//! let client = CatalogClient::new("https://shop.example.com")?;
//! let products = client.fetch_products().await?;
//! let model = products[0].model_path.as_deref().map(|p| client.resolve_asset(p));
//! ```
//!
//! Every call goes to the network. Retry and caching are the caller's job.

mod assets;
mod client;
mod error;
mod product;

pub use assets::AssetUrls;
pub use client::CatalogClient;
pub use error::CatalogError;
pub use product::{ImageSet, Product, ProductId};
