//! Command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use storefront::{Storefront, StorefrontConfig};
use storefront_kv::{KVStore, MemoryStore, RedbStore};
use tracing::debug;

/// Global flags that shape the session.
#[derive(Debug, Clone)]
pub struct Options {
    pub config_path: PathBuf,
    pub api_base: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub ephemeral: bool,
}

impl Options {
    /// Config file with command-line overrides applied.
    pub fn config(&self) -> Result<StorefrontConfig> {
        let mut config = StorefrontConfig::load(&self.config_path)
            .with_context(|| format!("loading {}", self.config_path.display()))?;
        if let Some(base) = &self.api_base {
            config.api_base = base.clone();
        }
        if let Some(dir) = &self.data_dir {
            config.data_dir = Some(dir.clone());
        }
        Ok(config)
    }
}

/// A booted storefront plus the config it was built from.
pub struct Session {
    pub app: Storefront,
    pub config: StorefrontConfig,
}

impl Session {
    pub fn open(opts: &Options) -> Result<Self> {
        let config = opts.config()?;
        let kv: Arc<dyn KVStore> = if opts.ephemeral {
            Arc::new(MemoryStore::new())
        } else {
            let path = config.cart_db_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            debug!("cart database at {}", path.display());
            Arc::new(
                RedbStore::open(&path)
                    .with_context(|| format!("opening cart database {}", path.display()))?,
            )
        };
        let app = Storefront::from_config(&config, kv)?;
        Ok(Self { app, config })
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}
