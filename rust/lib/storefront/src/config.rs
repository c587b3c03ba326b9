//! Storefront configuration.
//!
//! Reads/writes `~/.storefront/config.toml`. Every field has a default, so a
//! missing file or a partial file is fine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scene::SceneSettings;

/// Hosted product API used when no base is configured.
pub const DEFAULT_API_BASE: &str = "https://3d-api-work.vercel.app";

/// File name of the cart database inside `data_dir`.
pub const CART_DB_FILE: &str = "cart.redb";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config encode: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Product API base, also used to resolve relative image and model paths.
    pub api_base: String,

    /// Directory holding the cart database. Defaults to `~/.storefront`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    pub checkout: CheckoutTiming,

    pub scene: SceneSettings,
}

/// Delays of the mock order placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutTiming {
    pub placement_delay_ms: u64,
    pub redirect_delay_ms: u64,
}

impl Default for CheckoutTiming {
    fn default() -> Self {
        Self {
            placement_delay_ms: 1500,
            redirect_delay_ms: 3000,
        }
    }
}

impl CheckoutTiming {
    /// No waiting at all; used by tests and the CLI.
    pub fn immediate() -> Self {
        Self {
            placement_delay_ms: 0,
            redirect_delay_ms: 0,
        }
    }

    pub fn placement_delay(&self) -> Duration {
        Duration::from_millis(self.placement_delay_ms)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            data_dir: None,
            checkout: CheckoutTiming::default(),
            scene: SceneSettings::default(),
        }
    }
}

impl StorefrontConfig {
    /// Default config file path: ~/.storefront/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save config to disk.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(dirs_path)
    }

    /// Location of the durable cart database.
    pub fn cart_db_path(&self) -> PathBuf {
        self.data_dir().join(CART_DB_FILE)
    }
}

/// Return the storefront config directory (~/.storefront).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".storefront")
}
