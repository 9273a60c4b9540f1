//! # Storefront Configuration
//!
//! Where the catalog comes from, which categories are sold, and where the
//! cart is persisted.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     GRACE_CATALOG_URL=http://localhost:3000/products                   │
//! │     GRACE_CATALOG_TIMEOUT_SECS=5                                       │
//! │     GRACE_DB_PATH=/tmp/grace.db                                        │
//! │     GRACE_CART_KEY=cart                                                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.urbangrace.storefront/... (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [catalog]
//! url = "https://fakestoreapi.com/products"
//! timeout_secs = 10
//! categories = ["jewelery", "women's clothing"]
//!
//! [storage]
//! database_path = "/var/lib/grace/grace.db"
//! cart_key = "cart"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use grace_core::{CategoryScope, DEFAULT_CART_KEY, SUPPORTED_CATEGORIES};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ConfigError, ConfigResult};

/// Default Catalog Source endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";

const CONFIG_FILE_NAME: &str = "storefront.toml";
const DATABASE_FILE_NAME: &str = "grace.db";

// =============================================================================
// Catalog Settings
// =============================================================================

/// Catalog Source settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Endpoint returning a JSON array of products.
    #[serde(default = "default_catalog_url")]
    pub url: String,

    /// Request timeout (seconds).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Categories kept by the scope gate.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

fn default_catalog_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_categories() -> Vec<String> {
    SUPPORTED_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            url: default_catalog_url(),
            timeout_secs: default_timeout_secs(),
            categories: default_categories(),
        }
    }
}

impl CatalogSettings {
    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

/// Persistence slot settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite file. Defaults to `grace.db` in the platform data directory.
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Slot key the cart is stored under.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

fn default_cart_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            database_path: None,
            cart_key: default_cart_key(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Catalog Source settings.
    #[serde(default)]
    pub catalog: CatalogSettings,

    /// Persistence settings.
    #[serde(default)]
    pub storage: StorageSettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`storefront.toml`); a missing file is not an error
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Reads a TOML config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading storefront config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = Url::parse(&self.catalog.url).map_err(|e| {
            ConfigError::Invalid(format!("catalog.url '{}' is not a URL: {}", self.catalog.url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "catalog.url must start with http:// or https://, got: {}",
                self.catalog.url
            )));
        }

        if self.catalog.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "catalog.timeout_secs must be greater than 0".into(),
            ));
        }

        self.category_scope()?;

        if self.storage.cart_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage.cart_key must not be empty".into()));
        }

        Ok(())
    }

    /// Applies environment variable overrides through `lookup`.
    fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("GRACE_CATALOG_URL") {
            debug!(url = %url, "Overriding catalog URL from environment");
            self.catalog.url = url;
        }

        if let Some(timeout) = lookup("GRACE_CATALOG_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.catalog.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric GRACE_CATALOG_TIMEOUT_SECS"),
            }
        }

        if let Some(path) = lookup("GRACE_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(key) = lookup("GRACE_CART_KEY") {
            self.storage.cart_key = key;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The category scope gate built from `catalog.categories`.
    pub fn category_scope(&self) -> ConfigResult<CategoryScope> {
        CategoryScope::new(self.catalog.categories.clone())
            .map_err(|e| ConfigError::Invalid(format!("catalog.categories: {}", e)))
    }

    /// The configured database file, or `grace.db` in the platform data
    /// directory (created if missing).
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.storage.database_path {
            return Ok(path.clone());
        }

        let dirs = project_dirs().ok_or(ConfigError::NoPlatformDir("data"))?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join(DATABASE_FILE_NAME))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "urbangrace", "storefront")
}
