//! # Urban Grace Storefront
//!
//! The cart and catalog state engine behind the storefront, plus the outer
//! plumbing it needs: configuration, logging, the Catalog Source client and
//! the persistence slot.
//!
//! ## Module Organization
//! ```text
//! grace_storefront/
//! ├── lib.rs             ◄─── You are here (tracing setup & re-exports)
//! ├── config.rs          ◄─── StorefrontConfig (defaults, TOML, env)
//! ├── error.rs           ◄─── CatalogError, ConfigError, ApiError
//! ├── catalog_source.rs  ◄─── CatalogSource trait + HTTP client
//! ├── state/
//! │   └── cart_store.rs  ◄─── CartStore (Cart + persistence slot)
//! └── facade/
//!     ├── mod.rs         ◄─── SyncFacade (lifecycle, catalog load)
//!     ├── cart.rs        ◄─── Cart commands
//!     ├── catalog.rs     ◄─── Catalog reads
//!     └── events.rs      ◄─── CartEventEmitter
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! let config = StorefrontConfig::load(None)?;
//! let mut facade = SyncFacade::connect(&config, Arc::new(LogEmitter)).await?;
//! facade.load_catalog().await?;
//! let snapshot = facade.add_to_cart(5).await?;
//! ```

pub mod catalog_source;
pub mod config;
pub mod error;
pub mod facade;
pub mod state;

pub use catalog_source::{CatalogSource, HttpCatalogSource, StaticCatalogSource};
pub use config::StorefrontConfig;
pub use error::{ApiError, ApiResult, CatalogError, ConfigError, ErrorCode};
pub use facade::{CartEventEmitter, CategoryOption, LogEmitter, NoOpEmitter, SyncFacade};
pub use state::{CartStore, RestoreOutcome};

use tracing_subscriber::EnvFilter;

/// Default log directives when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,grace=debug,sqlx=warn";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=grace_storefront=trace` - Trace the engine only
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
