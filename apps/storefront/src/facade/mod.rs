//! # Sync Facade
//!
//! The only channel between the engine and the Presentation Layer.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Presentation Layer                                                    │
//! │     │  commands                              ▲  snapshots / events      │
//! │     ▼                                        │                          │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  SyncFacade                                                     │   │
//! │  │                                                                 │   │
//! │  │  load_catalog()          filter_products(selector)             │   │
//! │  │  add_to_cart(id)         categories()                          │   │
//! │  │  update_quantity(id, n)  snapshot()                            │   │
//! │  │  increment_item(id)                                            │   │
//! │  │  decrement_item(id)      CartEventEmitter::emit_cart_changed   │   │
//! │  │  remove_from_cart(id)      after every applied command         │   │
//! │  │  clear_cart()                                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │     │                    │                        │                     │
//! │     ▼                    ▼                        ▼                     │
//! │  CartStore          Catalog (gated)         CatalogSource              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! ```text
//! connect() ──► CartStore restored ──► load_catalog() ──► commands accepted
//!                                          │
//!                                          └── Err ──► retry load_catalog()
//! ```
//! Every cart command before a successful `load_catalog` fails with
//! `CATALOG_NOT_LOADED`.

mod cart;
mod catalog;
mod events;

pub use catalog::CategoryOption;
pub use events::{CartEventEmitter, LogEmitter, NoOpEmitter};

use std::sync::Arc;

use grace_core::{CartChange, CartSnapshot, Catalog, CategoryScope, CoreError};
use grace_db::{Database, DbConfig};
use tracing::{info, warn};

use crate::catalog_source::{CatalogSource, HttpCatalogSource};
use crate::config::StorefrontConfig;
use crate::error::{ApiError, ApiResult};
use crate::state::CartStore;

/// Command and read boundary for the renderer.
pub struct SyncFacade {
    store: CartStore,
    catalog: Option<Catalog>,
    scope: CategoryScope,
    source: Arc<dyn CatalogSource>,
    emitter: Arc<dyn CartEventEmitter>,
}

impl std::fmt::Debug for SyncFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncFacade")
            .field("store", &self.store)
            .field("catalog_loaded", &self.catalog.is_some())
            .field("scope", &self.scope)
            .finish()
    }
}

impl SyncFacade {
    /// Assembles a facade from its parts. The catalog starts unloaded.
    pub fn new(
        store: CartStore,
        source: Arc<dyn CatalogSource>,
        scope: CategoryScope,
        emitter: Arc<dyn CartEventEmitter>,
    ) -> Self {
        SyncFacade {
            store,
            catalog: None,
            scope,
            source,
            emitter,
        }
    }

    /// Opens the database, restores the cart and wires the HTTP Catalog
    /// Source from configuration.
    pub async fn connect(
        config: &StorefrontConfig,
        emitter: Arc<dyn CartEventEmitter>,
    ) -> ApiResult<Self> {
        let db = Database::new(DbConfig::new(config.database_path()?)).await?;
        let store = CartStore::open(Arc::new(db.slots()), config.storage.cart_key.clone()).await;
        let source = HttpCatalogSource::new(&config.catalog)?;

        Ok(SyncFacade::new(
            store,
            Arc::new(source),
            config.category_scope()?,
            emitter,
        ))
    }

    /// Fetches the catalog and applies the category scope gate.
    ///
    /// On failure the previous catalog (if any) is kept and the call may be
    /// retried; nothing is retried automatically.
    ///
    /// ## Returns
    /// Number of in-scope products.
    pub async fn load_catalog(&mut self) -> ApiResult<usize> {
        let records = match self.source.fetch_products().await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Catalog load failed");
                return Err(e.into());
            }
        };

        let fetched = records.len();
        let catalog = match Catalog::from_records(records, &self.scope) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(error = %e, "Catalog rejected");
                return Err(e.into());
            }
        };
        let in_scope = catalog.len();
        info!(fetched, in_scope, "Catalog materialized");

        self.catalog = Some(catalog);
        self.emitter.emit_catalog_loaded(in_scope);
        Ok(in_scope)
    }

    /// Whether `load_catalog` has succeeded.
    pub fn is_catalog_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    /// Current cart lines and totals.
    pub fn snapshot(&self) -> CartSnapshot {
        self.store.snapshot()
    }

    fn catalog(&self) -> ApiResult<&Catalog> {
        self.catalog
            .as_ref()
            .ok_or_else(|| ApiError::from(CoreError::CatalogNotLoaded))
    }

    fn ensure_catalog(&self) -> ApiResult<()> {
        self.catalog().map(|_| ())
    }

    /// Builds the post-command snapshot and announces applied changes.
    fn announce(&self, change: CartChange) -> CartSnapshot {
        let snapshot = self.store.snapshot();
        if change.is_applied() {
            self.emitter.emit_cart_changed(&snapshot);
        }
        snapshot
    }
}
