//! # Change Notifications
//!
//! The hook the Presentation Layer registers to re-render without polling.
//!
//! ```text
//! SyncFacade command ──► CartChange applied? ──yes──► emit_cart_changed(&snapshot)
//!                                   │
//!                                   no ──► (silent)
//!
//! SyncFacade::load_catalog ──ok──► emit_catalog_loaded(count)
//! ```

use grace_core::CartSnapshot;
use tracing::info;

/// Receives state change events from the facade.
pub trait CartEventEmitter: Send + Sync {
    /// Called after every applied cart command with the fresh snapshot.
    fn emit_cart_changed(&self, snapshot: &CartSnapshot);

    /// Called after the catalog has been fetched and gated.
    fn emit_catalog_loaded(&self, products: usize);
}

/// No-op event emitter for testing.
pub struct NoOpEmitter;

impl CartEventEmitter for NoOpEmitter {
    fn emit_cart_changed(&self, _snapshot: &CartSnapshot) {}
    fn emit_catalog_loaded(&self, _products: usize) {}
}

/// Emitter that writes each event to the log. Used by the CLI.
pub struct LogEmitter;

impl CartEventEmitter for LogEmitter {
    fn emit_cart_changed(&self, snapshot: &CartSnapshot) {
        info!(
            lines = snapshot.totals.item_count,
            total_quantity = snapshot.totals.total_quantity,
            total_price = %snapshot.totals.total_price,
            badge = %snapshot.totals.badge_label(),
            "Cart changed"
        );
    }

    fn emit_catalog_loaded(&self, products: usize) {
        info!(products, "Catalog loaded");
    }
}
