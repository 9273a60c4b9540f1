//! # Cart Commands
//!
//! Entry points the renderer calls for cart gestures. Each returns the
//! post-command snapshot.
//!
//! ## Cart Gestures
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product card                 Cart view                                 │
//! │  ┌──────────────────┐        ┌───────────────────────────────────┐     │
//! │  │  [Add to Cart]   │        │  Silver Ring   [-] 2 [+]   [x]    │     │
//! │  └──────────────────┘        └───────────────────────────────────┘     │
//! │         │                          │    │   │        │                 │
//! │   add_to_cart(id)     decrement_item   set  increment  remove_from_cart │
//! │                                   update_quantity(id, n)                │
//! │                                                                         │
//! │  Stale ids (not in catalog / not in cart): unchanged snapshot, no event │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use grace_core::{CartSnapshot, ProductId};
use tracing::{debug, warn};

use super::SyncFacade;
use crate::error::ApiResult;

impl SyncFacade {
    /// Puts a catalog product in the cart with quantity 1.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity unchanged, still persisted and
    ///   announced
    /// - Product id not in the catalog: no-op
    pub async fn add_to_cart(&mut self, product_id: ProductId) -> ApiResult<CartSnapshot> {
        debug!(product_id, "add_to_cart command");

        let Some(product) = self.catalog()?.get(product_id).cloned() else {
            warn!(product_id, "add_to_cart for a product outside the catalog");
            return Ok(self.snapshot());
        };

        let change = self.store.add(&product).await;
        Ok(self.announce(change))
    }

    /// Sets the quantity of a line.
    ///
    /// ## Errors
    /// - `INVALID_QUANTITY` for a negative quantity (cart unchanged)
    pub async fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> ApiResult<CartSnapshot> {
        debug!(product_id, quantity, "update_quantity command");
        self.ensure_catalog()?;

        let change = self.store.update_quantity(product_id, quantity).await?;
        Ok(self.announce(change))
    }

    /// The `+` control.
    pub async fn increment_item(&mut self, product_id: ProductId) -> ApiResult<CartSnapshot> {
        debug!(product_id, "increment_item command");
        self.ensure_catalog()?;

        let change = self.store.increment(product_id).await;
        Ok(self.announce(change))
    }

    /// The `-` control; a line at quantity 1 is removed.
    pub async fn decrement_item(&mut self, product_id: ProductId) -> ApiResult<CartSnapshot> {
        debug!(product_id, "decrement_item command");
        self.ensure_catalog()?;

        let change = self.store.decrement(product_id).await;
        Ok(self.announce(change))
    }

    /// Deletes a line from the cart view.
    pub async fn remove_from_cart(&mut self, product_id: ProductId) -> ApiResult<CartSnapshot> {
        debug!(product_id, "remove_from_cart command");
        self.ensure_catalog()?;

        let change = self.store.remove(product_id).await;
        Ok(self.announce(change))
    }

    /// Empties the cart.
    pub async fn clear_cart(&mut self) -> ApiResult<CartSnapshot> {
        debug!("clear_cart command");
        self.ensure_catalog()?;

        let change = self.store.clear().await;
        Ok(self.announce(change))
    }
}
