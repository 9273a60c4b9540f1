//! # Cart Store
//!
//! Sole owner of the session's cart. Applies commands to the in-memory
//! [`Cart`] and writes the result through to the persistence slot.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  command (add / update / inc / dec / remove / clear)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Cart rule (grace-core) ──► CartChange                                 │
//! │       │                                                                 │
//! │       ├── NotInCart / rejected ──► return, nothing written             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  slot.store(key, items)                                                │
//! │       ├── Ok  ──► debug!                                               │
//! │       └── Err ──► error!  (in-memory cart stays authoritative)         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Restore
//! ```text
//! slot.load(key)
//!   ├── Ok(None)                       → empty cart       (Missing)
//!   ├── Ok(Some(lines)), lines valid   → restored cart    (Restored)
//!   ├── Ok(Some(lines)), lines broken  → empty cart, warn (Corrupt)
//!   └── Err(_)                         → empty cart, warn (Corrupt/Unavailable)
//! ```

use std::sync::Arc;

use grace_core::{Cart, CartChange, CartSnapshot, CartTotals, CoreResult, Product, ProductId};
use grace_db::{CartSlot, DbResult};
use tracing::{debug, error, info, warn};

/// What [`CartStore::restore`] found in the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The slot was never written.
    Missing,

    /// A valid cart with this many lines was restored.
    Restored { lines: usize },

    /// The slot held unusable data.
    Corrupt,

    /// The slot could not be read.
    Unavailable,
}

/// Owns the cart and its persistence slot.
pub struct CartStore {
    cart: Cart,
    slot: Arc<dyn CartSlot>,
    key: String,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("lines", &self.cart.items().len())
            .finish()
    }
}

impl CartStore {
    /// Creates a store with an empty cart. Nothing is read from the slot.
    pub fn new(slot: Arc<dyn CartSlot>, key: impl Into<String>) -> Self {
        CartStore {
            cart: Cart::new(),
            slot,
            key: key.into(),
        }
    }

    /// Creates a store and restores the cart from the slot.
    pub async fn open(slot: Arc<dyn CartSlot>, key: impl Into<String>) -> Self {
        let mut store = CartStore::new(slot, key);
        store.restore().await;
        store
    }

    /// Replaces the in-memory cart with the persisted one.
    ///
    /// Never fails: anything other than a valid persisted cart yields an
    /// empty cart.
    pub async fn restore(&mut self) -> RestoreOutcome {
        let (cart, outcome) = match self.slot.load(&self.key).await {
            Ok(None) => {
                debug!(key = %self.key, "No persisted cart, starting empty");
                (Cart::new(), RestoreOutcome::Missing)
            }
            Ok(Some(items)) => match Cart::from_items(items) {
                Ok(cart) => {
                    let lines = cart.items().len();
                    info!(key = %self.key, lines, "Cart restored");
                    (cart, RestoreOutcome::Restored { lines })
                }
                Err(e) => {
                    warn!(key = %self.key, error = %e, "Persisted cart breaks cart rules, starting empty");
                    (Cart::new(), RestoreOutcome::Corrupt)
                }
            },
            Err(e) if e.is_corrupt_data() => {
                warn!(key = %self.key, error = %e, "Persisted cart is malformed, starting empty");
                (Cart::new(), RestoreOutcome::Corrupt)
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Persisted cart unavailable, starting empty");
                (Cart::new(), RestoreOutcome::Unavailable)
            }
        };

        self.cart = cart;
        outcome
    }

    /// Writes the current cart to the slot.
    pub async fn persist(&self) -> DbResult<()> {
        self.slot.store(&self.key, self.cart.items()).await
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Read-only view of the cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Detached copy of the lines plus fresh totals.
    pub fn snapshot(&self) -> CartSnapshot {
        self.cart.snapshot()
    }

    /// Totals recomputed from the live lines.
    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Slot key this store writes to.
    pub fn key(&self) -> &str {
        &self.key
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Adds a product with quantity 1; a product already in the cart keeps
    /// its quantity.
    pub async fn add(&mut self, product: &Product) -> CartChange {
        let change = self.cart.add(product);
        debug!(product_id = product.id, ?change, "add_to_cart");
        self.commit(change).await
    }

    /// Sets a line's quantity; zero removes it.
    pub async fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> CoreResult<CartChange> {
        let change = self.cart.update_quantity(product_id, quantity)?;
        debug!(product_id, quantity, ?change, "update_quantity");
        Ok(self.commit(change).await)
    }

    /// Adds one to a line.
    pub async fn increment(&mut self, product_id: ProductId) -> CartChange {
        let change = self.cart.increment(product_id);
        debug!(product_id, ?change, "increment_item");
        self.commit(change).await
    }

    /// Takes one from a line; removes it at 1.
    pub async fn decrement(&mut self, product_id: ProductId) -> CartChange {
        let change = self.cart.decrement(product_id);
        debug!(product_id, ?change, "decrement_item");
        self.commit(change).await
    }

    /// Deletes a line.
    pub async fn remove(&mut self, product_id: ProductId) -> CartChange {
        let change = self.cart.remove(product_id);
        debug!(product_id, ?change, "remove_from_cart");
        self.commit(change).await
    }

    /// Deletes every line.
    pub async fn clear(&mut self) -> CartChange {
        let change = self.cart.clear();
        debug!(?change, "clear_cart");
        self.commit(change).await
    }

    async fn commit(&self, change: CartChange) -> CartChange {
        if !change.is_applied() {
            return change;
        }

        if let Err(e) = self.persist().await {
            error!(key = %self.key, error = %e, "Failed to persist cart; keeping in-memory state");
        }

        change
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use grace_core::{CartItem, Money};
    use grace_db::{DbError, MemorySlot};

    fn product(id: ProductId, price_cents: i64) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            category: "jewelery".to_string(),
            price: Money::from_cents(price_cents),
            image: format!("https://img.example/{}.jpg", id),
        }
    }

    /// Slot whose writes always fail.
    struct BrokenSlot;

    #[async_trait]
    impl CartSlot for BrokenSlot {
        async fn load(&self, _key: &str) -> DbResult<Option<Vec<CartItem>>> {
            Err(DbError::ConnectionFailed("disk unplugged".to_string()))
        }
        async fn store(&self, _key: &str, _items: &[CartItem]) -> DbResult<()> {
            Err(DbError::QueryFailed("disk full".to_string()))
        }
        async fn clear(&self, _key: &str) -> DbResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_restore_round_trip() {
        let slot = Arc::new(MemorySlot::new());

        let mut store = CartStore::open(slot.clone(), "cart").await;
        store.add(&product(1, 1099)).await;
        store.add(&product(2, 500)).await;
        store.update_quantity(2, 3).await.unwrap();

        let reopened = CartStore::open(slot, "cart").await;
        assert_eq!(reopened.cart(), store.cart());
        assert_eq!(reopened.totals().total_quantity, 4);
    }

    #[tokio::test]
    async fn test_restore_missing_and_corrupt() {
        let mut store = CartStore::new(Arc::new(MemorySlot::new()), "cart");
        assert_eq!(store.restore().await, RestoreOutcome::Missing);

        let mut store = CartStore::new(Arc::new(MemorySlot::with_raw("cart", "{oops")), "cart");
        assert_eq!(store.restore().await, RestoreOutcome::Corrupt);
        assert!(store.cart().is_empty());

        let zero_qty = r#"[{"id":1,"title":"T","category":"jewelery","price":1,"image":"i","qtyInCart":0}]"#;
        let mut store = CartStore::new(Arc::new(MemorySlot::with_raw("cart", zero_qty)), "cart");
        assert_eq!(store.restore().await, RestoreOutcome::Corrupt);
        assert!(store.cart().is_empty());
    }

    #[tokio::test]
    async fn test_restore_rejects_oversized_quantity() {
        let huge = r#"[{"id":1,"title":"T","category":"jewelery","price":10.99,"image":"i","qtyInCart":92233720368547758}]"#;
        let mut store = CartStore::new(Arc::new(MemorySlot::with_raw("cart", huge)), "cart");

        assert_eq!(store.restore().await, RestoreOutcome::Corrupt);
        assert!(store.cart().is_empty());
        assert_eq!(store.totals().total_quantity, 0);
    }

    #[tokio::test]
    async fn test_persist_failure_keeps_memory_state() {
        let mut store = CartStore::open(Arc::new(BrokenSlot), "cart").await;
        assert!(store.cart().is_empty());

        assert_eq!(store.add(&product(1, 1000)).await, CartChange::Added);
        assert_eq!(store.increment(1).await, CartChange::Updated { quantity: 2 });
        assert_eq!(store.cart().quantity_of(1), Some(2));
        assert!(store.persist().await.is_err());
    }

    #[tokio::test]
    async fn test_noop_commands_do_not_write() {
        let slot = Arc::new(MemorySlot::new());
        let mut store = CartStore::new(slot.clone(), "cart");

        assert_eq!(store.decrement(9).await, CartChange::NotInCart);
        assert_eq!(store.remove(9).await, CartChange::NotInCart);
        assert_eq!(store.update_quantity(9, 4).await.unwrap(), CartChange::NotInCart);
        assert!(slot.raw("cart").await.is_none());

        store.add(&product(3, 100)).await;
        assert!(slot.raw("cart").await.is_some());
    }

    #[tokio::test]
    async fn test_rejected_quantity_does_not_write() {
        let slot = Arc::new(MemorySlot::new());
        let mut store = CartStore::new(slot.clone(), "cart");
        store.add(&product(1, 100)).await;
        let before = slot.raw("cart").await;

        assert!(store.update_quantity(1, -3).await.is_err());
        assert!(store.update_quantity(1, 1_000).await.is_err());
        assert_eq!(slot.raw("cart").await, before);
        assert_eq!(store.cart().quantity_of(1), Some(1));
    }

    #[tokio::test]
    async fn test_clear_persists_empty_cart() {
        let slot = Arc::new(MemorySlot::new());
        let mut store = CartStore::new(slot.clone(), "cart");
        store.add(&product(1, 100)).await;

        assert_eq!(store.clear().await, CartChange::Cleared);
        assert_eq!(slot.raw("cart").await.as_deref(), Some("[]"));
    }
}
