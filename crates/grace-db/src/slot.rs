//! # Cart Slot
//!
//! The durable key-value slot the Cart Store persists to.
//!
//! ## Slot Contents
//! ```text
//! key:   "cart"
//! value: [
//!   { "id": 5, "title": "...", "category": "jewelery",
//!     "price": 695, "image": "https://...", "qtyInCart": 2 },
//!   ...
//! ]
//! ```
//!
//! ## Read Outcomes
//! ```text
//! load(key)
//!   ├── key never written        → Ok(None)
//!   ├── valid JSON array         → Ok(Some(lines))
//!   ├── anything else            → Err(DbError::Serialization)
//!   └── storage unreachable      → Err(other DbError)
//! ```
//!
//! Decoding only checks the shape. Cart invariants (quantities, unique ids)
//! are checked by `Cart::from_items` in the store.

use std::collections::HashMap;

use async_trait::async_trait;
use grace_core::CartItem;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::slot::SlotRepository;

// =============================================================================
// Trait
// =============================================================================

/// A named durable slot holding a serialized cart.
#[async_trait]
pub trait CartSlot: Send + Sync {
    /// Reads the cart lines stored under `key`.
    async fn load(&self, key: &str) -> DbResult<Option<Vec<CartItem>>>;

    /// Replaces the cart lines stored under `key`.
    async fn store(&self, key: &str, items: &[CartItem]) -> DbResult<()>;

    /// Deletes the slot.
    async fn clear(&self, key: &str) -> DbResult<()>;
}

/// Encodes cart lines into the slot format.
pub fn encode_cart(items: &[CartItem]) -> DbResult<String> {
    Ok(serde_json::to_string(items)?)
}

/// Decodes the slot format into cart lines.
pub fn decode_cart(raw: &str) -> DbResult<Vec<CartItem>> {
    Ok(serde_json::from_str(raw)?)
}

// =============================================================================
// SQLite
// =============================================================================

#[async_trait]
impl CartSlot for SlotRepository {
    async fn load(&self, key: &str) -> DbResult<Option<Vec<CartItem>>> {
        match self.get(key).await? {
            Some(record) => {
                debug!(key = %key, updated_at = %record.updated_at, "Slot found");
                decode_cart(&record.value).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn store(&self, key: &str, items: &[CartItem]) -> DbResult<()> {
        let value = encode_cart(items)?;
        self.put(key, &value).await
    }

    async fn clear(&self, key: &str) -> DbResult<()> {
        self.delete(key).await.map(|_| ())
    }
}

// =============================================================================
// In-Memory
// =============================================================================

/// A process-local slot. Holds raw strings so tests can plant bad data.
#[derive(Debug, Default)]
pub struct MemorySlot {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySlot {
    /// Creates an empty slot store.
    pub fn new() -> Self {
        MemorySlot::default()
    }

    /// Creates a slot store with a raw value already under `key`.
    pub fn with_raw(key: impl Into<String>, raw: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), raw.into());
        MemorySlot {
            values: Mutex::new(values),
        }
    }

    /// The raw value under `key`, if any.
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().await.get(key).cloned()
    }
}

#[async_trait]
impl CartSlot for MemorySlot {
    async fn load(&self, key: &str) -> DbResult<Option<Vec<CartItem>>> {
        match self.values.lock().await.get(key) {
            Some(raw) => decode_cart(raw).map(Some),
            None => Ok(None),
        }
    }

    async fn store(&self, key: &str, items: &[CartItem]) -> DbResult<()> {
        let value = encode_cart(items)?;
        self.values.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn clear(&self, key: &str) -> DbResult<()> {
        self.values.lock().await.remove(key);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
