//! # grace-db: Persistence Slot for the Urban Grace Storefront
//!
//! This crate keeps the cart durable across sessions. It uses SQLite with
//! sqlx and stores the cart as one JSON document in a named key-value slot.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Data Flow                              │
//! │                                                                         │
//! │  CartStore mutation (add / update / remove / clear)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     grace-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  CartSlot     │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (slot.rs)    │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ SlotRepository│    │ 001_cart_    │  │   │
//! │  │   │               │    │ MemorySlot    │    │   slots.sql  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/storefront/grace.db (platform data dir)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use grace_db::{CartSlot, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("grace.db")).await?;
//! let slot = db.slots();
//! let restored = slot.load("cart").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod slot;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::slot::{SlotRecord, SlotRepository};
pub use slot::{CartSlot, MemorySlot};
