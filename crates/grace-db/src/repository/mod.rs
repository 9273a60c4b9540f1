//! # Repository Module
//!
//! Database repository implementations for the storefront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CartStore                                                             │
//! │       │  slot.store("cart", &items)                                    │
//! │       ▼                                                                 │
//! │  CartSlot (slot.rs) ── JSON encode/decode of cart lines                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SlotRepository                                                        │
//! │  ├── get(&self, key)                                                   │
//! │  ├── put(&self, key, value)                                            │
//! │  └── delete(&self, key)                                                │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite (kv_slots)                                                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`slot::SlotRepository`] - Named key-value slots

pub mod slot;
