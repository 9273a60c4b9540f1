//! # State Module
//!
//! Owned application state for the storefront session.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  SyncFacade                                                            │
//! │     │ owns                                                              │
//! │     ▼                                                                   │
//! │  ┌──────────────────────────────┐                                      │
//! │  │  CartStore                   │                                      │
//! │  │  • Cart (grace-core)         │ ── persist ──► Arc<dyn CartSlot>     │
//! │  │  • slot key                  │ ◄── restore ──                       │
//! │  └──────────────────────────────┘                                      │
//! │                                                                         │
//! │  One mutator at a time: every command takes `&mut self`, so the       │
//! │  borrow checker rules out re-entrant mutation without any lock.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart_store;

pub use cart_store::{CartStore, RestoreOutcome};
