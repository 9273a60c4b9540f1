//! # grace-core: Pure Cart & Catalog Logic for Urban Grace
//!
//! This crate is the state engine of the storefront. It holds the cart and
//! catalog rules as plain data and functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Urban Grace Storefront                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation Layer (renderer)                   │   │
//! │  │    Product grid ──► Category buttons ──► Cart view + counter    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands ▼   ▲ snapshots              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          Sync Facade + Cart Store (apps/storefront)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ grace-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  catalog  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  Catalog  │  │   │
//! │  │   │ CartItem  │  │  (cents)  │  │CartChange │  │  Filter   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 grace-db (persistence slot)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartItem, CartSnapshot)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - Cart mutation rules
//! - [`catalog`] - Category scope and Catalog Filter
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use grace_core::{Cart, Money, Product};
//!
//! let ring = Product {
//!     id: 5,
//!     title: "Silver Ring".to_string(),
//!     category: "jewelery".to_string(),
//!     price: Money::from_cents(1099),
//!     image: "https://img.example/5.jpg".to_string(),
//! };
//!
//! let mut cart = Cart::new();
//! cart.add(&ring);
//! cart.increment(ring.id);
//!
//! assert_eq!(cart.totals().total_quantity, 2);
//! assert_eq!(cart.totals().total_price.to_string(), "$21.98");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartChange};
pub use catalog::{filter_by_category, Catalog, CategoryFilter, CategoryScope};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Jewelry category, spelled the way the Catalog Source spells it.
pub const JEWELRY_CATEGORY: &str = "jewelery";

/// Women's clothing category.
pub const WOMENS_CLOTHING_CATEGORY: &str = "women's clothing";

/// The categories the storefront sells by default.
pub const SUPPORTED_CATEGORIES: [&str; 2] = [JEWELRY_CATEGORY, WOMENS_CLOTHING_CATEGORY];

/// Key of the persistence slot holding the cart.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Maximum quantity of a single cart line.
///
/// Catches a mistyped quantity (1000 instead of 10) and keeps
/// `price × qty` within integer cents for every accepted price.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest unit price accepted from the Catalog Source or a restored cart
/// ($1,000,000.00).
pub const MAX_UNIT_PRICE_CENTS: i64 = 100_000_000;
