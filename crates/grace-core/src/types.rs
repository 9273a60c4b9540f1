//! # Domain Types
//!
//! Core domain types shared by the Cart Store, the Catalog Filter and the
//! renderer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartItem     │   │  CartSnapshot   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  Product        │──►│  items[]        │       │
//! │  │  title          │   │  qty_in_cart≥1  │   │  CartTotals     │       │
//! │  │  category       │   └─────────────────┘   └─────────────────┘       │
//! │  │  price (Money)  │                                                    │
//! │  │  image          │   Product: immutable once fetched                  │
//! │  └─────────────────┘   CartItem: created by add, destroyed at qty 0     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All of these cross the wire in camelCase, and `CartItem` flattens its
//! product so the persisted slot holds
//! `{ id, title, category, price, image, qtyInCart }`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Stable product identifier assigned by the Catalog Source.
pub type ProductId = u64;

// =============================================================================
// Product
// =============================================================================

/// A product as supplied by the Catalog Source.
///
/// Read-only for the lifetime of a session. Unknown fields in the upstream
/// payload (`description`, `rating`, ...) are dropped on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier.
    #[ts(type = "number")]
    pub id: ProductId,

    /// Display title.
    pub title: String,

    /// Category string, exactly as the Catalog Source spells it.
    pub category: String,

    /// Unit price (decimal number on the wire).
    #[ts(type = "number")]
    pub price: Money,

    /// Image URL.
    pub image: String,
}

// =============================================================================
// Cart Item
// =============================================================================

/// A product in the cart with its quantity.
///
/// ## Invariants
/// - `qty_in_cart >= 1` while the item exists; reaching zero removes it
/// - At most one `CartItem` per product id (enforced by [`crate::Cart`])
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    /// Product data, frozen at the time it was added.
    #[serde(flatten)]
    pub product: Product,

    /// Quantity in cart.
    #[ts(type = "number")]
    pub qty_in_cart: i64,
}

impl CartItem {
    /// Creates a new line for a product with quantity 1.
    pub fn new(product: Product) -> Self {
        CartItem {
            product,
            qty_in_cart: 1,
        }
    }

    /// Product id of this line.
    #[inline]
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.qty_in_cart)
    }
}

// =============================================================================
// Totals & Snapshot
// =============================================================================

/// Totals derived from the live cart.
///
/// Never cached: built fresh from the items every time it is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Number of distinct lines.
    #[ts(type = "number")]
    pub item_count: usize,

    /// Σ qty_in_cart.
    #[ts(type = "number")]
    pub total_quantity: i64,

    /// Σ price × qty_in_cart.
    #[ts(type = "number")]
    pub total_price: Money,
}

impl CartTotals {
    /// Builds totals from a sequence of cart lines.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a CartItem>) -> Self {
        items
            .into_iter()
            .fold(CartTotals::default(), |mut totals, item| {
                totals.item_count += 1;
                totals.total_quantity += item.qty_in_cart;
                totals.total_price += item.line_total();
                totals
            })
    }

    /// The cart counter shown next to the cart icon, e.g. `(3)`.
    pub fn badge_label(&self) -> String {
        format!("({})", self.total_quantity)
    }
}

/// Read-only view of the cart handed to the Presentation Layer.
///
/// This is also the payload of every change notification:
/// `{ items, itemCount, totalQuantity, totalPrice }`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    /// Lines in insertion order.
    pub items: Vec<CartItem>,

    /// Totals computed from `items`.
    #[serde(flatten)]
    pub totals: CartTotals,
}

impl CartSnapshot {
    /// Quantity of a product in this snapshot, if present.
    pub fn quantity_of(&self, product_id: ProductId) -> Option<i64> {
        self.items
            .iter()
            .find(|item| item.id() == product_id)
            .map(|item| item.qty_in_cart)
    }

    /// Checks if the snapshot has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
