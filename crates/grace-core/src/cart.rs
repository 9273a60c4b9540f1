//! # Cart
//!
//! The authoritative cart model and every rule that mutates it.
//!
//! ## Item Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Product Id In The Cart                           │
//! │                                                                         │
//! │              add                increment                               │
//! │   ABSENT ──────────► PRESENT(1) ──────────► PRESENT(n > 1)              │
//! │     ▲                  │   ▲                   │                        │
//! │     │    decrement     │   │    decrement      │                        │
//! │     ├──────────────────┘   └───────────────────┘                        │
//! │     │                                                                   │
//! │     └──── update_quantity(0) / remove  (from any PRESENT state)         │
//! │                                                                         │
//! │  add on PRESENT: quantity unchanged (increment is a separate command)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product id
//! - Every line has `1 <= qty_in_cart <= MAX_ITEM_QUANTITY`
//! - Totals are recomputed from the lines on every read
//!
//! Commands that reference a product id not in the cart return
//! [`CartChange::NotInCart`] and leave the cart untouched.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{CartItem, CartSnapshot, CartTotals, Product, ProductId};
use crate::validation::{validate_cart_lines, validate_new_quantity};
use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// Cart Change
// =============================================================================

/// What a cart command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was created with quantity 1.
    Added,

    /// The product already had a line; quantity left as is.
    AlreadyInCart,

    /// An existing line now holds `quantity`.
    Updated { quantity: i64 },

    /// The line was deleted.
    Removed,

    /// Every line was deleted.
    Cleared,

    /// The line is already at [`MAX_ITEM_QUANTITY`]; nothing happened.
    AtLimit { quantity: i64 },

    /// The product id has no line; nothing happened.
    NotInCart,
}

impl CartChange {
    /// Whether the command was applied to an existing or new line.
    ///
    /// Applied commands are persisted and announced; `NotInCart` and
    /// `AtLimit` are not.
    pub fn is_applied(&self) -> bool {
        !matches!(self, CartChange::NotInCart | CartChange::AtLimit { .. })
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: lines in the order they were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Builds a cart from previously persisted lines.
    ///
    /// ## Errors
    /// - `CoreError::Validation` if a line is invalid, has a quantity below 1,
    ///   or repeats a product id
    pub fn from_items(items: Vec<CartItem>) -> CoreResult<Self> {
        validate_cart_lines(&items)?;
        Ok(Cart { items })
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Quantity held for a product, if it has a line.
    pub fn quantity_of(&self, product_id: ProductId) -> Option<i64> {
        self.line(product_id).map(|item| item.qty_in_cart)
    }

    fn line(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == product_id)
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == product_id)
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Puts a product in the cart.
    ///
    /// ## Behavior
    /// - Not in cart: new line with quantity 1
    /// - Already in cart: no change (use [`Cart::increment`])
    pub fn add(&mut self, product: &Product) -> CartChange {
        if self.line(product.id).is_some() {
            return CartChange::AlreadyInCart;
        }

        self.items.push(CartItem::new(product.clone()));
        CartChange::Added
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity > 0`: line now holds `quantity`
    /// - `quantity == 0`: line removed
    /// - product not in cart: `NotInCart`
    ///
    /// ## Errors
    /// - `CoreError::InvalidQuantity` for a negative quantity or one above
    ///   [`MAX_ITEM_QUANTITY`]; the cart is left unchanged even when the
    ///   product has no line
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> CoreResult<CartChange> {
        if validate_new_quantity(quantity).is_err() {
            return Err(CoreError::InvalidQuantity {
                product_id,
                requested: quantity,
            });
        }

        let Some(index) = self.position(product_id) else {
            return Ok(CartChange::NotInCart);
        };

        if quantity == 0 {
            self.items.remove(index);
            return Ok(CartChange::Removed);
        }

        self.items[index].qty_in_cart = quantity;
        Ok(CartChange::Updated { quantity })
    }

    /// Adds one to a line's quantity. A line at [`MAX_ITEM_QUANTITY`]
    /// stays where it is.
    pub fn increment(&mut self, product_id: ProductId) -> CartChange {
        match self.quantity_of(product_id) {
            Some(current) if current >= MAX_ITEM_QUANTITY => {
                CartChange::AtLimit { quantity: current }
            }
            Some(current) => self.set_existing(product_id, current + 1),
            None => CartChange::NotInCart,
        }
    }

    /// Takes one from a line's quantity; a line at 1 is removed.
    pub fn decrement(&mut self, product_id: ProductId) -> CartChange {
        match self.quantity_of(product_id) {
            Some(current) => self.set_existing(product_id, current - 1),
            None => CartChange::NotInCart,
        }
    }

    /// Deletes a line regardless of its quantity.
    pub fn remove(&mut self, product_id: ProductId) -> CartChange {
        match self.position(product_id) {
            Some(index) => {
                self.items.remove(index);
                CartChange::Removed
            }
            None => CartChange::NotInCart,
        }
    }

    /// Deletes every line.
    pub fn clear(&mut self) -> CartChange {
        self.items.clear();
        CartChange::Cleared
    }

    // `quantity` is derived from a present line and already in range.
    fn set_existing(&mut self, product_id: ProductId, quantity: i64) -> CartChange {
        self.update_quantity(product_id, quantity)
            .unwrap_or(CartChange::NotInCart)
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Totals computed from the current lines.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from_items(&self.items)
    }

    /// A detached copy of the lines plus fresh totals.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            totals: self.totals(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::MAX_UNIT_PRICE_CENTS;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn product(id: ProductId, price_cents: i64) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            category: "jewelery".to_string(),
            price: Money::from_cents(price_cents),
            image: format!("https://img.example/{}.jpg", id),
        }
    }

    fn assert_consistent(cart: &Cart) {
        let totals = cart.totals();
        let qty: i64 = cart.items().iter().map(|i| i.qty_in_cart).sum();
        let price: Money = cart.items().iter().map(|i| i.line_total()).sum();
        assert_eq!(totals.total_quantity, qty);
        assert_eq!(totals.total_price, price);
        assert!(cart.items().iter().all(|i| i.qty_in_cart >= 1));
    }

    #[test]
    fn test_repeat_add_keeps_quantity_one() {
        let mut cart = Cart::new();
        let p = product(1, 1000);

        assert_eq!(cart.add(&p), CartChange::Added);
        assert_eq!(cart.add(&p), CartChange::AlreadyInCart);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity_of(1), Some(1));
        assert_consistent(&cart);
    }

    #[test]
    fn test_decrement_down_to_removal() {
        let mut cart = Cart::new();
        cart.add(&product(2, 500));
        cart.update_quantity(2, 3).unwrap();
        assert_eq!(cart.totals().total_price.cents(), 1500);

        assert_eq!(cart.decrement(2), CartChange::Updated { quantity: 2 });
        assert_eq!(cart.totals().total_price.cents(), 1000);

        assert_eq!(cart.decrement(2), CartChange::Updated { quantity: 1 });
        assert_eq!(cart.totals().total_price.cents(), 500);

        assert_eq!(cart.decrement(2), CartChange::Removed);
        assert_eq!(cart.quantity_of(2), None);
        assert!(cart.totals().total_price.is_zero());
        assert_consistent(&cart);
    }

    #[test]
    fn test_update_absent_is_noop() {
        let mut cart = Cart::new();
        assert_eq!(cart.update_quantity(99, 5).unwrap(), CartChange::NotInCart);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1000));
        let before = cart.clone();

        let err = cart.update_quantity(1, -3).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidQuantity { product_id: 1, requested: -3 }
        ));
        assert_eq!(cart, before);

        assert!(cart.update_quantity(42, -1).is_err());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_update_to_zero_removes() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1000));
        cart.add(&product(2, 200));

        assert_eq!(cart.update_quantity(1, 0).unwrap(), CartChange::Removed);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].id(), 2);
    }

    #[test]
    fn test_increment_and_remove() {
        let mut cart = Cart::new();
        cart.add(&product(3, 250));

        assert_eq!(cart.increment(3), CartChange::Updated { quantity: 2 });
        assert_eq!(cart.increment(3), CartChange::Updated { quantity: 3 });
        assert_eq!(cart.totals().total_price.cents(), 750);

        assert_eq!(cart.increment(4), CartChange::NotInCart);
        assert_eq!(cart.decrement(4), CartChange::NotInCart);

        assert_eq!(cart.remove(3), CartChange::Removed);
        assert_eq!(cart.remove(3), CartChange::NotInCart);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_insertion_order_and_clear() {
        let mut cart = Cart::new();
        for id in [5, 1, 3] {
            cart.add(&product(id, 100));
        }
        cart.increment(1);

        let order: Vec<ProductId> = cart.items().iter().map(|i| i.id()).collect();
        assert_eq!(order, vec![5, 1, 3]);

        assert_eq!(cart.clear(), CartChange::Cleared);
        assert!(cart.is_empty());
        assert_eq!(cart.totals(), CartTotals::default());
    }

    #[test]
    fn test_persisted_form_round_trips() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1099));
        cart.add(&product(7, 2230));
        cart.update_quantity(7, 4).unwrap();

        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.starts_with('['));

        let items: Vec<CartItem> = serde_json::from_str(&json).unwrap();
        let restored = Cart::from_items(items).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_from_items_rejects_broken_lines() {
        let line = CartItem::new(product(1, 100));
        assert!(Cart::from_items(vec![line.clone(), line.clone()]).is_err());

        let mut zero = line;
        zero.qty_in_cart = 0;
        assert!(Cart::from_items(vec![zero]).is_err());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100));
        let snapshot = cart.snapshot();

        cart.increment(1);
        assert_eq!(snapshot.quantity_of(1), Some(1));
        assert_eq!(cart.quantity_of(1), Some(2));
    }

    #[test]
    fn test_change_applied_flag() {
        assert!(CartChange::Added.is_applied());
        assert!(CartChange::AlreadyInCart.is_applied());
        assert!(CartChange::Cleared.is_applied());
        assert!(!CartChange::NotInCart.is_applied());
        assert!(!CartChange::AtLimit { quantity: MAX_ITEM_QUANTITY }.is_applied());
    }

    #[test]
    fn test_quantity_above_limit_rejected() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1099));
        let before = cart.clone();

        let err = cart.update_quantity(1, i64::MAX / 100).unwrap_err();
        assert!(matches!(err, CoreError::InvalidQuantity { product_id: 1, .. }));
        assert_eq!(cart, before);
        assert_eq!(cart.totals().total_price.cents(), 1099);

        assert!(cart.update_quantity(1, MAX_ITEM_QUANTITY + 1).is_err());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_increment_stops_at_limit() {
        let mut cart = Cart::new();
        cart.add(&product(1, MAX_UNIT_PRICE_CENTS));
        cart.update_quantity(1, MAX_ITEM_QUANTITY).unwrap();

        assert_eq!(
            cart.increment(1),
            CartChange::AtLimit { quantity: MAX_ITEM_QUANTITY }
        );
        assert_eq!(cart.quantity_of(1), Some(MAX_ITEM_QUANTITY));
        assert_eq!(
            cart.totals().total_price.cents(),
            MAX_UNIT_PRICE_CENTS * MAX_ITEM_QUANTITY
        );
        assert_consistent(&cart);
    }

    #[test]
    fn test_from_items_rejects_oversized_quantity() {
        let mut line = CartItem::new(product(1, 1099));
        line.qty_in_cart = i64::MAX / 100;
        assert!(Cart::from_items(vec![line]).is_err());
    }

    // -------------------------------------------------------------------------
    // Command sequences
    // -------------------------------------------------------------------------

    #[derive(Debug, Clone)]
    enum Command {
        Add(ProductId),
        Update(ProductId, i64),
        Increment(ProductId),
        Decrement(ProductId),
        Remove(ProductId),
        Clear,
    }

    const CATALOG_SIZE: usize = 5;

    // Ids 1..=5 exist in the catalog; 6 never does.
    fn command_strategy() -> impl Strategy<Value = Command> {
        let id = 1..=(CATALOG_SIZE as ProductId + 1);
        prop_oneof![
            4 => id.clone().prop_map(Command::Add),
            3 => (id.clone(), -2i64..=MAX_ITEM_QUANTITY + 2)
                .prop_map(|(id, qty)| Command::Update(id, qty)),
            3 => id.clone().prop_map(Command::Increment),
            3 => id.clone().prop_map(Command::Decrement),
            2 => id.prop_map(Command::Remove),
            1 => Just(Command::Clear),
        ]
    }

    proptest! {
        #[test]
        fn test_invariants_hold_for_any_command_sequence(
            prices in prop::collection::vec(0i64..=MAX_UNIT_PRICE_CENTS, CATALOG_SIZE),
            commands in prop::collection::vec(command_strategy(), 0..60),
        ) {
            let catalog: Vec<Product> = prices
                .iter()
                .enumerate()
                .map(|(i, &cents)| product(i as ProductId + 1, cents))
                .collect();
            let mut cart = Cart::new();

            for command in commands {
                let before = cart.clone();
                match command {
                    Command::Add(id) => {
                        if let Some(p) = catalog.iter().find(|p| p.id == id) {
                            cart.add(p);
                        }
                    }
                    Command::Update(id, qty) => {
                        if cart.update_quantity(id, qty).is_err() {
                            prop_assert_eq!(&cart, &before);
                        }
                    }
                    Command::Increment(id) => {
                        cart.increment(id);
                    }
                    Command::Decrement(id) => {
                        cart.decrement(id);
                    }
                    Command::Remove(id) => {
                        cart.remove(id);
                    }
                    Command::Clear => {
                        cart.clear();
                    }
                }

                // one line per id, every quantity in range
                let mut seen = HashSet::new();
                prop_assert!(cart.items().iter().all(|item| seen.insert(item.id())));
                prop_assert!(cart
                    .items()
                    .iter()
                    .all(|item| (1..=MAX_ITEM_QUANTITY).contains(&item.qty_in_cart)));

                // totals equal the live sums
                let totals = cart.totals();
                let quantity: i64 = cart.items().iter().map(|item| item.qty_in_cart).sum();
                let cents: i64 = cart
                    .items()
                    .iter()
                    .map(|item| item.product.price.cents() * item.qty_in_cart)
                    .sum();
                prop_assert_eq!(totals.item_count, cart.items().len());
                prop_assert_eq!(totals.total_quantity, quantity);
                prop_assert_eq!(totals.total_price.cents(), cents);

                // persisted form restores the same cart
                let json = serde_json::to_string(&cart).unwrap();
                let restored = Cart::from_items(serde_json::from_str(&json).unwrap()).unwrap();
                prop_assert_eq!(&restored, &cart);
            }
        }
    }
}
