//! # Validation Module
//!
//! Input validation for everything that enters the engine from outside:
//! Catalog Source records, quantity commands from the UI, cart lines restored
//! from the persistence slot, and category configuration.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  └── Shape: is it an array of product-shaped objects?                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Product records: title, category, image present; 0 ≤ price ≤ max  │
//! │  ├── Quantity commands: 0 ≤ qty ≤ MAX_ITEM_QUANTITY                    │
//! │  └── Restored lines: 1 ≤ qty ≤ max, one line per product id            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart (cart.rs)                                               │
//! │  └── Mutations that preserve the invariants by construction            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CartItem, Product};
use crate::{MAX_ITEM_QUANTITY, MAX_UNIT_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product title accepted from the Catalog Source.
pub const MAX_TITLE_LEN: usize = 500;

// =============================================================================
// Product Validators
// =============================================================================

/// Validates a product title.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most [`MAX_TITLE_LEN`] characters
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LEN,
        });
    }

    Ok(())
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (>= 0); zero is allowed
/// - At most [`MAX_UNIT_PRICE_CENTS`]
///
/// ## Example
/// ```rust
/// use grace_core::money::Money;
/// use grace_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() || price.cents() > MAX_UNIT_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a full product record from the Catalog Source.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_title(&product.title)?;

    if product.category.is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    if product.image.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "image".to_string(),
        });
    }

    validate_price(product.price)
}

// =============================================================================
// Quantity Validators
// =============================================================================

/// Validates a quantity held by a cart line.
///
/// ## Rules
/// - Must be positive (> 0); a zero line must not exist
/// - Must not exceed [`MAX_ITEM_QUANTITY`]
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "qtyInCart".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "qtyInCart".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates the target of a quantity update command.
///
/// ## Rules
/// - Zero is allowed (it removes the line)
/// - Negative values and values above [`MAX_ITEM_QUANTITY`] are rejected
///
/// ```text
/// update_quantity(id, n)
///      │
///      ├── n < 0 or n > 999 → rejected, cart unchanged
///      ├── n == 0           → line removed
///      └── n > 0            → qty set to n
/// ```
pub fn validate_new_quantity(qty: i64) -> ValidationResult<()> {
    if !(0..=MAX_ITEM_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates a list of cart lines, e.g. after restoring them from storage.
///
/// ## Rules
/// - Every product record is valid
/// - Every line has `1 <= qty_in_cart <= MAX_ITEM_QUANTITY`
/// - No product id appears twice
pub fn validate_cart_lines(items: &[CartItem]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(items.len());

    for item in items {
        validate_product(&item.product)?;
        validate_quantity(item.qty_in_cart)?;

        if !seen.insert(item.id()) {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: item.id().to_string(),
            });
        }
    }

    Ok(())
}

/// Validates a configured category set.
///
/// ## Rules
/// - At least one category
/// - No empty names
/// - No duplicates
pub fn validate_categories(categories: &[String]) -> ValidationResult<()> {
    if categories.is_empty() {
        return Err(ValidationError::Required {
            field: "categories".to_string(),
        });
    }

    let mut seen = HashSet::with_capacity(categories.len());
    for category in categories {
        if category.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "category".to_string(),
            });
        }
        if !seen.insert(category.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "category".to_string(),
                value: category.clone(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: 1,
            title: "Solid Gold Petite Micropave".to_string(),
            category: "jewelery".to_string(),
            price: Money::from_cents(16800),
            image: "https://img.example/1.jpg".to_string(),
        }
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Mens Casual Slim Fit").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"A".repeat(MAX_TITLE_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_product() {
        assert!(validate_product(&product()).is_ok());

        let mut p = product();
        p.category = String::new();
        assert!(matches!(
            validate_product(&p),
            Err(ValidationError::Required { .. })
        ));

        let mut p = product();
        p.price = Money::from_cents(-1);
        assert!(matches!(
            validate_product(&p),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_quantities() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());

        assert!(validate_new_quantity(0).is_ok());
        assert!(validate_new_quantity(5).is_ok());
        assert!(validate_new_quantity(-3).is_err());

        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
        assert!(validate_new_quantity(MAX_ITEM_QUANTITY).is_ok());
        assert!(validate_new_quantity(i64::MAX / 100).is_err());
    }

    #[test]
    fn test_each_error_kind_has_a_producer() {
        let errors = [
            validate_title("").unwrap_err(),
            validate_title(&"A".repeat(MAX_TITLE_LEN + 1)).unwrap_err(),
            validate_price(Money::from_cents(-1)).unwrap_err(),
            validate_quantity(0).unwrap_err(),
            validate_categories(&["jewelery".to_string(), "jewelery".to_string()]).unwrap_err(),
        ];

        for err in errors {
            match err {
                ValidationError::Required { .. }
                | ValidationError::TooLong { .. }
                | ValidationError::OutOfRange { .. }
                | ValidationError::MustBePositive { .. }
                | ValidationError::Duplicate { .. } => {}
            }
        }
    }

    #[test]
    fn test_validate_price_bounds() {
        assert!(validate_price(Money::from_cents(MAX_UNIT_PRICE_CENTS)).is_ok());
        assert!(matches!(
            validate_price(Money::from_cents(MAX_UNIT_PRICE_CENTS + 1)),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_cart_lines_rejects_duplicates_and_zero() {
        let line = CartItem::new(product());
        assert!(validate_cart_lines(&[line.clone()]).is_ok());

        assert!(matches!(
            validate_cart_lines(&[line.clone(), line.clone()]),
            Err(ValidationError::Duplicate { .. })
        ));

        let mut zero = line.clone();
        zero.qty_in_cart = 0;
        assert!(validate_cart_lines(&[zero]).is_err());

        let mut huge = line;
        huge.qty_in_cart = i64::MAX / 100;
        assert!(validate_cart_lines(&[huge]).is_err());
    }

    #[test]
    fn test_validate_categories() {
        let ok = vec!["jewelery".to_string(), "women's clothing".to_string()];
        assert!(validate_categories(&ok).is_ok());
        assert!(validate_categories(&[]).is_err());
        assert!(validate_categories(&["jewelery".to_string(), "jewelery".to_string()]).is_err());
        assert!(validate_categories(&[" ".to_string()]).is_err());
    }
}
