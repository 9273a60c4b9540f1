//! # Error Types
//!
//! Domain-specific error types for grace-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  grace-core errors (this file)                                         │
//! │  ├── CoreError        - Cart/catalog rule violations                   │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  grace-db errors (separate crate)                                      │
//! │  └── DbError          - Persistence slot failures                      │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  ├── CatalogError     - Catalog Source fetch/format failures           │
//! │  └── ApiError         - What the Presentation Layer sees               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Renderer               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Operations on a product id that is not in the cart are NOT errors here:
//! they report `CartChange::NotInCart` and leave state untouched.

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Cart and catalog rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A quantity update asked for a negative quantity.
    ///
    /// ## When This Occurs
    /// - `update_quantity(id, -3)` from a stale or malicious UI event
    ///
    /// The cart is left exactly as it was.
    #[error("Invalid quantity {requested} for product {product_id}")]
    InvalidQuantity { product_id: ProductId, requested: i64 },

    /// A category selector that is neither "all" nor an observed category.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// An in-scope Catalog Source record failed validation.
    ///
    /// ## When This Occurs
    /// - A jewelry product arrives with an empty title or a negative price
    ///
    /// Records outside the category scope are never validated.
    #[error("Product {product_id} is invalid: {reason}")]
    InvalidProduct {
        product_id: ProductId,
        #[source]
        reason: ValidationError,
    },

    /// A cart command arrived before the catalog finished loading.
    #[error("Catalog has not been loaded yet")]
    CatalogNotLoaded,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation of catalog records, restored cart lines and
/// configuration before any state changes.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Duplicate value (e.g., two cart lines for one product).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidQuantity {
            product_id: 1,
            requested: -3,
        };
        assert_eq!(err.to_string(), "Invalid quantity -3 for product 1");

        let err = CoreError::UnknownCategory("electronics".to_string());
        assert_eq!(err.to_string(), "Unknown category: electronics");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "title".to_string(),
        };
        assert_eq!(err.to_string(), "title is required");

        let err = ValidationError::Duplicate {
            field: "product id".to_string(),
            value: "4".to_string(),
        };
        assert_eq!(err.to_string(), "product id '4' already exists");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "category".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
