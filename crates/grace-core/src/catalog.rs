//! # Catalog Filter
//!
//! Narrows the raw Catalog Source records to the in-scope categories, then
//! on demand to a single selected category.
//!
//! ## Two Gates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Catalog Source records (any category)                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Gate 1: CategoryScope  (once, when the Catalog is built)               │
//! │  ├── keep only "jewelery" and "women's clothing"                        │
//! │  └── validate the survivors (out-of-scope records are never checked)    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Catalog  (read-only for the session)                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Gate 2: filter_by_category(products, selector)  (every render)         │
//! │  ├── CategoryFilter::All         → every in-scope product, in order     │
//! │  └── CategoryFilter::Category(c) → products whose category == c         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Category matching is exact (case and spelling sensitive). The upstream API
//! spells the jewelry category `"jewelery"` and the scope uses that spelling.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Product, ProductId};
use crate::validation::{validate_categories, validate_product};
use crate::{JEWELRY_CATEGORY, WOMENS_CLOTHING_CATEGORY};

/// Selector value meaning "every in-scope category".
pub const ALL_SELECTOR: &str = "all";

// =============================================================================
// Category Filter
// =============================================================================

/// The active category selector.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum CategoryFilter {
    /// The "all" pseudo-category.
    #[default]
    All,

    /// One specific category, spelled as the catalog spells it.
    Category(String),
}

impl CategoryFilter {
    /// Human-readable label for a filter button.
    ///
    /// ## Example
    /// ```rust
    /// use grace_core::catalog::CategoryFilter;
    ///
    /// assert_eq!(CategoryFilter::All.label(), "All");
    /// assert_eq!(CategoryFilter::Category("jewelery".into()).label(), "Jewelry");
    /// ```
    pub fn label(&self) -> String {
        match self {
            CategoryFilter::All => "All".to_string(),
            CategoryFilter::Category(c) if c == JEWELRY_CATEGORY => "Jewelry".to_string(),
            CategoryFilter::Category(c) if c == WOMENS_CLOTHING_CATEGORY => {
                "Women's Clothing".to_string()
            }
            CategoryFilter::Category(c) => c.clone(),
        }
    }

    /// Checks whether a product passes this selector.
    #[inline]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(c) => product.category == *c,
        }
    }
}

/// Returns the products that pass `selector`, preserving input order.
///
/// Pure: the input slice is never modified.
///
/// ## Example
/// ```rust
/// use grace_core::catalog::{filter_by_category, CategoryFilter};
///
/// let none = filter_by_category(&[], &CategoryFilter::All);
/// assert!(none.is_empty());
/// ```
pub fn filter_by_category(products: &[Product], selector: &CategoryFilter) -> Vec<Product> {
    products
        .iter()
        .filter(|p| selector.matches(p))
        .cloned()
        .collect()
}

// =============================================================================
// Category Scope
// =============================================================================

/// The set of categories the storefront sells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryScope {
    categories: Vec<String>,
}

impl CategoryScope {
    /// Builds a scope from a configured category list.
    ///
    /// ## Errors
    /// - `CoreError::Validation` if the list is empty, has blanks or repeats
    pub fn new(categories: Vec<String>) -> CoreResult<Self> {
        validate_categories(&categories)?;
        Ok(CategoryScope { categories })
    }

    /// Checks if a category is in scope (exact match).
    pub fn contains(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Categories in configured order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Keeps the in-scope products, in order.
    pub fn retain(&self, products: Vec<Product>) -> Vec<Product> {
        products
            .into_iter()
            .filter(|p| self.contains(&p.category))
            .collect()
    }
}

impl Default for CategoryScope {
    fn default() -> Self {
        CategoryScope {
            categories: vec![
                JEWELRY_CATEGORY.to_string(),
                WOMENS_CLOTHING_CATEGORY.to_string(),
            ],
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The in-scope product set for a session.
///
/// Built once from Catalog Source records; immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Materializes the catalog, applying the category scope gate.
    ///
    /// ## Errors
    /// - `CoreError::InvalidProduct` if an in-scope record fails validation
    pub fn from_records(records: Vec<Product>, scope: &CategoryScope) -> CoreResult<Self> {
        let products = scope.retain(records);

        for product in &products {
            validate_product(product).map_err(|reason| CoreError::InvalidProduct {
                product_id: product.id,
                reason,
            })?;
        }

        Ok(Catalog { products })
    }

    /// Every in-scope product, in source order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of in-scope products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Checks if no product survived the scope gate.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks up a product by id.
    pub fn get(&self, product_id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Observed categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(&product.category);
            }
        }
        seen
    }

    /// Parses a selector string from the UI.
    ///
    /// ```text
    /// "all" / "ALL"          → CategoryFilter::All
    /// "jewelery" (observed)  → CategoryFilter::Category("jewelery")
    /// "electronics"          → CoreError::UnknownCategory
    /// ```
    pub fn selector(&self, raw: &str) -> CoreResult<CategoryFilter> {
        if raw.eq_ignore_ascii_case(ALL_SELECTOR) {
            return Ok(CategoryFilter::All);
        }

        if self.products.iter().any(|p| p.category == raw) {
            Ok(CategoryFilter::Category(raw.to_string()))
        } else {
            Err(CoreError::UnknownCategory(raw.to_string()))
        }
    }

    /// Products passing `selector`.
    pub fn filter(&self, selector: &CategoryFilter) -> Vec<Product> {
        filter_by_category(&self.products, selector)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn product(id: ProductId, category: &str) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            category: category.to_string(),
            price: Money::from_cents(1000 + id as i64),
            image: format!("https://img.example/{}.jpg", id),
        }
    }

    fn raw_records() -> Vec<Product> {
        vec![
            product(1, "men's clothing"),
            product(5, "jewelery"),
            product(9, "electronics"),
            product(15, "women's clothing"),
            product(6, "jewelery"),
            product(16, "women's clothing"),
        ]
    }

    fn ids(products: &[Product]) -> Vec<ProductId> {
        products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_scope_gate_drops_out_of_scope_products() {
        let catalog = Catalog::from_records(raw_records(), &CategoryScope::default()).unwrap();

        assert_eq!(ids(catalog.products()), vec![5, 15, 6, 16]);
        assert!(catalog.get(1).is_none());
        assert!(catalog.get(9).is_none());
        assert_eq!(catalog.get(6).map(|p| p.id), Some(6));
    }

    #[test]
    fn test_filter_all_returns_everything_in_order() {
        let catalog = Catalog::from_records(raw_records(), &CategoryScope::default()).unwrap();
        let all = catalog.filter(&CategoryFilter::All);
        assert_eq!(all, catalog.products());
    }

    #[test]
    fn test_filter_by_specific_category() {
        let catalog = Catalog::from_records(raw_records(), &CategoryScope::default()).unwrap();

        let jewelry = catalog.filter(&CategoryFilter::Category("jewelery".to_string()));
        assert_eq!(ids(&jewelry), vec![5, 6]);

        let women = catalog.filter(&CategoryFilter::Category("women's clothing".to_string()));
        assert_eq!(ids(&women), vec![15, 16]);
    }

    #[test]
    fn test_filter_is_case_sensitive_and_pure() {
        let products = vec![product(5, "jewelery")];
        let out = filter_by_category(&products, &CategoryFilter::Category("Jewelery".to_string()));
        assert!(out.is_empty());
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn test_observed_categories_first_seen_order() {
        let catalog = Catalog::from_records(raw_records(), &CategoryScope::default()).unwrap();
        assert_eq!(catalog.categories(), vec!["jewelery", "women's clothing"]);
    }

    #[test]
    fn test_selector_parsing() {
        let catalog = Catalog::from_records(raw_records(), &CategoryScope::default()).unwrap();

        assert_eq!(catalog.selector("all").unwrap(), CategoryFilter::All);
        assert_eq!(catalog.selector("All").unwrap(), CategoryFilter::All);
        assert_eq!(
            catalog.selector("jewelery").unwrap(),
            CategoryFilter::Category("jewelery".to_string())
        );
        assert!(matches!(
            catalog.selector("electronics"),
            Err(CoreError::UnknownCategory(_))
        ));
        assert!(catalog.selector("JEWELERY").is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(CategoryFilter::All.label(), "All");
        assert_eq!(
            CategoryFilter::Category("women's clothing".to_string()).label(),
            "Women's Clothing"
        );
        assert_eq!(CategoryFilter::Category("hats".to_string()).label(), "hats");
    }

    #[test]
    fn test_out_of_scope_records_are_not_validated() {
        let mut broken = product(9, "electronics");
        broken.title = String::new();
        broken.price = Money::from_cents(-100);

        let mut records = raw_records();
        records.push(broken);

        let catalog = Catalog::from_records(records, &CategoryScope::default()).unwrap();
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_invalid_in_scope_record_fails_the_catalog() {
        let mut broken = product(7, "jewelery");
        broken.price = Money::from_cents(-100);

        let mut records = raw_records();
        records.push(broken);

        assert!(matches!(
            Catalog::from_records(records, &CategoryScope::default()),
            Err(CoreError::InvalidProduct { product_id: 7, .. })
        ));
    }

    #[test]
    fn test_custom_scope_validation() {
        assert!(CategoryScope::new(vec![]).is_err());

        let scope = CategoryScope::new(vec!["electronics".to_string()]).unwrap();
        let catalog = Catalog::from_records(raw_records(), &scope).unwrap();
        assert_eq!(ids(catalog.products()), vec![9]);
    }
}
