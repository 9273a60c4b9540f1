//! # Catalog Reads
//!
//! What the product grid and the category buttons render from.

use grace_core::catalog::ALL_SELECTOR;
use grace_core::{CategoryFilter, Product};
use serde::Serialize;
use tracing::debug;

use super::SyncFacade;
use crate::error::ApiResult;

/// One category button: the selector value to send back and its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOption {
    pub value: String,
    pub label: String,
}

impl CategoryOption {
    fn from_filter(filter: CategoryFilter) -> Self {
        let label = filter.label();
        let value = match filter {
            CategoryFilter::All => ALL_SELECTOR.to_string(),
            CategoryFilter::Category(c) => c,
        };
        CategoryOption { value, label }
    }
}

impl SyncFacade {
    /// Products passing a selector string (`"all"` or an observed category).
    ///
    /// ## Errors
    /// - `CATALOG_NOT_LOADED` before `load_catalog`
    /// - `UNKNOWN_CATEGORY` for any other selector
    pub fn filter_products(&self, selector: &str) -> ApiResult<Vec<Product>> {
        let catalog = self.catalog()?;
        let filter = catalog.selector(selector)?;
        let products = catalog.filter(&filter);

        debug!(selector, count = products.len(), "filter_products");
        Ok(products)
    }

    /// Category buttons: "All" first, then observed categories in
    /// first-seen order.
    pub fn categories(&self) -> ApiResult<Vec<CategoryOption>> {
        let catalog = self.catalog()?;

        let options = std::iter::once(CategoryFilter::All)
            .chain(
                catalog
                    .categories()
                    .into_iter()
                    .map(|c| CategoryFilter::Category(c.to_string())),
            )
            .map(CategoryOption::from_filter)
            .collect();

        Ok(options)
    }
}
