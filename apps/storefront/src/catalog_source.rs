//! # Catalog Source
//!
//! The one inbound call of the storefront: `GET` an array of products.
//!
//! ## Fetch Outcomes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  GET {catalog.url}                                                     │
//! │     │                                                                   │
//! │     ├── connect / timeout failure ──────► CatalogError::Fetch(None)    │
//! │     ├── status not 200 ─────────────────► CatalogError::Fetch(status)  │
//! │     │                                                                   │
//! │     ▼  body                                                            │
//! │     ├── not JSON / not an array ────────► CatalogError::Format         │
//! │     ├── a record is not product-shaped ─► CatalogError::Format         │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  Vec<Product>  (all records, before the category scope gate)           │
//! │                                                                         │
//! │  Field rules (title, price range, ...) run in `Catalog::from_records`  │
//! │  and only on in-scope records.                                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed fetch yields no products at all; there is no partial success.

use std::sync::Mutex;

use async_trait::async_trait;
use grace_core::Product;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::CatalogSettings;
use crate::error::{CatalogError, CatalogResult, ConfigError, ConfigResult};

// =============================================================================
// Trait
// =============================================================================

/// Supplies raw product records.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches every product record the source offers.
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>>;
}

/// Parses a Catalog Source body into product records.
///
/// Only the shape is checked here: a non-array body, or a record that is not
/// product-shaped, is a format error. Field values are left to the category
/// scope gate.
pub fn parse_products(body: &str) -> CatalogResult<Vec<Product>> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| CatalogError::Format(format!("body is not JSON: {}", e)))?;

    let Value::Array(records) = value else {
        return Err(CatalogError::Format(format!(
            "expected an array of products, got {}",
            json_kind(&value)
        )));
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value(record)
                .map_err(|e| CatalogError::Format(format!("record {}: {}", index, e)))
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =============================================================================
// HTTP
// =============================================================================

/// Catalog Source backed by a REST endpoint.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    url: Url,
    client: Client,
}

impl HttpCatalogSource {
    /// Creates a client for the configured endpoint.
    pub fn new(settings: &CatalogSettings) -> ConfigResult<Self> {
        let url = Url::parse(&settings.url)
            .map_err(|e| ConfigError::Invalid(format!("catalog.url: {}", e)))?;

        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| ConfigError::Invalid(format!("Failed to create HTTP client: {}", e)))?;

        Ok(HttpCatalogSource { url, client })
    }

    /// The endpoint this source reads from.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
        info!(url = %self.url, "Fetching catalog");

        let response = self
            .client
            .get(self.url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| CatalogError::transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            let reason = status.canonical_reason().unwrap_or("Unknown status").to_string();
            warn!(status = status.as_u16(), "Catalog Source answered with an error status");
            return Err(CatalogError::Fetch {
                status: Some(status.as_u16()),
                message: reason,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::transport(format!("Failed to read response body: {}", e)))?;

        let products = parse_products(&body)?;
        debug!(count = products.len(), "Catalog records decoded");
        Ok(products)
    }
}

// =============================================================================
// Static
// =============================================================================

/// A Catalog Source that replays a fixed outcome. Useful for tests and demos.
#[derive(Debug)]
pub struct StaticCatalogSource {
    outcome: Mutex<Option<CatalogResult<Vec<Product>>>>,
    fallback: Vec<Product>,
}

impl StaticCatalogSource {
    /// Always returns `products`.
    pub fn new(products: Vec<Product>) -> Self {
        StaticCatalogSource {
            outcome: Mutex::new(None),
            fallback: products,
        }
    }

    /// Fails once with `error`, then returns `products` on later fetches.
    pub fn failing_once(error: CatalogError, products: Vec<Product>) -> Self {
        StaticCatalogSource {
            outcome: Mutex::new(Some(Err(error))),
            fallback: products,
        }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
        let pending = match self.outcome.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        pending.unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_PRODUCTS: &str = r#"[
        {
            "id": 5,
            "title": "John Hardy Women's Legends Naga Gold & Silver Dragon Station Chain Bracelet",
            "price": 695,
            "description": "From our Legends Collection",
            "category": "jewelery",
            "image": "https://fakestoreapi.com/img/71pWzhdJNwL._AC_UL640_QL65_ML3_.jpg",
            "rating": { "rate": 4.6, "count": 400 }
        },
        {
            "id": 15,
            "title": "BIYLACLESEN Women's 3-in-1 Snowboard Jacket Winter Coats",
            "price": 56.99,
            "category": "women's clothing",
            "image": "https://fakestoreapi.com/img/51Y5NI-I5jL._AC_UX679_.jpg"
        }
    ]"#;

    fn settings(url: String) -> CatalogSettings {
        CatalogSettings {
            url,
            timeout_secs: 1,
            ..CatalogSettings::default()
        }
    }

    #[test]
    fn test_parse_products() {
        let products = parse_products(TWO_PRODUCTS).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].price.cents(), 5699);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_products(r#"{"products": []}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Format(ref m) if m.contains("an object")));

        assert!(matches!(parse_products("<html>"), Err(CatalogError::Format(_))));
        assert!(matches!(parse_products("\"[]\""), Err(CatalogError::Format(_))));
    }

    #[test]
    fn test_parse_rejects_bad_record() {
        let err = parse_products(r#"[{"id": 1, "title": "No price"}]"#).unwrap_err();
        assert!(matches!(err, CatalogError::Format(ref m) if m.starts_with("record 0")));

        let not_a_number = r#"[{"id": 1, "title": "T", "price": "cheap", "category": "jewelery", "image": "i"}]"#;
        assert!(matches!(parse_products(not_a_number), Err(CatalogError::Format(_))));
    }

    #[test]
    fn test_parse_leaves_field_rules_to_the_scope_gate() {
        let odd = r#"[{"id": 3, "title": "", "price": -2, "category": "electronics", "image": "i"}]"#;
        let products = parse_products(odd).unwrap();
        assert_eq!(products[0].id, 3);
    }

    #[tokio::test]
    async fn test_http_fetch_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/products")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(TWO_PRODUCTS)
            .create_async()
            .await;

        let source = HttpCatalogSource::new(&settings(format!("{}/products", server.url()))).unwrap();
        let products = source.fetch_products().await.unwrap();

        assert_eq!(products.iter().map(|p| p.id).collect::<Vec<_>>(), vec![5, 15]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_fetch_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/products")
            .with_status(503)
            .expect(1)
            .create_async()
            .await;

        let source = HttpCatalogSource::new(&settings(format!("{}/products", server.url()))).unwrap();
        let err = source.fetch_products().await.unwrap_err();

        assert!(matches!(err, CatalogError::Fetch { status: Some(503), .. }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_fetch_non_array_body() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/products")
            .with_status(200)
            .with_body(r#"{"message": "maintenance"}"#)
            .create_async()
            .await;

        let source = HttpCatalogSource::new(&settings(format!("{}/products", server.url()))).unwrap();
        assert!(matches!(
            source.fetch_products().await,
            Err(CatalogError::Format(_))
        ));
    }

    #[tokio::test]
    async fn test_http_fetch_connection_refused() {
        let source = HttpCatalogSource::new(&settings("http://127.0.0.1:9/products".to_string())).unwrap();
        assert!(matches!(
            source.fetch_products().await,
            Err(CatalogError::Fetch { status: None, .. })
        ));
    }

    #[tokio::test]
    async fn test_static_source_fails_once() {
        let source = StaticCatalogSource::failing_once(CatalogError::transport("offline"), vec![]);
        assert!(source.fetch_products().await.is_err());
        assert!(source.fetch_products().await.unwrap().is_empty());
    }
}
