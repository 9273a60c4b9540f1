//! # Storefront Error Types
//!
//! Errors raised by the outer layer and the single error type the
//! Presentation Layer sees.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  CatalogSource::fetch()                                                │
//! │    ├── transport error / non-2xx ──► CatalogError::Fetch  ──┐          │
//! │    └── body is not [Product, ...] ─► CatalogError::Format ──┤          │
//! │                                                             │          │
//! │  Cart command                                               │          │
//! │    ├── negative quantity ─────────► CoreError::InvalidQuantity ──┤     │
//! │    └── before catalog load ───────► CoreError::CatalogNotLoaded ─┤     │
//! │                                                             │          │
//! │  Startup                                                    │          │
//! │    ├── bad config ────────────────► ConfigError ────────────┤          │
//! │    └── database unreachable ──────► DbError ────────────────┤          │
//! │                                                             ▼          │
//! │                                       ApiError { code, message }       │
//! │                                                                         │
//! │  NOT errors: commands on product ids that are not in the cart, and     │
//! │  slot write failures (logged, in-memory cart stays authoritative).     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use grace_core::CoreError;
use grace_db::DbError;
use serde::Serialize;
use thiserror::Error;

// =============================================================================
// Catalog Error
// =============================================================================

/// Catalog Source failures. Neither kind is retried automatically.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request failed or the server answered with a non-success status.
    ///
    /// ## When This Occurs
    /// - DNS / connect / timeout failures (`status` is `None`)
    /// - 4xx / 5xx responses (`status` holds the code)
    #[error("Catalog fetch failed{}: {message}", status_suffix(.status))]
    Fetch { status: Option<u16>, message: String },

    /// The body is not a sequence of product-shaped records.
    ///
    /// ## When This Occurs
    /// - Body is a JSON object, string or number instead of an array
    /// - A record misses `id`, `title`, `category`, `price` or `image`
    /// - A record fails validation (e.g. negative price)
    #[error("Catalog payload is malformed: {0}")]
    Format(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({})", s)).unwrap_or_default()
}

impl CatalogError {
    /// Creates a fetch error without an HTTP status.
    pub fn transport(message: impl Into<String>) -> Self {
        CatalogError::Fetch {
            status: None,
            message: message.into(),
        }
    }
}

/// Result type for Catalog Source operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

// =============================================================================
// Config Error
// =============================================================================

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for `StorefrontConfig`.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is present but unusable.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// No platform directory could be determined.
    #[error("Could not determine the {0} directory")]
    NoPlatformDir(&'static str),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// API Error
// =============================================================================

/// Error returned to the Presentation Layer.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INVALID_QUANTITY",
///   "message": "Invalid quantity -3 for product 1"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
///
/// ## Usage in the Renderer
/// ```typescript
/// switch (e.code) {
///   case 'CATALOG_FETCH':
///   case 'CATALOG_FORMAT':
///     showRetry();
///     break;
///   case 'INVALID_QUANTITY':
///     resetQuantityInput();
///     break;
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Catalog Source unreachable or non-success status
    CatalogFetch,

    /// Catalog Source payload malformed
    CatalogFormat,

    /// Command issued before the catalog was loaded
    CatalogNotLoaded,

    /// Negative quantity requested
    InvalidQuantity,

    /// Category selector not in the catalog
    UnknownCategory,

    /// Input validation failed
    ValidationError,

    /// Database operation failed
    DatabaseError,

    /// Configuration could not be loaded
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }
}

/// Result type for facade operations.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        let code = match err {
            CatalogError::Fetch { .. } => ErrorCode::CatalogFetch,
            CatalogError::Format(_) => ErrorCode::CatalogFormat,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match err {
            CoreError::InvalidQuantity { .. } => ErrorCode::InvalidQuantity,
            CoreError::UnknownCategory(_) => ErrorCode::UnknownCategory,
            CoreError::InvalidProduct { .. } => ErrorCode::CatalogFormat,
            CoreError::CatalogNotLoaded => ErrorCode::CatalogNotLoaded,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        ApiError::new(code, err.to_string())
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(detail) => {
                tracing::error!("Internal database error: {}", detail);
                ApiError::new(ErrorCode::Internal, "Internal error")
            }
            other => {
                // Log the actual error but return a generic message
                tracing::error!("Database operation failed: {}", other);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
