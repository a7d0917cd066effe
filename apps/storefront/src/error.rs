//! # API Error Type
//!
//! Unified error type for storefront verbs.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Presentation layer           Rust Backend                              │
//! │  ──────────────────           ────────────                              │
//! │                                                                         │
//! │  storefront.add("Clean Code")                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Verb                                                            │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  DbError ──► CoreError::Storage ──────────┐                      │  │
//! │  │         │                                 │                      │  │
//! │  │         ▼                                 ▼                      │  │
//! │  │  CoreError::OutOfStock ──────────────► ApiError ────────────────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "OUT_OF_STOCK", "message": "Clean Code is out of stock" }   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bookshop_core::CoreError;
use serde::Serialize;
use ts_rs::TS;

/// API error returned from storefront verbs.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Book not found: Clean Code"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
///
/// ## Usage in the Presentation Layer
/// ```typescript
/// switch (e.code) {
///   case 'OUT_OF_STOCK':
///     showNotification(e.message);
///     break;
///   case 'VALIDATION_ERROR':
///     highlightPaymentForm(e.message);
///     break;
///   default:
///     showError('Something went wrong');
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Book or cart position doesn't exist
    NotFound,

    /// No stock left to add
    OutOfStock,

    /// Stock change would go negative
    InvalidAdjustment,

    /// Input validation failed
    ValidationError,

    /// Storage unavailable or failing
    StorageError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts core errors to API errors.
///
/// Storage details are logged here and never shown to the user.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::BookNotFound(name) => ApiError::not_found("Book", &name),
            CoreError::ItemNotInCart { position, len } => ApiError::new(
                ErrorCode::NotFound,
                format!("No item at position {} (cart has {} items)", position, len),
            ),
            CoreError::OutOfStock(name) => {
                ApiError::new(ErrorCode::OutOfStock, format!("{} is out of stock", name))
            }
            err @ CoreError::InvalidAdjustment { .. } => {
                ApiError::new(ErrorCode::InvalidAdjustment, err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            CoreError::Storage(e) => {
                tracing::error!("Storage operation failed: {}", e);
                ApiError::new(
                    ErrorCode::StorageError,
                    "The catalog is unavailable, please try again",
                )
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for storefront verbs.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use bookshop_core::ValidationError;

    #[test]
    fn test_error_codes() {
        let cases = [
            (CoreError::BookNotFound("X".into()), ErrorCode::NotFound),
            (CoreError::ItemNotInCart { position: 3, len: 1 }, ErrorCode::NotFound),
            (CoreError::OutOfStock("X".into()), ErrorCode::OutOfStock),
            (
                CoreError::InvalidAdjustment { name: "X".into(), stock: 0, delta: -1 },
                ErrorCode::InvalidAdjustment,
            ),
            (
                CoreError::Validation(ValidationError::Required { field: "name".into() }),
                ErrorCode::ValidationError,
            ),
            (CoreError::storage("disk I/O error"), ErrorCode::StorageError),
        ];

        for (err, code) in cases {
            assert_eq!(ApiError::from(err).code, code);
        }
    }

    #[test]
    fn test_storage_details_are_hidden() {
        let err = ApiError::from(CoreError::storage("database is locked"));
        assert!(!err.message.contains("locked"));
    }

    #[test]
    fn test_serialization() {
        let err = ApiError::from(CoreError::OutOfStock("Clean Code".into()));
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "OUT_OF_STOCK");
        assert_eq!(json["message"], "Clean Code is out of stock");
    }
}
