//! # Error Types
//!
//! Domain-specific error types for bookshop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bookshop-core errors (this file)                                      │
//! │  ├── CoreError        - Everything a store or cart call can fail with  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  bookshop-db errors (separate crate)                                   │
//! │  └── DbError          - Database failures, folded into CoreError       │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── ApiError         - What the presentation layer sees (serialized)  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ← DbError;  CoreError → ApiError    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors returned by catalog stores and cart sessions.
///
/// All variants except [`CoreError::Storage`] are expected, recoverable
/// conditions that the caller shows to the user before letting them retry.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No book with this name exists in the catalog.
    #[error("Book not found: {0}")]
    BookNotFound(String),

    /// A cart position that doesn't resolve to an item.
    #[error("No cart item at position {position} (cart has {len} items)")]
    ItemNotInCart { position: usize, len: usize },

    /// Book has no stock left to add to a cart.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart ("Clean Code")
    ///      │
    ///      ▼
    /// Check stock: 0
    ///      │
    ///      ▼
    /// OutOfStock("Clean Code")
    ///      │
    ///      ▼
    /// UI shows: "This book is out of stock!"
    /// ```
    #[error("Out of stock: {0}")]
    OutOfStock(String),

    /// A stock change that would leave the count below zero.
    #[error("Cannot adjust stock of {name} by {delta}: only {stock} in stock")]
    InvalidAdjustment { name: String, stock: i64, delta: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The storage engine failed (connection lost, query error, ...).
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CoreError {
    /// Creates a Storage error from anything displayable.
    pub fn storage(err: impl std::fmt::Display) -> Self {
        CoreError::Storage(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
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
        let err = CoreError::InvalidAdjustment {
            name: "Clean Code".to_string(),
            stock: 0,
            delta: -1,
        };
        assert_eq!(
            err.to_string(),
            "Cannot adjust stock of Clean Code by -1: only 0 in stock"
        );

        let err = CoreError::ItemNotInCart { position: 3, len: 1 };
        assert_eq!(err.to_string(), "No cart item at position 3 (cart has 1 items)");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "card number".to_string(),
        };
        assert_eq!(err.to_string(), "card number is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
