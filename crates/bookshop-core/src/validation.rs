//! # Validation Module
//!
//! Input validation for the bookshop.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE                                                  │
//! │  ├── Payment form fields (non-empty)                                   │
//! │  └── Book records before insert (name, price, stock)                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── PRIMARY KEY on name                                               │
//! │  └── CHECK (stock >= 0), CHECK (price_cents >= 0)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::Book;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted book name.
pub const MAX_NAME_LEN: usize = 200;

// =============================================================================
// Field Validators
// =============================================================================

/// Requires a non-blank value. Returns the trimmed value.
///
/// ```rust
/// use bookshop_core::validation::require;
///
/// assert_eq!(require("name", "  Ada ").unwrap(), "Ada");
/// assert!(require("name", "   ").is_err());
/// ```
pub fn require<'a>(field: &str, value: &'a str) -> ValidationResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(value)
}

/// Validates the two fields of the payment form.
///
/// Only emptiness is checked: the payment is a mock and any non-empty card
/// number is accepted.
pub fn validate_payment(payer_name: &str, card_number: &str) -> ValidationResult<()> {
    require("name", payer_name)?;
    require("card number", card_number)?;
    Ok(())
}

/// Validates a book record before it is written to the catalog.
///
/// ## Rules
/// - name and category must not be blank
/// - name at most 200 characters
/// - price and stock must not be negative
pub fn validate_book(book: &Book) -> ValidationResult<()> {
    let name = require("name", &book.name)?;
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    require("category", &book.category)?;

    if book.price_cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    if book.stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn test_validate_payment() {
        assert!(validate_payment("Ada", "4111 1111").is_ok());
        assert!(validate_payment("", "4111").is_err());
        assert!(validate_payment("Ada", "  ").is_err());

        let err = validate_payment("Ada", "").unwrap_err();
        assert_eq!(err.to_string(), "card number is required");
    }

    #[test]
    fn test_validate_book() {
        let book = Book::new("SICP", Money::from_cents(5500), "Programming", 3);
        assert!(validate_book(&book).is_ok());

        assert!(validate_book(&Book { stock: -1, ..book.clone() }).is_err());
        assert!(validate_book(&Book { price_cents: -1, ..book.clone() }).is_err());
        assert!(validate_book(&Book { name: " ".into(), ..book.clone() }).is_err());
        assert!(validate_book(&Book { category: String::new(), ..book.clone() }).is_err());
        assert!(validate_book(&Book { name: "A".repeat(201), ..book }).is_err());
    }
}
