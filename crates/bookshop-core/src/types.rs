//! # Domain Types
//!
//! Core domain types used throughout the bookshop.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌──────────────────────┐ │
//! │  │      Book       │   │  CategoryFilter  │   │ CheckoutConfirmation │ │
//! │  │  ─────────────  │   │  ──────────────  │   │  ──────────────────  │ │
//! │  │  name (key)     │   │  All             │   │  id (UUID)           │ │
//! │  │  price_cents    │   │  Only(category)  │   │  payer_name          │ │
//! │  │  category       │   └──────────────────┘   │  amount              │ │
//! │  │  stock (>= 0)   │                          │  item_count          │ │
//! │  │  description    │                          │  card_last_four      │ │
//! │  │  review?        │                          └──────────────────────┘ │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Books are identified by `name`. There is no surrogate id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::{ALL_CATEGORIES, NO_REVIEW};

// =============================================================================
// Book
// =============================================================================

/// A book in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Book {
    /// Title, unique across the catalog.
    pub name: String,

    /// Price in cents.
    pub price_cents: i64,

    /// Category, e.g. "Programming".
    pub category: String,

    /// Units left to sell. Never negative.
    pub stock: i64,

    /// Free-form description shown in the details view.
    pub description: String,

    /// Review text, if anyone wrote one.
    pub review: Option<String>,
}

impl Book {
    /// Creates a book with an empty description and no review.
    pub fn new(
        name: impl Into<String>,
        price: Money,
        category: impl Into<String>,
        stock: i64,
    ) -> Self {
        Book {
            name: name.into(),
            price_cents: price.cents(),
            category: category.into(),
            stock,
            description: String::new(),
            review: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the review.
    pub fn with_review(mut self, review: impl Into<String>) -> Self {
        self.review = Some(review.into());
        self
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks if at least one unit can be added to a cart.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Returns the review, or the "no review" sentinel when missing or blank.
    pub fn review_text(&self) -> &str {
        match self.review.as_deref() {
            Some(review) if !review.trim().is_empty() => review,
            _ => NO_REVIEW,
        }
    }
}

// =============================================================================
// Category Filter
// =============================================================================

/// Which books a category listing should return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    /// No filter.
    All,
    /// Books whose category equals this value exactly.
    Only(String),
}

impl CategoryFilter {
    /// Parses a category as picked in the UI. `"All"` (any case) means no filter.
    ///
    /// ```rust
    /// use bookshop_core::CategoryFilter;
    ///
    /// assert_eq!(CategoryFilter::parse(" all "), CategoryFilter::All);
    /// assert_eq!(
    ///     CategoryFilter::parse("Algorithms"),
    ///     CategoryFilter::Only("Algorithms".to_string())
    /// );
    /// ```
    pub fn parse(category: &str) -> Self {
        let category = category.trim();
        if category.eq_ignore_ascii_case(ALL_CATEGORIES) {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(category.to_string())
        }
    }

    /// Checks whether a book passes this filter.
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => book.category == *category,
        }
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        CategoryFilter::All
    }
}

// =============================================================================
// Checkout Confirmation
// =============================================================================

/// Result of a successful mock payment.
///
/// Nothing here is persisted; the value only goes back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutConfirmation {
    /// Confirmation number (UUID v4).
    pub id: String,

    /// Name entered on the payment form.
    pub payer_name: String,

    /// Amount charged.
    pub amount: Money,

    /// Number of items paid for.
    pub item_count: usize,

    /// Last four characters of the card number, for display.
    pub card_last_four: String,

    #[ts(as = "String")]
    pub completed_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_code() -> Book {
        Book::new("Clean Code", Money::from_cents(4000), "Programming", 1)
    }

    #[test]
    fn test_book_price_and_stock() {
        let book = clean_code();
        assert_eq!(book.price(), Money::from_cents(4000));
        assert!(book.in_stock());

        let sold_out = Book { stock: 0, ..clean_code() };
        assert!(!sold_out.in_stock());
    }

    #[test]
    fn test_review_text_falls_back_to_sentinel() {
        assert_eq!(clean_code().review_text(), NO_REVIEW);
        assert_eq!(clean_code().with_review("   ").review_text(), NO_REVIEW);
        assert_eq!(
            clean_code().with_review("A classic.").review_text(),
            "A classic."
        );
    }

    #[test]
    fn test_category_filter() {
        let book = clean_code();
        assert!(CategoryFilter::parse("All").matches(&book));
        assert!(CategoryFilter::parse("Programming").matches(&book));
        assert!(!CategoryFilter::parse("Algorithms").matches(&book));
        assert!(!CategoryFilter::parse("programming").matches(&book));
        assert_eq!(CategoryFilter::default(), CategoryFilter::All);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(clean_code()).unwrap();
        assert_eq!(json["price_cents"], 4000);
        assert!(json["review"].is_null());

        let filter = serde_json::to_value(CategoryFilter::parse("Algorithms")).unwrap();
        assert_eq!(filter, serde_json::json!({ "only": "Algorithms" }));
        assert_eq!(serde_json::to_value(Money::from_cents(4000)).unwrap(), 4000);
    }
}
