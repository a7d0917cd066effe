//! # Catalog Commands
//!
//! Browsing verbs: list, search, book details, review, categories.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Book Search Flow                                     │
//! │                                                                         │
//! │  User types "algo"                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  storefront.search("algo")                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogStore::search ── case-insensitive substring on name            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<BookDto> (empty is fine, "" returns everything)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use bookshop_core::{Book, CatalogStore, CategoryFilter, ALL_CATEGORIES, KNOWN_CATEGORIES};

use crate::error::ApiResult;
use crate::Storefront;

/// Book DTO for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub name: String,
    pub category: String,
    pub price_cents: i64,
    /// Price formatted with the store currency, e.g. "$40.00".
    pub price_display: String,
    pub stock: i64,
    /// Used to grey out "Add to Cart".
    pub in_stock: bool,
    pub description: String,
}

impl BookDto {
    fn new(book: Book, format: impl Fn(i64) -> String) -> Self {
        BookDto {
            price_display: format(book.price_cents),
            in_stock: book.in_stock(),
            name: book.name,
            category: book.category,
            price_cents: book.price_cents,
            stock: book.stock,
            description: book.description,
        }
    }
}

/// A book's review as shown in the review dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub book_name: String,
    /// The review, or "No review available."
    pub review: String,
}

impl<S: CatalogStore> Storefront<S> {
    /// Lists the books in a category. `"All"` lists every book.
    pub async fn list(&self, category: &str) -> ApiResult<Vec<BookDto>> {
        debug!(category = %category, "list command");

        let filter = CategoryFilter::parse(category);
        let books = self.cart.store().list_by_category(&filter).await?;
        Ok(self.to_dtos(books))
    }

    /// Searches books by name. Any text is accepted; no match is an empty
    /// list.
    pub async fn search(&self, text: &str) -> ApiResult<Vec<BookDto>> {
        debug!(text = %text, "search command");

        let books = self.cart.store().search(text).await?;

        debug!(count = books.len(), "Search complete");
        Ok(self.to_dtos(books))
    }

    /// Full record of one book ("View Book Info").
    pub async fn book_details(&self, name: &str) -> ApiResult<BookDto> {
        debug!(name = %name, "book_details command");

        let book = self.cart.store().get_by_name(name).await?;
        Ok(BookDto::new(book, |cents| self.config.format_currency(cents)))
    }

    /// The review for a book. Unknown books get the "no review" text.
    pub async fn review(&self, name: &str) -> ApiResult<ReviewDto> {
        debug!(name = %name, "review command");

        let review = self.cart.store().get_review(name).await?;
        Ok(ReviewDto {
            book_name: name.to_string(),
            review,
        })
    }

    /// Choices for the category picker: `"All"` followed by the known
    /// categories.
    pub fn categories(&self) -> Vec<String> {
        std::iter::once(ALL_CATEGORIES)
            .chain(KNOWN_CATEGORIES.iter().copied())
            .map(String::from)
            .collect()
    }

    fn to_dtos(&self, books: Vec<Book>) -> Vec<BookDto> {
        books
            .into_iter()
            .map(|book| BookDto::new(book, |cents| self.config.format_currency(cents)))
            .collect()
    }
}
