//! # Catalog Store
//!
//! The seam between the cart and wherever books are kept.
//!
//! ## Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CatalogStore                                     │
//! │                                                                         │
//! │   ┌───────────────────────────┐     ┌───────────────────────────────┐  │
//! │   │ SqliteCatalog (bookshop-db)│     │ InMemoryCatalog (this file)   │  │
//! │   │ books table, guarded       │     │ BTreeMap behind a Mutex,      │  │
//! │   │ UPDATE for stock           │     │ used by tests and demos       │  │
//! │   └───────────────────────────┘     └───────────────────────────────┘  │
//! │                                                                         │
//! │   CartSession<S: CatalogStore> is handed one at construction.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Book, CategoryFilter};
use crate::NO_REVIEW;

// =============================================================================
// Trait
// =============================================================================

/// Single source of truth for book records and stock counts.
///
/// Every write is applied immediately and nothing is retried. Listing
/// operations return books ordered by name.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Returns every book.
    async fn list_all(&self) -> CoreResult<Vec<Book>>;

    /// Returns the books passing `filter`. `CategoryFilter::All` is `list_all`.
    async fn list_by_category(&self, filter: &CategoryFilter) -> CoreResult<Vec<Book>>;

    /// Case-insensitive substring match on the name.
    ///
    /// Empty text matches every book. No match is an empty Vec, not an error.
    async fn search(&self, text: &str) -> CoreResult<Vec<Book>>;

    /// Looks a book up by name.
    ///
    /// ## Errors
    /// `BookNotFound` if there is no such book.
    async fn get_by_name(&self, name: &str) -> CoreResult<Book>;

    /// Atomically applies `stock += delta` and returns the new stock.
    ///
    /// ## Errors
    /// - `InvalidAdjustment` if the result would be negative (stock unchanged)
    /// - `BookNotFound` if there is no such book
    async fn adjust_stock(&self, name: &str, delta: i64) -> CoreResult<i64>;

    /// Returns the current price of a book.
    async fn get_price(&self, name: &str) -> CoreResult<Money>;

    /// Returns the review text, or `"No review available."`.
    ///
    /// A missing book gives the sentinel too. Only storage failures are errors.
    async fn get_review(&self, name: &str) -> CoreResult<String>;
}

// =============================================================================
// In-Memory Catalog
// =============================================================================

/// A catalog held in memory.
///
/// Clones share the same books, so a test can keep one handle while a
/// `CartSession` owns another and check stock from the outside.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    books: Arc<Mutex<BTreeMap<String, Book>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding `books`. Later books replace earlier ones
    /// with the same name.
    pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        let map = books
            .into_iter()
            .map(|book| (book.name.clone(), book))
            .collect();
        InMemoryCatalog {
            books: Arc::new(Mutex::new(map)),
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Inserts or replaces a book.
    pub fn insert(&self, book: Book) -> CoreResult<()> {
        self.lock()?.insert(book.name.clone(), book);
        Ok(())
    }

    /// Changes a book's price.
    pub fn set_price(&self, name: &str, price: Money) -> CoreResult<()> {
        let mut books = self.lock()?;
        let book = books
            .get_mut(name)
            .ok_or_else(|| CoreError::BookNotFound(name.to_string()))?;
        book.price_cents = price.cents();
        Ok(())
    }

    /// Makes every following call fail with `Storage` until switched back,
    /// the way a dropped database connection would.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn lock(&self) -> CoreResult<MutexGuard<'_, BTreeMap<String, Book>>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CoreError::storage("catalog unavailable"));
        }
        self.books
            .lock()
            .map_err(|_| CoreError::storage("catalog lock poisoned"))
    }

    fn filtered(&self, keep: impl Fn(&Book) -> bool) -> CoreResult<Vec<Book>> {
        Ok(self.lock()?.values().filter(|b| keep(b)).cloned().collect())
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn list_all(&self) -> CoreResult<Vec<Book>> {
        self.filtered(|_| true)
    }

    async fn list_by_category(&self, filter: &CategoryFilter) -> CoreResult<Vec<Book>> {
        self.filtered(|book| filter.matches(book))
    }

    async fn search(&self, text: &str) -> CoreResult<Vec<Book>> {
        let needle = text.trim().to_lowercase();
        self.filtered(|book| book.name.to_lowercase().contains(&needle))
    }

    async fn get_by_name(&self, name: &str) -> CoreResult<Book> {
        self.lock()?
            .get(name)
            .cloned()
            .ok_or_else(|| CoreError::BookNotFound(name.to_string()))
    }

    async fn adjust_stock(&self, name: &str, delta: i64) -> CoreResult<i64> {
        debug!(name = %name, delta = %delta, "Adjusting stock");

        let mut books = self.lock()?;
        let book = books
            .get_mut(name)
            .ok_or_else(|| CoreError::BookNotFound(name.to_string()))?;

        match book.stock.checked_add(delta) {
            Some(new_stock) if new_stock >= 0 => {
                book.stock = new_stock;
                Ok(new_stock)
            }
            _ => Err(CoreError::InvalidAdjustment {
                name: name.to_string(),
                stock: book.stock,
                delta,
            }),
        }
    }

    async fn get_price(&self, name: &str) -> CoreResult<Money> {
        self.get_by_name(name).await.map(|book| book.price())
    }

    async fn get_review(&self, name: &str) -> CoreResult<String> {
        let books = self.lock()?;
        Ok(books
            .get(name)
            .map_or(NO_REVIEW, Book::review_text)
            .to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::with_books([
            Book::new("Clean Code", Money::from_cents(4000), "Programming", 1)
                .with_review("Worth rereading every year."),
            Book::new("Introduction to Algorithms", Money::from_cents(9500), "Algorithms", 4),
            Book::new("The Algorithm Design Manual", Money::from_cents(6000), "Algorithms", 0),
        ])
    }

    #[tokio::test]
    async fn test_list_all_is_ordered_by_name() {
        let names: Vec<_> = catalog()
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(
            names,
            ["Clean Code", "Introduction to Algorithms", "The Algorithm Design Manual"]
        );
    }

    #[tokio::test]
    async fn test_list_by_category() {
        let catalog = catalog();
        let algorithms = catalog
            .list_by_category(&CategoryFilter::parse("Algorithms"))
            .await
            .unwrap();
        assert_eq!(algorithms.len(), 2);

        let all = catalog.list_by_category(&CategoryFilter::All).await.unwrap();
        assert_eq!(all, catalog.list_all().await.unwrap());

        let none = catalog
            .list_by_category(&CategoryFilter::parse("Cooking"))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let catalog = catalog();
        assert_eq!(catalog.search("ALGORITHM").await.unwrap().len(), 2);
        assert_eq!(catalog.search("").await.unwrap().len(), 3);
        assert!(catalog.search("zzz-no-match").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_adjust_stock_guards_against_negative() {
        let catalog = catalog();

        assert_eq!(catalog.adjust_stock("Clean Code", -1).await.unwrap(), 0);

        let err = catalog.adjust_stock("Clean Code", -1).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidAdjustment { stock: 0, delta: -1, .. }
        ));
        assert_eq!(catalog.get_by_name("Clean Code").await.unwrap().stock, 0);

        let err = catalog.adjust_stock("Missing", 1).await.unwrap_err();
        assert!(matches!(err, CoreError::BookNotFound(_)));
    }

    #[tokio::test]
    async fn test_overflowing_adjustment_is_rejected() {
        let catalog = catalog();

        let err = catalog.adjust_stock("Clean Code", i64::MAX).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidAdjustment { stock: 1, delta: i64::MAX, .. }
        ));
        assert_eq!(catalog.get_by_name("Clean Code").await.unwrap().stock, 1);
        assert_eq!(catalog.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_search_folds_non_ascii_case() {
        let catalog = catalog();
        catalog
            .insert(Book::new("Élan Vital", Money::from_cents(2500), "Programming", 1))
            .unwrap();

        let found = catalog.search("ÉLAN").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Élan Vital");
    }

    #[tokio::test]
    async fn test_price_and_review() {
        let catalog = catalog();
        assert_eq!(
            catalog.get_price("Clean Code").await.unwrap(),
            Money::from_cents(4000)
        );
        assert!(matches!(
            catalog.get_price("Missing").await,
            Err(CoreError::BookNotFound(_))
        ));

        assert_eq!(
            catalog.get_review("Clean Code").await.unwrap(),
            "Worth rereading every year."
        );
        assert_eq!(
            catalog.get_review("Introduction to Algorithms").await.unwrap(),
            NO_REVIEW
        );
        assert_eq!(catalog.get_review("Missing").await.unwrap(), NO_REVIEW);
    }

    #[tokio::test]
    async fn test_unavailable_catalog_reports_storage_errors() {
        let catalog = catalog();
        catalog.set_unavailable(true);
        assert!(matches!(catalog.list_all().await, Err(CoreError::Storage(_))));
        assert!(matches!(
            catalog.get_review("Clean Code").await,
            Err(CoreError::Storage(_))
        ));

        catalog.set_unavailable(false);
        assert_eq!(catalog.list_all().await.unwrap().len(), 3);
    }
}
