//! # Book Repository
//!
//! The SQLite-backed catalog.
//!
//! ## Key Operations
//! - Listing, category filter and name search
//! - Guarded stock updates
//! - Inserts for seeding
//!
//! ## Guarded Stock Update
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How adjust_stock Stays Non-Negative                  │
//! │                                                                         │
//! │  ❌ WRONG: read, check, write (two carts can both see stock = 1)       │
//! │     SELECT stock ...;  if stock > 0 { UPDATE ... SET stock = 0 }       │
//! │                                                                         │
//! │  ✅ CORRECT: one statement that checks and writes                      │
//! │     UPDATE books SET stock = stock + ?1                                │
//! │     WHERE name = ?2 AND typeof(stock + ?1) = 'integer'                 │
//! │       AND stock + ?1 >= 0                                              │
//! │     RETURNING stock                                                    │
//! │                                                                         │
//! │  No row back?  SELECT the book to tell the two cases apart:            │
//! │     missing ──► BookNotFound                                           │
//! │     present ──► InvalidAdjustment (stock untouched)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use bookshop_core::validation::validate_book;
use bookshop_core::{Book, CatalogStore, CategoryFilter, CoreError, CoreResult, Money};

use crate::error::{DbError, DbResult};

const BOOK_COLUMNS: &str = "name, price_cents, category, stock, description, review";

/// Repository for the books table.
///
/// ## Usage
/// ```rust,ignore
/// let catalog = db.catalog();
///
/// let results = catalog.search("code").await?;
/// let stock = catalog.adjust_stock("Clean Code", -1).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    /// Creates a new SqliteCatalog.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteCatalog { pool }
    }

    /// Lists every book ordered by name.
    pub async fn fetch_all(&self) -> DbResult<Vec<Book>> {
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY name");
        let books = sqlx::query_as::<_, Book>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// Lists the books of one category ordered by name.
    pub async fn fetch_by_category(&self, category: &str) -> DbResult<Vec<Book>> {
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books WHERE category = ?1 ORDER BY name");
        let books = sqlx::query_as::<_, Book>(&sql)
            .bind(category)
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// Case-insensitive substring search on the name.
    ///
    /// SQLite's LIKE and `lower()` only fold ASCII, so matching runs over the
    /// fetched rows with Unicode lowercasing. `%` and `_` are ordinary
    /// characters here.
    pub async fn fetch_matching(&self, text: &str) -> DbResult<Vec<Book>> {
        let needle = text.trim().to_lowercase();

        debug!(needle = %needle, "Searching books");

        let mut books = self.fetch_all().await?;
        books.retain(|book| book.name.to_lowercase().contains(&needle));

        debug!(count = books.len(), "Search returned books");
        Ok(books)
    }

    /// Gets a book by name.
    ///
    /// ## Returns
    /// * `Ok(Some(Book))` - Book found
    /// * `Ok(None)` - Book not found
    pub async fn fetch_by_name(&self, name: &str) -> DbResult<Option<Book>> {
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books WHERE name = ?1");
        let book = sqlx::query_as::<_, Book>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    /// Validates and inserts a new book.
    ///
    /// ## Errors
    /// * `DbError::Invalid` - blank name or category, negative price or stock
    /// * `DbError::UniqueViolation` - the name is taken
    pub async fn insert(&self, book: &Book) -> DbResult<()> {
        debug!(name = %book.name, "Inserting book");

        validate_book(book)?;

        sqlx::query(
            r#"
            INSERT INTO books (name, price_cents, category, stock, description, review)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&book.name)
        .bind(book.price_cents)
        .bind(&book.category)
        .bind(book.stock)
        .bind(&book.description)
        .bind(&book.review)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, &book.name),
            other => other,
        })?;

        Ok(())
    }

    /// Changes a book's catalog price. Items already in carts keep theirs.
    pub async fn set_price(&self, name: &str, price: Money) -> DbResult<()> {
        debug!(name = %name, price = %price, "Updating price");

        let result = sqlx::query("UPDATE books SET price_cents = ?1 WHERE name = ?2")
            .bind(price.cents())
            .bind(name)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Book", name));
        }

        Ok(())
    }

    /// Counts the books in the catalog.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Distinct categories present in the catalog, sorted.
    pub async fn categories(&self) -> DbResult<Vec<String>> {
        let categories: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT category FROM books ORDER BY category")
                .fetch_all(&self.pool)
                .await?;
        Ok(categories)
    }

    /// Applies the guarded update. `None` means no row satisfied the guard.
    ///
    /// SQLite turns an overflowing integer sum into a REAL, which would pass
    /// the `>= 0` check and the column CHECK, so the sum must stay an integer.
    async fn try_adjust_stock(&self, name: &str, delta: i64) -> DbResult<Option<i64>> {
        let stock: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE books
            SET stock = stock + ?1
            WHERE name = ?2
              AND typeof(stock + ?1) = 'integer'
              AND stock + ?1 >= 0
            RETURNING stock
            "#,
        )
        .bind(delta)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(stock)
    }
}

// =============================================================================
// CatalogStore Implementation
// =============================================================================

#[async_trait]
impl CatalogStore for SqliteCatalog {
    async fn list_all(&self) -> CoreResult<Vec<Book>> {
        Ok(self.fetch_all().await?)
    }

    async fn list_by_category(&self, filter: &CategoryFilter) -> CoreResult<Vec<Book>> {
        match filter {
            CategoryFilter::All => self.list_all().await,
            CategoryFilter::Only(category) => Ok(self.fetch_by_category(category).await?),
        }
    }

    async fn search(&self, text: &str) -> CoreResult<Vec<Book>> {
        Ok(self.fetch_matching(text).await?)
    }

    async fn get_by_name(&self, name: &str) -> CoreResult<Book> {
        self.fetch_by_name(name)
            .await?
            .ok_or_else(|| CoreError::BookNotFound(name.to_string()))
    }

    async fn adjust_stock(&self, name: &str, delta: i64) -> CoreResult<i64> {
        debug!(name = %name, delta = %delta, "Adjusting stock");

        if let Some(stock) = self.try_adjust_stock(name, delta).await? {
            return Ok(stock);
        }

        // Guard rejected the update. Find out whether the book exists.
        let book = self.get_by_name(name).await?;
        warn!(name = %name, stock = book.stock, delta, "Stock adjustment rejected");
        Err(CoreError::InvalidAdjustment {
            name: book.name,
            stock: book.stock,
            delta,
        })
    }

    async fn get_price(&self, name: &str) -> CoreResult<Money> {
        let cents: Option<i64> = sqlx::query_scalar("SELECT price_cents FROM books WHERE name = ?1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::from)?;

        cents
            .map(Money::from_cents)
            .ok_or_else(|| CoreError::BookNotFound(name.to_string()))
    }

    async fn get_review(&self, name: &str) -> CoreResult<String> {
        let book = self.fetch_by_name(name).await?;
        Ok(book
            .as_ref()
            .map_or(bookshop_core::NO_REVIEW, Book::review_text)
            .to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
