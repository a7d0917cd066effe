//! # bookshop-db: SQLite Catalog for the Bookshop
//!
//! This crate keeps the books table and implements
//! [`CatalogStore`](bookshop_core::CatalogStore) on top of it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bookshop Data Flow                               │
//! │                                                                         │
//! │  Storefront verb (add / remove / search ...)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartSession<SqliteCatalog>                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   bookshop-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │ SqliteCatalog │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ (book.rs)     │    │  (embedded)  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (bookshop.db) or :memory:                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bookshop_core::CatalogStore;
//! use bookshop_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("bookshop.db")).await?;
//! let books = db.catalog().search("code").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::book::SqliteCatalog;
