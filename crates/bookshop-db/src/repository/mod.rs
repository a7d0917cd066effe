//! # Repository Module
//!
//! Database repository implementations for the bookshop.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CartSession / Storefront                                              │
//! │       │                                                                 │
//! │       │  store.adjust_stock("Clean Code", -1)                          │
//! │       ▼                                                                 │
//! │  SqliteCatalog (impl CatalogStore)                                     │
//! │  ├── list_all / list_by_category / search                              │
//! │  ├── get_by_name / get_price / get_review                              │
//! │  ├── adjust_stock (guarded UPDATE)                                     │
//! │  └── insert / count / categories                                       │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database (books table)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`book::SqliteCatalog`] - Books, search and stock

pub mod book;
