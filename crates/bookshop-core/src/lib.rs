//! # bookshop-core: Pure Domain Logic for the Bookshop
//!
//! This crate holds the inventory/cart consistency model. Storage is reached
//! only through the [`CatalogStore`] trait, so everything here can be tested
//! against [`InMemoryCatalog`] without a database.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bookshop Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation layer (any UI)                     │   │
//! │  │     list ──► search ──► add ──► remove ──► checkout            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/storefront                              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bookshop-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  catalog  │  │   │
//! │  │   │   Book    │  │   Money   │  │CartSession│  │CatalogStore│ │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 bookshop-db (SqliteCatalog)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Book, CategoryFilter, CheckoutConfirmation)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - The `CatalogStore` trait and the in-memory implementation
//! - [`cart`] - `CartSession`, the add/remove/checkout protocol
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use bookshop_core::{Book, CartSession, InMemoryCatalog, Money};
//!
//! # tokio_test_block(async {
//! let catalog = InMemoryCatalog::with_books([
//!     Book::new("Clean Code", Money::from_cents(4000), "Programming", 1),
//! ]);
//! let mut cart = CartSession::new(catalog);
//!
//! cart.add_item("Clean Code").await.unwrap();
//! assert_eq!(cart.total_cost(), Money::from_cents(4000));
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f);
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartItem, CartSession, CartState};
pub use catalog::{CatalogStore, InMemoryCatalog};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Category value meaning "no filter".
pub const ALL_CATEGORIES: &str = "All";

/// Review text returned when a book has none.
pub const NO_REVIEW: &str = "No review available.";

/// Categories offered by the storefront's filter.
pub const KNOWN_CATEGORIES: &[&str] = &[
    "Programming",
    "Algorithms",
    "Data Structures",
    "Artificial Intelligence",
    "Operating Systems",
];
