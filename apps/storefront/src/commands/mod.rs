//! # Commands Module
//!
//! The verbs a presentation layer calls, as methods on [`Storefront`].
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── catalog.rs  ◄─── list, search, book_details, review, categories
//! └── cart.rs     ◄─── cart, add, remove, checkout
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Presentation layer                                                     │
//! │  ──────────────────                                                     │
//! │  let cart = storefront.add("Clean Code").await?;                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Storefront<S>                                                          │
//! │  ─────────────                                                          │
//! │  async fn add(&mut self, book_name: &str)                               │
//! │      -> Result<CartResponse, ApiError>                                  │
//! │         │                                                               │
//! │         │ (CartSession does the work, DTOs shape the result)            │
//! │         ▼                                                               │
//! │  CartResponse { state, items, totals } (camelCase JSON)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`Storefront`]: crate::Storefront

pub mod cart;
pub mod catalog;

pub use cart::{CartLineDto, CartResponse, CartTotals, CheckoutReceipt};
pub use catalog::{BookDto, ReviewDto};
