//! # State Module
//!
//! What the storefront holds between calls.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐      ┌──────────────────────────┐        │
//! │  │   CartSession<S>         │      │   StoreConfig            │        │
//! │  │   (bookshop-core)        │      │                          │        │
//! │  │   items, snapshot prices │      │   store_name             │        │
//! │  │   the CatalogStore       │      │   currency, db path      │        │
//! │  └──────────────────────────┘      └──────────────────────────┘        │
//! │                                                                         │
//! │  One session, one user: verbs take &mut self, no locks.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;

pub use config::{StoreConfig, ENV_DB_PATH, ENV_STORE_NAME};
