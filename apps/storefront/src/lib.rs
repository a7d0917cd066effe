//! # Bookshop Storefront
//!
//! The operations a presentation layer calls: browse the catalog, fill a
//! cart, pay. Any UI (desktop, web, terminal) drives the bookshop through
//! [`Storefront`] and gets camelCase DTOs or an [`ApiError`] back.
//!
//! ## Module Organization
//! ```text
//! bookshop_storefront/
//! ├── lib.rs          ◄─── You are here (Storefront, startup, tracing)
//! ├── state/
//! │   ├── mod.rs      ◄─── State exports
//! │   └── config.rs   ◄─── StoreConfig
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── list / search / book_details / review
//! │   └── cart.rs     ◄─── add / remove / checkout
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use bookshop_storefront::{init_tracing, StoreConfig, Storefront};
//!
//! init_tracing();
//! let mut shop = Storefront::open(StoreConfig::from_env()).await?;
//!
//! let books = shop.list("Programming").await?;
//! let cart = shop.add(&books[0].name).await?;
//! let receipt = shop.checkout("Ada Lovelace", "4111 1111 1111 1234")?;
//!
//! shop.shutdown().await;
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;

use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bookshop_core::{CartSession, CatalogStore};
use bookshop_db::{Database, DbConfig, DbError, SqliteCatalog};

pub use commands::{BookDto, CartLineDto, CartResponse, CartTotals, CheckoutReceipt, ReviewDto};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use state::StoreConfig;

// =============================================================================
// Storefront
// =============================================================================

/// One shopper's view of the bookshop.
///
/// Holds the cart session (which owns the catalog handle) and the store
/// configuration. The verbs live in [`commands`].
#[derive(Debug)]
pub struct Storefront<S> {
    cart: CartSession<S>,
    config: StoreConfig,
    database: Option<Database>,
}

impl<S: CatalogStore> Storefront<S> {
    /// Creates a storefront over any catalog.
    pub fn new(store: S, config: StoreConfig) -> Self {
        Storefront {
            cart: CartSession::new(store),
            config,
            database: None,
        }
    }

    /// The configuration this storefront was opened with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Closes the database, if this storefront opened one.
    ///
    /// Items still in the cart are not returned to stock.
    pub async fn shutdown(self) {
        if let Some(db) = self.database {
            db.close().await;
        }
        info!(store = %self.config.store_name, "Storefront closed");
    }
}

/// Errors opening the storefront.
#[derive(Debug, Error)]
pub enum StartupError {
    /// No database path configured and no home directory to default to.
    #[error("Could not determine app data directory")]
    NoDataDirectory,

    /// The database directory could not be created.
    #[error("Could not create {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Database(#[from] DbError),
}

impl Storefront<SqliteCatalog> {
    /// Opens the SQLite catalog named by `config` and starts an empty cart.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │                       Storefront Startup                                │
    /// │                                                                         │
    /// │  1. Determine Database Path ──────────────────────────────────────────► │
    /// │     • BOOKSHOP_DB_PATH / StoreConfig::database_path, or                 │
    /// │     • the platform data directory                                       │
    /// │                                                                         │
    /// │  2. Connect to Database ──────────────────────────────────────────────► │
    /// │     • SQLite with WAL mode                                              │
    /// │     • Run pending migrations                                            │
    /// │                                                                         │
    /// │  3. Build CartSession<SqliteCatalog> ─────────────────────────────────► │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    pub async fn open(config: StoreConfig) -> Result<Self, StartupError> {
        let db_path = config
            .resolve_database_path()
            .ok_or(StartupError::NoDataDirectory)?;
        info!(?db_path, "Database path determined");

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StartupError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let db = Database::new(DbConfig::new(db_path)).await?;
        info!("Database connected and migrations applied");

        Ok(Self::with_database(db, config))
    }

    /// Builds a storefront over an already-open database.
    pub fn with_database(db: Database, config: StoreConfig) -> Self {
        info!(store = %config.store_name, "Storefront ready");
        Storefront {
            cart: CartSession::new(db.catalog()),
            config,
            database: Some(db),
        }
    }
}

// =============================================================================
// Tracing
// =============================================================================

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bookshop_core=trace` - Trace one crate only
/// - Default: `info,bookshop=debug,sqlx=warn`
///
/// Calling it again after a subscriber is installed does nothing.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bookshop=debug,sqlx=warn"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

// =============================================================================
// Test Support
// =============================================================================

#[cfg(test)]
pub(crate) mod test_support {
    use bookshop_core::{Book, InMemoryCatalog, Money};

    use crate::{StoreConfig, Storefront};

    pub fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::with_books([
            Book::new("Clean Code", Money::from_cents(4000), "Programming", 1)
                .with_description("A handbook of agile software craftsmanship.")
                .with_review("Worth rereading every year."),
            Book::new("Introduction to Algorithms", Money::from_cents(9500), "Algorithms", 4),
            Book::new("The Algorithm Design Manual", Money::from_cents(6000), "Algorithms", 0),
            Book::new("Operating System Concepts", Money::from_cents(8999), "Operating Systems", 5),
        ])
    }

    pub fn storefront() -> Storefront<InMemoryCatalog> {
        let config = StoreConfig {
            store_name: "Test Books".to_string(),
            ..StoreConfig::default()
        };
        Storefront::new(catalog(), config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshop_core::{Book, Money};

    #[tokio::test]
    async fn test_sqlite_storefront_end_to_end() {
        init_tracing();
        init_tracing();

        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.catalog()
            .insert(&Book::new("Clean Code", Money::from_cents(4000), "Programming", 1))
            .await
            .unwrap();

        let mut shop = Storefront::with_database(db.clone(), StoreConfig::default());

        assert_eq!(shop.search("clean").await.unwrap().len(), 1);
        shop.add("Clean Code").await.unwrap();
        assert_eq!(shop.add("Clean Code").await.unwrap_err().code, ErrorCode::OutOfStock);

        let receipt = shop.checkout("Ada", "1234").unwrap();
        assert_eq!(receipt.amount_display, "$40.00");
        assert_eq!(shop.book_details("Clean Code").await.unwrap().stock, 0);

        shop.shutdown().await;
        assert!(!db.health_check().await);
    }

    #[tokio::test]
    async fn test_open_creates_database_file() {
        let dir = std::env::temp_dir().join(format!("bookshop-open-{}", std::process::id()));
        let path = dir.join("nested").join("bookshop.db");

        let shop = Storefront::open(StoreConfig::default().with_database_path(&path))
            .await
            .unwrap();
        assert!(shop.list("All").await.unwrap().is_empty());
        shop.shutdown().await;

        assert!(path.exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
