//! # Store Configuration
//!
//! Settings loaded once when the storefront opens.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`BOOKSHOP_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after the storefront opens.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Overrides the database file location.
pub const ENV_DB_PATH: &str = "BOOKSHOP_DB_PATH";

/// Overrides the store name.
pub const ENV_STORE_NAME: &str = "BOOKSHOP_STORE_NAME";

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Store name (shown on receipts)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// SQLite database file. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            store_name: "Bookshop".to_string(),
            currency_symbol: "$".to_string(),
            database_path: None,
        }
    }
}

impl StoreConfig {
    /// Creates a StoreConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `BOOKSHOP_DB_PATH`: database file path
    /// - `BOOKSHOP_STORE_NAME`: store name
    pub fn from_env() -> Self {
        let mut config = StoreConfig::default();

        if let Ok(path) = std::env::var(ENV_DB_PATH) {
            if !path.trim().is_empty() {
                config.database_path = Some(PathBuf::from(path));
            }
        }

        if let Ok(store_name) = std::env::var(ENV_STORE_NAME) {
            if !store_name.trim().is_empty() {
                config.store_name = store_name;
            }
        }

        config
    }

    /// Sets the database path.
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = Some(path.into());
        self
    }

    /// Resolves the database file location.
    ///
    /// ## Platform-Specific Defaults
    /// - **macOS**: `~/Library/Application Support/com.bookshop.storefront/bookshop.db`
    /// - **Windows**: `%APPDATA%\bookshop\storefront\data\bookshop.db`
    /// - **Linux**: `~/.local/share/storefront/bookshop.db`
    ///
    /// Returns `None` when no home directory can be found.
    pub fn resolve_database_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.database_path {
            return Some(path.clone());
        }

        ProjectDirs::from("com", "bookshop", "storefront")
            .map(|dirs| dirs.data_dir().join("bookshop.db"))
    }

    /// Formats a cent amount with the store currency symbol and two decimals.
    ///
    /// ## Example
    /// ```rust
    /// use bookshop_storefront::StoreConfig;
    ///
    /// let config = StoreConfig::default();
    /// assert_eq!(config.format_currency(4000), "$40.00");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let sign = if cents < 0 { "-" } else { "" };
        let abs = cents.unsigned_abs();
        format!("{}{}{}.{:02}", sign, self.currency_symbol, abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        let config = StoreConfig::default();
        assert_eq!(config.format_currency(4000), "$40.00");
        assert_eq!(config.format_currency(1), "$0.01");
        assert_eq!(config.format_currency(0), "$0.00");
        assert_eq!(config.format_currency(-550), "-$5.50");
    }

    #[test]
    fn test_format_currency_other_symbol_and_extremes() {
        let config = StoreConfig {
            currency_symbol: "€".to_string(),
            ..StoreConfig::default()
        };
        assert_eq!(config.format_currency(4000), "€40.00");
        assert_eq!(config.format_currency(5), "€0.05");
        assert_eq!(config.format_currency(i64::MAX), "€92233720368547758.07");
        assert_eq!(config.format_currency(i64::MIN), "-€92233720368547758.08");
    }

    #[test]
    fn test_explicit_database_path_wins() {
        let config = StoreConfig::default().with_database_path("/tmp/books.db");
        assert_eq!(
            config.resolve_database_path(),
            Some(PathBuf::from("/tmp/books.db"))
        );
    }
}
