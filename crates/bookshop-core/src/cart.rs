//! # Cart Session
//!
//! Holds the items one user has picked and keeps catalog stock in step.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Session Operations                              │
//! │                                                                         │
//! │  Operation           Catalog Store call          Cart change            │
//! │  ─────────           ──────────────────          ───────────            │
//! │                                                                         │
//! │  add_item(name) ───► get_by_name, get_price ───► (checks only)         │
//! │                 ───► adjust_stock(name, -1) ───► items.push(snapshot)  │
//! │                                                                         │
//! │  remove_item(i) ───► adjust_stock(name, +1) ───► items.remove(i)       │
//! │                                                                         │
//! │  checkout(..)   ───► (none)                 ───► items.clear()         │
//! │                                                                         │
//! │  The cart only changes after the store call succeeds, so a failed      │
//! │  store call leaves the cart exactly as it was.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Machine
//! ```text
//!   ┌───────┐  add_item   ┌───────────┐
//!   │ Empty │────────────►│ Populated │◄──┐ add_item / remove_item
//!   └───────┘◄────────────└───────────┘───┘   (while ≥ 1 item left)
//!        checkout, or removing the last item
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;
use uuid::Uuid;

use crate::catalog::CatalogStore;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::CheckoutConfirmation;
use crate::validation::validate_payment;

// =============================================================================
// Cart Item
// =============================================================================

/// An item in the cart.
///
/// ## Price Snapshot
/// `unit_price` is captured when the item is added. If the catalog price
/// changes later, this item keeps the original price, both for the total
/// and for what comes off the total when it is removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    /// Name of the book in the catalog.
    pub book_name: String,

    /// Price at the moment the item was added (frozen).
    pub unit_price: Money,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a cart item with the price frozen now.
    pub fn new(book_name: impl Into<String>, unit_price: Money) -> Self {
        CartItem {
            book_name: book_name.into(),
            unit_price,
            added_at: Utc::now(),
        }
    }
}

/// Whether the cart holds anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CartState {
    Empty,
    Populated,
}

// =============================================================================
// Cart Session
// =============================================================================

/// One user's cart, bound to the catalog it draws stock from.
///
/// ## Invariants
/// - `total_cost()` is the sum of the items' snapshot prices
/// - every item in the cart took exactly one unit of stock out of the catalog
/// - items keep insertion order; removal is by position
#[derive(Debug)]
pub struct CartSession<S> {
    store: S,
    items: Vec<CartItem>,
}

impl<S: CatalogStore> CartSession<S> {
    /// Creates an empty cart drawing stock from `store`.
    pub fn new(store: S) -> Self {
        CartSession {
            store,
            items: Vec::new(),
        }
    }

    /// Adds one unit of a book to the cart.
    ///
    /// ## User Workflow
    /// ```text
    /// Select "Clean Code" ──► Add to Cart
    ///      │
    ///      ▼
    /// get_by_name ── missing? ──► BookNotFound
    ///      │
    ///      ├── stock ≤ 0? ──────► OutOfStock (nothing changes)
    ///      │
    ///      ▼
    /// get_price ──► adjust_stock(-1) ──► push CartItem { price snapshot }
    /// ```
    ///
    /// ## Errors
    /// - `BookNotFound` if the book doesn't exist
    /// - `OutOfStock` if no stock is left
    /// - `Storage` if the catalog fails; the cart is unchanged
    pub async fn add_item(&mut self, book_name: &str) -> CoreResult<CartItem> {
        debug!(book = %book_name, "Adding item to cart");

        let book = self.store.get_by_name(book_name).await?;
        if !book.in_stock() {
            warn!(book = %book_name, stock = book.stock, "Book is out of stock");
            return Err(CoreError::OutOfStock(book.name));
        }

        let price = self.store.get_price(&book.name).await?;

        match self.store.adjust_stock(&book.name, -1).await {
            Ok(stock) => debug!(book = %book.name, stock, "Stock taken"),
            // Someone else took the last unit between the check and the update.
            Err(CoreError::InvalidAdjustment { name, .. }) => {
                warn!(book = %name, "Stock ran out before it could be taken");
                return Err(CoreError::OutOfStock(name));
            }
            Err(err) => return Err(err),
        }

        let item = CartItem::new(book.name, price);
        self.items.push(item.clone());
        debug!(items = self.items.len(), total = %self.total_cost(), "Item added");

        Ok(item)
    }

    /// Removes the item at `position` and returns its unit to the catalog.
    ///
    /// The total drops by the item's snapshot price, not the book's current
    /// catalog price.
    ///
    /// ## Errors
    /// - `ItemNotInCart` if `position` is out of range
    /// - `BookNotFound` if the book left the catalog; the item stays in the cart
    /// - `Storage` if the catalog fails; the cart is unchanged
    pub async fn remove_item(&mut self, position: usize) -> CoreResult<CartItem> {
        debug!(position, "Removing item from cart");

        let book_name = match self.items.get(position) {
            Some(item) => item.book_name.clone(),
            None => {
                return Err(CoreError::ItemNotInCart {
                    position,
                    len: self.items.len(),
                })
            }
        };

        let stock = self.store.adjust_stock(&book_name, 1).await?;
        let item = self.items.remove(position);

        debug!(
            book = %item.book_name,
            stock,
            items = self.items.len(),
            total = %self.total_cost(),
            "Item removed"
        );
        Ok(item)
    }

    /// Completes the mock payment and empties the cart.
    ///
    /// An empty cart can be checked out too; the confirmation then shows 0.00.
    ///
    /// ## Errors
    /// `Validation` if either field is blank. The cart is unchanged.
    pub fn checkout(
        &mut self,
        payer_name: &str,
        card_number: &str,
    ) -> CoreResult<CheckoutConfirmation> {
        validate_payment(payer_name, card_number)?;

        let confirmation = CheckoutConfirmation {
            id: Uuid::new_v4().to_string(),
            payer_name: payer_name.trim().to_string(),
            amount: self.total_cost(),
            item_count: self.items.len(),
            card_last_four: last_four(card_number),
            completed_at: Utc::now(),
        };

        self.items.clear();

        info!(
            confirmation = %confirmation.id,
            amount = %confirmation.amount,
            items = confirmation.item_count,
            "Checkout complete"
        );
        Ok(confirmation)
    }
}

impl<S> CartSession<S> {
    /// Items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of items in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of the items' snapshot prices.
    pub fn total_cost(&self) -> Money {
        self.items.iter().map(|item| item.unit_price).sum()
    }

    /// Current position in the Empty/Populated state machine.
    pub fn state(&self) -> CartState {
        if self.items.is_empty() {
            CartState::Empty
        } else {
            CartState::Populated
        }
    }

    /// The catalog this cart draws from.
    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Last four non-space characters of a card number.
fn last_four(card_number: &str) -> String {
    let digits: Vec<char> = card_number.chars().filter(|c| !c.is_whitespace()).collect();
    let start = digits.len().saturating_sub(4);
    digits.iter().skip(start).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::types::Book;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::with_books([
            Book::new("Clean Code", Money::from_cents(4000), "Programming", 1),
            Book::new("Operating System Concepts", Money::from_cents(8999), "Operating Systems", 5),
            Book::new("Artificial Intelligence: A Modern Approach", Money::from_cents(12000), "Artificial Intelligence", 0),
        ])
    }

    async fn stock_of(catalog: &InMemoryCatalog, name: &str) -> i64 {
        catalog.get_by_name(name).await.unwrap().stock
    }

    #[tokio::test]
    async fn test_clean_code_scenario() {
        let catalog = catalog();
        let mut cart = CartSession::new(catalog.clone());

        let added = cart.add_item("Clean Code").await.unwrap();
        assert_eq!(added.book_name, "Clean Code");
        assert_eq!(added.unit_price, Money::from_cents(4000));
        assert_eq!(cart.items(), [added]);
        assert_eq!(cart.total_cost(), Money::from_cents(4000));
        assert_eq!(stock_of(&catalog, "Clean Code").await, 0);

        let err = cart.add_item("Clean Code").await.unwrap_err();
        assert!(matches!(err, CoreError::OutOfStock(_)));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_cost(), Money::from_cents(4000));
        assert_eq!(stock_of(&catalog, "Clean Code").await, 0);

        cart.remove_item(0).await.unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total_cost(), Money::zero());
        assert_eq!(stock_of(&catalog, "Clean Code").await, 1);
    }

    #[tokio::test]
    async fn test_add_takes_exactly_one_unit() {
        let catalog = catalog();
        let mut cart = CartSession::new(catalog.clone());

        for expected_len in 1..=3 {
            cart.add_item("Operating System Concepts").await.unwrap();
            assert_eq!(cart.len(), expected_len);
        }
        assert_eq!(stock_of(&catalog, "Operating System Concepts").await, 2);
        assert_eq!(cart.total_cost(), Money::from_cents(3 * 8999));
        assert_eq!(cart.state(), CartState::Populated);
    }

    #[tokio::test]
    async fn test_add_with_zero_stock_changes_nothing() {
        let catalog = catalog();
        let mut cart = CartSession::new(catalog.clone());
        let name = "Artificial Intelligence: A Modern Approach";

        let err = cart.add_item(name).await.unwrap_err();
        assert!(matches!(err, CoreError::OutOfStock(_)));
        assert!(cart.is_empty());
        assert_eq!(cart.state(), CartState::Empty);
        assert_eq!(stock_of(&catalog, name).await, 0);
    }

    #[tokio::test]
    async fn test_add_unknown_book() {
        let mut cart = CartSession::new(catalog());
        let err = cart.add_item("The Art of Computer Programming").await.unwrap_err();
        assert!(matches!(err, CoreError::BookNotFound(_)));
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_remove_returns_unit_to_the_right_book() {
        let catalog = catalog();
        let mut cart = CartSession::new(catalog.clone());
        cart.add_item("Operating System Concepts").await.unwrap();
        cart.add_item("Clean Code").await.unwrap();
        cart.add_item("Operating System Concepts").await.unwrap();

        let removed = cart.remove_item(1).await.unwrap();
        assert_eq!(removed.book_name, "Clean Code");
        assert_eq!(cart.len(), 2);
        assert_eq!(stock_of(&catalog, "Clean Code").await, 1);
        assert_eq!(stock_of(&catalog, "Operating System Concepts").await, 3);
        assert_eq!(cart.total_cost(), Money::from_cents(2 * 8999));
    }

    #[tokio::test]
    async fn test_remove_out_of_range() {
        let catalog = catalog();
        let mut cart = CartSession::new(catalog.clone());
        cart.add_item("Clean Code").await.unwrap();

        let err = cart.remove_item(1).await.unwrap_err();
        assert!(matches!(err, CoreError::ItemNotInCart { position: 1, len: 1 }));
        assert_eq!(cart.len(), 1);
        assert_eq!(stock_of(&catalog, "Clean Code").await, 0);
    }

    /// The total must come down by what was charged when the item went in,
    /// even after the catalog price moved.
    #[tokio::test]
    async fn test_remove_uses_snapshot_price_after_price_change() {
        let catalog = catalog();
        let mut cart = CartSession::new(catalog.clone());
        cart.add_item("Operating System Concepts").await.unwrap();
        cart.add_item("Clean Code").await.unwrap();

        catalog.set_price("Clean Code", Money::from_cents(5500)).unwrap();
        assert_eq!(cart.total_cost(), Money::from_cents(8999 + 4000));

        let removed = cart.remove_item(1).await.unwrap();
        assert_eq!(removed.unit_price, Money::from_cents(4000));
        assert_eq!(cart.total_cost(), Money::from_cents(8999));
    }

    #[tokio::test]
    async fn test_storage_failure_leaves_cart_untouched() {
        let catalog = catalog();
        let mut cart = CartSession::new(catalog.clone());
        cart.add_item("Operating System Concepts").await.unwrap();
        let before = cart.items().to_vec();

        catalog.set_unavailable(true);
        assert!(matches!(
            cart.add_item("Clean Code").await,
            Err(CoreError::Storage(_))
        ));
        assert!(matches!(cart.remove_item(0).await, Err(CoreError::Storage(_))));
        assert_eq!(cart.items(), before.as_slice());

        catalog.set_unavailable(false);
        assert_eq!(stock_of(&catalog, "Operating System Concepts").await, 4);
        assert_eq!(stock_of(&catalog, "Clean Code").await, 1);
    }

    #[tokio::test]
    async fn test_checkout_empties_cart() {
        let catalog = catalog();
        let mut cart = CartSession::new(catalog.clone());
        cart.add_item("Clean Code").await.unwrap();
        cart.add_item("Operating System Concepts").await.unwrap();

        let confirmation = cart.checkout(" Ada Lovelace ", "4111 1111 1111 1234").unwrap();
        assert_eq!(confirmation.payer_name, "Ada Lovelace");
        assert_eq!(confirmation.amount, Money::from_cents(12999));
        assert_eq!(confirmation.item_count, 2);
        assert_eq!(confirmation.card_last_four, "1234");

        assert!(cart.is_empty());
        assert_eq!(cart.total_cost(), Money::zero());
        assert_eq!(cart.state(), CartState::Empty);
        // Paid-for stock stays out of the catalog.
        assert_eq!(stock_of(&catalog, "Clean Code").await, 0);
    }

    #[tokio::test]
    async fn test_checkout_rejects_blank_fields() {
        let mut cart = CartSession::new(catalog());
        cart.add_item("Clean Code").await.unwrap();

        assert!(matches!(cart.checkout("", "4111"), Err(CoreError::Validation(_))));
        assert!(matches!(cart.checkout("Ada", "   "), Err(CoreError::Validation(_))));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_cost(), Money::from_cents(4000));
    }

    #[test]
    fn test_checkout_of_empty_cart() {
        let mut cart = CartSession::new(catalog());
        let confirmation = cart.checkout("Ada", "42").unwrap();
        assert_eq!(confirmation.amount, Money::zero());
        assert_eq!(confirmation.item_count, 0);
        assert_eq!(confirmation.card_last_four, "42");
    }
}
