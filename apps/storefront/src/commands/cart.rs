//! # Cart Commands
//!
//! Verbs that change the cart: add, remove, checkout.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Payment  │────►│ Receipt  │       │
//! │  │  Cart    │     │          │     │  Form    │     │  (empty) │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                      add             checkout                          │
//! │                      remove          (name + card)                     │
//! │                        │                                                │
//! │                        ▼                                                │
//! │             remove last item ──────────────────► back to empty         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use bookshop_core::{CartSession, CartState, CatalogStore};

use crate::error::ApiResult;
use crate::state::StoreConfig;
use crate::Storefront;

/// One line of the cart display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineDto {
    /// Index to pass back to `remove`.
    pub position: usize,
    pub book_name: String,
    pub unit_price_cents: i64,
    pub unit_price_display: String,
}

/// Totals shown under the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_cents: i64,
    pub total_display: String,
}

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub state: CartState,
    pub items: Vec<CartLineDto>,
    pub totals: CartTotals,
}

impl CartResponse {
    fn new<S>(cart: &CartSession<S>, config: &StoreConfig) -> Self {
        let total_cents = cart.total_cost().cents();

        CartResponse {
            state: cart.state(),
            items: cart
                .items()
                .iter()
                .enumerate()
                .map(|(position, item)| CartLineDto {
                    position,
                    book_name: item.book_name.clone(),
                    unit_price_cents: item.unit_price.cents(),
                    unit_price_display: config.format_currency(item.unit_price.cents()),
                })
                .collect(),
            totals: CartTotals {
                item_count: cart.len(),
                total_cents,
                total_display: config.format_currency(total_cents),
            },
        }
    }
}

/// What the payment confirmation dialog shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub confirmation_id: String,
    pub store_name: String,
    pub payer_name: String,
    pub item_count: usize,
    pub amount_cents: i64,
    pub amount_display: String,
    /// e.g. "**** 1234"
    pub card_display: String,
    #[ts(as = "String")]
    pub completed_at: DateTime<Utc>,
}

impl<S: CatalogStore> Storefront<S> {
    /// Current cart contents.
    pub fn cart(&self) -> CartResponse {
        CartResponse::new(&self.cart, &self.config)
    }

    /// Adds one unit of a book to the cart.
    ///
    /// ## User Workflow
    /// ```text
    /// Select book ──► "Add to Cart" ──► storefront.add("Clean Code")
    ///                                        │
    ///        ┌───────────────────────────────┼──────────────────────┐
    ///        ▼                               ▼                      ▼
    ///   in stock: stock -1,            stock 0:               unknown book:
    ///   cart +1 at today's price       OUT_OF_STOCK           NOT_FOUND
    /// ```
    pub async fn add(&mut self, book_name: &str) -> ApiResult<CartResponse> {
        debug!(book = %book_name, "add command");

        self.cart.add_item(book_name).await?;
        Ok(self.cart())
    }

    /// Removes the item at `position` and puts its unit back in stock.
    pub async fn remove(&mut self, position: usize) -> ApiResult<CartResponse> {
        debug!(position, "remove command");

        self.cart.remove_item(position).await?;
        Ok(self.cart())
    }

    /// Takes the mock payment and empties the cart.
    ///
    /// ## Errors
    /// `VALIDATION_ERROR` if the name or card number is blank.
    pub fn checkout(&mut self, payer_name: &str, card_number: &str) -> ApiResult<CheckoutReceipt> {
        debug!("checkout command");

        let confirmation = self.cart.checkout(payer_name, card_number)?;

        info!(
            confirmation = %confirmation.id,
            store = %self.config.store_name,
            "Payment successful"
        );

        Ok(CheckoutReceipt {
            confirmation_id: confirmation.id,
            store_name: self.config.store_name.clone(),
            payer_name: confirmation.payer_name,
            item_count: confirmation.item_count,
            amount_cents: confirmation.amount.cents(),
            amount_display: self.config.format_currency(confirmation.amount.cents()),
            card_display: format!("**** {}", confirmation.card_last_four),
            completed_at: confirmation.completed_at,
        })
    }
}
