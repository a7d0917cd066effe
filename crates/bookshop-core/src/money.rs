//! # Money Module
//!
//! Provides the `Money` type for handling prices safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With doubles, a running cart total drifts:                             │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │    add $19.99, remove $19.99 → total -0.0000000000001                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    add 1999, remove 1999 → total 0, exactly                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bookshop_core::money::Money;
//!
//! let price = Money::from_cents(4000); // $40.00
//! let total: Money = [price, Money::from_cents(1250)].into_iter().sum();
//! assert_eq!(total.to_string(), "$52.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Where Money is Used
/// ```text
/// Book.price_cents ──► CartItem.unit_price (snapshot) ──► CartSession.total_cost
///                                                                │
///                                                                ▼
///                                              CheckoutConfirmation.amount
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use bookshop_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the dollars portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$12.34`.
///
/// ## Note
/// For debugging and logs. The storefront's `StoreConfig::format_currency`
/// handles the configured currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Lets a cart total be written as `items.iter().map(|i| i.unit_price).sum()`.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(4000)), "$40.00");
        assert_eq!(format!("{}", Money::from_cents(5)), "$0.05");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_add() {
        let total = Money::from_cents(1999) + Money::from_cents(4000);
        assert_eq!(total, Money::from_cents(5999));
    }

    #[test]
    fn test_sum() {
        let prices = [1999, 4000, 1].map(Money::from_cents);
        let total: Money = prices.iter().copied().sum();
        assert_eq!(total.cents(), 6000);

        let empty: Money = std::iter::empty().sum();
        assert_eq!(empty, Money::zero());
    }
}
