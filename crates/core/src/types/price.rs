//! Exact money representation for catalog prices and cart totals.
//!
//! Prices are stored as integer cents, which is what the storage layer
//! persists, and exposed as [`rust_decimal::Decimal`] for display. Keeping
//! the arithmetic in cents makes per-line subtotals and the cart grand
//! total exact; no floating point is involved anywhere.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A non-negative USD amount held as integer cents.
///
/// ## Constraints
///
/// - Constructed from user input only through [`Price::parse`], which
///   accepts at most two decimal places of precision (further digits are
///   rounded to the nearest cent)
/// - Negative amounts never come out of [`Price::parse`]; arithmetic
///   saturates instead of wrapping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Zero dollars and zero cents.
    pub const ZERO: Self = Self(0);

    /// Create a price from integer cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Get the underlying cent count.
    #[must_use]
    pub const fn as_cents(&self) -> i64 {
        self.0
    }

    /// The amount as a decimal with two fractional digits (e.g. `19.99`).
    #[must_use]
    pub fn amount(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Parse a decimal amount such as `"19.99"`.
    ///
    /// Returns `None` for anything that is not a non-negative decimal
    /// number: empty input, non-numeric text, or a negative amount. Input
    /// with more than two decimal places is rounded to the nearest cent.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let amount = raw.trim().parse::<Decimal>().ok()?;
        if amount.is_sign_negative() {
            return None;
        }
        let cents = amount
            .round_dp(2)
            .checked_mul(Decimal::ONE_HUNDRED)?
            .to_i64()?;
        Some(Self(cents))
    }

    /// Multiply by a line quantity, saturating at the representable maximum.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(i64::from(quantity)))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.amount())
    }
}
