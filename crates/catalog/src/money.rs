//! Prices and totals in integer cents.

use serde::{Deserialize, Serialize};

/// A price or total, stored as a whole number of cents.
///
/// Serialized as the bare cent count, e.g. `5500` for $55.00.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// Highest unit price the catalog accepts, $10,000,000.00.
    ///
    /// A single line at or below this price stays inside `i64` for any `u32`
    /// quantity. Sums across lines are still checked separately.
    pub const MAX_PRICE: Money = Money::from_cents(1_000_000_000);

    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Converts a feed price such as `109.95` to cents, rounding to the
    /// nearest cent.
    ///
    /// Returns `None` for NaN, infinities and values outside the `i64` cent
    /// range.
    pub fn from_decimal_dollars(dollars: f64) -> Option<Self> {
        let cents = (dollars * 100.0).round();
        let in_range = cents >= i64::MIN as f64 && cents <= i64::MAX as f64;
        (cents.is_finite() && in_range).then(|| Self::from_cents(cents as i64))
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// Returns the line price for `quantity` units, or `None` on overflow.
    pub fn checked_multiply(&self, quantity: u32) -> Option<Money> {
        self.cents
            .checked_mul(i64::from(quantity))
            .map(Self::from_cents)
    }

    /// Returns `self + rhs`, or `None` on overflow.
    pub fn checked_add(&self, rhs: Money) -> Option<Money> {
        self.cents.checked_add(rhs.cents).map(Self::from_cents)
    }

    /// Returns the line price for `quantity` units, saturating at the `i64`
    /// bounds.
    pub fn multiply(&self, quantity: u32) -> Money {
        Self::from_cents(self.cents.saturating_mul(i64::from(quantity)))
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    /// Saturates at the `i64` bounds. Use [`Money::checked_add`] to detect it.
    fn add(self, rhs: Self) -> Self::Output {
        Self::from_cents(self.cents.saturating_add(rhs.cents))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}
