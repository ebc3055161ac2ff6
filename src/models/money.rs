//! Money type for representing currency amounts
//!
//! Amounts are stored as an integer count of the currency's smallest unit so
//! that splits and sums never lose precision.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A monetary amount in minor currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from minor units
    ///
    /// # Examples
    /// ```
    /// use ledger_core::models::Money;
    /// let amount = Money::new(5_000);
    /// assert_eq!(amount.amount(), 5_000);
    /// ```
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the raw amount
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Subtract, flooring the result at zero
    pub fn saturating_sub_floor(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0).max(0))
    }

    /// Add, clamping at the bounds of `i64` instead of overflowing
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Ratio of this amount to `whole`, or 0.0 when `whole` is not positive
    pub fn ratio_of(&self, whole: Money) -> f64 {
        if whole.0 <= 0 {
            return 0.0;
        }
        self.0 as f64 / whole.0 as f64
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Money {
    fn from(amount: i64) -> Self {
        Self(amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Money::saturating_add)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Money::new(1000);
        let b = Money::new(500);

        assert_eq!((a + b).amount(), 1500);
        assert_eq!((a - b).amount(), 500);
        assert_eq!((-a).amount(), -1000);
    }

    #[test]
    fn test_saturating_sub_floor() {
        assert_eq!(Money::new(300).saturating_sub_floor(Money::new(500)), Money::zero());
        assert_eq!(Money::new(500).saturating_sub_floor(Money::new(300)), Money::new(200));
        assert_eq!(
            Money::new(i64::MAX).saturating_sub_floor(Money::new(-1)),
            Money::new(i64::MAX)
        );
        assert_eq!(
            Money::new(i64::MIN).saturating_sub_floor(Money::new(1)),
            Money::zero()
        );
    }

    #[test]
    fn test_ratio_of() {
        assert_eq!(Money::new(71_000).ratio_of(Money::new(100_000)), 0.71);
        assert_eq!(Money::new(10).ratio_of(Money::zero()), 0.0);
        assert_eq!(Money::new(10).ratio_of(Money::new(-5)), 0.0);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![Money::new(100), Money::new(200), Money::new(300)];
        let by_ref: Money = amounts.iter().sum();
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.amount(), 600);
        assert_eq!(by_ref, total);
    }

    #[test]
    fn test_sum_saturates() {
        let amounts = [Money::new(i64::MAX), Money::new(1), Money::new(5)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total, Money::new(i64::MAX));
    }

    #[test]
    fn test_serialization() {
        let m = Money::new(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
