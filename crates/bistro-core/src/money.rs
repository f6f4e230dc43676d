//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    178.99 × 0.18 = 32.218199999999996  ❌ WRONG!                        │
//! │                                                                         │
//! │  GST splits halve the tax, and bills sum many lines, so every          │
//! │  float error is duplicated and accumulated.                            │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal                                          │
//! │    178.99 × 18 / 100 = 32.2182 exactly                                 │
//! │    32.2182 / 2      = 16.1091 exactly                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts keep full precision through every calculation. Rounding to
//! paise happens once, at display time ([`Money::round_to_paise`],
//! [`crate::format::format_currency`]).
//!
//! ## Overflow
//! `Decimal` tops out near ±7.9 × 10²⁸. Every operation here saturates at
//! `Decimal::MAX` / `Decimal::MIN` instead of panicking.
//!
//! ## Usage
//! ```rust
//! use bistro_core::money::Money;
//!
//! let price = Money::from_paise(1899); // ₹18.99
//! let line = price * 2;                // ₹37.98
//! assert_eq!(line, Money::from_paise(3798));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A rupee amount held as an exact decimal.
///
/// Serialized as a decimal string (`"18.99"`) so the dashboard never
/// parses it into a float by accident. Deserialization also accepts JSON
/// numbers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Wraps a decimal rupee amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates an amount from paise (1/100 rupee).
    ///
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// assert_eq!(Money::from_paise(1899).to_string(), "₹18.99");
    /// ```
    #[inline]
    pub fn from_paise(paise: i64) -> Self {
        Money(Decimal::new(paise, 2))
    }

    /// Creates an amount from whole rupees.
    #[inline]
    pub fn from_rupees(rupees: i64) -> Self {
        Money(Decimal::from(rupees))
    }

    /// Returns the underlying decimal.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero rupees.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// let line_total = Money::from_rupees(80).multiply_quantity(2);
    /// assert_eq!(line_total, Money::from_rupees(160));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(Decimal::from(qty)))
    }

    /// Returns `fraction` of this amount (0.1 = 10%). No rounding.
    #[inline]
    pub fn fraction_of(&self, fraction: Decimal) -> Self {
        Money(self.0.saturating_mul(fraction))
    }

    /// Applies a tax rate: `amount × rate / 100`, kept at full precision.
    ///
    /// ```rust
    /// use bistro_core::money::Money;
    /// use bistro_core::types::TaxRate;
    ///
    /// let tax = Money::from_paise(17899).apply_rate(TaxRate::from_bps(1800));
    /// assert_eq!(tax, Money::from_paise(17899).fraction_of("0.18".parse().unwrap()));
    /// assert_eq!(tax, Money::new("32.2182".parse().unwrap()));
    /// ```
    ///
    /// When `amount × rate` would overflow, the amount is divided by 100
    /// first and the product saturates.
    pub fn apply_rate(&self, rate: TaxRate) -> Self {
        let percent = rate.percent();
        let tax = match self.0.checked_mul(percent) {
            Some(product) => product / Decimal::ONE_HUNDRED,
            None => (self.0 / Decimal::ONE_HUNDRED).saturating_mul(percent),
        };
        Money(tax)
    }

    /// Splits the amount into two equal halves (CGST/SGST).
    #[inline]
    pub fn half(&self) -> Self {
        Money(self.0 / Decimal::TWO)
    }

    /// Rounds to two decimal places, half away from zero.
    ///
    /// This is the only rounding rule in the crate and it is applied only
    /// for display.
    ///
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// let grand_total = Money::new("211.2082".parse().unwrap());
    /// assert_eq!(grand_total.round_to_paise(), Money::from_paise(21121));
    /// assert_eq!(Money::new("0.125".parse().unwrap()).round_to_paise(), Money::from_paise(13));
    /// ```
    #[inline]
    pub fn round_to_paise(&self) -> Self {
        Money(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses the rupee formatting from [`crate::format`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::format_currency(*self))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(1899);
        assert_eq!(money.amount(), dec("18.99"));
        assert_eq!(Money::from_rupees(80).amount(), dec("80"));
    }

    #[test]
    fn test_equality_ignores_scale() {
        assert_eq!(Money::new(dec("160.00")), Money::from_rupees(160));
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupees(10);
        let b = Money::from_rupees(5);

        assert_eq!(a + b, Money::from_rupees(15));
        assert_eq!(a - b, Money::from_rupees(5));
        assert_eq!(a * 3, Money::from_rupees(30));
        assert_eq!(-a, Money::from_rupees(-10));
    }

    #[test]
    fn test_apply_rate_keeps_full_precision() {
        let tax = Money::new(dec("178.99")).apply_rate(TaxRate::from_percent(dec("18")));
        assert_eq!(tax.amount(), dec("32.2182"));
        assert_eq!(tax.half().amount(), dec("16.1091"));
    }

    #[test]
    fn test_fraction_of() {
        let discount = Money::from_rupees(100).fraction_of(dec("0.1"));
        assert_eq!(discount, Money::from_rupees(10));
    }

    #[test]
    fn test_round_to_paise_half_away_from_zero() {
        assert_eq!(Money::new(dec("2.345")).round_to_paise(), Money::new(dec("2.35")));
        assert_eq!(Money::new(dec("-2.345")).round_to_paise(), Money::new(dec("-2.35")));
        assert_eq!(Money::new(dec("2.344")).round_to_paise(), Money::new(dec("2.34")));
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_negative());
        assert!(Money::from_rupees(-1).is_negative());
        assert_eq!(Money::from_rupees(-7).abs(), Money::from_rupees(7));
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_paise(1899), Money::from_rupees(160)]
            .iter()
            .sum();
        assert_eq!(total, Money::new(dec("178.99")));
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_panicking() {
        let max = Money::new(Decimal::MAX);
        let min = Money::new(Decimal::MIN);

        assert_eq!(max * 2, max);
        assert_eq!(max * -2, min);
        assert_eq!(max + max, max);
        assert_eq!(min - max, min);
        assert_eq!(max.fraction_of(dec("1.5")), max);

        let mut acc = max;
        acc += Money::from_rupees(1);
        assert_eq!(acc, max);
    }

    #[test]
    fn test_apply_rate_on_huge_amount_divides_first() {
        let huge = Money::new(Decimal::from_i128_with_scale(10i128.pow(28), 0));
        let tax = huge.apply_rate(TaxRate::STANDARD);
        assert_eq!(tax.amount(), Decimal::from_i128_with_scale(18 * 10i128.pow(26), 0));

        let doubled = Money::new(Decimal::MAX).apply_rate(TaxRate::from_bps(20_000));
        assert_eq!(doubled.amount(), Decimal::MAX / Decimal::ONE_HUNDRED * Decimal::TWO);
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Money::from_paise(1899)).unwrap();
        assert_eq!(json, "\"18.99\"");

        let from_number: Money = serde_json::from_str("18.99").unwrap();
        assert_eq!(from_number, Money::from_paise(1899));
    }
}
