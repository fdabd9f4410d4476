//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    10000 * 3 * (1 - 0.15) = 25500.000000000004                          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer units + basis points                             │
//! │    30000 * (10000 - 1500) bps = 255_000_000                             │
//! │    (255_000_000 + 5000) / 10000 = 25500   exact, rounded half-up        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! Every rounding step in the engine goes through [`round_half_up_div`], so a
//! line total and a coupon total round the same way a browser's `Math.round`
//! would for the same exact value.
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_minor(10000);
//! let line = price * 3;
//! assert_eq!(line.minor(), 30000);
//! assert_eq!(line.to_string(), "30,000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► price × quantity ──► line_total (tier + bulk discount)
///                                              │
///                                              ▼
///                     Σ line totals = subtotal ──► apply_coupon ──► total
/// ```
///
/// Arithmetic saturates at the `i64` bounds; it never wraps or panics.
/// [`crate::MAX_PRICE`] keeps validated catalogs far below those bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, type = "number")]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from the smallest currency unit.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(20000).minor(), 20000);
    /// ```
    #[inline]
    pub const fn from_minor(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the value in the smallest currency unit.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_minor(10000);
    /// assert_eq!(unit_price.multiply_quantity(15).minor(), 150000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Applies a tier/bulk discount rate and rounds half-up.
    ///
    /// `round(amount × (1 − rate))`, computed in basis points so no float
    /// ever touches the amount.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    /// use storefront_core::types::DiscountRate;
    ///
    /// let gross = Money::from_minor(150000);
    /// let net = gross.apply_rate_discount(DiscountRate::from_bps(1000)); // 10%
    /// assert_eq!(net.minor(), 135000);
    /// ```
    pub fn apply_rate_discount(&self, rate: DiscountRate) -> Money {
        let keep_bps = DiscountRate::SCALE as i128 - rate.bps() as i128;
        let net = round_half_up_div(self.0 as i128 * keep_bps, DiscountRate::SCALE as i128);
        Money::from_wide(net)
    }

    /// Applies a whole-percent discount (`0..=100`) and rounds half-up.
    ///
    /// This is the coupon unit, not the tier unit: `10` means ten percent.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let subtotal = Money::from_minor(50000);
    /// assert_eq!(subtotal.apply_percentage_off(10).minor(), 45000);
    /// ```
    pub fn apply_percentage_off(&self, percent: i64) -> Money {
        let keep = 100 - percent as i128;
        Money::from_wide(round_half_up_div(self.0 as i128 * keep, 100))
    }

    /// Subtracts `other`, flooring the result at zero.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let subtotal = Money::from_minor(20000);
    /// assert!(subtotal.saturating_sub_to_zero(Money::from_minor(50000)).is_zero());
    /// ```
    #[inline]
    pub fn saturating_sub_to_zero(&self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0).max(0))
    }

    /// Narrows an i128 intermediate, saturating at the i64 bounds.
    #[inline]
    fn from_wide(amount: i128) -> Money {
        Money(amount.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }
}

/// Divides and rounds half-up (toward positive infinity on exact halves).
///
/// Matches `Math.round(numerator / denominator)` for the even denominators the
/// engine uses (`10000` bps, `100` percent). `denominator` must be positive.
#[inline]
pub(crate) fn round_half_up_div(numerator: i128, denominator: i128) -> i128 {
    (numerator + denominator / 2).div_euclid(denominator)
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Grouped digits without a currency symbol (`135,000`).
///
/// The app's config layer adds the symbol for display.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}", sign, grouped)
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
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

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
    fn test_display_groups_thousands() {
        assert_eq!(Money::from_minor(0).to_string(), "0");
        assert_eq!(Money::from_minor(999).to_string(), "999");
        assert_eq!(Money::from_minor(1000).to_string(), "1,000");
        assert_eq!(Money::from_minor(135000).to_string(), "135,000");
        assert_eq!(Money::from_minor(1234567).to_string(), "1,234,567");
        assert_eq!(Money::from_minor(-5000).to_string(), "-5,000");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(500);

        assert_eq!((a + b).minor(), 1500);
        assert_eq!((a - b).minor(), 500);
        assert_eq!((a * 3).minor(), 3000);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.minor(), 2000);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_minor(i64::MAX / 2);

        assert_eq!(huge.multiply_quantity(3).minor(), i64::MAX);
        assert_eq!((huge * 3).minor(), i64::MAX);
        assert_eq!((huge + huge + huge).minor(), i64::MAX);
        assert_eq!((Money::from_minor(i64::MIN) - huge).minor(), i64::MIN);

        let total: Money = [huge, huge, huge].into_iter().sum();
        assert_eq!(total.minor(), i64::MAX);

        let max = Money::from_minor(i64::MAX);
        assert_eq!(max.apply_rate_discount(DiscountRate::zero()), max);
        assert_eq!(max.apply_percentage_off(-100).minor(), i64::MAX);
        assert!(Money::from_minor(i64::MIN)
            .saturating_sub_to_zero(max)
            .is_zero());
    }

    #[test]
    fn test_rate_discount_rounds_half_up() {
        // 333 × 0.95 = 316.35 → 316
        let m = Money::from_minor(333);
        assert_eq!(m.apply_rate_discount(DiscountRate::from_bps(500)).minor(), 316);

        // 10 × 0.75 = 7.5 → 8
        let m = Money::from_minor(10);
        assert_eq!(m.apply_rate_discount(DiscountRate::from_bps(2500)).minor(), 8);

        // zero rate is identity
        let m = Money::from_minor(12345);
        assert_eq!(m.apply_rate_discount(DiscountRate::zero()), m);
    }

    #[test]
    fn test_percentage_off_rounds_half_up() {
        // 12345 × 0.9 = 11110.5 → 11111
        assert_eq!(Money::from_minor(12345).apply_percentage_off(10).minor(), 11111);
        assert_eq!(Money::from_minor(50000).apply_percentage_off(100).minor(), 0);
        assert_eq!(Money::from_minor(50000).apply_percentage_off(0).minor(), 50000);
    }

    #[test]
    fn test_saturating_sub_to_zero() {
        let subtotal = Money::from_minor(20000);
        assert_eq!(
            subtotal.saturating_sub_to_zero(Money::from_minor(5000)).minor(),
            15000
        );
        assert_eq!(
            subtotal.saturating_sub_to_zero(Money::from_minor(50000)).minor(),
            0
        );
    }

    #[test]
    fn test_round_half_up_div_matches_math_round() {
        assert_eq!(round_half_up_div(5, 10), 1); // 0.5 → 1
        assert_eq!(round_half_up_div(4, 10), 0); // 0.4 → 0
        assert_eq!(round_half_up_div(-5, 10), 0); // -0.5 → -0
        assert_eq!(round_half_up_div(-6, 10), -1); // -0.6 → -1
    }
}
