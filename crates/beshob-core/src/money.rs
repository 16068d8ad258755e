//! # Money Module
//!
//! Provides the `Money` type for handling Taka amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Poisha (1 Taka = 100 poisha)                     │
//! │    ৳450 × 2 = 45000 poisha × 2 = 90000 poisha = ৳900                    │
//! │    Subtotal, delivery, discount and due are all exact                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use beshob_core::money::Money;
//!
//! let price = Money::from_taka(450);
//! let line_total = price.multiply_quantity(2);
//! assert_eq!(line_total, Money::from_taka(900));
//! assert_eq!(line_total.to_string(), "৳900");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

/// Poisha per Taka.
const POISHA_PER_TAKA: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A Taka amount stored as an integer count of poisha.
///
/// ## Design Decisions
/// - **i64 (signed)**: `total` can go negative when a discount exceeds
///   subtotal + delivery; only `due` is clamped
/// - **Single field tuple struct**: serializes as a plain number
///
/// ## Where Money is Used
/// ```text
/// ProductSize.price ──► InvoiceItem.price ──► line total ──► subtotal
///                                                              │
/// Settings delivery fee ──► deliveryCharge ────────────────────┤
///                                                              ▼
///                                  discount, advance ──► total, due
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from poisha (the smallest currency unit).
    #[inline]
    pub const fn from_poisha(poisha: i64) -> Self {
        Money(poisha)
    }

    /// Creates a Money value from whole Taka.
    ///
    /// ## Example
    /// ```rust
    /// use beshob_core::money::Money;
    ///
    /// assert_eq!(Money::from_taka(60).poisha(), 6000);
    /// ```
    #[inline]
    pub const fn from_taka(taka: i64) -> Self {
        Money(taka * POISHA_PER_TAKA)
    }

    /// Converts a decimal Taka amount coming from an external JSON source
    /// (the assist service reports prices as JSON numbers).
    ///
    /// Rounds to the nearest poisha. Non-finite input becomes zero.
    pub fn from_taka_lossy(taka: f64) -> Self {
        if !taka.is_finite() {
            return Money::zero();
        }
        Money((taka * POISHA_PER_TAKA as f64).round() as i64)
    }

    /// Returns the value in poisha.
    #[inline]
    pub const fn poisha(&self) -> i64 {
        self.0
    }

    /// Returns the whole Taka portion.
    #[inline]
    pub const fn taka(&self) -> i64 {
        self.0 / POISHA_PER_TAKA
    }

    /// Returns the poisha portion (always 0-99).
    #[inline]
    pub const fn poisha_part(&self) -> i64 {
        (self.0 % POISHA_PER_TAKA).abs()
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Clamps negative values to zero.
    ///
    /// ## Example
    /// ```rust
    /// use beshob_core::money::Money;
    ///
    /// assert_eq!(Money::from_taka(-40).clamp_non_negative(), Money::zero());
    /// assert_eq!(Money::from_taka(40).clamp_non_negative(), Money::from_taka(40));
    /// ```
    #[inline]
    pub const fn clamp_non_negative(self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            self
        }
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Item: Organic Honey 500gm ৳450
    /// Quantity: 2
    ///      │
    ///      ▼
    /// multiply_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: ৳900
    /// ```
    ///
    /// Saturates at the `i64` bounds instead of overflowing.
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Displays Taka with thousands separators, the way the invoice prints it.
///
/// `৳1,234` when there are no poisha, `৳1,234.50` otherwise.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.taka().abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        if self.poisha_part() == 0 {
            write!(f, "{}৳{}", sign, grouped)
        } else {
            write!(f, "{}৳{}.{:02}", sign, grouped, self.poisha_part())
        }
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// Arithmetic saturates at the i64 bounds.

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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_taka() {
        let money = Money::from_taka(450);
        assert_eq!(money.poisha(), 45000);
        assert_eq!(money.taka(), 450);
        assert_eq!(money.poisha_part(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_taka(960).to_string(), "৳960");
        assert_eq!(Money::from_taka(1200).to_string(), "৳1,200");
        assert_eq!(Money::from_taka(1234567).to_string(), "৳1,234,567");
        assert_eq!(Money::from_poisha(123450).to_string(), "৳1,234.50");
        assert_eq!(Money::from_taka(-40).to_string(), "-৳40");
        assert_eq!(Money::zero().to_string(), "৳0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_taka(1000);
        let b = Money::from_taka(60);

        assert_eq!(a + b, Money::from_taka(1060));
        assert_eq!(a - b, Money::from_taka(940));
        assert_eq!(b - a, Money::from_taka(-940));
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_taka(450), Money::from_taka(250)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_taka(700));

        let empty: Money = std::iter::empty::<Money>().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_multiply_quantity() {
        assert_eq!(Money::from_taka(450).multiply_quantity(2), Money::from_taka(900));
        assert_eq!(Money::from_taka(450).multiply_quantity(0), Money::zero());
        assert_eq!(
            Money::from_poisha(i64::MAX / 2).multiply_quantity(3),
            Money::from_poisha(i64::MAX)
        );
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_poisha(i64::MAX);
        let min = Money::from_poisha(i64::MIN);

        assert_eq!(max + Money::from_taka(1), max);
        assert_eq!(min - Money::from_taka(1), min);

        let mut acc = max;
        acc += max;
        assert_eq!(acc, max);

        let total: Money = vec![max, max, Money::from_taka(5)].into_iter().sum();
        assert_eq!(total, max);
    }

    #[test]
    fn test_from_taka_lossy() {
        assert_eq!(Money::from_taka_lossy(450.0), Money::from_taka(450));
        assert_eq!(Money::from_taka_lossy(12.345), Money::from_poisha(1235));
        assert_eq!(Money::from_taka_lossy(f64::NAN), Money::zero());
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(Money::from_poisha(-1).clamp_non_negative(), Money::zero());
        assert_eq!(Money::zero().clamp_non_negative(), Money::zero());
    }
}
