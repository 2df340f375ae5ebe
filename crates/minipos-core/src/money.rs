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
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In many retail systems:                                                │
//! │    10.00 / 3 = 3.33 (×3 = 9.99)  → Lost 0.01!                          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units                                      │
//! │    1000 tyiyn / 3 = 333 tyiyn (×3 = 999 tyiyn)                         │
//! │    We KNOW we lost one unit, and handle it explicitly                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use minipos_core::money::Money;
//!
//! // Create from minor units (preferred)
//! let price = Money::from_minor(1099); // 10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;                     // 21.98
//! let total = price + Money::from_minor(500);  // 15.99
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit
/// (tyiyn for KGS som, cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds, discounts,
///   and overpaid debt ledgers (customer credit)
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  Product.price ──┬──► ReceiptItem.price (snapshot) ──► line totals      │
/// │                  │                                                      │
/// │                  └──► Displayed as "10.99" in UI                        │
/// │                                                                         │
/// │  Cart.subtotal ──► Discount ──► Cart.total ──► Receipt.total ──► Report │
/// │                                                                         │
/// │  Debt entries sum to the ledger balance through this type               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use minipos_core::money::Money;
    ///
    /// let price = Money::from_minor(1099); // Represents 10.99
    /// assert_eq!(price.minor(), 1099);
    /// ```
    ///
    /// ## Why Minor Units?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// Storage, calculations, tickets and reports all use minor units.
    /// Only the UI converts to major units for display.
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use minipos_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // 10.99
    /// assert_eq!(price.minor(), 1099);
    ///
    /// let negative = Money::from_major_minor(-5, 50); // -5.50 (credit)
    /// assert_eq!(negative.minor(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -5.50, not -4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        // Handle sign: if major is negative, minor should subtract
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in minor units (smallest currency unit).
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    ///
    /// ## Example
    /// ```rust
    /// use minipos_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(1099).major(), 10);
    /// assert_eq!(Money::from_minor(-550).major(), -5);
    /// ```
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    ///
    /// ## Example
    /// ```rust
    /// use minipos_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(1099).minor_part(), 99);
    /// assert_eq!(Money::from_minor(-550).minor_part(), 50); // Absolute value
    /// ```
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use minipos_core::money::Money;
    ///
    /// let unit_price = Money::from_minor(299); // 2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.minor(), 897); // 8.97
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Cola 2.99
    /// Quantity: 3
    ///      │
    ///      ▼
    /// multiply_quantity(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: 8.97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Clamps the value into `[min, max]`.
    ///
    /// Used for the central discount bound: `discount.clamp_range(zero, subtotal)`.
    #[inline]
    pub fn clamp_range(&self, min: Money, max: Money) -> Money {
        Money(self.0.clamp(min.0, max.0))
    }

    /// Floors negative values at zero.
    ///
    /// Used when the debt policy says an overpaid ledger reports a zero
    /// balance instead of customer credit.
    #[inline]
    pub const fn floor_zero(&self) -> Money {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }

    /// Formats the value as a plain two-decimal string without a currency
    /// symbol: `"1099"` minor units become `"10.99"`.
    ///
    /// This is the wire text used by print tickets and the HTML export.
    pub fn decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. Use frontend formatting for actual UI
/// display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.decimal_string())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over iterators (report aggregation, ledger balances).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
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
    fn test_from_minor() {
        let money = Money::from_minor(1099);
        assert_eq!(money.minor(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(10, 99);
        assert_eq!(money.minor(), 1099);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.minor(), -550);
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_minor(1099).decimal_string(), "10.99");
        assert_eq!(Money::from_minor(500).decimal_string(), "5.00");
        assert_eq!(Money::from_minor(-550).decimal_string(), "-5.50");
        assert_eq!(Money::from_minor(0).decimal_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(500);

        assert_eq!((a + b).minor(), 1500);
        assert_eq!((a - b).minor(), 500);
        let result: Money = a * 3;
        assert_eq!(result.minor(), 3000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300]
            .into_iter()
            .map(Money::from_minor)
            .sum();
        assert_eq!(total.minor(), 600);
    }

    #[test]
    fn test_clamp_range() {
        let subtotal = Money::from_minor(200);
        assert_eq!(
            Money::from_minor(500).clamp_range(Money::zero(), subtotal),
            subtotal
        );
        assert_eq!(
            Money::from_minor(-50).clamp_range(Money::zero(), subtotal),
            Money::zero()
        );
        assert_eq!(
            Money::from_minor(150).clamp_range(Money::zero(), subtotal),
            Money::from_minor(150)
        );
    }

    #[test]
    fn test_floor_zero() {
        assert_eq!(Money::from_minor(-100).floor_zero(), Money::zero());
        assert_eq!(Money::from_minor(100).floor_zero(), Money::from_minor(100));
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_minor(100);
        assert!(!positive.is_zero());
        assert!(positive.is_positive());
        assert!(!positive.is_negative());

        let negative = Money::from_minor(-100);
        assert!(!negative.is_zero());
        assert!(!negative.is_positive());
        assert!(negative.is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_minor(299);
        let line_total = unit_price.multiply_quantity(3);
        assert_eq!(line_total.minor(), 897);
    }

    /// Critical test: Verify that 10.00 / 3 × 3 behaves as expected
    /// This documents the intentional precision loss
    #[test]
    fn test_division_precision_loss_documented() {
        let ten = Money::from_minor(1000);
        // If we split 10.00 three ways: 3.33 each
        let one_third = Money::from_minor(1000 / 3); // 333
        let reconstructed: Money = one_third * 3; // 999

        // We intentionally lose one minor unit - this is documented behavior
        assert_eq!(reconstructed.minor(), 999);
        assert_ne!(reconstructed.minor(), ten.minor());

        let lost = ten - reconstructed;
        assert_eq!(lost.minor(), 1);
    }
}
