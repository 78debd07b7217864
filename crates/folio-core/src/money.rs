//! # Money Module
//!
//! Provides the `Money` type for prices and revenue.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    12.99 * 3 = 38.970000000000006  ❌ WRONG!                            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1299 cents * 3 = 3897 cents     ✅ exact                             │
//! │                                                                         │
//! │  Floats appear only in analytics output, for display.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use folio_core::money::Money;
//!
//! let price: Money = "12.99".parse().unwrap();
//! assert_eq!(price.cents(), 1299);
//!
//! let revenue = price.multiply_quantity(3);
//! assert_eq!(revenue.to_string(), "$38.97");
//! assert_eq!(revenue.to_decimal_string(), "38.97");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: negative values are representable so validation can
///   reject them with a proper error instead of failing to parse
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Saturating operators**: `+`, `-`, `*` and `Sum` clamp at the i64
///   bounds instead of panicking or wrapping. Validation caps prices at
///   [`MAX_PRICE_CENTS`](crate::MAX_PRICE_CENTS) and stock at
///   [`MAX_STOCK`](crate::MAX_STOCK), so ledger totals stay far below them.
///
/// ## Where Money is Used
/// ```text
/// Book.price ──► price × quantity_sold ──► SaleRecord.revenue
///      │                                         │
///      └──► InventoryReport.total_value          └──► SalesReport.total_revenue
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_major(units: i64) -> Self {
        Money(units * 100)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(30000); // $300.00
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 90000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Multiplies money by a quantity, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::money::Money;
    ///
    /// assert_eq!(
    ///     Money::from_cents(1299).checked_multiply_quantity(3),
    ///     Some(Money::from_cents(3897))
    /// );
    /// assert_eq!(Money::from_cents(i64::MAX).checked_multiply_quantity(2), None);
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Divides by a positive count, rounding half away from zero to the cent.
    ///
    /// Used for averages. `divisor` must be greater than zero.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::money::Money;
    ///
    /// // $10.00 / 3 = $3.333... → $3.33
    /// assert_eq!(Money::from_cents(1000).div_round(3).cents(), 333);
    /// // $0.05 / 2 = $0.025 → $0.03
    /// assert_eq!(Money::from_cents(5).div_round(2).cents(), 3);
    /// ```
    pub fn div_round(&self, divisor: i64) -> Money {
        let value = self.0 as i128;
        let divisor = divisor as i128;
        let half = divisor / 2;
        let rounded = if value >= 0 {
            (value + half) / divisor
        } else {
            (value - half) / divisor
        };
        Money(rounded as i64)
    }

    /// Returns the value in major units as a float.
    ///
    /// For statistics and display only, never for ledger arithmetic.
    #[inline]
    pub fn to_major_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Formats as a plain decimal string (`"12.99"`), as stored in CSV.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }

    /// Parses a decimal string, rounding extra fraction digits to the cent.
    ///
    /// Tables written by float arithmetic contain values such as
    /// `38.970000000000006`. Those round half-up on the third fraction digit.
    /// User input goes through the strict [`FromStr`] impl instead.
    pub fn parse_rounded(input: &str) -> Result<Money, ValidationError> {
        let (negative, whole, frac) = split_decimal(input)?;
        let (kept, rest) = frac.split_at(frac.len().min(2));
        let round_up = rest.chars().next().is_some_and(|c| c >= '5');
        let cents = to_cents(whole, kept)?;
        let cents = if round_up { cents + 1 } else { cents };
        Ok(Money(if negative { -cents } else { cents }))
    }
}

fn split_decimal(input: &str) -> Result<(bool, &str, &str), ValidationError> {
    let s = input.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));

    if whole.is_empty() && frac.is_empty() {
        return Err(ValidationError::required("price"));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::invalid_format(
            "price",
            format!("'{}' is not a decimal number", input.trim()),
        ));
    }

    Ok((negative, whole, frac))
}

fn to_cents(whole: &str, frac: &str) -> Result<i64, ValidationError> {
    let overflow = || ValidationError::invalid_format("price", "value is too large");

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| overflow())?
    };
    let frac_cents: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| overflow())? * 10,
        _ => frac.parse().map_err(|_| overflow())?,
    };

    whole
        .checked_mul(100)
        .and_then(|c| c.checked_add(frac_cents))
        .ok_or_else(overflow)
}

/// Strict decimal parsing: at most two fraction digits.
///
/// ## Example
/// ```rust
/// use folio_core::money::Money;
///
/// assert_eq!("300".parse::<Money>().unwrap().cents(), 30000);
/// assert_eq!("12.5".parse::<Money>().unwrap().cents(), 1250);
/// assert!("12.999".parse::<Money>().is_err());
/// assert!("twelve".parse::<Money>().is_err());
/// ```
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, whole, frac) = split_decimal(s)?;
        if frac.len() > 2 {
            return Err(ValidationError::invalid_format(
                "price",
                "at most two decimal places are allowed",
            ));
        }
        let cents = to_cents(whole, frac)?;
        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
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
