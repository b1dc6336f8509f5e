//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The dashboard used to compute commission in JS floats:                 │
//! │    (1000.10 + 500.20) * 0.12 = 180.03599999999997                       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    150030 cents * 1200 bps / 10000 = 18003.6 → 18004 cents              │
//! │    Rounding happens once, explicitly, at the cent                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use showroom_core::money::Money;
//!
//! let front = Money::parse_decimal("1000").unwrap();
//! let back = Money::from_cents(50_000);
//! assert_eq!((front + back).to_string(), "$1500.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use ts_rs::TS;

use crate::commission::CommissionRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: front/back profit can be negative on a loss-leader deal
/// - **Single field tuple struct**: Zero-cost abstraction over i64
///
/// ## Where Money is Used
/// ```text
/// Sale form ──► parse_decimal ──► ValidatedSale.front_profit ─┐
///                                 ValidatedSale.back_profit ──┴─► gross profit
///                                                                    │
///                                         apply_rate(tier) ◄─────────┘
///                                                │
///                                                ▼
///                                   SaleRecord.commission_earned_cents
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use showroom_core::money::Money;
    ///
    /// let price = Money::from_cents(2_499_900); // $24,999.00
    /// assert_eq!(price.cents(), 2_499_900);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from dollars and cents.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -$5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Parses a decimal amount as typed into a form ("1500", "1500.5", "-250.75").
    ///
    /// ## Rules
    /// - Optional leading sign and `$`
    /// - Digits past the cent are rounded half away from zero, so a JSON
    ///   float such as `0.30000000000000004` reads as 30 cents
    /// - Anything else (letters, exponents, "NaN", "inf") is rejected
    ///
    /// ## Example
    /// ```rust
    /// use showroom_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("1000.5"), Some(Money::from_cents(100_050)));
    /// assert_eq!(Money::parse_decimal("-$25"), Some(Money::from_cents(-2_500)));
    /// assert_eq!(Money::parse_decimal("1.995"), Some(Money::from_cents(200)));
    /// assert_eq!(Money::parse_decimal("abc"), None);
    /// ```
    pub fn parse_decimal(input: &str) -> Option<Money> {
        let mut s = input.trim();

        let negative = match s.as_bytes().first() {
            Some(b'-') => {
                s = &s[1..];
                true
            }
            Some(b'+') => {
                s = &s[1..];
                false
            }
            _ => false,
        };
        s = s.strip_prefix('$').unwrap_or(s);

        let (whole, fraction) = match s.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (s, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let mut cents: i64 = 0;
        for b in whole.bytes() {
            cents = cents.checked_mul(10)?.checked_add(i64::from(b - b'0'))?;
        }
        cents = cents.checked_mul(100)?;

        // "5" in the tenths place is 50 cents
        let mut digits = fraction.bytes();
        for scale in [10, 1] {
            if let Some(b) = digits.next() {
                cents = cents.checked_add(i64::from(b - b'0') * scale)?;
            }
        }
        if matches!(digits.next(), Some(b'5'..=b'9')) {
            cents = cents.checked_add(1)?;
        }

        Some(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole dollars portion.
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

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Applies a commission rate, rounding half away from zero to the cent.
    ///
    /// ## Implementation
    /// Integer math in i128: `(amount * bps ± 5000) / 10000`.
    /// The ±5000 makes a loss round the same way a profit does, so
    /// -$0.005 becomes -$0.01 just as $0.005 becomes $0.01.
    ///
    /// ## Example
    /// ```rust
    /// use showroom_core::money::Money;
    /// use showroom_core::commission::CommissionRate;
    ///
    /// let gross = Money::from_cents(150_000); // $1,500.00
    /// let commission = gross.apply_rate(CommissionRate::from_bps(1200));
    /// assert_eq!(commission.cents(), 18_000); // $180.00
    /// ```
    pub fn apply_rate(&self, rate: CommissionRate) -> Money {
        let product = self.0 as i128 * rate.bps() as i128;
        let rounded = if product >= 0 {
            (product + 5000) / 10000
        } else {
            (product - 5000) / 10000
        };
        Money::from_cents(rounded as i64)
    }
}

/// Largest amount a single sale field may carry: $1,000,000,000.00.
///
/// Keeps every sum the ledger forms (gross profit, monthly totals) far
/// inside `i64`.
pub const MAX_AMOUNT: Money = Money::from_cents(100_000_000_000);

// =============================================================================
// Wire Format
// =============================================================================

/// Serde adapter for integer-cent fields: decimal dollars on the wire.
///
/// ```rust
/// #[derive(serde::Serialize)]
/// struct Line {
///     #[serde(with = "showroom_core::money::dollars")]
///     price: i64,
/// }
///
/// let json = serde_json::to_string(&Line { price: 2_499_950 }).unwrap();
/// assert_eq!(json, r#"{"price":24999.5}"#);
/// ```
pub mod dollars {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(*cents as f64 / 100.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let dollars = f64::deserialize(deserializer)?;
        let cents = (dollars * 100.0).round();
        if !cents.is_finite() || cents.abs() > i64::MAX as f64 {
            return Err(D::Error::custom("amount out of range"));
        }
        Ok(cents as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$1234.56` for logs and the seed report.
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
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
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
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
    }

    #[test]
    fn test_parse_decimal_accepts_form_input() {
        assert_eq!(Money::parse_decimal("1000"), Some(Money::from_cents(100_000)));
        assert_eq!(Money::parse_decimal(" 24999.99 "), Some(Money::from_cents(2_499_999)));
        assert_eq!(Money::parse_decimal("0.5"), Some(Money::from_cents(50)));
        assert_eq!(Money::parse_decimal(".75"), Some(Money::from_cents(75)));
        assert_eq!(Money::parse_decimal("12."), Some(Money::from_cents(1200)));
        assert_eq!(Money::parse_decimal("-250.75"), Some(Money::from_cents(-25_075)));
        assert_eq!(Money::parse_decimal("$300"), Some(Money::from_cents(30_000)));
    }

    #[test]
    fn test_parse_decimal_rounds_to_the_cent() {
        assert_eq!(Money::parse_decimal("1000.125"), Some(Money::from_cents(100_013)));
        assert_eq!(Money::parse_decimal("1000.1249"), Some(Money::from_cents(100_012)));
        assert_eq!(Money::parse_decimal("-0.005"), Some(Money::from_cents(-1)));
        assert_eq!(Money::parse_decimal(&(0.1 + 0.2).to_string()), Some(Money::from_cents(30)));
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert_eq!(Money::parse_decimal(""), None);
        assert_eq!(Money::parse_decimal("."), None);
        assert_eq!(Money::parse_decimal("-"), None);
        assert_eq!(Money::parse_decimal("abc"), None);
        assert_eq!(Money::parse_decimal("NaN"), None);
        assert_eq!(Money::parse_decimal("inf"), None);
        assert_eq!(Money::parse_decimal("1e3"), None);
        assert_eq!(Money::parse_decimal("1,000"), None);
        assert_eq!(Money::parse_decimal("99999999999999999999"), None);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_apply_rate() {
        let gross = Money::from_cents(150_000);
        assert_eq!(gross.apply_rate(CommissionRate::from_bps(1200)).cents(), 18_000);

        let gross = Money::from_cents(200_000);
        assert_eq!(gross.apply_rate(CommissionRate::from_bps(1500)).cents(), 30_000);
    }

    #[test]
    fn test_apply_rate_rounds_half_away_from_zero() {
        // 125 cents at 12% = 15 cents exactly
        assert_eq!(Money::from_cents(125).apply_rate(CommissionRate::from_bps(1200)).cents(), 15);
        // 1050 cents at 15% = 157.5 → 158
        assert_eq!(Money::from_cents(1050).apply_rate(CommissionRate::from_bps(1500)).cents(), 158);
        // A loss rounds symmetrically: -157.5 → -158
        assert_eq!(Money::from_cents(-1050).apply_rate(CommissionRate::from_bps(1500)).cents(), -158);
    }
}
