//! # Domain Types
//!
//! Core domain types used throughout the commission ledger.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌──────────────────────────┐                │
//! │  │  Salesperson    │ 1    * │       SaleRecord         │                │
//! │  │  ─────────────  │◄───────│  ──────────────────────  │                │
//! │  │  id (UUID)      │        │  id (storage sequence)   │                │
//! │  │  username       │        │  salesperson_id          │                │
//! │  │  role           │        │  sale_type (FULL/HALF)   │                │
//! │  └─────────────────┘        │  commission (frozen)     │                │
//! │                             └──────────────────────────┘                │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Units       │   │    SaleType     │   │   YearMonth     │       │
//! │  │  half-unit u32  │   │  Full = 1.0     │   │  "2025-03"      │       │
//! │  │  3 = 1.5 units  │   │  Half = 0.5     │   │  UTC calendar   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::commission::CommissionRate;
use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Units
// =============================================================================

/// A count of sold units, kept as whole half-units.
///
/// ## Why Half-Units?
/// A split deal counts 0.5 toward the tier thresholds. Counting halves as
/// integers keeps `14.5 + 0.5 == 15.0` exact, so the tier boundary never
/// depends on float accumulation order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Units(u32);

impl Units {
    pub const ZERO: Units = Units(0);

    /// Creates a unit count from a number of half-units (3 = 1.5 units).
    #[inline]
    pub const fn from_half_units(halves: u32) -> Self {
        Units(halves)
    }

    /// Creates a unit count from whole units.
    #[inline]
    pub const fn from_whole(units: u32) -> Self {
        Units(units * 2)
    }

    #[inline]
    pub const fn half_units(&self) -> u32 {
        self.0
    }

    /// Returns the count as a real number (for display and DTOs).
    #[inline]
    pub fn as_f64(&self) -> f64 {
        f64::from(self.0) / 2.0
    }
}

impl Add for Units {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Units(self.0 + other.0)
    }
}

impl AddAssign for Units {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Units {
    fn sum<I: Iterator<Item = Units>>(iter: I) -> Self {
        iter.fold(Units::ZERO, Add::add)
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_f64())
    }
}

// =============================================================================
// Sale Type
// =============================================================================

/// Whether a deal was closed alone or split with another salesperson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum SaleType {
    /// Counts one full unit toward the tier thresholds.
    Full,
    /// Split/assisted deal, counts half a unit.
    Half,
}

impl SaleType {
    /// Unit-equivalent of one sale of this type.
    #[inline]
    pub const fn units(&self) -> Units {
        match self {
            SaleType::Full => Units::from_half_units(2),
            SaleType::Half => Units::from_half_units(1),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            SaleType::Full => "FULL",
            SaleType::Half => "HALF",
        }
    }
}

impl FromStr for SaleType {
    type Err = ValidationError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FULL" => Ok(SaleType::Full),
            "HALF" => Ok(SaleType::Half),
            _ => Err(ValidationError::NotAllowed {
                field: "saleType".to_string(),
                allowed: vec!["FULL".to_string(), "HALF".to_string()],
            }),
        }
    }
}

// =============================================================================
// Role
// =============================================================================

/// Team role of a salesperson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Dealership owner account; exactly one, never deleted.
    Admin,
    /// Regular team member.
    Collaborator,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Admin => "ADMIN",
            Role::Collaborator => "COLLABORATOR",
        })
    }
}

// =============================================================================
// Year / Month
// =============================================================================

/// A calendar month in UTC; the bucket tier counts reset on.
///
/// Serializes as `"YYYY-MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a YearMonth, returning `None` for a month outside 1-12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) && (0..=9999).contains(&year) {
            Some(YearMonth { year, month })
        } else {
            None
        }
    }

    /// The month a timestamp falls in.
    pub fn of(at: DateTime<Utc>) -> Self {
        YearMonth {
            year: at.year(),
            month: at.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns true if `at` falls inside this month.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        YearMonth::of(at) == *self
    }

    /// First instant of the month.
    pub fn start(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(self.year, self.month, 1, 0, 0, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// The following month.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            YearMonth {
                year: self.year + 1,
                month: 1,
            }
        } else {
            YearMonth {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ValidationError;

    /// Parses `"YYYY-MM"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidFormat {
            field: "yearMonth".to_string(),
            reason: "expected YYYY-MM".to_string(),
        };

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        YearMonth::new(year, month).ok_or_else(invalid)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

/// Midnight UTC of a calendar date.
pub(crate) fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

// =============================================================================
// Salesperson
// =============================================================================

/// A member of the dealership team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Salesperson {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Name shown on the commission board.
    pub full_name: String,

    /// Login handle, unique across the team.
    pub username: String,

    pub email: String,

    pub role: Role,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Input for adding a team member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewSalesperson {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub role: Role,
}

// =============================================================================
// Sale Record
// =============================================================================

/// A persisted sale with its commission frozen at save time.
///
/// ## Frozen Commission
/// `commission_rate_bps` and `commission_earned_cents` reflect the tier in
/// effect when the sale was recorded. Later sales, backdated corrections and
/// tier changes never rewrite them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    /// Storage-assigned sequence; also the tie-break for same-instant sales.
    pub id: i64,

    pub salesperson_id: String,

    /// Dealer stock number; may repeat across time.
    pub stock_number: String,

    pub vehicle_year: i32,
    pub vehicle_make: String,
    pub vehicle_model: String,

    pub sale_type: SaleType,

    #[ts(as = "String")]
    pub sale_date: DateTime<Utc>,

    // Money columns hold integer cents; the wire carries decimal dollars
    // under the plain field names.
    #[serde(rename = "salePrice", with = "crate::money::dollars")]
    #[ts(type = "number")]
    pub sale_price_cents: i64,

    #[serde(rename = "costPrice", with = "crate::money::dollars")]
    #[ts(type = "number")]
    pub cost_price_cents: i64,

    /// Front-end gross; negative on a loss-leader deal.
    #[serde(rename = "frontProfit", with = "crate::money::dollars")]
    #[ts(type = "number")]
    pub front_profit_cents: i64,

    /// Back-end (finance & insurance) gross.
    #[serde(rename = "backProfit", with = "crate::money::dollars")]
    #[ts(type = "number")]
    pub back_profit_cents: i64,

    /// Rate in basis points (1200 = 12%); a fraction on the wire.
    #[serde(rename = "commissionRate", with = "crate::commission::fraction")]
    #[ts(type = "number")]
    pub commission_rate_bps: u32,

    #[serde(rename = "commissionEarned", with = "crate::money::dollars")]
    #[ts(type = "number")]
    pub commission_earned_cents: i64,

    pub customer_name: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl SaleRecord {
    #[inline]
    pub fn sale_price(&self) -> Money {
        Money::from_cents(self.sale_price_cents)
    }

    #[inline]
    pub fn commission_earned(&self) -> Money {
        Money::from_cents(self.commission_earned_cents)
    }

    #[inline]
    pub fn commission_rate(&self) -> CommissionRate {
        CommissionRate::from_bps(self.commission_rate_bps)
    }

    #[inline]
    pub fn units(&self) -> Units {
        self.sale_type.units()
    }

    #[inline]
    pub fn year_month(&self) -> YearMonth {
        YearMonth::of(self.sale_date)
    }

    /// Ledger order used for tier computation: `(sale_date, id)`.
    ///
    /// Independent of insertion order, so two sales at the same instant
    /// still have a total order.
    pub fn ledger_order(&self, other: &SaleRecord) -> Ordering {
        self.sale_date
            .cmp(&other.sale_date)
            .then(self.id.cmp(&other.id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_are_exact() {
        let mut units = Units::from_whole(14);
        units += SaleType::Half.units();
        assert_eq!(units.as_f64(), 14.5);
        units += SaleType::Half.units();
        assert_eq!(units, Units::from_whole(15));
        assert_eq!(units.to_string(), "15");
    }

    #[test]
    fn test_sale_type_parsing() {
        assert_eq!("FULL".parse::<SaleType>().unwrap(), SaleType::Full);
        assert_eq!(" half ".parse::<SaleType>().unwrap(), SaleType::Half);

        let err = "QUARTER".parse::<SaleType>().unwrap_err();
        assert_eq!(err.field(), "saleType");
    }

    #[test]
    fn test_year_month_parse_and_display() {
        let ym: YearMonth = "2025-03".parse().unwrap();
        assert_eq!(ym.year(), 2025);
        assert_eq!(ym.month(), 3);
        assert_eq!(ym.to_string(), "2025-03");

        assert!("2025-13".parse::<YearMonth>().is_err());
        assert!("2025-3".parse::<YearMonth>().is_err());
        assert!("march".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_year_month_contains() {
        let ym = YearMonth::new(2025, 12).unwrap();
        let inside = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        let outside = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

        assert!(ym.contains(inside));
        assert!(!ym.contains(outside));
        assert_eq!(ym.next(), YearMonth::new(2026, 1).unwrap());
        assert_eq!(ym.next().start(), outside);
    }

    #[test]
    fn test_year_month_serde() {
        let ym = YearMonth::new(2025, 7).unwrap();
        let json = serde_json::to_string(&ym).unwrap();
        assert_eq!(json, "\"2025-07\"");

        let back: YearMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ym);
        assert!(serde_json::from_str::<YearMonth>("\"2025-00\"").is_err());
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_string(&SaleType::Half).unwrap(), "\"HALF\"");
        assert_eq!(serde_json::to_string(&Role::Collaborator).unwrap(), "\"COLLABORATOR\"");
    }

    #[test]
    fn test_sale_record_wire_shape() {
        let at = Utc.with_ymd_and_hms(2025, 3, 4, 0, 0, 0).unwrap();
        let record = SaleRecord {
            id: 7,
            salesperson_id: "sp-1".to_string(),
            stock_number: "A1234".to_string(),
            vehicle_year: 2023,
            vehicle_make: "Toyota".to_string(),
            vehicle_model: "Camry".to_string(),
            sale_type: SaleType::Full,
            sale_date: at,
            sale_price_cents: 2_850_050,
            cost_price_cents: 2_600_000,
            front_profit_cents: 100_000,
            back_profit_cents: -2_500,
            commission_rate_bps: 1500,
            commission_earned_cents: 14_625,
            customer_name: "Jordan Lee".to_string(),
            created_at: at,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["salePrice"], 28500.5);
        assert_eq!(json["costPrice"], 26000.0);
        assert_eq!(json["frontProfit"], 1000.0);
        assert_eq!(json["backProfit"], -25.0);
        assert_eq!(json["commissionRate"], 0.15);
        assert_eq!(json["commissionEarned"], 146.25);
        assert_eq!(json["saleType"], "FULL");
        assert!(json.get("salePriceCents").is_none());
        assert!(json.get("commissionRateBps").is_none());

        let back: SaleRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
