//! # Commission Module
//!
//! Tier table, rate resolution and commission assessment for a new sale.
//!
//! ## Tier Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cumulative units this month (inclusive lower bound)    Rate            │
//! │  ─────────────────────────────────────────────────────  ────            │
//! │   0   ─ 14.5                                             12%            │
//! │  15   ─ 16.5                                             15%            │
//! │  17+                                                     20%            │
//! │                                                                         │
//! │  Highest qualifying tier wins. The sale being recorded counts toward   │
//! │  its own tier: the 15th unit itself earns 15%.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Assessment Flow
//! ```text
//! existing records (same salesperson, same month)
//!      │  keep those ordered before the new sale by (sale_date, id)
//!      ▼
//! units_before ──► + sale_type.units() ──► units_including
//!                                               │
//!                                   rate_for_units(units_including)
//!                                               │
//!                       (front_profit + back_profit).apply_rate(rate)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{SaleRecord, Units, YearMonth};
use crate::validation::ValidatedSale;

// =============================================================================
// Commission Rate
// =============================================================================

/// Commission rate in basis points (1200 = 12%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommissionRate(u32);

impl CommissionRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        CommissionRate(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Rate as a fraction (0.12 / 0.15 / 0.20).
    #[inline]
    pub fn as_fraction(&self) -> f64 {
        f64::from(self.0) / 10_000.0
    }

    /// Rate as a percentage, for display only.
    #[inline]
    pub fn percentage(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

/// Serde adapter for basis-point fields: a fraction in (0, 1] on the wire.
pub mod fraction {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bps: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(f64::from(*bps) / 10_000.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let rate = f64::deserialize(deserializer)?;
        if !(rate > 0.0 && rate <= 1.0) {
            return Err(D::Error::custom("rate must be in (0, 1]"));
        }
        Ok((rate * 10_000.0).round() as u32)
    }
}

// =============================================================================
// Tier Table
// =============================================================================

/// One row of the tier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommissionTier {
    /// Inclusive lower bound on cumulative monthly units.
    pub min_units: Units,
    pub rate: CommissionRate,
}

/// Dealership commission policy, ascending by threshold.
pub const COMMISSION_TIERS: [CommissionTier; 3] = [
    CommissionTier {
        min_units: Units::from_whole(0),
        rate: CommissionRate::from_bps(1200),
    },
    CommissionTier {
        min_units: Units::from_whole(15),
        rate: CommissionRate::from_bps(1500),
    },
    CommissionTier {
        min_units: Units::from_whole(17),
        rate: CommissionRate::from_bps(2000),
    },
];

/// Resolves the rate for an exact unit count.
pub fn rate_for_units(units: Units) -> CommissionRate {
    COMMISSION_TIERS
        .iter()
        .rev()
        .find(|tier| units >= tier.min_units)
        .map(|tier| tier.rate)
        .unwrap_or(COMMISSION_TIERS[0].rate)
}

/// Resolves the rate for a cumulative unit count given as a real number.
///
/// ## Rules
/// - Negative input is a validation error on `units`
/// - NaN is a caller bug (validation upstream must reject it) and panics
///
/// ## Example
/// ```rust
/// use showroom_core::commission::tier_rate;
///
/// assert_eq!(tier_rate(14.99).unwrap().bps(), 1200);
/// assert_eq!(tier_rate(15.0).unwrap().bps(), 1500);
/// assert_eq!(tier_rate(17.0).unwrap().bps(), 2000);
/// assert!(tier_rate(-1.0).is_err());
/// ```
pub fn tier_rate(units: f64) -> Result<CommissionRate, ValidationError> {
    assert!(!units.is_nan(), "tier_rate called with NaN units");

    if units < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "units".to_string(),
        });
    }

    let rate = COMMISSION_TIERS
        .iter()
        .rev()
        .find(|tier| units >= tier.min_units.as_f64())
        .map(|tier| tier.rate)
        .unwrap_or(COMMISSION_TIERS[0].rate);

    Ok(rate)
}

/// The next tier above a unit count, for the "what rate applies next" display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NextTier {
    /// Units at which the next tier starts.
    pub threshold_units: f64,
    pub rate_bps: u32,
    /// How many more units reach it.
    pub units_needed: f64,
}

/// Returns the next tier above `units`, or `None` at the top tier.
pub fn next_tier(units: f64) -> Result<Option<NextTier>, ValidationError> {
    assert!(!units.is_nan(), "next_tier called with NaN units");

    if units < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "units".to_string(),
        });
    }

    Ok(COMMISSION_TIERS
        .iter()
        .find(|tier| tier.min_units.as_f64() > units)
        .map(|tier| NextTier {
            threshold_units: tier.min_units.as_f64(),
            rate_bps: tier.rate.bps(),
            units_needed: tier.min_units.as_f64() - units,
        }))
}

// =============================================================================
// Assessment
// =============================================================================

/// Tier and commission computed for a sale about to be recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommissionAssessment {
    pub units_before: Units,
    pub units_including: Units,
    pub rate: CommissionRate,
    pub commission: Money,
}

/// Units a salesperson accumulated in the month of `sale_date`, counting
/// only records ordered at or before that instant.
///
/// `existing` must hold already-persisted records. Their ids are all
/// smaller than the one storage will assign to the new sale, so a record
/// with an equal `sale_date` orders before it by the id tie-break.
pub fn units_before(existing: &[SaleRecord], salesperson_id: &str, sale_date: DateTime<Utc>) -> Units {
    let month = YearMonth::of(sale_date);

    existing
        .iter()
        .filter(|r| r.salesperson_id == salesperson_id)
        .filter(|r| month.contains(r.sale_date))
        .filter(|r| r.sale_date <= sale_date)
        .map(SaleRecord::units)
        .sum()
}

/// Computes the frozen rate and commission for a new sale.
pub fn assess(sale: &ValidatedSale, existing: &[SaleRecord]) -> CommissionAssessment {
    let units_before = units_before(existing, &sale.salesperson_id, sale.sale_date);
    let units_including = units_before + sale.sale_type.units();
    let rate = rate_for_units(units_including);
    let commission = sale.gross_profit().apply_rate(rate);

    CommissionAssessment {
        units_before,
        units_including,
        rate,
        commission,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SaleType;
    use chrono::TimeZone;

    fn record(id: i64, salesperson: &str, sale_type: SaleType, at: DateTime<Utc>) -> SaleRecord {
        SaleRecord {
            id,
            salesperson_id: salesperson.to_string(),
            stock_number: format!("STK{}", id),
            vehicle_year: 2024,
            vehicle_make: "Honda".to_string(),
            vehicle_model: "Civic".to_string(),
            sale_type,
            sale_date: at,
            sale_price_cents: 2_500_000,
            cost_price_cents: 2_300_000,
            front_profit_cents: 100_000,
            back_profit_cents: 50_000,
            commission_rate_bps: 1200,
            commission_earned_cents: 18_000,
            customer_name: "Pat Doe".to_string(),
            created_at: at,
        }
    }

    fn sale(salesperson: &str, sale_type: SaleType, at: DateTime<Utc>, front: i64, back: i64) -> ValidatedSale {
        ValidatedSale {
            salesperson_id: salesperson.to_string(),
            stock_number: "STK-NEW".to_string(),
            vehicle_year: 2024,
            vehicle_make: "Ford".to_string(),
            vehicle_model: "F-150".to_string(),
            sale_type,
            sale_date: at,
            sale_price: Money::from_cents(4_000_000),
            cost_price: Money::from_cents(3_800_000),
            front_profit: Money::from_cents(front),
            back_profit: Money::from_cents(back),
            customer_name: "Sam Roe".to_string(),
        }
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(tier_rate(0.0).unwrap().bps(), 1200);
        assert_eq!(tier_rate(14.5).unwrap().bps(), 1200);
        assert_eq!(tier_rate(14.99).unwrap().bps(), 1200);
        assert_eq!(tier_rate(15.0).unwrap().bps(), 1500);
        assert_eq!(tier_rate(16.99).unwrap().bps(), 1500);
        assert_eq!(tier_rate(17.0).unwrap().bps(), 2000);
        assert_eq!(tier_rate(250.0).unwrap().bps(), 2000);
    }

    #[test]
    fn test_tier_rate_is_monotonic() {
        let mut previous = 0;
        for half_units in 0..100 {
            let bps = tier_rate(f64::from(half_units) / 2.0).unwrap().bps();
            assert!(bps >= previous, "rate dropped at {} half-units", half_units);
            previous = bps;
        }
    }

    #[test]
    fn test_tier_rate_matches_exact_units() {
        for half_units in 0..60 {
            let units = Units::from_half_units(half_units);
            assert_eq!(rate_for_units(units), tier_rate(units.as_f64()).unwrap());
        }
    }

    #[test]
    fn test_negative_units_rejected() {
        let err = tier_rate(-0.5).unwrap_err();
        assert_eq!(err.field(), "units");
    }

    #[test]
    #[should_panic(expected = "NaN")]
    fn test_nan_units_is_fatal() {
        let _ = tier_rate(f64::NAN);
    }

    #[test]
    fn test_rate_as_fraction() {
        assert_eq!(CommissionRate::from_bps(1200).as_fraction(), 0.12);
        assert_eq!(CommissionRate::from_bps(2000).percentage(), 20.0);
    }

    #[test]
    fn test_next_tier() {
        let next = next_tier(12.0).unwrap().unwrap();
        assert_eq!(next.threshold_units, 15.0);
        assert_eq!(next.rate_bps, 1500);
        assert_eq!(next.units_needed, 3.0);

        let next = next_tier(15.0).unwrap().unwrap();
        assert_eq!(next.threshold_units, 17.0);

        assert!(next_tier(17.0).unwrap().is_none());
    }

    #[test]
    fn test_first_sale_of_month() {
        let at = Utc.with_ymd_and_hms(2025, 3, 4, 15, 0, 0).unwrap();
        let assessment = assess(&sale("sp-1", SaleType::Full, at, 100_000, 50_000), &[]);

        assert_eq!(assessment.units_before, Units::ZERO);
        assert_eq!(assessment.units_including, Units::from_whole(1));
        assert_eq!(assessment.rate.bps(), 1200);
        assert_eq!(assessment.commission.cents(), 18_000);
    }

    #[test]
    fn test_fifteenth_unit_earns_fifteen_percent() {
        let existing: Vec<SaleRecord> = (1..=14)
            .map(|day| record(day, "sp-1", SaleType::Full, Utc.with_ymd_and_hms(2025, 3, day as u32, 10, 0, 0).unwrap()))
            .collect();
        let at = Utc.with_ymd_and_hms(2025, 3, 20, 10, 0, 0).unwrap();

        let assessment = assess(&sale("sp-1", SaleType::Full, at, 200_000, 0), &existing);

        assert_eq!(assessment.units_including, Units::from_whole(15));
        assert_eq!(assessment.rate.bps(), 1500);
        assert_eq!(assessment.commission.cents(), 30_000);
    }

    #[test]
    fn test_half_sale_reaches_top_tier() {
        let mut existing: Vec<SaleRecord> = (1..=16)
            .map(|day| record(day, "sp-1", SaleType::Full, Utc.with_ymd_and_hms(2025, 3, day as u32, 10, 0, 0).unwrap()))
            .collect();
        existing.push(record(17, "sp-1", SaleType::Half, Utc.with_ymd_and_hms(2025, 3, 17, 10, 0, 0).unwrap()));
        let at = Utc.with_ymd_and_hms(2025, 3, 18, 10, 0, 0).unwrap();

        let assessment = assess(&sale("sp-1", SaleType::Half, at, 100_000, 0), &existing);

        assert_eq!(assessment.units_before.as_f64(), 16.5);
        assert_eq!(assessment.units_including.as_f64(), 17.0);
        assert_eq!(assessment.rate.bps(), 2000);
    }

    #[test]
    fn test_units_before_ignores_other_people_months_and_later_sales() {
        let at = Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap();
        let existing = vec![
            record(1, "sp-1", SaleType::Full, Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()),
            record(2, "sp-2", SaleType::Full, Utc.with_ymd_and_hms(2025, 3, 2, 9, 0, 0).unwrap()),
            record(3, "sp-1", SaleType::Full, Utc.with_ymd_and_hms(2025, 2, 28, 23, 0, 0).unwrap()),
            record(4, "sp-1", SaleType::Full, Utc.with_ymd_and_hms(2025, 3, 20, 9, 0, 0).unwrap()),
            // same instant, smaller id: counts
            record(5, "sp-1", SaleType::Half, at),
        ];

        assert_eq!(units_before(&existing, "sp-1", at).as_f64(), 1.5);
    }

    #[test]
    fn test_loss_deal_commission_is_negative() {
        let at = Utc.with_ymd_and_hms(2025, 3, 4, 15, 0, 0).unwrap();
        let assessment = assess(&sale("sp-1", SaleType::Full, at, -50_000, 10_000), &[]);

        assert_eq!(assessment.commission.cents(), -4_800);
    }
}
