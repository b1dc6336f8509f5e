//! # Summary Module
//!
//! Read-side folds over sale records: the monthly dashboard summary, the
//! per-salesperson tier state and the sales filter.
//!
//! All functions here are pure. Totals are computed from frozen commissions
//! only, so the same records in any order produce the same summary.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::commission::{next_tier, rate_for_units, NextTier};
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{SaleRecord, Salesperson, Units, YearMonth};
use crate::UNKNOWN_SALESPERSON;

// =============================================================================
// Monthly Summary
// =============================================================================

/// One salesperson's line on the monthly board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalespersonSummary {
    /// Full name, or "Unknown" for a removed salesperson.
    pub name: String,
    pub units: f64,
    #[serde(rename = "commission", with = "crate::money::dollars")]
    #[ts(type = "number")]
    pub commission_cents: i64,
}

/// Dashboard totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    #[ts(as = "String")]
    pub year_month: YearMonth,
    pub total_units: f64,
    /// Sum of sale prices; dollars on the wire.
    #[serde(rename = "totalRevenue", with = "crate::money::dollars")]
    #[ts(type = "number")]
    pub total_revenue_cents: i64,
    #[serde(rename = "totalCommission", with = "crate::money::dollars")]
    #[ts(type = "number")]
    pub total_commission_cents: i64,
    pub sale_count: usize,
    /// Keyed by salesperson id.
    pub per_salesperson: BTreeMap<String, SalespersonSummary>,
}

#[derive(Default)]
struct Tally {
    units: Units,
    commission: Money,
}

/// Folds the records falling in `month` into a dashboard summary.
///
/// Records outside `month` are ignored, so callers may pass a wider set.
/// Sales whose salesperson is no longer on `team` are still counted and
/// listed under "Unknown".
///
/// ## Example
/// ```rust
/// use showroom_core::summary::summarize;
/// use showroom_core::YearMonth;
///
/// let month = YearMonth::new(2025, 3).unwrap();
/// let summary = summarize(month, &[], &[]);
/// assert_eq!(summary.sale_count, 0);
/// assert!(summary.per_salesperson.is_empty());
/// ```
pub fn summarize(month: YearMonth, records: &[SaleRecord], team: &[Salesperson]) -> MonthlySummary {
    let names: HashMap<&str, &str> = team
        .iter()
        .map(|member| (member.id.as_str(), member.full_name.as_str()))
        .collect();

    let mut total_units = Units::ZERO;
    let mut total_revenue = Money::zero();
    let mut total_commission = Money::zero();
    let mut sale_count = 0;
    let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();

    for record in records.iter().filter(|r| month.contains(r.sale_date)) {
        total_units += record.units();
        total_revenue += record.sale_price();
        total_commission += record.commission_earned();
        sale_count += 1;

        let tally = tallies.entry(record.salesperson_id.as_str()).or_default();
        tally.units += record.units();
        tally.commission += record.commission_earned();
    }

    let per_salesperson = tallies
        .into_iter()
        .map(|(id, tally)| {
            let name = names.get(id).copied().unwrap_or(UNKNOWN_SALESPERSON);
            (
                id.to_string(),
                SalespersonSummary {
                    name: name.to_string(),
                    units: tally.units.as_f64(),
                    commission_cents: tally.commission.cents(),
                },
            )
        })
        .collect();

    MonthlySummary {
        year_month: month,
        total_units: total_units.as_f64(),
        total_revenue_cents: total_revenue.cents(),
        total_commission_cents: total_commission.cents(),
        sale_count,
        per_salesperson,
    }
}

// =============================================================================
// Tier State
// =============================================================================

/// Where a salesperson stands on the tier ladder in a given month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTierState {
    pub salesperson_id: String,
    #[ts(as = "String")]
    pub year_month: YearMonth,
    pub cumulative_units: f64,
    /// Rate a sale at the current count earns.
    pub current_rate_bps: u32,
    pub next_tier: Option<NextTier>,
}

/// Computes the tier state of one salesperson for `month`.
pub fn tier_state(salesperson_id: &str, month: YearMonth, records: &[SaleRecord]) -> MonthlyTierState {
    let units: Units = records
        .iter()
        .filter(|r| r.salesperson_id == salesperson_id && month.contains(r.sale_date))
        .map(SaleRecord::units)
        .sum();

    MonthlyTierState {
        salesperson_id: salesperson_id.to_string(),
        year_month: month,
        cumulative_units: units.as_f64(),
        current_rate_bps: rate_for_units(units).bps(),
        next_tier: next_tier(units.as_f64()).unwrap_or(None),
    }
}

// =============================================================================
// Sales Query
// =============================================================================

/// Optional filters for the sales list. Empty query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct SalesQuery {
    pub salesperson_id: Option<String>,
    /// Inclusive lower bound on sale date.
    #[ts(as = "Option<String>")]
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on sale date.
    #[ts(as = "Option<String>")]
    pub to: Option<DateTime<Utc>>,
}

impl SalesQuery {
    /// Query for a single salesperson.
    pub fn for_salesperson(salesperson_id: impl Into<String>) -> Self {
        SalesQuery {
            salesperson_id: Some(salesperson_id.into()),
            ..SalesQuery::default()
        }
    }

    /// Rejects a range whose start lies after its end.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match (self.from, self.to) {
            (Some(from), Some(to)) if from > to => Err(ValidationError::InvalidFormat {
                field: "from".to_string(),
                reason: "must not be after 'to'".to_string(),
            }),
            _ => Ok(()),
        }
    }

    pub fn matches(&self, record: &SaleRecord) -> bool {
        if let Some(id) = &self.salesperson_id {
            if record.salesperson_id != *id {
                return false;
            }
        }
        if let Some(from) = self.from {
            if record.sale_date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if record.sale_date > to {
                return false;
            }
        }
        true
    }
}

/// Lazily yields the records matching `query`, in input order.
pub fn filter_sales<'a>(records: &'a [SaleRecord], query: &'a SalesQuery) -> impl Iterator<Item = &'a SaleRecord> + 'a {
    records.iter().filter(move |record| query.matches(record))
}

// =============================================================================
// Unit Tests
// =============================================================================
