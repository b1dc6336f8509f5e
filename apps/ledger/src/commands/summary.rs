//! Dashboard and tier commands.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use showroom_core::commission::{self, NextTier};
use showroom_core::{MonthlySummary, MonthlyTierState, SaleRecord, SalesQuery, ValidationError, YearMonth};

use crate::dashboard::Dashboard;
use crate::error::ApiError;
use crate::ledger::CommissionLedger;

/// Rate for a cumulative unit count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TierRateResponse {
    /// Fraction, e.g. 0.15
    pub rate: f64,
    pub rate_bps: u32,
    /// `None` at the top tier
    pub next: Option<NextTier>,
}

/// Monthly dashboard totals. `year_month` is `"YYYY-MM"`.
pub async fn monthly_summary(dashboard: &Dashboard, year_month: &str) -> Result<MonthlySummary, ApiError> {
    debug!(year_month, "monthly_summary command");

    let month: YearMonth = year_month.parse()?;
    Ok(dashboard.monthly_summary(month).await?)
}

/// Sales matching `query`, in insertion order.
pub async fn filter_sales(dashboard: &Dashboard, query: SalesQuery) -> Result<Vec<SaleRecord>, ApiError> {
    debug!(?query, "filter_sales command");

    Ok(dashboard.filter_sales(query).await?.into_iter().collect())
}

/// Commission rate for `units` cumulative monthly units.
///
/// Non-finite input is rejected here, before it can reach the resolver.
pub fn tier_rate(units: f64) -> Result<TierRateResponse, ApiError> {
    if !units.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "units".to_string(),
            reason: "must be a finite number".to_string(),
        }
        .into());
    }

    let rate = commission::tier_rate(units)?;
    let next = commission::next_tier(units)?;

    Ok(TierRateResponse {
        rate: rate.as_fraction(),
        rate_bps: rate.bps(),
        next,
    })
}

/// Tier standing of one salesperson in one month.
pub async fn monthly_tier_state(
    ledger: &CommissionLedger,
    salesperson_id: &str,
    year_month: &str,
) -> Result<MonthlyTierState, ApiError> {
    let month: YearMonth = year_month.parse()?;
    Ok(ledger.monthly_tier_state(salesperson_id, month).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_tier_rate_command() {
        let response = tier_rate(15.0).unwrap();
        assert_eq!(response.rate, 0.15);
        assert_eq!(response.rate_bps, 1500);
        assert_eq!(response.next.unwrap().threshold_units, 17.0);

        assert!(tier_rate(40.0).unwrap().next.is_none());
    }

    #[test]
    fn test_tier_rate_rejects_bad_input() {
        for bad in [f64::NAN, f64::INFINITY, -1.0] {
            let err = tier_rate(bad).unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError);
            assert_eq!(err.fields, vec!["units"]);
        }
    }

    #[test]
    fn test_tier_rate_response_json() {
        let json = serde_json::to_value(tier_rate(0.0).unwrap()).unwrap();
        assert_eq!(json["rateBps"], 1200);
        assert_eq!(json["next"]["thresholdUnits"], 15.0);
    }
}
