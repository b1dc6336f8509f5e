//! Sale commands.

use chrono::Utc;
use tracing::debug;

use showroom_core::{validate_sale, SaleRecord, SaleSubmission};

use crate::error::ApiError;
use crate::ledger::{CommissionLedger, SalesFilter};

/// Validates a "Log Sale" form and records it.
///
/// The submission time is the moment this command runs.
pub async fn record_sale(ledger: &CommissionLedger, submission: SaleSubmission) -> Result<SaleRecord, ApiError> {
    debug!("record_sale command");

    let sale = validate_sale(&submission, Utc::now())?;
    Ok(ledger.record_sale(sale).await?)
}

/// Lists stored sales, optionally for one salesperson.
pub async fn list_sales(ledger: &CommissionLedger, filter: Option<SalesFilter>) -> Result<Vec<SaleRecord>, ApiError> {
    debug!(?filter, "list_sales command");

    Ok(ledger.list_sales(filter.as_ref()).await?)
}
