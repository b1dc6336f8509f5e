//! # Commission Ledger
//!
//! Records sales with their commission frozen at save time.
//!
//! ## record_sale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ValidatedSale                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  salesperson exists? ── no ──► LedgerError::NotFound                    │
//! │       │ yes                                                             │
//! │       ▼                                                                 │
//! │  ┌─ writer lock for this salesperson ───────────────────────────────┐  │
//! │  │  read same-month records                                          │  │
//! │  │  assess: units before + this sale → tier rate → commission        │  │
//! │  │  insert (rate + commission frozen)                                │  │
//! │  └───────────────────────────────────────────────────────────────────┘  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SaleRecord (with storage id)                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two salespeople never wait on each other. Two sales for the same
//! salesperson are assessed one after the other, so neither can miss the
//! other's units.
//!
//! A backdated sale is assessed against the records ordered before it and
//! does not touch records already stored after it.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use ts_rs::TS;

use showroom_core::commission::assess;
use showroom_core::summary::tier_state;
use showroom_core::{MonthlyTierState, SaleRecord, ValidatedSale, YearMonth};
use showroom_db::Database;

use crate::error::{LedgerError, LedgerResult};

/// Filter for [`CommissionLedger::list_sales`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct SalesFilter {
    pub salesperson_id: Option<String>,
}

/// One async mutex per salesperson, created on first use.
#[derive(Debug, Default)]
struct WriterLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl WriterLocks {
    async fn for_salesperson(&self, salesperson_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(salesperson_id.to_string()).or_default().clone()
    }
}

/// The commission ledger service.
///
/// Clones share the database pool and the writer locks.
#[derive(Debug, Clone)]
pub struct CommissionLedger {
    db: Database,
    locks: Arc<WriterLocks>,
}

impl CommissionLedger {
    pub fn new(db: Database) -> Self {
        CommissionLedger {
            db,
            locks: Arc::new(WriterLocks::default()),
        }
    }

    /// Records a validated sale and returns the stored record.
    ///
    /// ## Errors
    /// - `NotFound` if the salesperson is not on the team
    /// - `Storage` if the read or insert fails (nothing is written)
    pub async fn record_sale(&self, sale: ValidatedSale) -> LedgerResult<SaleRecord> {
        if self.db.salespeople().get_by_id(&sale.salesperson_id).await?.is_none() {
            return Err(LedgerError::not_found(&sale.salesperson_id));
        }

        if sale.is_loss_sale() {
            warn!(
                salesperson_id = %sale.salesperson_id,
                stock_number = %sale.stock_number,
                sale_price = %sale.sale_price,
                cost_price = %sale.cost_price,
                "Sale price below cost"
            );
        }

        let lock = self.locks.for_salesperson(&sale.salesperson_id).await;
        let _writer = lock.lock().await;

        let month = YearMonth::of(sale.sale_date);
        let existing = self.db.sales().list_for_month(&sale.salesperson_id, &month).await?;
        let assessment = assess(&sale, &existing);

        debug!(
            salesperson_id = %sale.salesperson_id,
            month = %month,
            units_before = %assessment.units_before,
            units_including = %assessment.units_including,
            rate_bps = assessment.rate.bps(),
            "Commission assessed"
        );

        let record = self.db.sales().insert(&sale, &assessment, Utc::now()).await?;

        info!(
            id = record.id,
            salesperson_id = %record.salesperson_id,
            sale_type = record.sale_type.as_str(),
            commission = %record.commission_earned(),
            "Sale recorded"
        );

        Ok(record)
    }

    /// Lists stored sales in insertion order.
    pub async fn list_sales(&self, filter: Option<&SalesFilter>) -> LedgerResult<Vec<SaleRecord>> {
        let salesperson_id = filter.and_then(|f| f.salesperson_id.as_deref());
        Ok(self.db.sales().list(salesperson_id).await?)
    }

    /// Cumulative units, current rate and next tier for one salesperson
    /// in one month.
    ///
    /// Works for removed salespeople too; their records stay in the ledger.
    pub async fn monthly_tier_state(&self, salesperson_id: &str, month: YearMonth) -> LedgerResult<MonthlyTierState> {
        let records = self.db.sales().list_for_month(salesperson_id, &month).await?;
        Ok(tier_state(salesperson_id, month, &records))
    }
}
