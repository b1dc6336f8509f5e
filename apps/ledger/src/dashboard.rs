//! # Dashboard
//!
//! Read-only views over the ledger. Nothing is cached: every call reads a
//! fresh snapshot and recomputes from frozen commissions, so repeated calls
//! with no writes in between return equal results.

use tracing::debug;

use showroom_core::summary::summarize;
use showroom_core::{MonthlySummary, SaleRecord, SalesQuery, YearMonth};
use showroom_db::Database;

use crate::error::LedgerResult;

/// Dashboard read service.
#[derive(Debug, Clone)]
pub struct Dashboard {
    db: Database,
}

impl Dashboard {
    pub fn new(db: Database) -> Self {
        Dashboard { db }
    }

    /// Totals for one month, per salesperson and overall.
    pub async fn monthly_summary(&self, month: YearMonth) -> LedgerResult<MonthlySummary> {
        let records = self.db.sales().list_by_month(&month).await?;
        let team = self.db.salespeople().list().await?;

        debug!(month = %month, records = records.len(), "Building monthly summary");

        Ok(summarize(month, &records, &team))
    }

    /// Reads a snapshot of the ledger and returns it filtered lazily by `query`.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let march = dashboard.filter_sales(query).await?;
    /// let first_five: Vec<_> = march.iter().take(5).collect();
    /// ```
    pub async fn filter_sales(&self, query: SalesQuery) -> LedgerResult<FilteredSales> {
        query.validate()?;

        let snapshot = self.db.sales().list(query.salesperson_id.as_deref()).await?;

        Ok(FilteredSales { snapshot, query })
    }
}

// =============================================================================
// Filtered Sales
// =============================================================================

/// A point-in-time snapshot of sale records plus the query to apply.
///
/// Matching happens while iterating; later writes to the ledger are not
/// visible through this snapshot.
#[derive(Debug, Clone)]
pub struct FilteredSales {
    snapshot: Vec<SaleRecord>,
    query: SalesQuery,
}

impl FilteredSales {
    /// Iterates matching records by reference, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &SaleRecord> + '_ {
        showroom_core::summary::filter_sales(&self.snapshot, &self.query)
    }
}

impl IntoIterator for FilteredSales {
    type Item = SaleRecord;
    type IntoIter = FilteredSalesIter;

    fn into_iter(self) -> Self::IntoIter {
        FilteredSalesIter {
            records: self.snapshot.into_iter(),
            query: self.query,
        }
    }
}

/// Owning iterator over [`FilteredSales`].
#[derive(Debug)]
pub struct FilteredSalesIter {
    records: std::vec::IntoIter<SaleRecord>,
    query: SalesQuery,
}

impl Iterator for FilteredSalesIter {
    type Item = SaleRecord;

    fn next(&mut self) -> Option<SaleRecord> {
        let query = &self.query;
        self.records.find(|record| query.matches(record))
    }
}
