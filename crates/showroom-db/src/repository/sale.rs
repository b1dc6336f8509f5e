//! # Sale Record Repository
//!
//! Database operations for sale records.
//!
//! ## Record Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Record Lifecycle                             │
//! │                                                                         │
//! │  1. READ MONTH                                                         │
//! │     └── list_for_month(salesperson, month) → prior units               │
//! │                                                                         │
//! │  2. INSERT (commission already assessed)                               │
//! │     └── insert() → SaleRecord { id: next rowid }                       │
//! │                                                                         │
//! │  3. READ FOREVER                                                       │
//! │     └── no update, no delete; commission columns guarded by trigger    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use showroom_core::commission::CommissionAssessment;
use showroom_core::{SaleRecord, ValidatedSale, YearMonth};

const SELECT_SALE_RECORD: &str = r#"
    SELECT
        id,
        salesperson_id,
        stock_number,
        vehicle_year,
        vehicle_make,
        vehicle_model,
        sale_type,
        sale_date,
        sale_price_cents,
        cost_price_cents,
        front_profit_cents,
        back_profit_cents,
        commission_rate_bps,
        commission_earned_cents,
        customer_name,
        created_at
    FROM sale_records
"#;

/// Repository for sale record database operations.
#[derive(Debug, Clone)]
pub struct SaleRecordRepository {
    pool: SqlitePool,
}

impl SaleRecordRepository {
    /// Creates a new SaleRecordRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRecordRepository { pool }
    }

    /// Persists a validated sale with its assessed commission.
    ///
    /// ## Returns
    /// The stored record, with the id SQLite assigned. Ids come from
    /// AUTOINCREMENT, so every new id is larger than any id ever issued.
    pub async fn insert(
        &self,
        sale: &ValidatedSale,
        assessment: &CommissionAssessment,
        created_at: DateTime<Utc>,
    ) -> DbResult<SaleRecord> {
        let sale_month = YearMonth::of(sale.sale_date).to_string();

        debug!(
            salesperson_id = %sale.salesperson_id,
            stock_number = %sale.stock_number,
            month = %sale_month,
            rate_bps = assessment.rate.bps(),
            "Inserting sale record"
        );

        let result = sqlx::query(
            r#"
            INSERT INTO sale_records (
                salesperson_id, stock_number,
                vehicle_year, vehicle_make, vehicle_model,
                sale_type, sale_date, sale_month,
                sale_price_cents, cost_price_cents,
                front_profit_cents, back_profit_cents,
                commission_rate_bps, commission_earned_cents,
                customer_name, created_at
            ) VALUES (
                ?1, ?2,
                ?3, ?4, ?5,
                ?6, ?7, ?8,
                ?9, ?10,
                ?11, ?12,
                ?13, ?14,
                ?15, ?16
            )
            "#,
        )
        .bind(&sale.salesperson_id)
        .bind(&sale.stock_number)
        .bind(sale.vehicle_year)
        .bind(&sale.vehicle_make)
        .bind(&sale.vehicle_model)
        .bind(sale.sale_type)
        .bind(sale.sale_date)
        .bind(&sale_month)
        .bind(sale.sale_price.cents())
        .bind(sale.cost_price.cents())
        .bind(sale.front_profit.cents())
        .bind(sale.back_profit.cents())
        .bind(assessment.rate.bps())
        .bind(assessment.commission.cents())
        .bind(&sale.customer_name)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(SaleRecord {
            id: result.last_insert_rowid(),
            salesperson_id: sale.salesperson_id.clone(),
            stock_number: sale.stock_number.clone(),
            vehicle_year: sale.vehicle_year,
            vehicle_make: sale.vehicle_make.clone(),
            vehicle_model: sale.vehicle_model.clone(),
            sale_type: sale.sale_type,
            sale_date: sale.sale_date,
            sale_price_cents: sale.sale_price.cents(),
            cost_price_cents: sale.cost_price.cents(),
            front_profit_cents: sale.front_profit.cents(),
            back_profit_cents: sale.back_profit.cents(),
            commission_rate_bps: assessment.rate.bps(),
            commission_earned_cents: assessment.commission.cents(),
            customer_name: sale.customer_name.clone(),
            created_at,
        })
    }

    /// Gets a sale record by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<SaleRecord>> {
        let sql = format!("{} WHERE id = ?1", SELECT_SALE_RECORD);

        let record = sqlx::query_as::<_, SaleRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    /// Lists records in insertion order, optionally for one salesperson.
    pub async fn list(&self, salesperson_id: Option<&str>) -> DbResult<Vec<SaleRecord>> {
        debug!(salesperson_id = ?salesperson_id, "Listing sale records");

        let records = match salesperson_id {
            Some(id) => {
                let sql = format!("{} WHERE salesperson_id = ?1 ORDER BY id", SELECT_SALE_RECORD);
                sqlx::query_as::<_, SaleRecord>(&sql)
                    .bind(id)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!("{} ORDER BY id", SELECT_SALE_RECORD);
                sqlx::query_as::<_, SaleRecord>(&sql)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(records)
    }

    /// One salesperson's records in one month, in ledger order `(sale_date, id)`.
    pub async fn list_for_month(&self, salesperson_id: &str, month: &YearMonth) -> DbResult<Vec<SaleRecord>> {
        let sql = format!(
            "{} WHERE salesperson_id = ?1 AND sale_month = ?2 ORDER BY sale_date, id",
            SELECT_SALE_RECORD
        );

        let mut records = sqlx::query_as::<_, SaleRecord>(&sql)
            .bind(salesperson_id)
            .bind(month.to_string())
            .fetch_all(&self.pool)
            .await?;

        // sale_date is stored as text; order on the decoded value
        records.sort_by(SaleRecord::ledger_order);

        Ok(records)
    }

    /// Every record in one month, in insertion order.
    pub async fn list_by_month(&self, month: &YearMonth) -> DbResult<Vec<SaleRecord>> {
        let sql = format!("{} WHERE sale_month = ?1 ORDER BY id", SELECT_SALE_RECORD);

        let records = sqlx::query_as::<_, SaleRecord>(&sql)
            .bind(month.to_string())
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    /// Counts all sale records.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sale_records")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
