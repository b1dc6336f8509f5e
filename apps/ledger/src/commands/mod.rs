//! # Commands
//!
//! The request/response surface the dashboard calls.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── sale.rs     ◄─── record_sale, list_sales
//! ├── summary.rs  ◄─── monthly_summary, filter_sales, tier_rate, tier state
//! └── team.rs     ◄─── create/delete/list salespeople
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Dashboard (JSON payload)                                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  async fn record_sale(                                                  │
//! │      ledger: &CommissionLedger,   ◄── Only the service it needs        │
//! │      submission: SaleSubmission,  ◄── Raw form values                  │
//! │  ) -> Result<SaleRecord, ApiError>                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Dashboard receives SaleRecord or { code, message, fields }            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error is converted to [`ApiError`](crate::error::ApiError) here and
//! nowhere else.

pub mod sale;
pub mod summary;
pub mod team;
