//! # showroom-db: Database Layer for the Commission Ledger
//!
//! SQLite storage for salespeople and sale records, using sqlx for async
//! operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Showroom Ledger Data Flow                          │
//! │                                                                         │
//! │  CommissionLedger::record_sale                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   showroom-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌─────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories   │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                 │   │  (embedded)  │  │   │
//! │  │   │               │    │ SaleRecordRepo  │   │              │  │   │
//! │  │   │ SqlitePool    │◄───│ SalespersonRepo │   │ 001_init.sql │  │   │
//! │  │   └───────────────┘    └─────────────────┘   └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (WAL mode)                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Queries
//! Queries are built at runtime with `sqlx::query_as::<_, T>` and rows map
//! through the `FromRow` derives that showroom-core enables under its
//! `sqlx` feature. No `DATABASE_URL` is needed at build time.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::sale::SaleRecordRepository;
pub use repository::salesperson::SalespersonRepository;
