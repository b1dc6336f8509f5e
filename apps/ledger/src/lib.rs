//! # showroom-ledger: Commission Ledger Service
//!
//! Records dealership sales with commission frozen at save time, and serves
//! the dashboard's monthly views.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Ledger Startup                                    │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • telemetry::init_tracing(), RUST_LOG overrides the default         │
//! │                                                                         │
//! │  2. Load Configuration ───────────────────────────────────────────────► │
//! │     • LedgerConfig::from_env()                                          │
//! │     • Default DB: platform data dir / showroom.db                       │
//! │                                                                         │
//! │  3. Open State ───────────────────────────────────────────────────────► │
//! │     • ShowroomState::open(config)                                       │
//! │     • SQLite with WAL mode, pending migrations applied                  │
//! │     • CommissionLedger, Dashboard, TeamRoster share the pool            │
//! │                                                                         │
//! │  4. Serve Commands ───────────────────────────────────────────────────► │
//! │     • commands::sale / summary / team, errors as ApiError               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use showroom_ledger::{commands, LedgerConfig, ShowroomState};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let state = ShowroomState::open(LedgerConfig::from_env()?).await?;
//! let march = commands::summary::monthly_summary(&state.dashboard, "2025-03").await?;
//! println!("{} sales", march.sale_count);
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod ledger;
pub mod state;
pub mod team;
pub mod telemetry;

pub use config::{ConfigError, LedgerConfig};
pub use dashboard::{Dashboard, FilteredSales};
pub use error::{ApiError, ErrorCode, LedgerError, LedgerResult};
pub use ledger::{CommissionLedger, SalesFilter};
pub use state::ShowroomState;
pub use team::TeamRoster;
