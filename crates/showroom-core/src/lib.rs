//! # showroom-core: Pure Business Rules for the Commission Ledger
//!
//! This crate holds every dealership commission rule as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Showroom Ledger Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Dashboard (React / React Native)                │   │
//! │  │    Log Sale form ──► Commission board ──► Team management       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands (JSON)                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 showroom-ledger (apps/ledger)                   │   │
//! │  │    record_sale, list_sales, monthly_summary, tier_rate          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ showroom-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────┐ ┌──────────┐ ┌────────────┐ ┌──────────┐         │   │
//! │  │  │  types   │ │  money   │ │ commission │ │validation│ summary │   │
//! │  │  └──────────┘ └──────────┘ └────────────┘ └──────────┘         │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 showroom-db (SQLite storage)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (SaleRecord, Salesperson, Units, YearMonth)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`commission`] - Tier table and commission assessment
//! - [`validation`] - Sale submission and team member validation
//! - [`summary`] - Monthly dashboard folds and sale filters
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use showroom_core::commission::tier_rate;
//! use showroom_core::money::Money;
//!
//! let rate = tier_rate(15.0).unwrap();
//! assert_eq!(rate.bps(), 1500);
//!
//! // $2,000.00 gross profit at 15%
//! let commission = Money::from_cents(200_000).apply_rate(rate);
//! assert_eq!(commission.cents(), 30_000);
//! ```

pub mod commission;
pub mod error;
pub mod money;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use commission::{tier_rate, CommissionRate, CommissionTier, NextTier};
pub use error::{CoreError, CoreResult, ValidationError, ValidationErrors};
pub use money::Money;
pub use summary::{MonthlySummary, MonthlyTierState, SalesQuery, SalespersonSummary};
pub use types::*;
pub use validation::{
    check_team_capacity, validate_new_salesperson, validate_sale, FormValue, SaleSubmission, ValidatedSale,
};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of admins on a dealership team.
pub const MAX_ADMINS: usize = 1;

/// Maximum number of non-admin collaborators on a dealership team.
pub const MAX_COLLABORATORS: usize = 3;

/// Earliest model year accepted on a sale.
pub const MIN_VEHICLE_YEAR: i32 = 1980;

/// How many model years past the current year a sale may carry.
pub const VEHICLE_YEAR_LOOKAHEAD: i32 = 2;

/// Display name used when a sale references a salesperson that no longer exists.
pub const UNKNOWN_SALESPERSON: &str = "Unknown";
