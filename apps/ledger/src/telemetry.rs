//! # Telemetry
//!
//! Structured logging setup.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset. `showroom` matches every
/// workspace crate by target prefix.
pub const DEFAULT_LOG_FILTER: &str = "info,showroom=debug,sqlx=warn";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=showroom_ledger=trace` - Trace for the ledger crate only
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Call once, at process start.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
