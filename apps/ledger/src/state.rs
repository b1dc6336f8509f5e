//! # Application State
//!
//! Services share one `Database` handle. Commands take only the service
//! they need:
//!
//! ```text
//! ShowroomState
//! ├── ledger     CommissionLedger   record_sale, list_sales, tier state
//! ├── dashboard  Dashboard          monthly_summary, filter_sales
//! └── team       TeamRoster         create/delete/list salespeople
//! ```

use tracing::info;

use showroom_db::{Database, DbError};

use crate::config::LedgerConfig;
use crate::dashboard::Dashboard;
use crate::error::LedgerResult;
use crate::ledger::CommissionLedger;
use crate::team::TeamRoster;

/// Everything a running ledger needs.
#[derive(Debug, Clone)]
pub struct ShowroomState {
    pub config: LedgerConfig,
    pub ledger: CommissionLedger,
    pub dashboard: Dashboard,
    pub team: TeamRoster,
    db: Database,
}

impl ShowroomState {
    /// Opens (and migrates) the database named by `config`.
    ///
    /// Creates the parent directory of a file database if needed.
    pub async fn open(config: LedgerConfig) -> LedgerResult<Self> {
        if !config.is_in_memory() {
            if let Some(dir) = config.database_path.parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir).map_err(|e| {
                    DbError::ConnectionFailed(format!("cannot create {}: {}", dir.display(), e))
                })?;
            }
        }

        let db = Database::new(config.db_config()).await?;
        info!(dealership = %config.dealership_name, "Showroom ledger ready");

        Ok(Self::with_database(config, db))
    }

    /// Builds the services over an already-open database.
    pub fn with_database(config: LedgerConfig, db: Database) -> Self {
        ShowroomState {
            config,
            ledger: CommissionLedger::new(db.clone()),
            dashboard: Dashboard::new(db.clone()),
            team: TeamRoster::new(db.clone()),
            db,
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Closes the connection pool.
    pub async fn close(&self) {
        self.db.close().await;
    }
}
