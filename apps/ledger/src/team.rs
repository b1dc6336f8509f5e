//! # Team Roster
//!
//! Salesperson lifecycle under the team cap.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Team: 1 ADMIN + up to 3 COLLABORATORS                                 │
//! │                                                                         │
//! │  create ── validate fields ── username free? ── under cap? ── insert   │
//! │  delete ── exists? ── not ADMIN? ── delete row (sales stay)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Creations are serialized so two concurrent requests cannot both pass the
//! cap check.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use showroom_core::{check_team_capacity, validate_new_salesperson, CoreError, NewSalesperson, Role, Salesperson};
use showroom_db::{Database, DbError};

use crate::error::{LedgerError, LedgerResult};

/// Team management service.
#[derive(Debug, Clone)]
pub struct TeamRoster {
    db: Database,
    create_lock: Arc<Mutex<()>>,
}

impl TeamRoster {
    pub fn new(db: Database) -> Self {
        TeamRoster {
            db,
            create_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Adds a team member.
    ///
    /// ## Errors
    /// - `Validation` for bad name/username/email
    /// - `Core(DuplicateUsername)` if the username is taken
    /// - `Core(TeamFull)` if the role is at its cap
    pub async fn create(&self, input: NewSalesperson) -> LedgerResult<Salesperson> {
        let input = validate_new_salesperson(&input)?;

        let _guard = self.create_lock.lock().await;
        let repo = self.db.salespeople();

        if repo.get_by_username(&input.username).await?.is_some() {
            return Err(CoreError::DuplicateUsername(input.username).into());
        }

        let team = repo.list().await?;
        check_team_capacity(&team, input.role)?;

        let created = repo.create(&input).await.map_err(|err| match err {
            DbError::UniqueViolation { .. } => LedgerError::from(CoreError::DuplicateUsername(input.username.clone())),
            other => other.into(),
        })?;

        info!(id = %created.id, username = %created.username, role = %created.role, "Team member added");
        Ok(created)
    }

    /// Removes a collaborator. Their sales remain in the ledger.
    ///
    /// ## Errors
    /// - `NotFound` if no such salesperson
    /// - `Core(AdminDeletion)` for the admin
    pub async fn delete(&self, salesperson_id: &str) -> LedgerResult<()> {
        let repo = self.db.salespeople();

        let member = repo
            .get_by_id(salesperson_id)
            .await?
            .ok_or_else(|| LedgerError::not_found(salesperson_id))?;

        if member.role == Role::Admin {
            return Err(CoreError::AdminDeletion(member.id).into());
        }

        repo.delete(salesperson_id).await?;

        info!(id = %member.id, username = %member.username, "Team member removed");
        Ok(())
    }

    pub async fn list(&self) -> LedgerResult<Vec<Salesperson>> {
        Ok(self.db.salespeople().list().await?)
    }
}
