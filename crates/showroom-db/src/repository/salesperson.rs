//! # Salesperson Repository
//!
//! Database operations for the dealership team.
//!
//! Team-size rules live in showroom-core and are enforced by the ledger
//! app's `TeamRoster`; this repository only stores rows.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use showroom_core::{NewSalesperson, Role, Salesperson};

/// Repository for salesperson database operations.
#[derive(Debug, Clone)]
pub struct SalespersonRepository {
    pool: SqlitePool,
}

impl SalespersonRepository {
    /// Creates a new SalespersonRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SalespersonRepository { pool }
    }

    /// Creates a team member with a fresh id.
    pub async fn create(&self, input: &NewSalesperson) -> DbResult<Salesperson> {
        let salesperson = Salesperson {
            id: generate_salesperson_id(),
            full_name: input.full_name.clone(),
            username: input.username.clone(),
            email: input.email.clone(),
            role: input.role,
            created_at: Utc::now(),
        };

        self.insert(&salesperson).await?;
        Ok(salesperson)
    }

    /// Inserts a salesperson row as given.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation` when the username is taken.
    pub async fn insert(&self, salesperson: &Salesperson) -> DbResult<()> {
        debug!(id = %salesperson.id, username = %salesperson.username, role = %salesperson.role, "Inserting salesperson");

        sqlx::query(
            r#"
            INSERT INTO salespeople (id, full_name, username, email, role, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&salesperson.id)
        .bind(&salesperson.full_name)
        .bind(&salesperson.username)
        .bind(&salesperson.email)
        .bind(salesperson.role)
        .bind(salesperson.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, salesperson.username.clone()),
            other => other,
        })?;

        Ok(())
    }

    /// Gets a salesperson by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Salesperson>> {
        let salesperson = sqlx::query_as::<_, Salesperson>(
            r#"
            SELECT id, full_name, username, email, role, created_at
            FROM salespeople
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(salesperson)
    }

    /// Gets a salesperson by username (exact match).
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<Salesperson>> {
        let salesperson = sqlx::query_as::<_, Salesperson>(
            r#"
            SELECT id, full_name, username, email, role, created_at
            FROM salespeople
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(salesperson)
    }

    /// Lists the whole team in the order members were added.
    pub async fn list(&self) -> DbResult<Vec<Salesperson>> {
        let team = sqlx::query_as::<_, Salesperson>(
            r#"
            SELECT id, full_name, username, email, role, created_at
            FROM salespeople
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(team)
    }

    /// Deletes a salesperson. Their sale records are kept.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting salesperson");

        let result = sqlx::query("DELETE FROM salespeople WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Salesperson", id));
        }

        Ok(())
    }

    /// Counts team members holding `role`.
    pub async fn count_by_role(&self, role: Role) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM salespeople WHERE role = ?1")
            .bind(role)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Generates a new salesperson id (UUID v4).
pub fn generate_salesperson_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
