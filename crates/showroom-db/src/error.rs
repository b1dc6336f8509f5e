//! # Storage Errors
//!
//! `DbError` is what the repositories return. The ledger app wraps it in
//! `LedgerError::Storage` untouched; the command boundary logs the detail
//! and hands the dashboard a generic `STORAGE_ERROR`, except for a taken
//! username which the form can act on.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// A delete or lookup by id matched no row.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// `salespeople.username` is already in use.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// A CHECK constraint or the frozen-commission trigger refused the write.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// The database file could not be opened or created.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Every pooled connection stayed busy past the acquire timeout.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// `field` is the qualified column, e.g. `salespeople.username`.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Sorts an SQLite error message into a variant.
    ///
    /// SQLite reports unique failures as `UNIQUE constraint failed: <table>.<column>`;
    /// the offending value is not in the message, so callers fill it in.
    fn from_sqlite_message(msg: &str) -> Self {
        if let Some(column) = msg.strip_prefix("UNIQUE constraint failed: ") {
            DbError::duplicate(column, "")
        } else if msg.starts_with("CHECK constraint failed") || msg.contains("commission is frozen") {
            DbError::ConstraintViolation(msg.to_string())
        } else {
            DbError::QueryFailed(msg.to_string())
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),
            sqlx::Error::Database(db_err) => DbError::from_sqlite_message(db_err.message()),
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;
