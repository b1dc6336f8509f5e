//! # Error Handling
//!
//! Service-layer errors and the serializable error the dashboard receives.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ValidationErrors ─┐                                                    │
//! │  CoreError ────────┼──► LedgerError ──► ApiError { code, message,       │
//! │  DbError ──────────┘    (services)                 fields }             │
//! │                                             │                           │
//! │                                             ▼                           │
//! │                                   Dashboard (JSON)                      │
//! │                                                                         │
//! │  Storage details are logged here and never sent to the dashboard.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use showroom_core::{CoreError, ValidationError, ValidationErrors};
use showroom_db::DbError;

// =============================================================================
// Ledger Error
// =============================================================================

/// Errors raised by the ledger, dashboard and team services.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// One or more input fields failed validation.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// The referenced salesperson does not exist.
    #[error("Salesperson not found: {salesperson_id}")]
    NotFound { salesperson_id: String },

    /// A team rule rejected the operation.
    #[error(transparent)]
    Core(CoreError),

    /// Storage failed. Propagated unchanged, never retried.
    #[error("Storage error: {0}")]
    Storage(#[from] DbError),
}

impl LedgerError {
    pub fn not_found(salesperson_id: impl Into<String>) -> Self {
        LedgerError::NotFound {
            salesperson_id: salesperson_id.into(),
        }
    }
}

impl From<ValidationErrors> for LedgerError {
    fn from(err: ValidationErrors) -> Self {
        LedgerError::Validation(err)
    }
}

impl From<ValidationError> for LedgerError {
    fn from(err: ValidationError) -> Self {
        LedgerError::Validation(err.into())
    }
}

impl From<CoreError> for LedgerError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(errors) => LedgerError::Validation(errors),
            CoreError::SalespersonNotFound(id) => LedgerError::NotFound { salesperson_id: id },
            other => LedgerError::Core(other),
        }
    }
}

/// Result type for service operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

// =============================================================================
// API Error
// =============================================================================

/// Error returned from every command.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "vehicleYear has invalid format: must be a whole number",
///   "fields": ["vehicleYear"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Failing form fields (camelCase); empty unless `code` is VALIDATION_ERROR
    pub fields: Vec<String>,
}

/// Error codes for command responses.
///
/// ## Usage in the Dashboard
/// ```typescript
/// try {
///   await recordSale(form);
/// } catch (e) {
///   switch (e.code) {
///     case 'VALIDATION_ERROR':
///       e.fields.forEach(markInvalid);
///       break;
///     case 'NOT_FOUND':
///       showNotification('Salesperson no longer on the team');
///       break;
///     default:
///       showError(e.message);
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed (400)
    ValidationError,

    /// Referenced resource does not exist (404)
    NotFound,

    /// Team rule rejected the operation (422)
    BusinessRule,

    /// Storage failed (500)
    StorageError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error listing every failing field.
    pub fn validation(errors: &ValidationErrors) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: errors.to_string(),
            fields: errors.fields().into_iter().map(str::to_string).collect(),
        }
    }
}

/// Converts database errors to API errors.
///
/// Only the category reaches the dashboard; the detail is logged.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => {
                let field = field.rsplit('.').next().unwrap_or("value").to_string();
                ApiError {
                    code: ErrorCode::ValidationError,
                    message: format!("{} '{}' already exists", field, value),
                    fields: vec![field],
                }
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Database migration failed")
            }
            DbError::PoolExhausted => {
                tracing::error!("Database pool exhausted");
                ApiError::new(ErrorCode::StorageError, "Database is busy, try again")
            }
            other => {
                tracing::error!("Database operation failed: {}", other);
                ApiError::new(ErrorCode::StorageError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(errors) => ApiError::validation(&errors),
            CoreError::SalespersonNotFound(id) => ApiError::not_found("Salesperson", &id),
            CoreError::DuplicateUsername(username) => ApiError {
                code: ErrorCode::ValidationError,
                message: format!("Username '{}' is already taken", username),
                fields: vec!["username".to_string()],
            },
            other @ (CoreError::TeamFull { .. } | CoreError::AdminDeletion(_)) => {
                ApiError::new(ErrorCode::BusinessRule, other.to_string())
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        ApiError::validation(&err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(&err.into())
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Validation(errors) => ApiError::validation(&errors),
            LedgerError::NotFound { salesperson_id } => ApiError::not_found("Salesperson", &salesperson_id),
            LedgerError::Core(e) => e.into(),
            LedgerError::Storage(e) => e.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use showroom_core::Role;

    #[test]
    fn test_validation_error_lists_fields() {
        let errors = ValidationErrors::new(vec![
            ValidationError::Required {
                field: "stockNumber".to_string(),
            },
            ValidationError::InFuture {
                field: "saleDate".to_string(),
            },
        ]);

        let api: ApiError = LedgerError::from(errors).into();
        assert_eq!(api.code, ErrorCode::ValidationError);
        assert_eq!(api.fields, vec!["stockNumber", "saleDate"]);
    }

    #[test]
    fn test_serialized_shape() {
        let api: ApiError = LedgerError::not_found("sp-9").into();
        let json = serde_json::to_value(&api).unwrap();

        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Salesperson not found: sp-9");
        assert_eq!(json["fields"], serde_json::json!([]));
    }

    #[test]
    fn test_storage_detail_is_hidden() {
        let api: ApiError = LedgerError::Storage(DbError::QueryFailed("no such table: sale_records".to_string())).into();

        assert_eq!(api.code, ErrorCode::StorageError);
        assert!(!api.message.contains("sale_records"));
    }

    #[test]
    fn test_team_rules_are_business_errors() {
        let api: ApiError = LedgerError::from(CoreError::TeamFull {
            role: Role::Collaborator,
            max: 3,
        })
        .into();
        assert_eq!(api.code, ErrorCode::BusinessRule);

        let api: ApiError = LedgerError::from(CoreError::SalespersonNotFound("x".to_string())).into();
        assert_eq!(api.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_duplicate_username_points_at_field() {
        let api: ApiError = DbError::duplicate("salespeople.username", "dana").into();
        assert_eq!(api.code, ErrorCode::ValidationError);
        assert_eq!(api.fields, vec!["username"]);
    }
}
