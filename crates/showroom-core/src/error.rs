//! # Error Types
//!
//! Domain-specific error types for showroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  showroom-core errors (this file)                                      │
//! │  ├── ValidationError   - One field failed one rule                     │
//! │  ├── ValidationErrors  - Every failing field of a submission           │
//! │  └── CoreError         - Team/business rule violations                 │
//! │                                                                         │
//! │  showroom-db errors (separate crate)                                   │
//! │  └── DbError           - Storage failures                              │
//! │                                                                         │
//! │  showroom-ledger errors (app)                                          │
//! │  ├── LedgerError       - Service layer                                 │
//! │  └── ApiError          - What the dashboard sees (serialized)          │
//! │                                                                         │
//! │  Flow: ValidationErrors → LedgerError → ApiError → Dashboard           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use thiserror::Error;

use crate::types::Role;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule errors raised outside of plain field validation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Salesperson cannot be found.
    ///
    /// ## When This Occurs
    /// - Id was never created
    /// - Collaborator was removed from the team
    #[error("Salesperson not found: {0}")]
    SalespersonNotFound(String),

    /// The team already holds the maximum number of members for a role.
    ///
    /// ## User Workflow
    /// ```text
    /// Team page: "Add collaborator"
    ///      │
    ///      ▼
    /// 3 collaborators already exist
    ///      │
    ///      ▼
    /// TeamFull { role: Collaborator, max: 3 }
    ///      │
    ///      ▼
    /// UI shows: "Team already has 3 collaborators"
    /// ```
    #[error("Team already has the maximum of {max} {role} member(s)")]
    TeamFull { role: Role, max: usize },

    /// Admins cannot be removed from the team.
    #[error("Salesperson {0} is an admin and cannot be deleted")]
    AdminDeletion(String),

    /// Username is already taken by another team member.
    #[error("Username '{0}' is already taken")]
    DuplicateUsername(String),

    /// Validation failure (wraps every failing field).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),
}

impl From<ValidationError> for CoreError {
    fn from(err: ValidationError) -> Self {
        CoreError::Validation(err.into())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single field that failed a single rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., not a number, not a date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Date lies after the moment of submission.
    #[error("{field} cannot be in the future")]
    InFuture { field: String },
}

impl ValidationError {
    /// Name of the field this error refers to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::MustBeNonNegative { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotAllowed { field, .. }
            | ValidationError::InFuture { field } => field,
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Every validation failure found in one submission.
///
/// The sale form shows all of them at once, so validators keep going
/// after the first failure instead of returning early.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Wraps a list of errors.
    pub fn new(errors: Vec<ValidationError>) -> Self {
        ValidationErrors(errors)
    }

    /// Returns `Ok(())` for an empty list, the list as an error otherwise.
    pub fn into_result(errors: Vec<ValidationError>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    /// Names of the failing fields, in the order they were checked.
    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(ValidationError::field).collect()
    }

    /// Returns true if `field` is among the failures.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field() == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<ValidationError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        ValidationErrors(vec![err])
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
