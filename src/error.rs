//! Custom error types for Finance Diary
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons an operation (or a report filter) was rejected at construction time
///
/// Only the first violation found is reported; checks run in a fixed order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The date string matched none of the accepted formats
    #[error("Invalid date: '{0}'")]
    InvalidDate(String),

    /// Not a deposit or a withdrawal
    #[error("Invalid operation type: '{0}'")]
    InvalidOperationType(String),

    /// Amounts must be strictly positive
    #[error("Invalid amount: {0} (must be a positive number)")]
    InvalidAmount(i64),

    /// Unknown category tag, or the wrong number of tags
    #[error("Invalid operation kind: '{0}'")]
    InvalidOperationKind(String),

    /// Reason was empty after trimming quotes
    #[error("Reason cannot be empty")]
    InvalidReason,

    /// Transfer source and destination name the same account
    #[error("Source and destination are the same account: '{0}'")]
    SameAccount(String),

    /// Account name was empty
    #[error("Account name cannot be empty")]
    EmptyAccountName,

    /// The `--since` argument of a report could not be understood
    #[error("Invalid since period: '{0}' (expected N, Nm or Ny)")]
    InvalidSincePeriod(String),

    /// Applying the amount would take the balance outside the `i64` range
    #[error("Balance of '{0}' would overflow")]
    BalanceOverflow(String),
}

/// The main error type for Finance Diary operations
#[derive(Error, Debug)]
pub enum DiaryError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Validation errors for operations and accounts
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// The reserved default account was not among the loaded accounts
    #[error("Default account '{0}' is missing from storage (run 'diary init')")]
    MissingDefaultAccount(String),

    /// The id generator state file does not hold an integer
    #[error("Could not parse next id from {}: '{content}'", path.display())]
    CorruptIdState { path: PathBuf, content: String },
}

impl DiaryError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for accounts
    pub fn duplicate_account(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Errors the ledger cannot start without fixing storage by hand
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingDefaultAccount(_) | Self::CorruptIdState { .. }
        )
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for DiaryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for DiaryError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<serde_yaml::Error> for DiaryError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

/// Result type alias for Finance Diary operations
pub type DiaryResult<T> = Result<T, DiaryError>;
