//! Custom error types for paycontrol
//!
//! This module defines the error hierarchy for the ledger core using thiserror.
//! Every variant is recoverable: the presentation layer reports it and keeps going.

use thiserror::Error;

/// The main error type for paycontrol operations
#[derive(Error, Debug)]
pub enum BudgetError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors outside of ledger saves
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Rejected user input (negative amount, unknown account, duplicate id, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The on-disk ledger document exists but cannot be trusted
    #[error("Corrupt ledger data: {0}")]
    CorruptData(String),

    /// A delete was blocked because other entities still point at the target
    #[error("Cannot remove {entity} '{id}': still referenced by {dependents}")]
    ReferentialIntegrity {
        entity: &'static str,
        id: String,
        dependents: String,
    },

    /// Saving the ledger failed; the previous document is untouched
    #[error("Failed to write ledger: {0}")]
    IoWrite(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),
}

impl BudgetError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for fixed expenses, subscriptions and expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
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

    /// Check if this is a corrupt-data error
    pub fn is_corrupt_data(&self) -> bool {
        matches!(self, Self::CorruptData(_))
    }

    /// Check if this is a blocked delete
    pub fn is_referential_integrity(&self) -> bool {
        matches!(self, Self::ReferentialIntegrity { .. })
    }
}

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for paycontrol operations
pub type BudgetResult<T> = Result<T, BudgetError>;
