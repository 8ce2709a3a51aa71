//! Error types for the beans ledger
//!
//! Every fallible operation in the crate returns a [`LedgerError`]. Callers
//! that surface errors to users should go through [`LedgerError::code`] and
//! [`LedgerError::public_message`] so internal failures never leak detail.

use std::fmt;

use thiserror::Error;

use crate::models::amount::AmountError;

/// The coarse error classes exposed to callers of the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Validation failure on caller-supplied input
    Invalid,
    /// Entity is absent or belongs to a different budget
    NotFound,
    /// Missing or invalid session
    Unauthorized,
    /// Storage failure, structural fault, or arithmetic failure
    Internal,
}

impl ErrorCode {
    /// Stable string form of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::NotFound => "not_found",
            Self::Unauthorized => "unauthorized",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Field validation failed
    #[error("{0}")]
    Validation(String),

    /// Entity not found (or not visible to the caller)
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Missing or invalid credentials
    #[error("{0}")]
    Unauthorized(String),

    /// A uniqueness constraint rejected an insert
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// The stored data violates a structural invariant
    #[error("Consistency error: {0}")]
    Consistency(String),

    /// Exact-decimal arithmetic could not represent a result
    #[error("Arithmetic error: {0}")]
    Arithmetic(#[from] AmountError),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LedgerError {
    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl fmt::Display) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.to_string(),
        }
    }

    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl fmt::Display) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.to_string(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl fmt::Display) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.to_string(),
        }
    }

    /// Create a "not found" error for category groups
    pub fn group_not_found(identifier: impl fmt::Display) -> Self {
        Self::NotFound {
            entity_type: "Category Group",
            identifier: identifier.to_string(),
        }
    }

    /// Create a "not found" error for months
    pub fn month_not_found(identifier: impl fmt::Display) -> Self {
        Self::NotFound {
            entity_type: "Month",
            identifier: identifier.to_string(),
        }
    }

    /// Create a "not found" error for month categories
    pub fn month_category_not_found(identifier: impl fmt::Display) -> Self {
        Self::NotFound {
            entity_type: "Month Category",
            identifier: identifier.to_string(),
        }
    }

    /// Create a "not found" error for payees
    pub fn payee_not_found(identifier: impl fmt::Display) -> Self {
        Self::NotFound {
            entity_type: "Payee",
            identifier: identifier.to_string(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl fmt::Display) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.to_string(),
        }
    }

    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl fmt::Display) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.to_string(),
        }
    }

    /// Map this error onto the caller-facing taxonomy
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::Invalid,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::Unauthorized(_) => ErrorCode::Unauthorized,
            Self::Duplicate { .. }
            | Self::Consistency(_)
            | Self::Arithmetic(_)
            | Self::Storage(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::Config(_) => ErrorCode::Internal,
        }
    }

    /// The message that may be shown to the caller
    pub fn public_message(&self) -> String {
        match self.code() {
            ErrorCode::Internal => "internal error".to_string(),
            ErrorCode::NotFound => match self {
                Self::NotFound { entity_type, .. } => format!("{} not found", entity_type),
                _ => self.to_string(),
            },
            _ => self.to_string(),
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

    /// Check if this is a uniqueness conflict
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
