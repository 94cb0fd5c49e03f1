//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is recoverable at the point of the user action: it prevents
/// the mutation and is surfaced as a message. Storage failures belong
/// elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was missing or invalid.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced item or department does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// An issue asked for more units than are on hand.
    #[error("insufficient stock for item {item_id}: requested {requested}, available {available}")]
    InsufficientStock {
        item_id: String,
        requested: u32,
        available: u32,
    },

    /// A department with the same name already exists.
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// Removing the department would leave the registry empty.
    #[error("cannot remove the last department: {0}")]
    LastDepartment(String),

    /// An identifier was malformed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn insufficient_stock(item_id: impl Into<String>, requested: u32, available: u32) -> Self {
        Self::InsufficientStock {
            item_id: item_id.into(),
            requested,
            available,
        }
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    pub fn last_department(name: impl Into<String>) -> Self {
        Self::LastDepartment(name.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
