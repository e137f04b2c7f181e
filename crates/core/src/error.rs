//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Input rejected by a domain rule. Storage failures and expected lookup
/// outcomes (not found, not owner) have their own types in the crates that
/// produce them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Carries the message shown to the user.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Text that does not read as an identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Message suitable for showing next to the form that produced the error.
    pub fn user_message(&self) -> String {
        match self {
            DomainError::Validation(msg) => msg.clone(),
            DomainError::InvalidId(msg) => format!("invalid identifier: {msg}"),
        }
    }
}
