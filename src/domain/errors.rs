//! # Domain Errors
//!
//! Validation failures raised while constructing value objects and entities.

use thiserror::Error;

/// Error raised by domain validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A required field was absent or blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A field was present but malformed.
    #[error("Invalid {field}: {reason}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable reason.
        reason: String,
    },

    /// The email address is not well formed.
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// The grade letter is not one of A, B, C, D.
    #[error("Invalid grade: {0} (expected one of A, B, C, D)")]
    InvalidGrade(String),
}

impl DomainError {
    /// Creates an invalid field error.
    #[must_use]
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Returns the name of the field this error is about, if any.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField(field) | Self::InvalidField { field, .. } => Some(field),
            Self::InvalidEmail(_) => Some("email"),
            Self::InvalidGrade(_) => Some("rating"),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
