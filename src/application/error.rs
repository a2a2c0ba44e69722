//! # Application Errors
//!
//! Error types for the application layer.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Validation { field, message }   - Input validation failures
//! ├── EmailTaken                      - Registration with a known email
//! ├── InvalidCredentials              - Login mismatch (generic message)
//! ├── Unauthorized                    - No or invalid session
//! ├── NotFound                        - Missing or foreign resource
//! └── Infrastructure(InfrastructureError)
//!     ├── Repository(RepositoryError)
//!     ├── Credentials(CredentialError)
//!     └── Session(SessionError)
//! ```
//!
//! # Examples
//!
//! ```
//! use otani::application::error::{ApplicationError, InfrastructureError};
//!
//! let err = ApplicationError::validation("stage", "Missing required field: stage");
//! assert_eq!(err.field(), Some("stage"));
//!
//! let err: ApplicationError = InfrastructureError::from(
//!     otani::infrastructure::persistence::RepositoryError::connection("refused"),
//! )
//! .into();
//! assert!(matches!(err, ApplicationError::Infrastructure(_)));
//! ```

use crate::domain::errors::DomainError;
use crate::infrastructure::credentials::CredentialError;
use crate::infrastructure::persistence::RepositoryError;
use crate::infrastructure::session::SessionError;
use thiserror::Error;

/// Infrastructure layer error.
///
/// Failures of storage, hashing or token signing. Never shown to clients
/// verbatim.
#[derive(Debug, Error)]
pub enum InfrastructureError {
    /// Repository error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("credential error: {0}")]
    Credentials(#[from] CredentialError),

    /// Session token error.
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Request validation failed.
    #[error("{message}")]
    Validation {
        /// Offending field, when known.
        field: Option<&'static str>,
        /// Client-facing message.
        message: String,
    },

    /// The email is already registered.
    #[error("Email already registered")]
    EmailTaken,

    /// Email or password did not match.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// No valid session.
    #[error("Authentication required")]
    Unauthorized,

    /// Resource not found or not owned by the caller.
    #[error("{resource_type} not found: {id}")]
    NotFound {
        /// Type of resource.
        resource_type: &'static str,
        /// Resource identifier.
        id: String,
    },

    /// Infrastructure error from external systems.
    #[error("infrastructure error: {0}")]
    Infrastructure(#[from] InfrastructureError),
}

impl ApplicationError {
    /// Creates a validation error about `field`.
    #[must_use]
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: Some(field),
            message: message.into(),
        }
    }

    /// Creates a validation error not tied to one field.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// Returns the offending field of a validation error.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => *field,
            Self::EmailTaken => Some("email"),
            _ => None,
        }
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if the client sent bad input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::EmailTaken)
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        Self::Validation {
            field: err.field(),
            message: err.to_string(),
        }
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        Self::Infrastructure(err.into())
    }
}

impl From<CredentialError> for ApplicationError {
    fn from(err: CredentialError) -> Self {
        Self::Infrastructure(err.into())
    }
}

impl From<SessionError> for ApplicationError {
    fn from(err: SessionError) -> Self {
        Self::Infrastructure(err.into())
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
