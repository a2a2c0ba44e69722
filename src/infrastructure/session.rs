//! # Sessions
//!
//! Signed session tokens (HS256 JWTs) identifying an analyst.
//!
//! A token carries the analyst id as `sub` plus issue and expiry times. The
//! REST layer sends it as an HTTP-only cookie and also accepts it as a
//! bearer token.
//!
//! # Examples
//!
//! ```
//! use otani::domain::value_objects::AnalystId;
//! use otani::infrastructure::session::SessionIssuer;
//!
//! let issuer = SessionIssuer::new("test-secret", 3600);
//! let analyst = AnalystId::new_v4();
//! let token = issuer.issue(analyst).unwrap();
//! assert_eq!(issuer.validate(&token).unwrap(), analyst);
//! ```

use crate::domain::value_objects::AnalystId;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Error from issuing or validating a session token.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Signing failed.
    #[error("failed to sign session token: {0}")]
    Signing(String),

    /// The token is malformed, tampered with or expired.
    #[error("invalid session token: {0}")]
    Invalid(String),
}

/// JWT claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (analyst id).
    pub sub: String,
    /// Expiration time (Unix seconds).
    pub exp: u64,
    /// Issued at (Unix seconds).
    pub iat: u64,
}

/// Issues and validates session tokens with a shared secret.
#[derive(Clone)]
pub struct SessionIssuer {
    secret: Arc<String>,
    ttl_secs: u64,
}

impl fmt::Debug for SessionIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionIssuer")
            .field("secret", &"<redacted>")
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

impl SessionIssuer {
    /// Creates an issuer signing with `secret`; tokens live `ttl_secs`.
    #[must_use]
    pub fn new(secret: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            secret: Arc::new(secret.into()),
            ttl_secs,
        }
    }

    /// Issues a token for `analyst`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Signing`] if encoding fails.
    pub fn issue(&self, analyst: AnalystId) -> Result<String, SessionError> {
        let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0);
        let claims = Claims {
            sub: analyst.to_string(),
            exp: now.saturating_add(self.ttl_secs),
            iat: now,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| SessionError::Signing(e.to_string()))
    }

    /// Validates `token` and returns the analyst it identifies.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Invalid`] for bad signatures, expired tokens
    /// or a subject that is not an analyst id.
    pub fn validate(&self, token: &str) -> Result<AnalystId, SessionError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| SessionError::Invalid(e.to_string()))?;

        data.claims
            .sub
            .parse()
            .map_err(|e: uuid::Error| SessionError::Invalid(e.to_string()))
    }
}
