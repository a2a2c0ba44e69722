//! # Analyst Entity
//!
//! A registered user of the service. Owns companies and at most one
//! preference model.

use crate::domain::value_objects::{AnalystId, EmailAddress, Timestamp};
use std::fmt;

/// A registered analyst.
///
/// The password hash is an opaque PHC string produced by the credential
/// hasher; it is never exposed through `Display` or `Debug`.
///
/// # Examples
///
/// ```
/// use otani::domain::entities::Analyst;
///
/// let analyst = Analyst::new("ana@fund.vc".parse().unwrap(), "$argon2id$stub");
/// assert_eq!(analyst.email().as_str(), "ana@fund.vc");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Analyst {
    id: AnalystId,
    email: EmailAddress,
    password_hash: String,
    created_at: Timestamp,
}

impl Analyst {
    /// Creates a new analyst with a fresh identifier.
    #[must_use]
    pub fn new(email: EmailAddress, password_hash: impl Into<String>) -> Self {
        Self {
            id: AnalystId::new_v4(),
            email,
            password_hash: password_hash.into(),
            created_at: Timestamp::now(),
        }
    }

    /// Rebuilds an analyst from stored fields.
    #[must_use]
    pub fn from_parts(
        id: AnalystId,
        email: EmailAddress,
        password_hash: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            created_at,
        }
    }

    /// Returns the analyst identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> AnalystId {
        self.id
    }

    /// Returns the login email.
    #[inline]
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the stored password hash.
    #[inline]
    #[must_use]
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Returns when the analyst registered.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl fmt::Debug for Analyst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyst")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Analyst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Analyst({} {})", self.id, self.email)
    }
}
