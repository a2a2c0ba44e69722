//! # Email Address
//!
//! Canonical analyst login identifier.

use crate::domain::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A trimmed, lower-cased email address.
///
/// Validation is shallow: exactly one `@` with non-empty local and
/// domain parts, and no whitespace.
///
/// # Examples
///
/// ```
/// use otani::domain::value_objects::EmailAddress;
///
/// let email: EmailAddress = "  Ana@Fund.VC ".parse().unwrap();
/// assert_eq!(email.as_str(), "ana@fund.vc");
/// assert!("no-at-sign".parse::<EmailAddress>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Returns the address as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for EmailAddress {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = s.trim().to_lowercase();
        if canonical.is_empty() {
            return Err(DomainError::MissingField("email"));
        }

        let valid = match canonical.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.is_empty()
                    && !domain.contains('@')
                    && !canonical.chars().any(char::is_whitespace)
            }
            None => false,
        };

        if valid {
            Ok(Self(canonical))
        } else {
            Err(DomainError::InvalidEmail(s.trim().to_string()))
        }
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
