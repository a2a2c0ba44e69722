//! # Credentials
//!
//! Password hashing behind the [`CredentialHasher`] port.
//!
//! The production hasher is [`Argon2Hasher`], which stores PHC strings
//! (`$argon2id$v=19$...`) with a random per-password salt.
//!
//! # Examples
//!
//! ```
//! use otani::infrastructure::credentials::{Argon2Hasher, CredentialHasher};
//!
//! let hasher = Argon2Hasher::default();
//! let hash = hasher.hash("hunter2").unwrap();
//! assert!(hasher.verify("hunter2", &hash).unwrap());
//! assert!(!hasher.verify("hunter3", &hash).unwrap());
//! ```

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use std::fmt;
use thiserror::Error;

/// Error from hashing or verifying a password.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Hashing failed.
    #[error("failed to hash password: {0}")]
    Hash(String),

    /// The stored hash could not be parsed.
    #[error("invalid stored password hash: {0}")]
    MalformedHash(String),
}

/// Hashes and verifies passwords.
pub trait CredentialHasher: Send + Sync + fmt::Debug {
    /// Hashes `password` into a self-describing string.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Hash`] if the hasher fails.
    fn hash(&self, password: &str) -> Result<String, CredentialError>;

    /// Checks `password` against a stored hash.
    ///
    /// A mismatch is `Ok(false)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::MalformedHash`] if `hash` is unreadable.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialError>;
}

/// Argon2id hasher with the crate's default parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CredentialError::Hash(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialError> {
        let parsed =
            PasswordHash::new(hash).map_err(|e| CredentialError::MalformedHash(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
