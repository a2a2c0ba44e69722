//! # Repository Traits
//!
//! Port definitions for persistence abstraction.
//!
//! Implementations live in `in_memory` (tests and database-less runs) and
//! `postgres` (production).
//!
//! # Available Repositories
//!
//! - [`AnalystRepository`]: registered analysts
//! - [`CompanyRepository`]: tracked companies
//! - [`PreferenceRepository`]: one preference model per analyst
//!
//! # Examples
//!
//! ```ignore
//! use otani::infrastructure::persistence::traits::CompanyRepository;
//!
//! async fn show(repo: &impl CompanyRepository, analyst: &AnalystId) {
//!     let companies = repo.find_by_analyst(analyst).await?;
//!     println!("{} companies", companies.len());
//! }
//! ```

use crate::domain::entities::{Analyst, Company, PreferenceModel};
use crate::domain::value_objects::{AnalystId, CompanyId, EmailAddress, Timestamp};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Entity not found.
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Duplicate entity.
    #[error("Duplicate entity: {entity_type} with id {id} already exists")]
    Duplicate {
        /// Type of entity.
        entity_type: &'static str,
        /// Conflicting key.
        id: String,
    },

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query error.
    #[error("Query error: {0}")]
    Query(String),

    /// Stored data could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepositoryError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a duplicate error.
    #[must_use]
    pub fn duplicate(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Returns true if this is a duplicate error.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository for analysts.
#[async_trait]
pub trait AnalystRepository: Send + Sync + fmt::Debug {
    /// Inserts a new analyst.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Duplicate` if the email is already taken.
    async fn insert(&self, analyst: &Analyst) -> RepositoryResult<()>;

    /// Gets an analyst by ID.
    async fn get(&self, id: &AnalystId) -> RepositoryResult<Option<Analyst>>;

    /// Finds an analyst by canonical email.
    async fn find_by_email(&self, email: &EmailAddress) -> RepositoryResult<Option<Analyst>>;
}

/// Repository for companies.
#[async_trait]
pub trait CompanyRepository: Send + Sync + fmt::Debug {
    /// Inserts a new company.
    async fn insert(&self, company: &Company) -> RepositoryResult<()>;

    /// Gets a company by ID regardless of owner.
    async fn get(&self, id: &CompanyId) -> RepositoryResult<Option<Company>>;

    /// Lists an analyst's companies, newest first.
    async fn find_by_analyst(&self, analyst: &AnalystId) -> RepositoryResult<Vec<Company>>;

    /// Finds the newest company of `analyst` named exactly `name` that was
    /// created at or after `since`.
    async fn find_recent_by_name(
        &self,
        analyst: &AnalystId,
        name: &str,
        since: Timestamp,
    ) -> RepositoryResult<Option<Company>>;

    /// Deletes a company only if `analyst` owns it.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if the company
    /// does not exist or belongs to someone else.
    async fn delete_owned(&self, analyst: &AnalystId, id: &CompanyId) -> RepositoryResult<bool>;
}

/// Repository for preference models.
#[async_trait]
pub trait PreferenceRepository: Send + Sync + fmt::Debug {
    /// Gets the analyst's model, if one was ever saved.
    async fn get(&self, analyst: &AnalystId) -> RepositoryResult<Option<PreferenceModel>>;

    /// Atomically replaces the analyst's model with `model`.
    ///
    /// On failure the previous model is left untouched.
    async fn replace(&self, model: &PreferenceModel) -> RepositoryResult<()>;

    /// Stores `model` unless the analyst already has one, and returns the
    /// model that is stored afterwards.
    async fn insert_if_absent(&self, model: &PreferenceModel) -> RepositoryResult<PreferenceModel>;
}
