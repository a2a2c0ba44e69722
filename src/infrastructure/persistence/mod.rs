//! # Persistence Layer
//!
//! Repository ports and their implementations.
//!
//! ## Repository Traits (Ports)
//!
//! - [`AnalystRepository`]: registered analysts
//! - [`CompanyRepository`]: tracked companies
//! - [`PreferenceRepository`]: preference models
//!
//! ## Implementations
//!
//! - `in_memory`: used by tests and when no database is configured
//! - `postgres`: sqlx-backed, schema applied from embedded migrations

pub mod in_memory;
pub mod postgres;
pub mod traits;

pub use traits::{
    AnalystRepository, CompanyRepository, PreferenceRepository, RepositoryError,
    RepositoryResult,
};
