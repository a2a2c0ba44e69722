//! # In-Memory Repositories
//!
//! In-memory implementations for testing without database dependencies.
//!
//! ## Available Repositories
//!
//! - [`InMemoryAnalystRepository`]: analyst persistence
//! - [`InMemoryCompanyRepository`]: company persistence
//! - [`InMemoryPreferenceRepository`]: preference persistence
//!
//! ## Thread Safety
//!
//! All implementations use `Arc<RwLock<HashMap>>` for thread-safe access.

pub mod analyst_repository;
pub mod company_repository;
pub mod preference_repository;

pub use analyst_repository::InMemoryAnalystRepository;
pub use company_repository::InMemoryCompanyRepository;
pub use preference_repository::InMemoryPreferenceRepository;
