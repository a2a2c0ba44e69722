//! # PostgreSQL Repositories
//!
//! sqlx-backed implementations of the repository traits.
//!
//! The schema lives in `migrations/` at the crate root and is embedded into
//! the binary with [`sqlx::migrate!`]; call [`run_migrations`] once after
//! [`connect`] at start-up.
//!
//! # Examples
//!
//! ```ignore
//! use otani::infrastructure::persistence::postgres::{self, PostgresCompanyRepository};
//!
//! let pool = postgres::connect("postgres://localhost/otani", 5).await?;
//! postgres::run_migrations(&pool).await?;
//! let companies = PostgresCompanyRepository::new(pool.clone());
//! ```

pub mod analyst_repository;
pub mod company_repository;
pub mod preference_repository;

pub use analyst_repository::PostgresAnalystRepository;
pub use company_repository::PostgresCompanyRepository;
pub use preference_repository::PostgresPreferenceRepository;

use crate::infrastructure::persistence::traits::{RepositoryError, RepositoryResult};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Opens a connection pool.
///
/// # Errors
///
/// Returns `RepositoryError::Connection` if the database is unreachable.
pub async fn connect(url: &str, max_connections: u32) -> RepositoryResult<PgPool> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
        .map_err(|e| RepositoryError::connection(e.to_string()))
}

/// Applies the embedded schema migrations.
///
/// # Errors
///
/// Returns `RepositoryError::Query` if a migration fails.
pub async fn run_migrations(pool: &PgPool) -> RepositoryResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))
}

/// Maps a sqlx error, turning unique-constraint violations into
/// `RepositoryError::Duplicate`.
pub(crate) fn map_insert_error(
    err: sqlx::Error,
    entity_type: &'static str,
    key: &str,
) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::duplicate(entity_type, key)
        }
        _ => RepositoryError::query(err.to_string()),
    }
}
