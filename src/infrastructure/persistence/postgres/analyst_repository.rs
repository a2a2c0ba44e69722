//! # PostgreSQL Analyst Repository

use crate::domain::DomainError;
use crate::domain::entities::Analyst;
use crate::domain::value_objects::{AnalystId, EmailAddress, Timestamp};
use crate::infrastructure::persistence::postgres::map_insert_error;
use crate::infrastructure::persistence::traits::{
    AnalystRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of [`AnalystRepository`].
///
/// Email uniqueness is enforced by the `analysts.email` unique constraint.
#[derive(Debug, Clone)]
pub struct PostgresAnalystRepository {
    pool: PgPool,
}

impl PostgresAnalystRepository {
    /// Creates a new repository over `pool`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalystRepository for PostgresAnalystRepository {
    async fn insert(&self, analyst: &Analyst) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO analysts (id, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(analyst.id().get())
        .bind(analyst.email().as_str())
        .bind(analyst.password_hash())
        .bind(*analyst.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "Analyst", analyst.email().as_str()))?;

        Ok(())
    }

    async fn get(&self, id: &AnalystId) -> RepositoryResult<Option<Analyst>> {
        let row: Option<AnalystRow> = sqlx::query_as(
            "SELECT id, email, password_hash, created_at FROM analysts WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        row.map(AnalystRow::try_into_analyst).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> RepositoryResult<Option<Analyst>> {
        let row: Option<AnalystRow> = sqlx::query_as(
            "SELECT id, email, password_hash, created_at FROM analysts WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        row.map(AnalystRow::try_into_analyst).transpose()
    }
}

/// Row type for analyst queries.
#[derive(Debug, sqlx::FromRow)]
struct AnalystRow {
    id: Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl AnalystRow {
    fn try_into_analyst(self) -> RepositoryResult<Analyst> {
        let email: EmailAddress = self
            .email
            .parse()
            .map_err(|e: DomainError| RepositoryError::serialization(e.to_string()))?;

        Ok(Analyst::from_parts(
            AnalystId::new(self.id),
            email,
            self.password_hash,
            Timestamp::from(self.created_at),
        ))
    }
}
