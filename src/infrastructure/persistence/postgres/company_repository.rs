//! # PostgreSQL Company Repository

use crate::domain::entities::{Company, CompanyBuilder};
use crate::domain::value_objects::{AnalystId, CompanyId, Grade, Timestamp};
use crate::infrastructure::persistence::postgres::map_insert_error;
use crate::infrastructure::persistence::traits::{
    CompanyRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const COMPANY_COLUMNS: &str = "id, analyst_id, name, industry, stage, location, website, \
     contact_email, description, analyst_rating, created_at, updated_at";

/// PostgreSQL implementation of [`CompanyRepository`].
#[derive(Debug, Clone)]
pub struct PostgresCompanyRepository {
    pool: PgPool,
}

impl PostgresCompanyRepository {
    /// Creates a new repository over `pool`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyRepository for PostgresCompanyRepository {
    async fn insert(&self, company: &Company) -> RepositoryResult<()> {
        let company_id = company.id().to_string();

        sqlx::query(
            r#"
            INSERT INTO companies (
                id, analyst_id, name, industry, stage, location, website,
                contact_email, description, analyst_rating, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(company.id().get())
        .bind(company.analyst_id().get())
        .bind(company.name())
        .bind(company.industry())
        .bind(company.stage())
        .bind(company.location())
        .bind(company.website())
        .bind(company.contact_email())
        .bind(company.description())
        .bind(company.analyst_rating().map(|g| g.to_string()))
        .bind(*company.created_at().as_datetime())
        .bind(*company.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "Company", &company_id))?;

        Ok(())
    }

    async fn get(&self, id: &CompanyId) -> RepositoryResult<Option<Company>> {
        let row: Option<CompanyRow> =
            sqlx::query_as(&format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE id = $1"))
                .bind(id.get())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::query(e.to_string()))?;

        row.map(CompanyRow::try_into_company).transpose()
    }

    async fn find_by_analyst(&self, analyst: &AnalystId) -> RepositoryResult<Vec<Company>> {
        let rows: Vec<CompanyRow> = sqlx::query_as(&format!(
            "SELECT {COMPANY_COLUMNS} FROM companies \
             WHERE analyst_id = $1 ORDER BY created_at DESC"
        ))
        .bind(analyst.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        rows.into_iter().map(CompanyRow::try_into_company).collect()
    }

    async fn find_recent_by_name(
        &self,
        analyst: &AnalystId,
        name: &str,
        since: Timestamp,
    ) -> RepositoryResult<Option<Company>> {
        let row: Option<CompanyRow> = sqlx::query_as(&format!(
            "SELECT {COMPANY_COLUMNS} FROM companies \
             WHERE analyst_id = $1 AND name = $2 AND created_at >= $3 \
             ORDER BY created_at DESC LIMIT 1"
        ))
        .bind(analyst.get())
        .bind(name)
        .bind(*since.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        row.map(CompanyRow::try_into_company).transpose()
    }

    async fn delete_owned(&self, analyst: &AnalystId, id: &CompanyId) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1 AND analyst_id = $2")
            .bind(id.get())
            .bind(analyst.get())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Row type for company queries.
#[derive(Debug, sqlx::FromRow)]
struct CompanyRow {
    id: Uuid,
    analyst_id: Uuid,
    name: String,
    industry: String,
    stage: String,
    location: String,
    website: Option<String>,
    contact_email: Option<String>,
    description: Option<String>,
    analyst_rating: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CompanyRow {
    fn try_into_company(self) -> RepositoryResult<Company> {
        let rating = self
            .analyst_rating
            .as_deref()
            .map(str::parse::<Grade>)
            .transpose()
            .map_err(|e| RepositoryError::serialization(e.to_string()))?;

        Ok(CompanyBuilder::new(
            AnalystId::new(self.analyst_id),
            self.name,
            self.industry,
            self.stage,
            self.location,
        )
        .id(CompanyId::new(self.id))
        .website(self.website)
        .contact_email(self.contact_email)
        .description(self.description)
        .analyst_rating(rating)
        .created_at(Timestamp::from(self.created_at))
        .updated_at(Timestamp::from(self.updated_at))
        .build())
    }
}
