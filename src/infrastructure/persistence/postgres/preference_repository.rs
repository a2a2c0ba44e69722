//! # PostgreSQL Preference Repository
//!
//! Preference sets are stored as `TEXT[]` columns holding normalized tokens.

use crate::domain::entities::PreferenceModel;
use crate::domain::value_objects::{AnalystId, PreferenceSet, Timestamp};
use crate::infrastructure::persistence::traits::{
    PreferenceRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// PostgreSQL implementation of [`PreferenceRepository`].
#[derive(Debug, Clone)]
pub struct PostgresPreferenceRepository {
    pool: PgPool,
}

impl PostgresPreferenceRepository {
    /// Creates a new repository over `pool`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_in(
        tx: &mut Transaction<'_, Postgres>,
        model: &PreferenceModel,
    ) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO preferences (
                analyst_id, industries, stages, locations,
                investment_sizes, additional_info, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(model.analyst_id().get())
        .bind(model.industries().to_vec())
        .bind(model.stages().to_vec())
        .bind(model.locations().to_vec())
        .bind(model.investment_sizes().to_vec())
        .bind(model.additional_info())
        .bind(*model.updated_at().as_datetime())
        .execute(&mut **tx)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl PreferenceRepository for PostgresPreferenceRepository {
    async fn get(&self, analyst: &AnalystId) -> RepositoryResult<Option<PreferenceModel>> {
        let row: Option<PreferenceRow> = sqlx::query_as(
            r#"
            SELECT analyst_id, industries, stages, locations,
                   investment_sizes, additional_info, updated_at
            FROM preferences
            WHERE analyst_id = $1
            "#,
        )
        .bind(analyst.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        Ok(row.map(PreferenceRow::into_model))
    }

    async fn replace(&self, model: &PreferenceModel) -> RepositoryResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::connection(e.to_string()))?;

        sqlx::query("DELETE FROM preferences WHERE analyst_id = $1")
            .bind(model.analyst_id().get())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        // An early return drops `tx`, which rolls the delete back.
        Self::insert_in(&mut tx, model).await?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))
    }

    async fn insert_if_absent(&self, model: &PreferenceModel) -> RepositoryResult<PreferenceModel> {
        sqlx::query(
            r#"
            INSERT INTO preferences (
                analyst_id, industries, stages, locations,
                investment_sizes, additional_info, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (analyst_id) DO NOTHING
            "#,
        )
        .bind(model.analyst_id().get())
        .bind(model.industries().to_vec())
        .bind(model.stages().to_vec())
        .bind(model.locations().to_vec())
        .bind(model.investment_sizes().to_vec())
        .bind(model.additional_info())
        .bind(*model.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        self.get(&model.analyst_id()).await?.ok_or_else(|| {
            RepositoryError::not_found("PreferenceModel", model.analyst_id().to_string())
        })
    }
}

/// Row type for preference queries.
#[derive(Debug, sqlx::FromRow)]
struct PreferenceRow {
    analyst_id: Uuid,
    industries: Vec<String>,
    stages: Vec<String>,
    locations: Vec<String>,
    investment_sizes: Vec<String>,
    additional_info: String,
    updated_at: DateTime<Utc>,
}

impl PreferenceRow {
    fn into_model(self) -> PreferenceModel {
        PreferenceModel::builder(AnalystId::new(self.analyst_id))
            .industries(PreferenceSet::from(self.industries))
            .stages(PreferenceSet::from(self.stages))
            .locations(PreferenceSet::from(self.locations))
            .investment_sizes(PreferenceSet::from(self.investment_sizes))
            .additional_info(self.additional_info)
            .updated_at(Timestamp::from(self.updated_at))
            .build()
    }
}
