//! # Company Service
//!
//! Adds, lists, fetches and deletes an analyst's companies. Every company
//! handed back is rated against the owner's current preferences, so a
//! preference change shows up on the next read.
//!
//! # Duplicate Submissions
//!
//! A submission whose trimmed name matches one of the analyst's companies
//! created within the duplicate window is answered with the existing
//! company and [`AddOutcome::AlreadyAdded`]. The check is read-then-write,
//! so two truly concurrent submissions can both be stored.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::{CompanyDraft, PreferenceModel};
use crate::domain::services::{RatedCompany, RatingStrategy};
use crate::domain::value_objects::{AnalystId, CompanyId, Timestamp};
use crate::infrastructure::persistence::{CompanyRepository, PreferenceRepository};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Default duplicate-submission window.
pub const DEFAULT_DUPLICATE_WINDOW: Duration = Duration::from_secs(5);

/// Result of [`CompanyService::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new company was stored.
    Created(RatedCompany),
    /// A same-named company was stored moments ago; nothing new was stored.
    AlreadyAdded(RatedCompany),
}

impl AddOutcome {
    /// Client-facing message.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Created(_) => "Company added successfully",
            Self::AlreadyAdded(_) => "Company already added",
        }
    }

    /// Returns true if a new company was stored.
    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// The stored company.
    #[must_use]
    pub fn company(&self) -> &RatedCompany {
        match self {
            Self::Created(c) | Self::AlreadyAdded(c) => c,
        }
    }

    /// Consumes the outcome and returns the stored company.
    #[must_use]
    pub fn into_company(self) -> RatedCompany {
        match self {
            Self::Created(c) | Self::AlreadyAdded(c) => c,
        }
    }
}

/// Company use cases.
#[derive(Debug, Clone)]
pub struct CompanyService {
    companies: Arc<dyn CompanyRepository>,
    preferences: Arc<dyn PreferenceRepository>,
    strategy: Arc<dyn RatingStrategy>,
    duplicate_window: Duration,
}

impl CompanyService {
    /// Creates a new company service.
    #[must_use]
    pub fn new(
        companies: Arc<dyn CompanyRepository>,
        preferences: Arc<dyn PreferenceRepository>,
        strategy: Arc<dyn RatingStrategy>,
    ) -> Self {
        Self {
            companies,
            preferences,
            strategy,
            duplicate_window: DEFAULT_DUPLICATE_WINDOW,
        }
    }

    /// Overrides the duplicate-submission window.
    #[must_use]
    pub fn with_duplicate_window(mut self, window: Duration) -> Self {
        self.duplicate_window = window;
        self
    }

    /// Adds a company for `analyst` as of now.
    ///
    /// # Errors
    ///
    /// Returns `Validation` naming the first missing required field, or an
    /// infrastructure error if storage fails.
    pub async fn add(
        &self,
        analyst: AnalystId,
        draft: CompanyDraft,
    ) -> ApplicationResult<AddOutcome> {
        self.add_at(analyst, draft, Timestamp::now()).await
    }

    /// Adds a company for `analyst` as of `now`.
    ///
    /// # Errors
    ///
    /// See [`CompanyService::add`].
    #[tracing::instrument(skip_all, fields(analyst = %analyst))]
    pub async fn add_at(
        &self,
        analyst: AnalystId,
        draft: CompanyDraft,
        now: Timestamp,
    ) -> ApplicationResult<AddOutcome> {
        let company = draft.into_company(analyst, now)?;
        let preferences = self.preferences.get(&analyst).await?;

        let since = now.saturating_sub(self.duplicate_window);
        if let Some(existing) = self
            .companies
            .find_recent_by_name(&analyst, company.name(), since)
            .await?
        {
            debug!(company = %existing.id(), "duplicate submission ignored");
            let rating = self.strategy.rate(&existing, preferences.as_ref());
            return Ok(AddOutcome::AlreadyAdded(RatedCompany {
                company: existing,
                rating,
            }));
        }

        self.companies.insert(&company).await?;
        let rating = self.strategy.rate(&company, preferences.as_ref());
        info!(company = %company.id(), grade = %rating.grade(), "company added");

        Ok(AddOutcome::Created(RatedCompany { company, rating }))
    }

    /// Lists the analyst's companies, newest first, each rated.
    ///
    /// # Errors
    ///
    /// Returns an infrastructure error if storage fails.
    #[tracing::instrument(skip_all, fields(analyst = %analyst))]
    pub async fn list(&self, analyst: AnalystId) -> ApplicationResult<Vec<RatedCompany>> {
        let preferences = self.preferences.get(&analyst).await?;
        self.list_against(analyst, preferences.as_ref()).await
    }

    /// Lists the analyst's companies rated against `preferences`.
    ///
    /// # Errors
    ///
    /// Returns an infrastructure error if storage fails.
    pub async fn list_against(
        &self,
        analyst: AnalystId,
        preferences: Option<&PreferenceModel>,
    ) -> ApplicationResult<Vec<RatedCompany>> {
        let companies = self.companies.find_by_analyst(&analyst).await?;
        Ok(self.strategy.rate_all(companies, preferences))
    }

    /// Fetches one of the analyst's companies.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is malformed, unknown or owned by someone
    /// else.
    #[tracing::instrument(skip_all, fields(analyst = %analyst, company = id))]
    pub async fn get(&self, analyst: AnalystId, id: &str) -> ApplicationResult<RatedCompany> {
        let company_id = parse_company_id(id)?;
        let company = self
            .companies
            .get(&company_id)
            .await?
            .filter(|c| c.is_owned_by(&analyst))
            .ok_or_else(|| ApplicationError::not_found("Company", id))?;

        let preferences = self.preferences.get(&analyst).await?;
        let rating = self.strategy.rate(&company, preferences.as_ref());
        Ok(RatedCompany { company, rating })
    }

    /// Deletes one of the analyst's companies.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is malformed, unknown or owned by someone
    /// else; nothing is deleted in that case.
    #[tracing::instrument(skip_all, fields(analyst = %analyst, company = id))]
    pub async fn delete(&self, analyst: AnalystId, id: &str) -> ApplicationResult<()> {
        let company_id = parse_company_id(id)?;
        if !self.companies.delete_owned(&analyst, &company_id).await? {
            debug!("delete rejected: not found or not owned");
            return Err(ApplicationError::not_found("Company", id));
        }
        info!("company deleted");
        Ok(())
    }
}

fn parse_company_id(raw: &str) -> ApplicationResult<CompanyId> {
    raw.parse()
        .map_err(|_| ApplicationError::not_found("Company", raw))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::services::PreferenceMatchStrategy;
    use crate::domain::value_objects::{Grade, PreferenceSet};
    use crate::infrastructure::persistence::in_memory::{
        InMemoryCompanyRepository, InMemoryPreferenceRepository,
    };

    struct Fixture {
        service: CompanyService,
        preferences: Arc<InMemoryPreferenceRepository>,
    }

    fn fixture() -> Fixture {
        let preferences = Arc::new(InMemoryPreferenceRepository::new());
        let service = CompanyService::new(
            Arc::new(InMemoryCompanyRepository::new()),
            preferences.clone(),
            Arc::new(PreferenceMatchStrategy),
        );
        Fixture {
            service,
            preferences,
        }
    }

    fn draft(name: &str, industry: &str, stage: &str, location: &str) -> CompanyDraft {
        CompanyDraft {
            name: Some(name.into()),
            industry: Some(industry.into()),
            stage: Some(stage.into()),
            location: Some(location.into()),
            ..CompanyDraft::default()
        }
    }

    fn at(secs: i64) -> Timestamp {
        Timestamp::from_secs(secs).unwrap()
    }

    async fn prefer_fintech_seed_na(fx: &Fixture, analyst: AnalystId) {
        let model = PreferenceModel::builder(analyst)
            .industries(PreferenceSet::from_raw(["fintech"]))
            .stages(PreferenceSet::from_raw(["seed"]))
            .locations(PreferenceSet::from_raw(["north_america"]))
            .build();
        fx.preferences.replace(&model).await.unwrap();
    }

    mod add {
        use super::*;

        #[tokio::test]
        async fn full_match_is_grade_a() {
            let fx = fixture();
            let analyst = AnalystId::new_v4();
            prefer_fintech_seed_na(&fx, analyst).await;

            let outcome = fx
                .service
                .add(analyst, draft("Acme", "Fintech", "Seed", "North America"))
                .await
                .unwrap();

            assert!(outcome.is_created());
            assert_eq!(outcome.message(), "Company added successfully");
            assert_eq!(outcome.company().rating.grade(), Grade::A);
        }

        #[tokio::test]
        async fn no_preferences_is_grade_d() {
            let fx = fixture();
            let outcome = fx
                .service
                .add(
                    AnalystId::new_v4(),
                    draft("Acme", "Fintech", "Seed", "North America"),
                )
                .await
                .unwrap();
            assert_eq!(outcome.company().rating.grade(), Grade::D);
        }

        #[tokio::test]
        async fn repeat_within_window_returns_existing() {
            let fx = fixture();
            let analyst = AnalystId::new_v4();

            let first = fx
                .service
                .add_at(analyst, draft("Acme", "Fintech", "Seed", "NA"), at(1_000))
                .await
                .unwrap();
            let second = fx
                .service
                .add_at(analyst, draft(" Acme ", "Fintech", "Seed", "NA"), at(1_002))
                .await
                .unwrap();

            assert!(!second.is_created());
            assert_eq!(second.message(), "Company already added");
            assert_eq!(second.company().company.id(), first.company().company.id());
            assert_eq!(fx.service.list(analyst).await.unwrap().len(), 1);
        }

        #[tokio::test]
        async fn repeat_after_window_creates_new_company() {
            let fx = fixture();
            let analyst = AnalystId::new_v4();

            fx.service
                .add_at(analyst, draft("Acme", "Fintech", "Seed", "NA"), at(1_000))
                .await
                .unwrap();
            let later = fx
                .service
                .add_at(analyst, draft("Acme", "Fintech", "Seed", "NA"), at(1_006))
                .await
                .unwrap();

            assert!(later.is_created());
            assert_eq!(fx.service.list(analyst).await.unwrap().len(), 2);
        }

        #[tokio::test]
        async fn window_is_configurable() {
            let fx = fixture();
            let service = fx.service.clone().with_duplicate_window(Duration::from_secs(60));
            let analyst = AnalystId::new_v4();

            service
                .add_at(analyst, draft("Acme", "Fintech", "Seed", "NA"), at(1_000))
                .await
                .unwrap();
            let repeat = service
                .add_at(analyst, draft("Acme", "Fintech", "Seed", "NA"), at(1_030))
                .await
                .unwrap();
            assert!(!repeat.is_created());
        }

        #[tokio::test]
        async fn other_analysts_do_not_trigger_duplicate() {
            let fx = fixture();
            fx.service
                .add_at(AnalystId::new_v4(), draft("Acme", "Fintech", "Seed", "NA"), at(1_000))
                .await
                .unwrap();
            let outcome = fx
                .service
                .add_at(AnalystId::new_v4(), draft("Acme", "Fintech", "Seed", "NA"), at(1_001))
                .await
                .unwrap();
            assert!(outcome.is_created());
        }

        #[tokio::test]
        async fn missing_stage_stores_nothing() {
            let fx = fixture();
            let analyst = AnalystId::new_v4();
            let mut d = draft("Acme", "Fintech", "Seed", "NA");
            d.stage = None;

            let err = fx.service.add(analyst, d).await.unwrap_err();
            assert_eq!(err.field(), Some("stage"));
            assert!(fx.service.list(analyst).await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn list_is_newest_first_and_reflects_new_preferences() {
        let fx = fixture();
        let analyst = AnalystId::new_v4();
        fx.service
            .add_at(analyst, draft("Old", "Fintech", "Seed", "North America"), at(1_000))
            .await
            .unwrap();
        fx.service
            .add_at(analyst, draft("New", "Gaming", "Series A", "Asia"), at(2_000))
            .await
            .unwrap();

        let before = fx.service.list(analyst).await.unwrap();
        assert_eq!(before[0].company.name(), "New");
        assert!(before.iter().all(|r| r.rating.grade() == Grade::D));

        prefer_fintech_seed_na(&fx, analyst).await;
        let after = fx.service.list(analyst).await.unwrap();
        assert_eq!(after[1].company.name(), "Old");
        assert_eq!(after[1].rating.grade(), Grade::A);
        assert_eq!(after[0].rating.grade(), Grade::D);
    }

    #[tokio::test]
    async fn get_enforces_ownership() {
        let fx = fixture();
        let owner = AnalystId::new_v4();
        let outcome = fx
            .service
            .add(owner, draft("Acme", "Fintech", "Seed", "NA"))
            .await
            .unwrap();
        let id = outcome.company().company.id().to_string();

        assert!(fx.service.get(owner, &id).await.is_ok());
        let err = fx.service.get(AnalystId::new_v4(), &id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_by_non_owner_is_not_found_and_keeps_company() {
        let fx = fixture();
        let owner = AnalystId::new_v4();
        let outcome = fx
            .service
            .add(owner, draft("Acme", "Fintech", "Seed", "NA"))
            .await
            .unwrap();
        let id = outcome.company().company.id().to_string();

        let err = fx.service.delete(AnalystId::new_v4(), &id).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(fx.service.list(owner).await.unwrap().len(), 1);

        fx.service.delete(owner, &id).await.unwrap();
        assert!(fx.service.list(owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_id_is_not_found() {
        let fx = fixture();
        let err = fx.service.delete(AnalystId::new_v4(), "42").await.unwrap_err();
        assert!(err.is_not_found());
        let err = fx.service.get(AnalystId::new_v4(), "nope").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
