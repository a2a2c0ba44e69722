//! # Dashboard
//!
//! The landing view: who is logged in, their preferences (created empty on
//! first visit) and their rated companies, newest first.

use crate::application::error::ApplicationResult;
use crate::application::services::{AuthService, CompanyService, PreferenceService};
use crate::domain::entities::{Analyst, PreferenceModel};
use crate::domain::services::RatedCompany;
use crate::domain::value_objects::AnalystId;

/// Everything the dashboard shows.
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// The logged-in analyst.
    pub analyst: Analyst,
    /// Their preference model.
    pub preferences: PreferenceModel,
    /// Their companies, newest first.
    pub companies: Vec<RatedCompany>,
}

/// Assembles [`Dashboard`]s.
#[derive(Debug, Clone)]
pub struct DashboardService {
    auth: AuthService,
    companies: CompanyService,
    preferences: PreferenceService,
}

impl DashboardService {
    /// Creates a new dashboard service.
    #[must_use]
    pub fn new(
        auth: AuthService,
        companies: CompanyService,
        preferences: PreferenceService,
    ) -> Self {
        Self {
            auth,
            companies,
            preferences,
        }
    }

    /// Loads the dashboard for `analyst`.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the analyst no longer exists, or an
    /// infrastructure error if storage fails.
    #[tracing::instrument(skip_all, fields(analyst = %analyst))]
    pub async fn load(&self, analyst: AnalystId) -> ApplicationResult<Dashboard> {
        let account = self.auth.current_analyst(&analyst).await?;
        let preferences = self.preferences.ensure(analyst).await?;
        let companies = self
            .companies
            .list_against(analyst, Some(&preferences))
            .await?;

        Ok(Dashboard {
            analyst: account,
            preferences,
            companies,
        })
    }
}
