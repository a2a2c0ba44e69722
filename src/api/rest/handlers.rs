//! # REST Handlers
//!
//! Request handlers, shared state and response bodies.
//!
//! Every JSON body carries `success`. Failures add `error` (and `field`
//! when one input is to blame); see [`crate::api::rest::error`].

use crate::api::rest::error::ApiError;
use crate::api::rest::extract::{ApiJson, AuthenticatedAnalyst, JsonOrForm, SESSION_COOKIE};
use crate::application::services::{
    AuthService, CompanyService, Dashboard, DashboardService, LoginCommand, PreferenceService,
    RegisterCommand, Session,
};
use crate::domain::entities::{Analyst, CompanyDraft, PreferenceModel};
use crate::domain::services::{MatchBreakdown, RatedCompany, RatingStrategy};
use crate::domain::value_objects::Grade;
use crate::infrastructure::credentials::CredentialHasher;
use crate::infrastructure::persistence::{
    AnalystRepository, CompanyRepository, PreferenceRepository,
};
use crate::infrastructure::session::SessionIssuer;
use axum::Json;
use axum::extract::{Path, State};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Registration, login, sessions.
    pub auth: AuthService,
    /// Company use cases.
    pub companies: CompanyService,
    /// Preference use cases.
    pub preferences: PreferenceService,
    /// Landing view.
    pub dashboard: DashboardService,
    /// Mark session cookies `Secure`.
    pub secure_cookies: bool,
}

/// Everything [`AppState::new`] wires together.
#[derive(Debug, Clone)]
pub struct AppComponents {
    /// Analyst storage.
    pub analysts: Arc<dyn AnalystRepository>,
    /// Company storage.
    pub companies: Arc<dyn CompanyRepository>,
    /// Preference storage.
    pub preferences: Arc<dyn PreferenceRepository>,
    /// Password hasher.
    pub hasher: Arc<dyn CredentialHasher>,
    /// Fit-rating strategy.
    pub strategy: Arc<dyn RatingStrategy>,
    /// Session token issuer.
    pub sessions: SessionIssuer,
    /// Duplicate-submission window.
    pub duplicate_window: Duration,
    /// Mark session cookies `Secure`.
    pub secure_cookies: bool,
}

impl AppState {
    /// Builds the services from their components.
    #[must_use]
    pub fn new(components: AppComponents) -> Self {
        let auth = AuthService::new(
            components.analysts,
            components.hasher,
            components.sessions,
        );
        let companies = CompanyService::new(
            components.companies,
            components.preferences.clone(),
            components.strategy,
        )
        .with_duplicate_window(components.duplicate_window);
        let preferences = PreferenceService::new(components.preferences);
        let dashboard = DashboardService::new(auth.clone(), companies.clone(), preferences.clone());

        Self {
            auth,
            companies,
            preferences,
            dashboard,
            secure_cookies: components.secure_cookies,
        }
    }

    fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookies)
            .path("/")
            .build()
    }
}

// ============================================================================
// Response bodies
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok`.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Crate version.
    pub version: String,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Client-facing message.
    pub error: String,
    /// Offending input field, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    /// Creates an error body with `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
            field: None,
        }
    }
}

/// Plain acknowledgement.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Always `true`.
    pub success: bool,
    /// What happened.
    pub message: String,
}

impl MessageResponse {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Public view of an analyst.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalystResponse {
    /// Analyst id.
    pub id: String,
    /// Canonical email.
    pub email: String,
    /// Registration time (RFC 3339).
    pub created_at: String,
}

impl From<&Analyst> for AnalystResponse {
    fn from(analyst: &Analyst) -> Self {
        Self {
            id: analyst.id().to_string(),
            email: analyst.email().to_string(),
            created_at: analyst.created_at().to_iso8601(),
        }
    }
}

/// Login or registration result.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Always `true`.
    pub success: bool,
    /// What happened.
    pub message: String,
    /// The analyst.
    pub user: AnalystResponse,
    /// Session token, also set as the session cookie.
    pub token: String,
}

/// A company with its fit rating.
#[derive(Debug, Serialize, Deserialize)]
pub struct CompanyResponse {
    /// Company id.
    pub id: String,
    /// Name.
    pub name: String,
    /// Industry as entered.
    pub industry: String,
    /// Stage as entered.
    pub stage: String,
    /// Location as entered.
    pub location: String,
    /// Website.
    pub website: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// The analyst's own grade.
    pub rating: Option<Grade>,
    /// Computed fit grade.
    pub otani_rating: Grade,
    /// Per-axis matches behind `otani_rating`.
    #[serde(rename = "match")]
    pub matches: MatchBreakdown,
    /// Creation time (RFC 3339).
    pub created_at: String,
    /// Last update time (RFC 3339).
    pub updated_at: String,
}

impl From<RatedCompany> for CompanyResponse {
    fn from(rated: RatedCompany) -> Self {
        let RatedCompany { company, rating } = rated;
        Self {
            id: company.id().to_string(),
            name: company.name().to_string(),
            industry: company.industry().to_string(),
            stage: company.stage().to_string(),
            location: company.location().to_string(),
            website: company.website().map(str::to_string),
            email: company.contact_email().map(str::to_string),
            description: company.description().map(str::to_string),
            rating: company.analyst_rating(),
            otani_rating: rating.grade(),
            matches: rating.matches(),
            created_at: company.created_at().to_iso8601(),
            updated_at: company.updated_at().to_iso8601(),
        }
    }
}

/// Response to adding a company.
#[derive(Debug, Serialize, Deserialize)]
pub struct AddCompanyResponse {
    /// Always `true`.
    pub success: bool,
    /// `Company added successfully` or `Company already added`.
    pub message: String,
    /// The stored company.
    pub company: CompanyResponse,
}

/// One company.
#[derive(Debug, Serialize, Deserialize)]
pub struct CompanyEnvelope {
    /// Always `true`.
    pub success: bool,
    /// The company.
    pub company: CompanyResponse,
}

/// A list of companies.
#[derive(Debug, Serialize, Deserialize)]
pub struct CompanyListResponse {
    /// Always `true`.
    pub success: bool,
    /// Companies, newest first.
    pub companies: Vec<CompanyResponse>,
}

/// A preference model.
#[derive(Debug, Serialize, Deserialize)]
pub struct PreferenceResponse {
    /// Normalized industries.
    pub industry: Vec<String>,
    /// Normalized stages.
    pub stage: Vec<String>,
    /// Normalized locations.
    pub location: Vec<String>,
    /// Normalized investment-size bands.
    pub investment_amount: Vec<String>,
    /// Free-text notes.
    pub additional_info: String,
    /// Last save time (RFC 3339).
    pub updated_at: String,
}

impl From<&PreferenceModel> for PreferenceResponse {
    fn from(model: &PreferenceModel) -> Self {
        Self {
            industry: model.industries().to_vec(),
            stage: model.stages().to_vec(),
            location: model.locations().to_vec(),
            investment_amount: model.investment_sizes().to_vec(),
            additional_info: model.additional_info().to_string(),
            updated_at: model.updated_at().to_iso8601(),
        }
    }
}

/// Preference read or save result.
#[derive(Debug, Serialize, Deserialize)]
pub struct PreferenceEnvelope {
    /// Always `true`.
    pub success: bool,
    /// Present after a save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The model; `null` if none was ever saved.
    pub data: Option<PreferenceResponse>,
}

/// The dashboard.
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    /// Always `true`.
    pub success: bool,
    /// The analyst.
    pub analyst: AnalystResponse,
    /// Their preferences.
    pub preferences: PreferenceResponse,
    /// Their companies, newest first.
    pub companies: Vec<CompanyResponse>,
}

impl From<Dashboard> for DashboardResponse {
    fn from(view: Dashboard) -> Self {
        Self {
            success: true,
            analyst: AnalystResponse::from(&view.analyst),
            preferences: PreferenceResponse::from(&view.preferences),
            companies: view.companies.into_iter().map(CompanyResponse::from).collect(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn auth_response(
    state: &AppState,
    jar: CookieJar,
    session: Session,
    message: &str,
) -> (CookieJar, Json<AuthResponse>) {
    let jar = jar.add(state.session_cookie(session.token.clone()));
    (
        jar,
        Json(AuthResponse {
            success: true,
            message: message.to_string(),
            user: AnalystResponse::from(&session.analyst),
            token: session.token,
        }),
    )
}

/// `POST /register`
pub async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    JsonOrForm(cmd): JsonOrForm<RegisterCommand>,
) -> Result<(CookieJar, Json<AuthResponse>), ApiError> {
    let session = state.auth.register(cmd).await?;
    Ok(auth_response(&state, jar, session, "Registration successful"))
}

/// `POST /login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    JsonOrForm(cmd): JsonOrForm<LoginCommand>,
) -> Result<(CookieJar, Json<AuthResponse>), ApiError> {
    let session = state.auth.login(cmd).await?;
    Ok(auth_response(&state, jar, session, "Login successful"))
}

/// `GET /logout`
///
/// Always answers with an expired session cookie, whether or not the
/// request carried one.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.add(Cookie::build((SESSION_COOKIE, "")).path("/").removal());
    (jar, Json(MessageResponse::ok("Logged out successfully")))
}

/// `GET /dashboard`
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    analyst: AuthenticatedAnalyst,
) -> Result<Json<DashboardResponse>, ApiError> {
    let view = state.dashboard.load(analyst.id()).await?;
    Ok(Json(DashboardResponse::from(view)))
}

/// `POST /add_company`
pub async fn add_company(
    State(state): State<Arc<AppState>>,
    analyst: AuthenticatedAnalyst,
    ApiJson(draft): ApiJson<CompanyDraft>,
) -> Result<Json<AddCompanyResponse>, ApiError> {
    let outcome = state.companies.add(analyst.id(), draft).await?;
    let message = outcome.message().to_string();
    Ok(Json(AddCompanyResponse {
        success: true,
        message,
        company: CompanyResponse::from(outcome.into_company()),
    }))
}

/// `GET /api/companies`
pub async fn list_companies(
    State(state): State<Arc<AppState>>,
    analyst: AuthenticatedAnalyst,
) -> Result<Json<CompanyListResponse>, ApiError> {
    let companies = state.companies.list(analyst.id()).await?;
    Ok(Json(CompanyListResponse {
        success: true,
        companies: companies.into_iter().map(CompanyResponse::from).collect(),
    }))
}

/// `GET /api/companies/{id}`
pub async fn get_company(
    State(state): State<Arc<AppState>>,
    analyst: AuthenticatedAnalyst,
    Path(id): Path<String>,
) -> Result<Json<CompanyEnvelope>, ApiError> {
    let company = state.companies.get(analyst.id(), &id).await?;
    Ok(Json(CompanyEnvelope {
        success: true,
        company: CompanyResponse::from(company),
    }))
}

/// `DELETE /delete_company/{id}`
pub async fn delete_company(
    State(state): State<Arc<AppState>>,
    analyst: AuthenticatedAnalyst,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.companies.delete(analyst.id(), &id).await?;
    Ok(Json(MessageResponse::ok("Company deleted successfully")))
}

/// `GET /api/preferences`
pub async fn get_preferences(
    State(state): State<Arc<AppState>>,
    analyst: AuthenticatedAnalyst,
) -> Result<Json<PreferenceEnvelope>, ApiError> {
    let model = state.preferences.get(analyst.id()).await?;
    Ok(Json(PreferenceEnvelope {
        success: true,
        message: None,
        data: model.as_ref().map(PreferenceResponse::from),
    }))
}

/// `POST /api/preferences`
pub async fn save_preferences(
    State(state): State<Arc<AppState>>,
    analyst: AuthenticatedAnalyst,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<PreferenceEnvelope>, ApiError> {
    let model = state.preferences.save(analyst.id(), &body).await?;
    Ok(Json(PreferenceEnvelope {
        success: true,
        message: Some("Preferences saved successfully".to_string()),
        data: Some(PreferenceResponse::from(&model)),
    }))
}
