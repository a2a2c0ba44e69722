//! # REST API
//!
//! JSON endpoints using axum.
//!
//! # Endpoints
//!
//! ## Session
//! - `POST /register` - Create an account and log in (JSON or form)
//! - `POST /login` - Log in (JSON or form)
//! - `GET /logout` - Clear the session cookie
//!
//! ## Dashboard
//! - `GET /dashboard` - Analyst, preferences and rated companies
//!
//! ## Companies
//! - `POST /add_company` - Record a company
//! - `GET /api/companies` - List companies, newest first
//! - `GET /api/companies/{id}` - Get one company
//! - `DELETE /delete_company/{id}` - Delete a company
//!
//! ## Preferences
//! - `GET /api/preferences` - Current preferences (`data` may be `null`)
//! - `POST /api/preferences` - Replace preferences (alias `POST /save_preferences`)
//!
//! ## Health
//! - `GET /health` - Health check endpoint
//!
//! Every endpoint except session and health requires the `otani_session`
//! cookie or an `Authorization: Bearer` token.
//!
//! # Usage
//!
//! ```ignore
//! use otani::api::rest::{create_router, AppComponents, AppState};
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState::new(components));
//! let router = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;

#[cfg(test)]
mod tests;

pub use error::ApiError;
pub use extract::{ApiJson, AuthenticatedAnalyst, JsonOrForm, SESSION_COOKIE};
pub use handlers::{
    AddCompanyResponse, AnalystResponse, AppComponents, AppState, AuthResponse, CompanyEnvelope,
    CompanyListResponse, CompanyResponse, DashboardResponse, ErrorResponse, HealthResponse,
    MessageResponse, PreferenceEnvelope, PreferenceResponse,
};
pub use routes::create_router;
