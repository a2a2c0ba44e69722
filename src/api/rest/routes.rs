//! # Routes
//!
//! Router construction.

use crate::api::rest::handlers::{
    AppState, add_company, dashboard, delete_company, get_company, get_preferences, health,
    list_companies, login, logout, register, save_preferences,
};
use axum::Router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::Method;
use axum::routing::{delete, get, post};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builds the application router.
///
/// Browser-style paths (`/register`, `/add_company`, ...) and their `/api`
/// counterparts share the same handlers.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    Router::new()
        .route("/health", get(health))
        // Session
        .route("/register", post(register))
        .route("/api/register", post(register))
        .route("/login", post(login))
        .route("/api/login", post(login))
        .route("/logout", get(logout))
        .route("/api/logout", get(logout))
        // Dashboard
        .route("/dashboard", get(dashboard))
        // Companies
        .route("/add_company", post(add_company))
        .route("/api/companies", get(list_companies).post(add_company))
        .route("/api/companies/{id}", get(get_company).delete(delete_company))
        .route("/delete_company/{id}", delete(delete_company))
        // Preferences
        .route("/api/preferences", get(get_preferences).post(save_preferences))
        .route("/save_preferences", post(save_preferences))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
