//! HTTP tests driving the full router over in-memory storage.

#![allow(clippy::unwrap_used)]

use super::*;
use crate::domain::services::PreferenceMatchStrategy;
use crate::domain::value_objects::AnalystId;
use crate::infrastructure::credentials::{CredentialError, CredentialHasher};
use crate::infrastructure::persistence::in_memory::{
    InMemoryAnalystRepository, InMemoryCompanyRepository, InMemoryPreferenceRepository,
};
use crate::infrastructure::session::SessionIssuer;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// Reversible stand-in so tests don't pay for Argon2.
#[derive(Debug)]
struct PlainHasher;

impl CredentialHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, CredentialError> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialError> {
        Ok(hash == format!("plain:{password}"))
    }
}

fn create_test_app() -> axum::Router {
    let state = AppState::new(AppComponents {
        analysts: Arc::new(InMemoryAnalystRepository::new()),
        companies: Arc::new(InMemoryCompanyRepository::new()),
        preferences: Arc::new(InMemoryPreferenceRepository::new()),
        hasher: Arc::new(PlainHasher),
        strategy: Arc::new(PreferenceMatchStrategy),
        sessions: SessionIssuer::new("test-secret", 3600),
        duplicate_window: Duration::from_secs(5),
        secure_cookies: false,
    });
    create_router(Arc::new(state))
}

struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    json: Value,
}

async fn send(app: &axum::Router, request: Request<Body>) -> Reply {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    Reply {
        status,
        headers,
        json,
    }
}

async fn request_json(
    app: &axum::Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(b) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&b).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send(app, request).await
}

async fn register(app: &axum::Router, email: &str) -> String {
    let reply = request_json(
        app,
        Method::POST,
        "/register",
        None,
        Some(json!({"email": email, "password": "pw", "confirm_password": "pw"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK, "{}", reply.json);
    reply.json["token"].as_str().unwrap().to_string()
}

fn company(name: &str, industry: &str, stage: &str, location: &str) -> Value {
    json!({"name": name, "industry": industry, "stage": stage, "location": location})
}

fn fintech_seed_na() -> Value {
    json!({
        "industry": ["fintech"],
        "stage": ["seed"],
        "location": ["north_america"],
        "investment_amount": ["1m_5m"],
        "additional_info": ""
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Health & session
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_check() {
    let app = create_test_app();
    let reply = request_json(&app, Method::GET, "/health", None, None).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json["status"], "ok");
    assert_eq!(reply.json["service"], "otani");
}

#[tokio::test]
async fn register_sets_http_only_session_cookie() {
    let app = create_test_app();
    let reply = request_json(
        &app,
        Method::POST,
        "/register",
        None,
        Some(json!({"email": "Ana@Fund.vc", "password": "pw", "confirm_password": "pw"})),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json["success"], true);
    assert_eq!(reply.json["user"]["email"], "ana@fund.vc");

    let cookie = reply.headers[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with(&format!("{SESSION_COOKIE}=")));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn register_accepts_form_body() {
    let app = create_test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/register")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(
            "email=bob%40fund.vc&password=pw&confirm_password=pw",
        ))
        .unwrap();
    let reply = send(&app, request).await;

    assert_eq!(reply.status, StatusCode::OK, "{}", reply.json);
    assert_eq!(reply.json["user"]["email"], "bob@fund.vc");
}

#[tokio::test]
async fn duplicate_registration_is_400() {
    let app = create_test_app();
    register(&app, "ana@fund.vc").await;

    let reply = request_json(
        &app,
        Method::POST,
        "/register",
        None,
        Some(json!({"email": "ana@fund.vc", "password": "x", "confirm_password": "x"})),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.json["success"], false);
    assert_eq!(reply.json["error"], "Email already registered");
}

#[tokio::test]
async fn mismatched_passwords_are_400() {
    let app = create_test_app();
    let reply = request_json(
        &app,
        Method::POST,
        "/register",
        None,
        Some(json!({"email": "ana@fund.vc", "password": "a", "confirm_password": "b"})),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.json["field"], "confirm_password");
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = create_test_app();
    register(&app, "ana@fund.vc").await;

    let wrong_password = request_json(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({"email": "ana@fund.vc", "password": "nope"})),
    )
    .await;
    let unknown_email = request_json(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({"email": "who@fund.vc", "password": "pw"})),
    )
    .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.json, unknown_email.json);
    assert_eq!(wrong_password.json["error"], "Invalid email or password");
}

#[tokio::test]
async fn login_returns_working_token() {
    let app = create_test_app();
    register(&app, "ana@fund.vc").await;

    let reply = request_json(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({"email": "ana@fund.vc", "password": "pw"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    let token = reply.json["token"].as_str().unwrap();

    let list = request_json(&app, Method::GET, "/api/companies", Some(token), None).await;
    assert_eq!(list.status, StatusCode::OK);
}

#[tokio::test]
async fn session_cookie_authenticates() {
    let app = create_test_app();
    let token = register(&app, "ana@fund.vc").await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/companies")
        .header(header::COOKIE, format!("{SESSION_COOKIE}={token}"))
        .body(Body::empty())
        .unwrap();
    let reply = send(&app, request).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json["companies"], json!([]));
}

#[tokio::test]
async fn protected_routes_require_session() {
    let app = create_test_app();
    for (method, uri) in [
        (Method::GET, "/dashboard"),
        (Method::GET, "/api/companies"),
        (Method::GET, "/api/preferences"),
        (Method::POST, "/add_company"),
        (Method::DELETE, "/delete_company/00000000-0000-0000-0000-000000000000"),
    ] {
        let reply = request_json(&app, method, uri, None, Some(json!({}))).await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(reply.json["success"], false);
    }

    let forged = request_json(&app, Method::GET, "/dashboard", Some("forged.token.value"), None).await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn signed_token_for_unknown_analyst_is_401() {
    let app = create_test_app();
    let token = SessionIssuer::new("test-secret", 3600)
        .issue(AnalystId::new_v4())
        .unwrap();

    let added = request_json(
        &app,
        Method::POST,
        "/add_company",
        Some(&token),
        Some(company("Ghost", "Fintech", "Seed", "Europe")),
    )
    .await;
    assert_eq!(added.status, StatusCode::UNAUTHORIZED);

    let listed = request_json(&app, Method::GET, "/api/companies", Some(&token), None).await;
    assert_eq!(listed.status, StatusCode::UNAUTHORIZED);

    let prefs = request_json(
        &app,
        Method::POST,
        "/api/preferences",
        Some(&token),
        Some(fintech_seed_na()),
    )
    .await;
    assert_eq!(prefs.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn stale_cookie_falls_back_to_bearer() {
    let app = create_test_app();
    let token = register(&app, "ana@fund.vc").await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/companies")
        .header(header::COOKIE, format!("{SESSION_COOKIE}=expired.or.forged"))
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let reply = send(&app, request).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json["companies"], json!([]));
}

#[tokio::test]
async fn logout_clears_cookie() {
    let app = create_test_app();
    let reply = request_json(&app, Method::GET, "/logout", None, None).await;

    assert_eq!(reply.status, StatusCode::OK);
    let cookie = reply.headers[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with(&format!("{SESSION_COOKIE}=")));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn logout_expires_presented_cookie() {
    let app = create_test_app();
    let token = register(&app, "ana@fund.vc").await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/logout")
        .header(header::COOKIE, format!("{SESSION_COOKIE}={token}"))
        .body(Body::empty())
        .unwrap();
    let reply = send(&app, request).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json["message"], "Logged out successfully");
    let cookie = reply.headers[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with(&format!("{SESSION_COOKIE}=;")));
    assert!(cookie.contains("Max-Age=0"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Companies
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn full_match_is_grade_a() {
    let app = create_test_app();
    let token = register(&app, "ana@fund.vc").await;

    let saved = request_json(
        &app,
        Method::POST,
        "/api/preferences",
        Some(&token),
        Some(fintech_seed_na()),
    )
    .await;
    assert_eq!(saved.status, StatusCode::OK);

    let reply = request_json(
        &app,
        Method::POST,
        "/add_company",
        Some(&token),
        Some(company("Acme", "Fintech", "Seed", "North America")),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json["message"], "Company added successfully");
    assert_eq!(reply.json["company"]["otani_rating"], "A");
    assert_eq!(
        reply.json["company"]["match"],
        json!({"industry": true, "stage": true, "location": true})
    );
}

#[tokio::test]
async fn no_match_is_grade_d() {
    let app = create_test_app();
    let token = register(&app, "ana@fund.vc").await;
    request_json(&app, Method::POST, "/api/preferences", Some(&token), Some(fintech_seed_na())).await;

    let reply = request_json(
        &app,
        Method::POST,
        "/add_company",
        Some(&token),
        Some(company("Acme", "Biotech", "Series B", "Europe")),
    )
    .await;

    assert_eq!(reply.json["company"]["otani_rating"], "D");
}

#[tokio::test]
async fn optional_fields_are_returned() {
    let app = create_test_app();
    let token = register(&app, "ana@fund.vc").await;

    let reply = request_json(
        &app,
        Method::POST,
        "/add_company",
        Some(&token),
        Some(json!({
            "name": "Acme", "industry": "Fintech", "stage": "Seed", "location": "NA",
            "website": "https://acme.example", "email": "ceo@acme.example",
            "description": "Payments", "rating": "b"
        })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    let c = &reply.json["company"];
    assert_eq!(c["website"], "https://acme.example");
    assert_eq!(c["email"], "ceo@acme.example");
    assert_eq!(c["rating"], "B");
}

#[tokio::test]
async fn quick_resubmission_is_already_added() {
    let app = create_test_app();
    let token = register(&app, "ana@fund.vc").await;
    let body = company("Acme", "Fintech", "Seed", "North America");

    let first = request_json(&app, Method::POST, "/add_company", Some(&token), Some(body.clone())).await;
    let second = request_json(&app, Method::POST, "/add_company", Some(&token), Some(body)).await;

    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.json["message"], "Company already added");
    assert_eq!(second.json["company"]["id"], first.json["company"]["id"]);

    let list = request_json(&app, Method::GET, "/api/companies", Some(&token), None).await;
    assert_eq!(list.json["companies"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_stage_is_400_and_stores_nothing() {
    let app = create_test_app();
    let token = register(&app, "ana@fund.vc").await;

    let reply = request_json(
        &app,
        Method::POST,
        "/add_company",
        Some(&token),
        Some(json!({"name": "Acme", "industry": "Fintech", "location": "NA"})),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.json["field"], "stage");
    assert!(reply.json["error"].as_str().unwrap().contains("stage"));

    let list = request_json(&app, Method::GET, "/api/companies", Some(&token), None).await;
    assert_eq!(list.json["companies"], json!([]));
}

#[tokio::test]
async fn malformed_json_is_enveloped_400() {
    let app = create_test_app();
    let token = register(&app, "ana@fund.vc").await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/add_company")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let reply = send(&app, request).await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.json["success"], false);
}

#[tokio::test]
async fn companies_are_listed_newest_first() {
    let app = create_test_app();
    let token = register(&app, "ana@fund.vc").await;

    for name in ["First", "Second"] {
        request_json(
            &app,
            Method::POST,
            "/add_company",
            Some(&token),
            Some(company(name, "Fintech", "Seed", "NA")),
        )
        .await;
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let list = request_json(&app, Method::GET, "/api/companies", Some(&token), None).await;
    let names: Vec<&str> = list.json["companies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Second", "First"]);
}

#[tokio::test]
async fn other_analysts_cannot_see_or_delete() {
    let app = create_test_app();
    let owner = register(&app, "owner@fund.vc").await;
    let intruder = register(&app, "intruder@fund.vc").await;

    let added = request_json(
        &app,
        Method::POST,
        "/add_company",
        Some(&owner),
        Some(company("Acme", "Fintech", "Seed", "NA")),
    )
    .await;
    let id = added.json["company"]["id"].as_str().unwrap().to_string();

    let peek = request_json(&app, Method::GET, &format!("/api/companies/{id}"), Some(&intruder), None).await;
    assert_eq!(peek.status, StatusCode::NOT_FOUND);

    let delete = request_json(
        &app,
        Method::DELETE,
        &format!("/delete_company/{id}"),
        Some(&intruder),
        None,
    )
    .await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    let mine = request_json(&app, Method::GET, &format!("/api/companies/{id}"), Some(&owner), None).await;
    assert_eq!(mine.status, StatusCode::OK);
    assert_eq!(mine.json["company"]["name"], "Acme");

    let intruder_list = request_json(&app, Method::GET, "/api/companies", Some(&intruder), None).await;
    assert_eq!(intruder_list.json["companies"], json!([]));
}

#[tokio::test]
async fn owner_can_delete() {
    let app = create_test_app();
    let token = register(&app, "ana@fund.vc").await;
    let added = request_json(
        &app,
        Method::POST,
        "/add_company",
        Some(&token),
        Some(company("Acme", "Fintech", "Seed", "NA")),
    )
    .await;
    let id = added.json["company"]["id"].as_str().unwrap().to_string();

    let reply = request_json(&app, Method::DELETE, &format!("/delete_company/{id}"), Some(&token), None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json["success"], true);

    let again = request_json(&app, Method::DELETE, &format!("/delete_company/{id}"), Some(&token), None).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_company_id_is_404() {
    let app = create_test_app();
    let token = register(&app, "ana@fund.vc").await;

    let reply = request_json(&app, Method::DELETE, "/delete_company/42", Some(&token), None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.json["error"], "Company not found");
}

// ─────────────────────────────────────────────────────────────────────────────
// Preferences & dashboard
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn preferences_are_null_before_first_save() {
    let app = create_test_app();
    let token = register(&app, "ana@fund.vc").await;

    let reply = request_json(&app, Method::GET, "/api/preferences", Some(&token), None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json["success"], true);
    assert_eq!(reply.json["data"], Value::Null);
}

#[tokio::test]
async fn saved_preferences_are_normalized() {
    let app = create_test_app();
    let token = register(&app, "ana@fund.vc").await;

    let reply = request_json(
        &app,
        Method::POST,
        "/save_preferences",
        Some(&token),
        Some(json!({
            "industry": ["AI/ML", "Fintech"],
            "stage": ["Pre Seed"],
            "location": ["North America"],
            "investment_amount": [],
            "additional_info": "no crypto"
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json["message"], "Preferences saved successfully");

    let loaded = request_json(&app, Method::GET, "/api/preferences", Some(&token), None).await;
    assert_eq!(loaded.json["data"]["industry"], json!(["ai_ml", "fintech"]));
    assert_eq!(loaded.json["data"]["stage"], json!(["pre_seed"]));
    assert_eq!(loaded.json["data"]["additional_info"], "no crypto");
}

#[tokio::test]
async fn non_list_preference_is_400_and_keeps_previous() {
    let app = create_test_app();
    let token = register(&app, "ana@fund.vc").await;
    request_json(&app, Method::POST, "/api/preferences", Some(&token), Some(fintech_seed_na())).await;

    let mut bad = fintech_seed_na();
    bad["stage"] = json!("seed");
    bad["industry"] = json!(["biotech"]);
    let reply = request_json(&app, Method::POST, "/api/preferences", Some(&token), Some(bad)).await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.json["field"], "stage");

    let loaded = request_json(&app, Method::GET, "/api/preferences", Some(&token), None).await;
    assert_eq!(loaded.json["data"]["industry"], json!(["fintech"]));
}

#[tokio::test]
async fn preference_change_regrades_existing_companies() {
    let app = create_test_app();
    let token = register(&app, "ana@fund.vc").await;
    request_json(
        &app,
        Method::POST,
        "/add_company",
        Some(&token),
        Some(company("Acme", "Fintech", "Seed", "North America")),
    )
    .await;

    let before = request_json(&app, Method::GET, "/api/companies", Some(&token), None).await;
    assert_eq!(before.json["companies"][0]["otani_rating"], "D");

    request_json(&app, Method::POST, "/api/preferences", Some(&token), Some(fintech_seed_na())).await;

    let after = request_json(&app, Method::GET, "/api/companies", Some(&token), None).await;
    assert_eq!(after.json["companies"][0]["otani_rating"], "A");
}

#[tokio::test]
async fn dashboard_creates_empty_preferences() {
    let app = create_test_app();
    let token = register(&app, "ana@fund.vc").await;

    let view = request_json(&app, Method::GET, "/dashboard", Some(&token), None).await;
    assert_eq!(view.status, StatusCode::OK);
    assert_eq!(view.json["analyst"]["email"], "ana@fund.vc");
    assert_eq!(view.json["preferences"]["industry"], json!([]));
    assert_eq!(view.json["companies"], json!([]));

    let prefs = request_json(&app, Method::GET, "/api/preferences", Some(&token), None).await;
    assert_ne!(prefs.json["data"], Value::Null);
}
