//! # Extractors
//!
//! - [`AuthenticatedAnalyst`]: the analyst behind the session cookie or
//!   bearer token; rejects with 401 otherwise. A cookie that fails
//!   validation does not shadow a valid bearer token
//! - [`ApiJson`]: `Json` whose rejections use the error envelope
//! - [`JsonOrForm`]: accepts either a JSON or a urlencoded form body

use crate::api::rest::error::ApiError;
use crate::api::rest::handlers::AppState;
use crate::application::error::ApplicationError;
use crate::domain::value_objects::AnalystId;
use axum::extract::{FromRef, FromRequest, FromRequestParts, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::{Form, Json};
use axum_extra::extract::CookieJar;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "otani_session";

/// The analyst making the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedAnalyst(pub AnalystId);

impl AuthenticatedAnalyst {
    /// Returns the analyst id.
    #[must_use]
    pub fn id(&self) -> AnalystId {
        self.0
    }
}

impl<S> FromRequestParts<S> for AuthenticatedAnalyst
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = Arc::<AppState>::from_ref(state);

        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
        let bearer = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .map(|auth| auth.token().to_string());

        for token in cookie.into_iter().chain(bearer) {
            match app.auth.authenticate(&token).await {
                Ok(analyst) => return Ok(Self(analyst)),
                Err(ApplicationError::Unauthorized) => {}
                Err(e) => return Err(e.into()),
            }
        }
        Err(ApplicationError::Unauthorized.into())
    }
}

/// JSON body extractor with enveloped rejections.
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// JSON or urlencoded form body, chosen by `Content-Type`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned + Send + 'static,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(value) = Json::<T>::from_request(req, state).await?;
            Ok(Self(value))
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(value) = Form::<T>::from_request(req, state).await?;
            Ok(Self(value))
        } else {
            Err(ApiError::bad_request(
                "Expected a JSON or form-encoded request body",
            ))
        }
    }
}
