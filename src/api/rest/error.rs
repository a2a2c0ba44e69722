//! # REST Errors
//!
//! Maps application errors and request rejections onto HTTP responses.
//!
//! | Error | Status | Body `error` |
//! |-------|--------|--------------|
//! | `Validation`, `EmailTaken`, malformed body | 400 | specific message |
//! | `InvalidCredentials` | 401 | `Invalid email or password` |
//! | `Unauthorized` | 401 | `Authentication required` |
//! | `NotFound` | 404 | `<Resource> not found` |
//! | `Infrastructure` | 500 | `An internal error occurred` |
//!
//! Internal details are logged, never returned.

use crate::api::rest::handlers::ErrorResponse;
use crate::application::error::ApplicationError;
use axum::Json;
use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Error returned by REST handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A use case failed.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// The request could not be parsed.
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    /// Creates a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Application(err) => match err {
                ApplicationError::Validation { .. } | ApplicationError::EmailTaken => {
                    StatusCode::BAD_REQUEST
                }
                ApplicationError::InvalidCredentials | ApplicationError::Unauthorized => {
                    StatusCode::UNAUTHORIZED
                }
                ApplicationError::NotFound { .. } => StatusCode::NOT_FOUND,
                ApplicationError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            Self::BadRequest(message) => ErrorResponse::new(message.clone()),
            Self::Application(err) => match err {
                ApplicationError::NotFound { resource_type, .. } => {
                    ErrorResponse::new(format!("{resource_type} not found"))
                }
                ApplicationError::Infrastructure(_) => {
                    ErrorResponse::new("An internal error occurred")
                }
                other => ErrorResponse {
                    field: other.field().map(str::to_string),
                    ..ErrorResponse::new(other.to_string())
                },
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(self.body())).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
