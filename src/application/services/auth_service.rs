//! # Authentication Service
//!
//! Registration, login and session resolution.
//!
//! Login failures never reveal whether the email or the password was
//! wrong: both surface as [`ApplicationError::InvalidCredentials`].

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::Analyst;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{AnalystId, EmailAddress};
use crate::infrastructure::credentials::CredentialHasher;
use crate::infrastructure::persistence::AnalystRepository;
use crate::infrastructure::session::SessionIssuer;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Registration form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterCommand {
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Password.
    #[serde(default)]
    pub password: Option<String>,
    /// Password repeated.
    #[serde(default)]
    pub confirm_password: Option<String>,
}

/// Login form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginCommand {
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Password.
    #[serde(default)]
    pub password: Option<String>,
}

/// An authenticated analyst with a freshly issued token.
#[derive(Debug, Clone)]
pub struct Session {
    /// The analyst.
    pub analyst: Analyst,
    /// Signed session token.
    pub token: String,
}

/// Registers analysts and verifies their credentials.
#[derive(Debug, Clone)]
pub struct AuthService {
    analysts: Arc<dyn AnalystRepository>,
    hasher: Arc<dyn CredentialHasher>,
    sessions: SessionIssuer,
}

impl AuthService {
    /// Creates a new auth service.
    #[must_use]
    pub fn new(
        analysts: Arc<dyn AnalystRepository>,
        hasher: Arc<dyn CredentialHasher>,
        sessions: SessionIssuer,
    ) -> Self {
        Self {
            analysts,
            hasher,
            sessions,
        }
    }

    /// Creates an analyst and logs them in.
    ///
    /// # Errors
    ///
    /// - `Validation` for a missing or malformed email, an empty password,
    ///   or a confirmation that does not match
    /// - `EmailTaken` if the email is already registered
    #[tracing::instrument(skip_all)]
    pub async fn register(&self, cmd: RegisterCommand) -> ApplicationResult<Session> {
        let email: EmailAddress = cmd.email.as_deref().unwrap_or_default().parse()?;
        let password = cmd
            .password
            .filter(|p| !p.is_empty())
            .ok_or(DomainError::MissingField("password"))?;
        let confirm = cmd
            .confirm_password
            .ok_or(DomainError::MissingField("confirm_password"))?;
        if confirm != password {
            return Err(ApplicationError::validation(
                "confirm_password",
                "Passwords do not match",
            ));
        }

        if self.analysts.find_by_email(&email).await?.is_some() {
            warn!(%email, "registration rejected: email already registered");
            return Err(ApplicationError::EmailTaken);
        }

        let hash = self.hasher.hash(&password)?;
        let analyst = Analyst::new(email, hash);

        // A concurrent registration can still win the race; the store's
        // uniqueness check has the final word.
        self.analysts.insert(&analyst).await.map_err(|e| {
            if e.is_duplicate() {
                ApplicationError::EmailTaken
            } else {
                e.into()
            }
        })?;

        info!(analyst = %analyst.id(), "analyst registered");
        self.open_session(analyst)
    }

    /// Verifies credentials and issues a session.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` for any mismatch, including an unknown
    /// or malformed email.
    #[tracing::instrument(skip_all)]
    pub async fn login(&self, cmd: LoginCommand) -> ApplicationResult<Session> {
        let Ok(email) = cmd.email.as_deref().unwrap_or_default().parse::<EmailAddress>() else {
            warn!("login rejected: malformed email");
            return Err(ApplicationError::InvalidCredentials);
        };
        let password = cmd.password.unwrap_or_default();

        let Some(analyst) = self.analysts.find_by_email(&email).await? else {
            warn!(%email, "login rejected: unknown email");
            return Err(ApplicationError::InvalidCredentials);
        };

        if !self.hasher.verify(&password, analyst.password_hash())? {
            warn!(analyst = %analyst.id(), "login rejected: wrong password");
            return Err(ApplicationError::InvalidCredentials);
        }

        info!(analyst = %analyst.id(), "analyst logged in");
        self.open_session(analyst)
    }

    /// Resolves a session token to a registered analyst's id.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the token is invalid or expired, or if it
    /// names an analyst that is not stored.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AnalystId> {
        let id = self
            .sessions
            .validate(token)
            .map_err(|_| ApplicationError::Unauthorized)?;

        if self.analysts.get(&id).await?.is_none() {
            warn!(analyst = %id, "session rejected: unknown analyst");
            return Err(ApplicationError::Unauthorized);
        }
        Ok(id)
    }

    /// Loads the analyst behind a session.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the analyst no longer exists.
    pub async fn current_analyst(&self, id: &AnalystId) -> ApplicationResult<Analyst> {
        self.analysts
            .get(id)
            .await?
            .ok_or(ApplicationError::Unauthorized)
    }

    fn open_session(&self, analyst: Analyst) -> ApplicationResult<Session> {
        let token = self.sessions.issue(analyst.id())?;
        Ok(Session { analyst, token })
    }
}
