//! # Configuration
//!
//! Layered service configuration.
//!
//! Sources, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. `config/otani.toml` (optional)
//! 3. Environment variables prefixed `OTANI_`, nested with `__`
//!    (e.g. `OTANI_SERVER__PORT=8080`)
//!
//! A `.env` file is loaded into the environment first. `DATABASE_URL` and
//! `SECRET_KEY` fill `database.url` and `auth.jwt_secret` when those are
//! still unset after layering.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "OTANI";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listener.
    pub server: ServerConfig,
    /// Database connection.
    pub database: DatabaseConfig,
    /// Sessions and cookies.
    pub auth: AuthConfig,
    /// Company submission rules.
    pub companies: CompanyConfig,
    /// Log output.
    pub logging: LoggingConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl ServerConfig {
    /// Returns `host:port`.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database settings. Without a URL the service keeps everything in memory.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL.
    pub url: Option<String>,
    /// Pool size.
    pub max_connections: u32,
}

/// Session settings.
#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret.
    pub jwt_secret: Option<String>,
    /// Session lifetime in seconds.
    pub session_ttl_secs: u64,
    /// Mark the session cookie `Secure`.
    pub secure_cookies: bool,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("session_ttl_secs", &self.session_ttl_secs)
            .field("secure_cookies", &self.secure_cookies)
            .finish()
    }
}

impl AuthConfig {
    /// Returns the configured secret, or a freshly generated one.
    ///
    /// A generated secret invalidates every session on restart.
    #[must_use]
    pub fn secret_or_generate(&self) -> String {
        match self.jwt_secret.as_deref().map(str::trim) {
            Some(secret) if !secret.is_empty() => secret.to_string(),
            _ => {
                tracing::warn!("no auth.jwt_secret configured, generating an ephemeral one");
                format!(
                    "{}{}",
                    uuid::Uuid::new_v4().simple(),
                    uuid::Uuid::new_v4().simple()
                )
            }
        }
    }
}

/// Company submission settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyConfig {
    /// Window in which a same-named submission is treated as a repeat.
    pub duplicate_window_secs: u64,
}

impl CompanyConfig {
    /// The duplicate window as a `Duration`.
    #[must_use]
    pub fn duplicate_window(&self) -> Duration {
        Duration::from_secs(self.duplicate_window_secs)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Base level directive, e.g. `info` or `otani=debug`.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl AppConfig {
    /// Loads configuration from `.env`, `config/otani.toml` and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a source is malformed or a value is out
    /// of range.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let builder = Self::defaults()?
            .add_source(File::with_name("config/otani").required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut cfg = Self::from_builder(builder)?;
        cfg.apply_legacy_env(
            std::env::var("DATABASE_URL").ok(),
            std::env::var("SECRET_KEY").ok(),
        );
        Ok(cfg)
    }

    /// A builder holding only the built-in defaults.
    ///
    /// # Errors
    ///
    /// Never fails in practice; `config` reports key errors through `Result`.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("database.max_connections", 5)?
            .set_default("auth.session_ttl_secs", 86_400)?
            .set_default("auth.secure_cookies", false)?
            .set_default("companies.duplicate_window_secs", 5)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")
    }

    /// Builds and validates a configuration from `builder`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if deserialization or validation fails.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_legacy_env(&mut self, database_url: Option<String>, secret_key: Option<String>) {
        if self.database.url.is_none() {
            self.database.url = database_url.filter(|u| !u.trim().is_empty());
        }
        if self.auth.jwt_secret.is_none() {
            self.auth.jwt_secret = secret_key.filter(|s| !s.trim().is_empty());
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::Message(
                "database.max_connections must be at least 1".into(),
            ));
        }
        if self.auth.session_ttl_secs == 0 {
            return Err(ConfigError::Message(
                "auth.session_ttl_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
