//! # Otani
//!
//! Deal-tracking service for venture analysts.
//!
//! Analysts register, record companies they are evaluating, and describe
//! their investment preferences. Every company carries an A–D fit grade
//! computed from how many of its industry, stage and location match those
//! preferences.
//!
//! # Architecture
//!
//! - [`domain`]: entities, value objects and the rating strategy
//! - [`application`]: use-case services and the application error type
//! - [`infrastructure`]: storage (in-memory and PostgreSQL), password
//!   hashing, session tokens and logging
//! - [`api`]: axum REST surface
//! - [`config`]: layered configuration
//!
//! # Quick start
//!
//! ```
//! use otani::domain::entities::PreferenceModel;
//! use otani::domain::services::PreferenceMatchStrategy;
//! use otani::domain::value_objects::{AnalystId, Grade, PreferenceSet};
//!
//! let prefs = PreferenceModel::builder(AnalystId::new_v4())
//!     .industries(PreferenceSet::from_raw(["Fintech"]))
//!     .stages(PreferenceSet::from_raw(["Seed"]))
//!     .build();
//!
//! let rating = PreferenceMatchStrategy::rate_axes("fintech", "seed", "Europe", Some(&prefs));
//! assert_eq!(rating.grade(), Grade::B);
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::api::rest::{AppComponents, AppState, create_router};
use crate::config::AppConfig;
use crate::domain::services::PreferenceMatchStrategy;
use crate::infrastructure::credentials::Argon2Hasher;
use crate::infrastructure::persistence::in_memory::{
    InMemoryAnalystRepository, InMemoryCompanyRepository, InMemoryPreferenceRepository,
};
use crate::infrastructure::persistence::postgres::{
    self, PostgresAnalystRepository, PostgresCompanyRepository, PostgresPreferenceRepository,
};
use crate::infrastructure::persistence::{
    AnalystRepository, CompanyRepository, PreferenceRepository,
};
use crate::infrastructure::session::SessionIssuer;
use sqlx::PgPool;
use std::sync::Arc;

type Repositories = (
    Arc<dyn AnalystRepository>,
    Arc<dyn CompanyRepository>,
    Arc<dyn PreferenceRepository>,
);

async fn open_storage(config: &AppConfig) -> anyhow::Result<(Repositories, Option<PgPool>)> {
    let Some(url) = config.database.url.as_deref() else {
        tracing::warn!("no database.url configured, data will not survive a restart");
        let repos: Repositories = (
            Arc::new(InMemoryAnalystRepository::new()),
            Arc::new(InMemoryCompanyRepository::new()),
            Arc::new(InMemoryPreferenceRepository::new()),
        );
        return Ok((repos, None));
    };

    let pool = postgres::connect(url, config.database.max_connections).await?;
    postgres::run_migrations(&pool).await?;
    tracing::info!(max_connections = config.database.max_connections, "database ready");

    let repos: Repositories = (
        Arc::new(PostgresAnalystRepository::new(pool.clone())),
        Arc::new(PostgresCompanyRepository::new(pool.clone())),
        Arc::new(PostgresPreferenceRepository::new(pool.clone())),
    );
    Ok((repos, Some(pool)))
}

/// Wires storage and services from `config` and serves HTTP until a
/// shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if the database is unreachable, migrations fail, or the
/// listener cannot bind.
pub async fn start_server(config: &AppConfig) -> anyhow::Result<()> {
    let ((analysts, companies, preferences), pool) = open_storage(config).await?;

    let state = AppState::new(AppComponents {
        analysts,
        companies,
        preferences,
        hasher: Arc::new(Argon2Hasher),
        strategy: Arc::new(PreferenceMatchStrategy),
        sessions: SessionIssuer::new(
            config.auth.secret_or_generate(),
            config.auth.session_ttl_secs,
        ),
        duplicate_window: config.companies.duplicate_window(),
        secure_cookies: config.auth.secure_cookies,
    });
    let router = create_router(Arc::new(state));

    let addr = config.server.bind_addr();
    tracing::info!("Starting Otani on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        pool.close().await;
    }
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
