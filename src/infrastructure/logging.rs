//! # Logging
//!
//! `tracing-subscriber` setup.
//!
//! `RUST_LOG` overrides the configured level entirely. Otherwise noisy
//! library targets are held at `warn` while the service logs at the
//! configured level.

use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;

/// Library targets held at `warn` unless `RUST_LOG` says otherwise.
pub const NOISY_MODULES: &[&str] = &["hyper", "hyper_util", "h2", "sqlx", "tower_http"];

/// Builds the filter directives for `level`.
#[must_use]
pub fn filter_directives(level: &str) -> String {
    let mut directives = String::from(level);
    for module in NOISY_MODULES {
        directives.push_str(&format!(",{module}=warn"));
    }
    directives
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directives(level)))
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init_logging(config: &LoggingConfig) {
    let subscriber = tracing_subscriber::registry().with(build_filter(&config.level));

    match config.format {
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_span_events(FmtSpan::CLOSE)
                .with_current_span(true)
                .with_target(true)
                .with_file(true)
                .with_line_number(true);
            let _ = subscriber.with(fmt_layer).try_init();
        }
        LogFormat::Pretty => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_ansi(true)
                .with_target(true)
                .with_file(false)
                .with_line_number(false);
            let _ = subscriber.with(fmt_layer).try_init();
        }
    }

    tracing::info!(
        log_level = %config.level,
        log_format = ?config.format,
        noise_filtered = NOISY_MODULES.len(),
        "logging initialized"
    );
}
