//! Otani - Main entry point.

use anyhow::Result;
use otani::config::AppConfig;
use otani::infrastructure::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    init_logging(&config.logging);

    tracing::info!("Otani v{}", env!("CARGO_PKG_VERSION"));

    otani::start_server(&config).await
}
