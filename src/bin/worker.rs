//! CCI Scanner Worker
//!
//! Runs scheduled scans without the HTTP API. Alerts go to the log.

use cci_scanner::config::{get_environment, ScannerConfig};
use cci_scanner::core::bootstrap::build_service;
use cci_scanner::core::scheduler::ScanScheduler;
use cci_scanner::logging;
use cci_scanner::metrics::Metrics;
use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();
    logging::init_logging();

    let config = ScannerConfig::from_env();
    info!("Starting CCI Scanner Worker");
    info!(environment = %get_environment(), "Environment");

    if config.scan_interval_seconds == 0 {
        return Err("SCAN_INTERVAL_SECONDS must be > 0 for worker".into());
    }

    let metrics = Arc::new(Metrics::new()?);
    let service = Arc::new(build_service(&config, Some(metrics))?);

    info!(
        interval = config.scan_interval_seconds,
        workers = config.workers,
        market_hours_only = config.market_hours_only,
        "Scan interval: every {} seconds",
        config.scan_interval_seconds
    );

    let scheduler = ScanScheduler::new(service, config.scan_interval_seconds)
        .map_err(|e| format!("Failed to create scheduler: {}", e))?;
    scheduler.start().await;

    info!("Worker started, waiting for shutdown signal...");
    signal::ctrl_c().await?;

    info!("Shutting down worker...");
    scheduler.stop().await;
    info!("Worker stopped");

    Ok(())
}
