//! CCI Scanner Server
//!
//! Serves the HTTP API and, when SCAN_INTERVAL_SECONDS > 0, runs scheduled scans.

use cci_scanner::config::{get_environment, ScannerConfig};
use cci_scanner::core::bootstrap::build_service;
use cci_scanner::core::http::{start_server, AppState};
use cci_scanner::core::scheduler::ScanScheduler;
use cci_scanner::logging;
use cci_scanner::metrics::Metrics;
use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = ScannerConfig::from_env();
    info!("Starting CCI Scanner Server");
    info!(environment = %get_environment(), "Environment");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);

    let metrics = Arc::new(Metrics::new()?);
    let service = Arc::new(build_service(&config, Some(metrics.clone()))?);
    let mut state = AppState::new(service.clone(), metrics);

    let scheduler = if config.scan_interval_seconds > 0 {
        info!(
            interval = config.scan_interval_seconds,
            workers = config.workers,
            "Scheduled scans: every {} seconds",
            config.scan_interval_seconds
        );
        let scheduler = Arc::new(
            ScanScheduler::new(service, config.scan_interval_seconds)
                .map_err(|e| format!("Failed to create scheduler: {}", e))?,
        );
        scheduler.start().await;
        state = state.with_scheduler(scheduler.clone());
        Some(scheduler)
    } else {
        info!("Scheduled scans: disabled (set SCAN_INTERVAL_SECONDS to enable)");
        None
    };

    let port = config.port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port, state).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    if let Some(scheduler) = scheduler {
        scheduler.stop().await;
    }

    Ok(())
}
