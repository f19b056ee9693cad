//! Cron-based scheduler that triggers periodic scans

use crate::core::runtime::ScanService;
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Cron expression firing every `interval_seconds`
/// Cron format: second minute hour day month weekday
///
/// A `*/n` step restarts at the top of its parent field, so the period is only even
/// when the step divides that field. Returns `None` for any other interval.
pub fn cron_expression(interval_seconds: u64) -> Option<String> {
    let divides = |step: u64, field: u64| step > 0 && step < field && field % step == 0;

    if divides(interval_seconds, 60) {
        return Some(format!("*/{} * * * * *", interval_seconds));
    }
    if interval_seconds % 60 == 0 && divides(interval_seconds / 60, 60) {
        return Some(format!("0 */{} * * * *", interval_seconds / 60));
    }
    if interval_seconds % 3600 == 0 && divides(interval_seconds / 3600, 24) {
        return Some(format!("0 0 */{} * * *", interval_seconds / 3600));
    }
    None
}

/// Scheduler that periodically runs a scan on the service
pub struct ScanScheduler {
    service: Arc<ScanService>,
    schedule: Schedule,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl ScanScheduler {
    /// Create a new scheduler
    ///
    /// # Arguments
    /// * `service` - Scan service to drive
    /// * `interval_seconds` - Scan interval in seconds (0 = disabled)
    pub fn new(
        service: Arc<ScanService>,
        interval_seconds: u64,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        if interval_seconds == 0 {
            return Err("Scheduler disabled: interval_seconds is 0".into());
        }

        let cron_expr = cron_expression(interval_seconds).ok_or_else(|| {
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!(
                    "Scan interval {}s must divide a minute, an hour or a day evenly",
                    interval_seconds
                ),
            )) as Box<dyn std::error::Error + Send + Sync>
        })?;
        let schedule = Schedule::from_str(&cron_expr).map_err(|e| {
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid cron expression '{}': {}", cron_expr, e),
            )) as Box<dyn std::error::Error + Send + Sync>
        })?;

        info!(
            interval = interval_seconds,
            cron = %cron_expr,
            "ScanScheduler: created with interval {}s (cron: {})",
            interval_seconds,
            cron_expr
        );

        Ok(Self {
            service,
            schedule,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    /// Start the scheduler
    pub async fn start(&self) {
        let service = self.service.clone();
        let schedule = self.schedule.clone();

        let handle = tokio::spawn(async move {
            info!("ScanScheduler: started, waiting for cron schedule...");

            loop {
                let mut upcoming = schedule.upcoming(chrono::Utc);
                if let Some(next_tick) = upcoming.next() {
                    let now = chrono::Utc::now();
                    if next_tick > now {
                        let duration = (next_tick - now).to_std().unwrap_or_default();
                        tokio::time::sleep(duration).await;
                    }
                } else {
                    tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                    continue;
                }

                match service.run_scheduled_scan(chrono::Utc::now()).await {
                    Some(report) => info!(
                        signals = report.signals.len(),
                        markets = %report.stats.market_label,
                        "ScanScheduler: tick complete, {} signals",
                        report.signals.len()
                    ),
                    None => debug!("ScanScheduler: tick skipped, markets closed"),
                }
            }
        });

        *self.handle.write().await = Some(handle);
        info!("ScanScheduler: started successfully");
    }

    /// Stop the scheduler
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("ScanScheduler: stopped");
        }
    }

    /// Check if the scheduler is running
    pub async fn is_running(&self) -> bool {
        let handle = self.handle.read().await;
        handle.is_some()
    }
}
