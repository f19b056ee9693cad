//! Scan service: owns the feed and runs scans one at a time

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::core::feed::FeedStore;
use crate::core::orchestrator::ScanOrchestrator;
use crate::metrics::Metrics;
use crate::models::scan::{ScanReport, ScanStats};
use crate::models::signal::SignalRecord;
use crate::services::calendar::{AlwaysOpen, MarketCalendar, OpenMarkets};
use crate::services::notify::{LogNotifier, SignalNotifier};

pub struct ScanService {
    orchestrator: ScanOrchestrator,
    feed: FeedStore,
    calendar: Arc<dyn MarketCalendar>,
    notifier: Arc<dyn SignalNotifier>,
    metrics: Option<Arc<Metrics>>,
    market_hours_only: bool,
    enabled: OpenMarkets,
    scan_lock: Mutex<()>,
    last_stats: RwLock<Option<ScanStats>>,
}

impl ScanService {
    pub fn new(orchestrator: ScanOrchestrator, feed: FeedStore) -> Self {
        Self {
            orchestrator,
            feed,
            calendar: Arc::new(AlwaysOpen),
            notifier: Arc::new(LogNotifier),
            metrics: None,
            market_hours_only: false,
            enabled: OpenMarkets { nse: true, us: true },
            scan_lock: Mutex::new(()),
            last_stats: RwLock::new(None),
        }
    }

    /// Gate scheduled scans on market sessions
    pub fn with_calendar(mut self, calendar: Arc<dyn MarketCalendar>) -> Self {
        self.calendar = calendar;
        self.market_hours_only = true;
        self
    }

    /// Restrict scheduled and default manual scans to the enabled markets
    pub fn with_markets(mut self, nse: bool, us: bool) -> Self {
        self.enabled = OpenMarkets { nse, us };
        self
    }

    pub fn enabled_markets(&self) -> OpenMarkets {
        self.enabled
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn SignalNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Run a scan, merge its signals into the feed and notify.
    pub async fn run_scan(&self, include_nse: bool, include_us: bool) -> ScanReport {
        let _guard = self.scan_lock.lock().await;

        let report = self.orchestrator.run_scan(include_nse, include_us).await;
        let feed = self.feed.merge(&report.signals, Utc::now()).await;

        self.record_metrics(&report, feed.len());
        *self.last_stats.write().await = Some(report.stats.clone());
        self.notifier.notify(&report).await;

        report
    }

    /// Scheduler entry point. Scans the enabled markets, further limited to those open
    /// at `now` when gating is on; returns `None` when that leaves nothing to scan.
    pub async fn run_scheduled_scan(&self, now: DateTime<Utc>) -> Option<ScanReport> {
        let open = if self.market_hours_only {
            self.enabled.intersect(self.calendar.open_markets(now))
        } else {
            self.enabled
        };
        if !open.any() {
            debug!(at = %now, "ScanService: no enabled market open, skipping scheduled scan");
            return None;
        }

        info!(
            nse = open.nse,
            us = open.us,
            "ScanService: scheduled scan (NSE open: {}, US open: {})",
            open.nse,
            open.us
        );
        Some(self.run_scan(open.nse, open.us).await)
    }

    pub async fn get_feed(&self) -> Arc<Vec<SignalRecord>> {
        self.feed.snapshot().await
    }

    pub async fn inject_signal(&self, record: SignalRecord) -> Arc<Vec<SignalRecord>> {
        info!(symbol = %record.symbol, "ScanService: injecting signal for {}", record.symbol);
        let feed = self.feed.inject(record).await;
        if let Some(metrics) = &self.metrics {
            metrics.feed_size.set(feed.len() as f64);
        }
        feed
    }

    pub async fn last_stats(&self) -> Option<ScanStats> {
        self.last_stats.read().await.clone()
    }

    fn record_metrics(&self, report: &ScanReport, feed_size: usize) {
        let Some(metrics) = &self.metrics else {
            return;
        };
        let stats = &report.stats;

        metrics.scans_total.inc();
        metrics
            .scan_duration_seconds
            .observe(stats.duration_ms as f64 / 1000.0);

        for (label, count) in stats.outcome_counts() {
            metrics
                .symbol_evaluations_total
                .with_label_values(&[label])
                .inc_by(count as u64);
        }

        for signal in &report.signals {
            metrics
                .signals_total
                .with_label_values(&[signal.direction.as_str()])
                .inc();
        }

        metrics.feed_size.set(feed_size as f64);
    }
}
