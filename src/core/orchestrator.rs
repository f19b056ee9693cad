//! Scan orchestration: fan out one evaluation per target, then aggregate and score.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Semaphore;
use tokio::task::{AbortHandle, JoinError, JoinHandle};
use tokio::time::{timeout_at, Instant};
use tracing::{info, warn};

use crate::models::scan::{
    EvaluationOutcome, Market, ScanReport, ScanStats, ScanTarget, SkipReason,
};
use crate::models::signal::SignalRecord;
use crate::services::universe::SymbolUniverse;
use crate::signals::aggregation::{Aggregator, TOP_SECTOR_COUNT};
use crate::signals::evaluator::SymbolEvaluator;
use crate::signals::scoring::{apply_score, rank_signals, ScoringContext};

pub const DEFAULT_WORKERS: usize = 20;

#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub workers: usize,
    /// Overall wall-clock budget for one scan; `None` waits for every task
    pub scan_timeout: Option<Duration>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            scan_timeout: Some(Duration::from_secs(240)),
        }
    }
}

pub struct ScanOrchestrator {
    evaluator: Arc<SymbolEvaluator>,
    universe: Arc<dyn SymbolUniverse>,
    config: OrchestratorConfig,
}

impl ScanOrchestrator {
    pub fn new(
        evaluator: Arc<SymbolEvaluator>,
        universe: Arc<dyn SymbolUniverse>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            evaluator,
            universe,
            config,
        }
    }

    pub fn workers(&self) -> usize {
        self.config.workers.max(1)
    }

    /// Resolve the scan targets for the enabled markets, NSE first
    pub async fn build_targets(&self, include_nse: bool, include_us: bool) -> Vec<ScanTarget> {
        let mut targets = Vec::new();
        let markets = [(Market::Nse, include_nse), (Market::Us, include_us)];

        for (market, enabled) in markets {
            if !enabled {
                continue;
            }
            match self.universe.list_symbols(market).await {
                Ok(symbols) => {
                    info!(
                        market = market.label(),
                        count = symbols.len(),
                        "Orchestrator: {} {} symbols in universe",
                        symbols.len(),
                        market.label()
                    );
                    targets.extend(symbols.into_iter().map(|s| ScanTarget::new(s, market)));
                }
                Err(e) => {
                    warn!(
                        market = market.label(),
                        error = %e,
                        "Orchestrator: universe unavailable for {}, skipping market",
                        market.label()
                    );
                }
            }
        }

        targets
    }

    pub async fn run_scan(&self, include_nse: bool, include_us: bool) -> ScanReport {
        let started_at = Utc::now();
        let clock = Instant::now();

        let targets = self.build_targets(include_nse, include_us).await;
        info!(
            targets = targets.len(),
            workers = self.workers(),
            "Orchestrator: scanning {} targets with {} workers",
            targets.len(),
            self.workers()
        );

        let outcomes = self.evaluate_all(&targets).await;
        let mut report = summarize(outcomes, include_nse, include_us);
        report.stats.started_at = started_at;
        report.stats.duration_ms = clock.elapsed().as_millis() as u64;

        info!(
            scanned = report.stats.total_scanned,
            successful = report.stats.successful,
            signals = report.stats.signals_found,
            timed_out = report.stats.timed_out,
            breadth = report.stats.breadth_pct,
            duration_ms = report.stats.duration_ms,
            "Orchestrator: scan complete, {} signals from {} targets",
            report.stats.signals_found,
            report.stats.total_scanned
        );

        report
    }

    /// One task per target, at most `workers` evaluating at once. Outcomes come back in
    /// target order regardless of completion order.
    async fn evaluate_all(&self, targets: &[ScanTarget]) -> Vec<EvaluationOutcome> {
        let semaphore = Arc::new(Semaphore::new(self.workers()));
        let deadline = self.config.scan_timeout.map(|t| Instant::now() + t);

        let handles: Vec<JoinHandle<EvaluationOutcome>> = targets
            .iter()
            .cloned()
            .map(|target| {
                let evaluator = self.evaluator.clone();
                let semaphore = semaphore.clone();
                tokio::spawn(async move {
                    let Ok(_permit) = semaphore.acquire_owned().await else {
                        return EvaluationOutcome::Skipped(SkipReason::Panicked);
                    };
                    evaluator.evaluate(&target).await
                })
            })
            .collect();
        let _abort_guard = AbortOnDrop(handles.iter().map(JoinHandle::abort_handle).collect());

        let mut outcomes = Vec::with_capacity(handles.len());
        let mut expired = false;

        for (mut handle, target) in handles.into_iter().zip(targets) {
            let outcome = match deadline {
                Some(deadline) if !expired => match timeout_at(deadline, &mut handle).await {
                    Ok(joined) => join_outcome(joined, target),
                    Err(_) => {
                        warn!("Orchestrator: scan timeout reached, harvesting finished tasks");
                        expired = true;
                        harvest_expired(handle, target).await
                    }
                },
                Some(_) => harvest_expired(handle, target).await,
                None => join_outcome(handle.await, target),
            };
            outcomes.push(outcome);
        }

        outcomes
    }
}

/// Aborts the evaluation tasks still running when a scan is dropped mid-flight
struct AbortOnDrop(Vec<AbortHandle>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        for handle in &self.0 {
            handle.abort();
        }
    }
}

fn join_outcome(
    joined: Result<EvaluationOutcome, JoinError>,
    target: &ScanTarget,
) -> EvaluationOutcome {
    joined.unwrap_or_else(|e| {
        warn!(symbol = %target.symbol, error = %e, "Orchestrator: evaluation task failed for {}", target.symbol);
        EvaluationOutcome::Skipped(SkipReason::Panicked)
    })
}

async fn harvest_expired(
    handle: JoinHandle<EvaluationOutcome>,
    target: &ScanTarget,
) -> EvaluationOutcome {
    if handle.is_finished() {
        join_outcome(handle.await, target)
    } else {
        handle.abort();
        EvaluationOutcome::Skipped(SkipReason::TimedOut)
    }
}

/// Statistics, breadth, sector ranking and confidence for a set of outcomes.
/// Timing fields are left for the caller.
pub fn summarize(
    outcomes: Vec<EvaluationOutcome>,
    include_nse: bool,
    include_us: bool,
) -> ScanReport {
    let breadth_pct = Aggregator::market_breadth(&outcomes);

    let mut stats = ScanStats {
        total_scanned: outcomes.len(),
        successful: 0,
        signals_found: 0,
        no_signal: 0,
        insufficient_data: 0,
        fetch_failed: 0,
        computation_failed: 0,
        panicked: 0,
        timed_out: 0,
        breadth_pct,
        sentiment: Aggregator::sentiment(breadth_pct).to_string(),
        top_sectors: Vec::new(),
        market_label: Market::combined_label(include_nse, include_us).to_string(),
        started_at: Utc::now(),
        duration_ms: 0,
    };

    let mut signals: Vec<SignalRecord> = Vec::new();
    for outcome in outcomes {
        match outcome {
            EvaluationOutcome::Signal { record, .. } => {
                stats.successful += 1;
                stats.signals_found += 1;
                signals.push(record);
            }
            EvaluationOutcome::NoSignal { .. } => {
                stats.successful += 1;
                stats.no_signal += 1;
            }
            EvaluationOutcome::Skipped(reason) => match reason {
                SkipReason::InsufficientData { .. } => stats.insufficient_data += 1,
                SkipReason::FetchFailed { .. } => stats.fetch_failed += 1,
                SkipReason::ComputationFailed { .. } => stats.computation_failed += 1,
                SkipReason::Panicked => stats.panicked += 1,
                SkipReason::TimedOut => stats.timed_out += 1,
            },
        }
    }

    let sectors = Aggregator::sector_aggregates(&signals);
    stats.top_sectors = sectors.iter().take(TOP_SECTOR_COUNT).cloned().collect();

    let ctx = ScoringContext::new(
        breadth_pct,
        stats.top_sectors.iter().map(|s| s.sector.clone()).collect(),
    );
    for signal in signals.iter_mut() {
        apply_score(signal, &ctx);
    }
    rank_signals(&mut signals);

    ScanReport {
        signals,
        sectors,
        stats,
    }
}
