//! Per-symbol evaluation: fetch, CCI, crossover, auxiliary filters, backtest.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::indicators::momentum::cci::{self, DEFAULT_CCI_PERIOD};
use crate::indicators::trend::ema::{self, TREND_EMA_PERIOD};
use crate::indicators::volume::whale::{self, WHALE_VOLUME_MULTIPLIER, WHALE_VOLUME_PERIOD};
use crate::models::indicators::TrendBias;
use crate::models::scan::{EvaluationOutcome, ScanTarget, SkipReason};
use crate::models::signal::SignalRecord;
use crate::services::market_data::{CandleRequest, CandleSource, Interval};
use crate::services::sectors::SectorLookup;
use crate::signals::backtest::{self, BacktestParams, BacktestResult};
use crate::signals::crossover::detect_crossover;

pub const MIN_CANDLES: usize = 50;

#[derive(Debug, Clone)]
pub struct EvaluatorParams {
    pub cci_period: usize,
    pub min_bars: usize,
    pub intraday_lookback_days: u32,
    pub daily_lookback_days: u32,
    pub trend_period: u32,
    pub whale_period: u32,
    pub whale_multiplier: f64,
    pub backtest: BacktestParams,
}

impl Default for EvaluatorParams {
    fn default() -> Self {
        Self {
            cci_period: DEFAULT_CCI_PERIOD,
            min_bars: MIN_CANDLES,
            intraday_lookback_days: 10,
            daily_lookback_days: 450,
            trend_period: TREND_EMA_PERIOD,
            whale_period: WHALE_VOLUME_PERIOD,
            whale_multiplier: WHALE_VOLUME_MULTIPLIER,
            backtest: BacktestParams::for_period(DEFAULT_CCI_PERIOD),
        }
    }
}

pub struct SymbolEvaluator {
    source: Arc<dyn CandleSource>,
    sectors: Arc<dyn SectorLookup>,
    params: EvaluatorParams,
}

impl SymbolEvaluator {
    pub fn new(source: Arc<dyn CandleSource>, sectors: Arc<dyn SectorLookup>) -> Self {
        Self::with_params(source, sectors, EvaluatorParams::default())
    }

    pub fn with_params(
        source: Arc<dyn CandleSource>,
        sectors: Arc<dyn SectorLookup>,
        params: EvaluatorParams,
    ) -> Self {
        Self {
            source,
            sectors,
            params,
        }
    }

    /// Evaluate one target. Never fails: every problem becomes a tagged outcome.
    pub async fn evaluate(&self, target: &ScanTarget) -> EvaluationOutcome {
        let request = CandleRequest::new(
            &target.symbol,
            target.suffix(),
            Interval::FifteenMinutes,
            self.params.intraday_lookback_days,
        );

        let candles = match self.source.fetch_candles(&request).await {
            Ok(candles) => candles,
            Err(e) => {
                debug!(symbol = %target.symbol, error = %e, "Evaluator: intraday fetch failed for {}", target.symbol);
                return EvaluationOutcome::Skipped(SkipReason::FetchFailed {
                    message: e.to_string(),
                });
            }
        };

        if candles.len() < self.params.min_bars {
            debug!(
                symbol = %target.symbol,
                count = candles.len(),
                min = self.params.min_bars,
                "Evaluator: not enough candles ({} < {}) for {}",
                candles.len(),
                self.params.min_bars,
                target.symbol
            );
            return EvaluationOutcome::Skipped(SkipReason::InsufficientData {
                bars: candles.len(),
                required: self.params.min_bars,
            });
        }

        let series = match cci::calculate_cci(&candles, self.params.cci_period) {
            Ok(series) => series,
            Err(e) => {
                return EvaluationOutcome::Skipped(SkipReason::ComputationFailed {
                    message: e.to_string(),
                })
            }
        };

        let (prev, curr) = match cci::last_two(&series) {
            Some((Some(prev), Some(curr))) if prev.is_finite() && curr.is_finite() => (prev, curr),
            _ => {
                return EvaluationOutcome::Skipped(SkipReason::ComputationFailed {
                    message: "latest CCI values undefined".to_string(),
                })
            }
        };

        let Some(direction) = detect_crossover(prev, curr) else {
            return EvaluationOutcome::NoSignal { latest_cci: curr };
        };

        // `candles` is non-empty past the min_bars check
        let Some(last) = candles.last() else {
            return EvaluationOutcome::Skipped(SkipReason::InsufficientData {
                bars: 0,
                required: self.params.min_bars,
            });
        };

        let whale_vol =
            whale::is_whale_volume(&candles, self.params.whale_period, self.params.whale_multiplier);
        let trend = self.daily_trend(target).await;
        let sniper_trend = direction.is_aligned_with(trend);

        let truth = backtest::run_backtest(&candles, &series, direction, &self.params.backtest)
            .unwrap_or_else(|_| BacktestResult::empty());

        let sector = self.sectors.sector_of(&target.symbol);

        info!(
            symbol = %target.symbol,
            direction = %direction,
            cci = curr,
            whale = whale_vol,
            sniper = sniper_trend,
            win_rate = truth.win_rate,
            "Signal: {} ({}) | Whale: {} | Sniper: {} | WinRate: {:.0}%",
            target.symbol,
            direction,
            whale_vol,
            sniper_trend,
            truth.win_rate
        );

        let record = SignalRecord {
            symbol: target.symbol.clone(),
            market: target.market,
            direction,
            cci: curr,
            price: last.close,
            time: Utc::now(),
            candle_time: last.timestamp,
            whale_vol,
            trend,
            sniper_trend,
            win_rate: (truth.win_rate * 10.0).round() / 10.0,
            wins: truth.wins,
            total_trades: truth.samples,
            sector,
            breadth_aligned: false,
            confidence: 0,
        };

        EvaluationOutcome::Signal {
            record,
            latest_cci: curr,
        }
    }

    /// Higher-timeframe trend; any failure degrades to NEUTRAL
    async fn daily_trend(&self, target: &ScanTarget) -> TrendBias {
        let request = CandleRequest::new(
            &target.symbol,
            target.suffix(),
            Interval::Daily,
            self.params.daily_lookback_days,
        );

        match self.source.fetch_candles(&request).await {
            Ok(daily) => ema::trend_bias(&daily, self.params.trend_period),
            Err(e) => {
                debug!(symbol = %target.symbol, error = %e, "Evaluator: daily fetch failed for {}, trend neutral", target.symbol);
                TrendBias::Neutral
            }
        }
    }
}
