//! Environment-driven configuration

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::services::universe::NIFTY_200_CSV_URL;
use crate::services::yahoo::DEFAULT_BASE_URL;
use crate::signals::backtest::BacktestParams;
use crate::signals::evaluator::EvaluatorParams;

/// Deployment environment name (`ENVIRONMENT`, default `sandbox`)
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub port: u16,
    pub workers: usize,
    pub scan_timeout_seconds: u64,
    pub scan_interval_seconds: u64,
    pub cci_period: usize,
    pub min_bars: usize,
    pub intraday_lookback_days: u32,
    pub daily_lookback_days: u32,
    pub feed_staleness_hours: i64,
    pub market_data_base_url: String,
    pub nse_universe_url: String,
    pub scan_nse: bool,
    pub scan_us: bool,
    pub market_hours_only: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            workers: 20,
            scan_timeout_seconds: 240,
            scan_interval_seconds: 300,
            cci_period: 20,
            min_bars: 50,
            intraday_lookback_days: 10,
            daily_lookback_days: 450,
            feed_staleness_hours: 12,
            market_data_base_url: DEFAULT_BASE_URL.to_string(),
            nse_universe_url: NIFTY_200_CSV_URL.to_string(),
            scan_nse: true,
            scan_us: true,
            market_hours_only: true,
        }
    }
}

impl ScannerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: env_or("PORT", defaults.port),
            workers: env_or("SCAN_WORKERS", defaults.workers).max(1),
            scan_timeout_seconds: env_or("SCAN_TIMEOUT_SECONDS", defaults.scan_timeout_seconds),
            scan_interval_seconds: env_or("SCAN_INTERVAL_SECONDS", defaults.scan_interval_seconds),
            cci_period: env_or("CCI_PERIOD", defaults.cci_period).max(1),
            min_bars: env_or("MIN_BARS", defaults.min_bars),
            intraday_lookback_days: env_or("INTRADAY_LOOKBACK_DAYS", defaults.intraday_lookback_days),
            daily_lookback_days: env_or("DAILY_LOOKBACK_DAYS", defaults.daily_lookback_days),
            feed_staleness_hours: env_or("FEED_STALENESS_HOURS", defaults.feed_staleness_hours),
            market_data_base_url: env::var("MARKET_DATA_BASE_URL")
                .unwrap_or(defaults.market_data_base_url),
            nse_universe_url: env::var("NSE_UNIVERSE_URL").unwrap_or(defaults.nse_universe_url),
            scan_nse: env_or("SCAN_NSE", defaults.scan_nse),
            scan_us: env_or("SCAN_US", defaults.scan_us),
            market_hours_only: env_or("MARKET_HOURS_ONLY", defaults.market_hours_only),
        }
    }

    /// `None` when the timeout is disabled (0)
    pub fn scan_timeout(&self) -> Option<Duration> {
        (self.scan_timeout_seconds > 0).then(|| Duration::from_secs(self.scan_timeout_seconds))
    }

    pub fn staleness(&self) -> chrono::Duration {
        chrono::Duration::hours(self.feed_staleness_hours)
    }

    pub fn evaluator_params(&self) -> EvaluatorParams {
        EvaluatorParams {
            cci_period: self.cci_period,
            min_bars: self.min_bars,
            intraday_lookback_days: self.intraday_lookback_days,
            daily_lookback_days: self.daily_lookback_days,
            backtest: BacktestParams::for_period(self.cci_period),
            ..EvaluatorParams::default()
        }
    }
}
