//! Candle source interface consumed by the scan pipeline.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::indicators::Candle;
use crate::services::error::MarketDataError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "1d")]
    Daily,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::FifteenMinutes => "15m",
            Interval::Daily => "1d",
        }
    }
}

/// One candle fetch: symbol, provider namespace suffix, bar size and calendar lookback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandleRequest {
    pub symbol: String,
    pub suffix: String,
    pub interval: Interval,
    pub lookback_days: u32,
}

impl CandleRequest {
    pub fn new(symbol: &str, suffix: &str, interval: Interval, lookback_days: u32) -> Self {
        Self {
            symbol: symbol.to_string(),
            suffix: suffix.to_string(),
            interval,
            lookback_days,
        }
    }

    /// Ticker as the provider knows it, e.g. `RELIANCE.NS`
    pub fn ticker(&self) -> String {
        format!("{}{}", self.symbol, self.suffix)
    }
}

/// Source of OHLCV candles.
///
/// Implementations return candles ordered by time without duplicate timestamps.
/// Failures are reported as errors, never as panics; callers treat any error like
/// an empty series.
#[async_trait]
pub trait CandleSource: Send + Sync {
    async fn fetch_candles(&self, request: &CandleRequest) -> Result<Vec<Candle>, MarketDataError>;
}
