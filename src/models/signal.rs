use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::indicators::TrendBias;
use crate::models::scan::Market;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalDirection {
    Bullish,
    Bearish,
}

impl SignalDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalDirection::Bullish => "BULLISH",
            SignalDirection::Bearish => "BEARISH",
        }
    }

    /// Whether a higher-timeframe trend agrees with this direction
    pub fn is_aligned_with(&self, trend: TrendBias) -> bool {
        matches!(
            (self, trend),
            (SignalDirection::Bullish, TrendBias::Up) | (SignalDirection::Bearish, TrendBias::Down)
        )
    }
}

impl std::fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A flagged symbol as surfaced in the feed.
///
/// The evaluator fills every field except `breadth_aligned` and `confidence`,
/// which are set once market-wide aggregates are known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub symbol: String,
    pub market: Market,
    #[serde(rename = "type")]
    pub direction: SignalDirection,
    pub cci: f64,
    pub price: f64,
    pub time: DateTime<Utc>,
    pub candle_time: DateTime<Utc>,
    pub whale_vol: bool,
    pub trend: TrendBias,
    pub sniper_trend: bool,
    pub win_rate: f64,
    pub wins: u32,
    pub total_trades: u32,
    pub sector: String,
    #[serde(default)]
    pub breadth_aligned: bool,
    #[serde(default)]
    pub confidence: u8,
}
