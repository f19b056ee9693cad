use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::signal::SignalRecord;

/// Exchange a symbol universe belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Market {
    Nse,
    Us,
}

impl Market {
    /// Ticker qualifier the data provider expects for this market
    pub fn suffix(&self) -> &'static str {
        match self {
            Market::Nse => ".NS",
            Market::Us => "",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Market::Nse => "NSE",
            Market::Us => "US",
        }
    }

    /// Label for the set of markets participating in a scan
    pub fn combined_label(include_nse: bool, include_us: bool) -> &'static str {
        match (include_nse, include_us) {
            (true, true) => "NSE + US",
            (true, false) => "NSE",
            (false, true) => "US",
            (false, false) => "NONE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanTarget {
    pub symbol: String,
    pub market: Market,
}

impl ScanTarget {
    pub fn new(symbol: impl Into<String>, market: Market) -> Self {
        Self {
            symbol: symbol.into(),
            market,
        }
    }

    pub fn suffix(&self) -> &'static str {
        self.market.suffix()
    }
}

/// Why a symbol produced no record this scan
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    InsufficientData { bars: usize, required: usize },
    FetchFailed { message: String },
    ComputationFailed { message: String },
    Panicked,
    TimedOut,
}

/// Tagged result of evaluating one scan target.
#[derive(Debug, Clone)]
pub enum EvaluationOutcome {
    Signal {
        record: SignalRecord,
        latest_cci: f64,
    },
    NoSignal {
        latest_cci: f64,
    },
    Skipped(SkipReason),
}

impl EvaluationOutcome {
    /// Latest CCI when the indicator could be computed
    pub fn latest_cci(&self) -> Option<f64> {
        match self {
            EvaluationOutcome::Signal { latest_cci, .. } | EvaluationOutcome::NoSignal { latest_cci } => {
                Some(*latest_cci)
            }
            EvaluationOutcome::Skipped(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorAggregate {
    pub sector: String,
    pub count: usize,
    pub bullish: usize,
    pub bearish: usize,
    pub symbols: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanStats {
    pub total_scanned: usize,
    pub successful: usize,
    pub signals_found: usize,
    pub no_signal: usize,
    pub insufficient_data: usize,
    pub fetch_failed: usize,
    pub computation_failed: usize,
    pub panicked: usize,
    pub timed_out: usize,
    pub breadth_pct: f64,
    pub sentiment: String,
    pub top_sectors: Vec<SectorAggregate>,
    pub market_label: String,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl ScanStats {
    /// Evaluation count per outcome, keyed by metric label
    pub fn outcome_counts(&self) -> [(&'static str, usize); 7] {
        [
            ("signal", self.signals_found),
            ("no_signal", self.no_signal),
            ("insufficient_data", self.insufficient_data),
            ("fetch_failed", self.fetch_failed),
            ("computation_failed", self.computation_failed),
            ("panicked", self.panicked),
            ("timed_out", self.timed_out),
        ]
    }

    /// Every evaluation in a non-empty scan failed
    pub fn all_failed(&self) -> bool {
        self.total_scanned > 0 && self.successful == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub signals: Vec<SignalRecord>,
    /// Every known sector with at least one signal, busiest first
    pub sectors: Vec<SectorAggregate>,
    pub stats: ScanStats,
}
