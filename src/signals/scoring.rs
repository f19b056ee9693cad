//! Confidence scoring: five independent 20-point components

use serde::{Deserialize, Serialize};

use crate::models::signal::{SignalDirection, SignalRecord};

pub const COMPONENT_POINTS: u8 = 20;
pub const WIN_RATE_THRESHOLD: f64 = 60.0;
pub const BREADTH_MIDPOINT: f64 = 50.0;

/// Market-wide inputs for scoring, fixed for the whole scan
#[derive(Debug, Clone, Default)]
pub struct ScoringContext {
    pub breadth_pct: f64,
    pub top_sectors: Vec<String>,
}

impl ScoringContext {
    pub fn new(breadth_pct: f64, top_sectors: Vec<String>) -> Self {
        Self {
            breadth_pct,
            top_sectors,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    pub trend_aligned: bool,
    pub whale_volume: bool,
    pub win_rate: bool,
    pub hot_sector: bool,
    pub breadth_aligned: bool,
}

impl ConfidenceBreakdown {
    pub fn total(&self) -> u8 {
        [
            self.trend_aligned,
            self.whale_volume,
            self.win_rate,
            self.hot_sector,
            self.breadth_aligned,
        ]
        .iter()
        .filter(|hit| **hit)
        .count() as u8
            * COMPONENT_POINTS
    }
}

/// BULLISH with breadth above 50%, or BEARISH with breadth below 50%
pub fn is_breadth_aligned(direction: SignalDirection, breadth_pct: f64) -> bool {
    match direction {
        SignalDirection::Bullish => breadth_pct > BREADTH_MIDPOINT,
        SignalDirection::Bearish => breadth_pct < BREADTH_MIDPOINT,
    }
}

pub fn confidence_breakdown(record: &SignalRecord, ctx: &ScoringContext) -> ConfidenceBreakdown {
    ConfidenceBreakdown {
        trend_aligned: record.sniper_trend,
        whale_volume: record.whale_vol,
        win_rate: record.win_rate > WIN_RATE_THRESHOLD,
        hot_sector: ctx.top_sectors.iter().any(|s| *s == record.sector),
        breadth_aligned: is_breadth_aligned(record.direction, ctx.breadth_pct),
    }
}

/// Fill in `confidence` and `breadth_aligned` on a record
pub fn apply_score(record: &mut SignalRecord, ctx: &ScoringContext) -> ConfidenceBreakdown {
    let breakdown = confidence_breakdown(record, ctx);
    record.breadth_aligned = breakdown.breadth_aligned;
    record.confidence = breakdown.total();
    breakdown
}

/// Sort by confidence descending, then symbol ascending
pub fn rank_signals(signals: &mut [SignalRecord]) {
    signals.sort_by(|a, b| {
        b.confidence
            .cmp(&a.confidence)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });
}
