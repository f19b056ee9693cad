//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod scan;
pub mod signal;

pub use indicators::{Candle, CciSeries, EmaIndicator, TrendBias, VolumeIndicator};
pub use scan::{
    EvaluationOutcome, Market, ScanReport, ScanStats, ScanTarget, SectorAggregate, SkipReason,
};
pub use signal::{SignalDirection, SignalRecord};
