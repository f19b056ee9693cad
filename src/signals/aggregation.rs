//! Market breadth and sector aggregation over a scan's outcomes

use std::collections::HashMap;

use crate::models::scan::{EvaluationOutcome, SectorAggregate};
use crate::models::signal::{SignalDirection, SignalRecord};
use crate::services::sectors::UNKNOWN_SECTOR;

pub const TOP_SECTOR_COUNT: usize = 3;
pub const SECTOR_SAMPLE_SIZE: usize = 5;

pub struct Aggregator;

impl Aggregator {
    /// Percentage of successfully evaluated symbols whose latest CCI is positive.
    /// Zero when nothing was evaluated.
    pub fn market_breadth(outcomes: &[EvaluationOutcome]) -> f64 {
        let mut evaluated = 0usize;
        let mut positive = 0usize;
        for cci in outcomes.iter().filter_map(EvaluationOutcome::latest_cci) {
            evaluated += 1;
            if cci > 0.0 {
                positive += 1;
            }
        }

        if evaluated == 0 {
            return 0.0;
        }
        positive as f64 / evaluated as f64 * 100.0
    }

    pub fn sentiment(breadth_pct: f64) -> &'static str {
        if breadth_pct > 50.0 {
            "BULLISH"
        } else if breadth_pct < 50.0 {
            "BEARISH"
        } else {
            "NEUTRAL"
        }
    }

    /// Per-sector signal counts, excluding the unknown sector, in signal order
    pub fn sector_aggregates(signals: &[SignalRecord]) -> Vec<SectorAggregate> {
        let mut by_sector: HashMap<&str, SectorAggregate> = HashMap::new();

        for signal in signals.iter().filter(|s| s.sector != UNKNOWN_SECTOR) {
            let entry = by_sector
                .entry(signal.sector.as_str())
                .or_insert_with(|| SectorAggregate {
                    sector: signal.sector.clone(),
                    count: 0,
                    bullish: 0,
                    bearish: 0,
                    symbols: Vec::new(),
                });
            entry.count += 1;
            match signal.direction {
                SignalDirection::Bullish => entry.bullish += 1,
                SignalDirection::Bearish => entry.bearish += 1,
            }
            if entry.symbols.len() < SECTOR_SAMPLE_SIZE {
                entry
                    .symbols
                    .push(format!("{} ({})", signal.symbol, signal.direction));
            }
        }

        let mut aggregates: Vec<SectorAggregate> = by_sector.into_values().collect();
        aggregates.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.sector.cmp(&b.sector)));
        aggregates
    }

    /// The `TOP_SECTOR_COUNT` busiest sectors
    pub fn top_sectors(signals: &[SignalRecord]) -> Vec<SectorAggregate> {
        let mut aggregates = Self::sector_aggregates(signals);
        aggregates.truncate(TOP_SECTOR_COUNT);
        aggregates
    }
}
