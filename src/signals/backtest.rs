//! "Instant truth" backtest: how often a crossover in one direction was followed
//! by a favourable move within the next few bars.

use serde::{Deserialize, Serialize};

use crate::indicators::error::IndicatorError;
use crate::models::indicators::Candle;
use crate::models::signal::SignalDirection;
use crate::signals::crossover::is_crossover;

pub const DEFAULT_LOOKAHEAD_BARS: usize = 5;
pub const DEFAULT_TARGET_MOVE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BacktestParams {
    /// Bars at the head of the series skipped because CCI is not yet defined
    pub warmup_bars: usize,
    /// Bars inspected after each event
    pub lookahead_bars: usize,
    /// Fractional move from the entry close that counts as a win
    pub target_move: f64,
}

impl BacktestParams {
    pub fn for_period(cci_period: usize) -> Self {
        Self {
            warmup_bars: cci_period + 1,
            lookahead_bars: DEFAULT_LOOKAHEAD_BARS,
            target_move: DEFAULT_TARGET_MOVE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub win_rate: f64,
    pub wins: u32,
    pub samples: u32,
}

impl BacktestResult {
    pub fn empty() -> Self {
        Self {
            win_rate: 0.0,
            wins: 0,
            samples: 0,
        }
    }
}

/// Run the backtest over a candle series and its aligned CCI series.
///
/// Events are scanned at positions `[warmup, len - lookahead)`. Entry is the event
/// bar's close; the outcome window is the following `lookahead` bars. A BULLISH
/// event wins when the window's highest high exceeds `entry * (1 + move)`, a
/// BEARISH event when its lowest low falls below `entry * (1 - move)`.
pub fn run_backtest(
    candles: &[Candle],
    cci: &[Option<f64>],
    direction: SignalDirection,
    params: &BacktestParams,
) -> Result<BacktestResult, IndicatorError> {
    if cci.len() != candles.len() {
        return Err(IndicatorError::LengthMismatch {
            series: cci.len(),
            candles: candles.len(),
        });
    }

    let start = params.warmup_bars.max(1);
    let end = candles.len().saturating_sub(params.lookahead_bars);
    if start >= end {
        return Ok(BacktestResult::empty());
    }

    let mut wins = 0u32;
    let mut samples = 0u32;

    for i in start..end {
        let (Some(prev), Some(curr)) = (cci[i - 1], cci[i]) else {
            continue;
        };
        if !is_crossover(prev, curr, direction) {
            continue;
        }

        samples += 1;
        let entry = candles[i].close;
        let outcome = &candles[i + 1..=i + params.lookahead_bars];

        let won = match direction {
            SignalDirection::Bullish => {
                let max_high = outcome.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
                max_high > entry * (1.0 + params.target_move)
            }
            SignalDirection::Bearish => {
                let min_low = outcome.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
                min_low < entry * (1.0 - params.target_move)
            }
        };
        if won {
            wins += 1;
        }
    }

    let win_rate = if samples > 0 {
        wins as f64 / samples as f64 * 100.0
    } else {
        0.0
    };

    Ok(BacktestResult {
        win_rate,
        wins,
        samples,
    })
}
