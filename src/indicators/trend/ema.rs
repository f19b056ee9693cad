//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::models::indicators::{Candle, EmaIndicator, TrendBias};

pub const TREND_EMA_PERIOD: u32 = 200;

/// Calculate EMA of closes for a specific period
pub fn calculate_ema(candles: &[Candle], period: u32) -> Option<EmaIndicator> {
    if period == 0 || candles.len() < period as usize {
        return None;
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let ema_value = math::ema_adjusted(&closes, period as usize)?;

    Some(EmaIndicator {
        value: ema_value,
        period,
    })
}

/// Classify the higher-timeframe trend against the EMA.
///
/// Needs strictly more than `period` candles; otherwise the trend is neutral.
/// UP when the latest close is above the EMA, DOWN otherwise.
pub fn trend_bias(candles: &[Candle], period: u32) -> TrendBias {
    if candles.len() <= period as usize {
        return TrendBias::Neutral;
    }

    let (Some(ema), Some(last)) = (calculate_ema(candles, period), candles.last()) else {
        return TrendBias::Neutral;
    };

    if !ema.value.is_finite() || !last.close.is_finite() {
        TrendBias::Neutral
    } else if last.close > ema.value {
        TrendBias::Up
    } else {
        TrendBias::Down
    }
}

/// Trend bias against the 200-period EMA
pub fn trend_bias_default(candles: &[Candle]) -> TrendBias {
    trend_bias(candles, TREND_EMA_PERIOD)
}
