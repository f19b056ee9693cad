//! Volume anomaly ("whale volume") indicator

use crate::common::math;
use crate::models::indicators::{Candle, VolumeIndicator};

pub const WHALE_VOLUME_PERIOD: u32 = 20;
pub const WHALE_VOLUME_MULTIPLIER: f64 = 2.0;

/// Latest volume against its simple moving average (the average includes the latest bar)
pub fn calculate_volume(candles: &[Candle], period: u32) -> Option<VolumeIndicator> {
    if period == 0 || candles.len() < period as usize {
        return None;
    }

    let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();
    let volume_ma = math::sma(&volumes, period as usize)?;
    let volume = *volumes.last()?;
    let ratio = if volume_ma > 0.0 { volume / volume_ma } else { 0.0 };

    Some(VolumeIndicator {
        volume,
        volume_ma,
        volume_ma_period: period,
        ratio,
    })
}

/// Latest volume exceeds `multiplier` times its rolling mean
pub fn is_whale_volume(candles: &[Candle], period: u32, multiplier: f64) -> bool {
    calculate_volume(candles, period)
        .map(|v| v.volume.is_finite() && v.volume > multiplier * v.volume_ma)
        .unwrap_or(false)
}

/// Whale check with the default 20-bar window and 2x multiplier
pub fn is_whale_volume_default(candles: &[Candle]) -> bool {
    is_whale_volume(candles, WHALE_VOLUME_PERIOD, WHALE_VOLUME_MULTIPLIER)
}
