//! Threshold crossover detection on consecutive CCI readings

use crate::models::signal::SignalDirection;

pub const BULLISH_THRESHOLD: f64 = 100.0;
pub const BEARISH_THRESHOLD: f64 = -100.0;

/// Direction of a fresh threshold crossing between two consecutive CCI values.
///
/// BULLISH when the previous value is at or below +100 and the current is above it;
/// BEARISH when the previous value is at or above -100 and the current is below it.
pub fn detect_crossover(prev: f64, curr: f64) -> Option<SignalDirection> {
    if prev <= BULLISH_THRESHOLD && curr > BULLISH_THRESHOLD {
        Some(SignalDirection::Bullish)
    } else if prev >= BEARISH_THRESHOLD && curr < BEARISH_THRESHOLD {
        Some(SignalDirection::Bearish)
    } else {
        None
    }
}

/// Whether the pair is a crossing in the given direction
pub fn is_crossover(prev: f64, curr: f64, direction: SignalDirection) -> bool {
    detect_crossover(prev, curr) == Some(direction)
}
