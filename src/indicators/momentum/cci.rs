//! CCI (Commodity Channel Index) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::models::indicators::{Candle, CciSeries};

pub const DEFAULT_CCI_PERIOD: usize = 20;

/// Lambert's constant, scales CCI so most readings fall inside ±100
const CCI_CONSTANT: f64 = 0.015;

/// Floor applied when the mean deviation of a window is exactly zero (flat price)
pub const MAD_EPSILON: f64 = 0.001;

/// Calculate the CCI series
///
/// TP  = (high + low + close) / 3
/// CCI = (TP - SMA(TP, period)) / (0.015 * MAD(TP, period))
///
/// A value is only defined once `period` consecutive non-gap candles are available;
/// a gap resets the window.
pub fn calculate_cci(candles: &[Candle], period: usize) -> Result<CciSeries, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod(period));
    }
    if candles.is_empty() {
        return Err(IndicatorError::EmptySeries);
    }
    if candles.len() < period {
        return Err(IndicatorError::InsufficientData {
            required: period,
            actual: candles.len(),
        });
    }

    let mut series = Vec::with_capacity(candles.len());
    let mut run_start = 0;

    for (i, candle) in candles.iter().enumerate() {
        if candle.is_gap() {
            series.push(None);
            run_start = i + 1;
            continue;
        }
        if i + 1 < run_start + period {
            series.push(None);
            continue;
        }

        let window: Vec<f64> = candles[i + 1 - period..=i]
            .iter()
            .map(Candle::typical_price)
            .collect();
        series.push(cci_of_window(&window, period));
    }

    Ok(series)
}

/// Calculate CCI with the default period (20)
pub fn calculate_cci_default(candles: &[Candle]) -> Result<CciSeries, IndicatorError> {
    calculate_cci(candles, DEFAULT_CCI_PERIOD)
}

fn cci_of_window(window: &[f64], period: usize) -> Option<f64> {
    let mean = math::sma(window, period)?;
    let mad = math::mean_absolute_deviation(window, mean);
    let denominator = if mad > 0.0 { mad } else { MAD_EPSILON };
    let typical = *window.last()?;
    Some((typical - mean) / (CCI_CONSTANT * denominator))
}

/// Latest and previous defined-or-not CCI values
pub fn last_two(series: &[Option<f64>]) -> Option<(Option<f64>, Option<f64>)> {
    match series {
        [.., prev, curr] => Some((*prev, *curr)),
        _ => None,
    }
}
