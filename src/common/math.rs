//! Small numeric helpers shared by the indicators.

/// Simple moving average of the last `period` values
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Mean absolute deviation of `values` around `mean`
pub fn mean_absolute_deviation(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| (v - mean).abs()).sum::<f64>() / values.len() as f64
}

/// Exponentially weighted mean with span-based smoothing and adjusted weights.
///
/// Each observation `x_{t-i}` carries weight `(1 - alpha)^i` with `alpha = 2 / (span + 1)`,
/// normalised by the sum of weights, so the series is defined from the first value.
pub fn ema_adjusted(values: &[f64], span: usize) -> Option<f64> {
    if span == 0 || values.is_empty() {
        return None;
    }
    let alpha = 2.0 / (span as f64 + 1.0);
    let decay = 1.0 - alpha;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for value in values {
        numerator = value + decay * numerator;
        denominator = 1.0 + decay * denominator;
    }

    Some(numerator / denominator)
}
