use thiserror::Error;

/// Failures while computing an indicator series
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("cannot compute indicator over an empty series")]
    EmptySeries,

    #[error("insufficient data: need at least {required} candles, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("invalid period: {0}")]
    InvalidPeriod(usize),

    #[error("indicator series length {series} does not match candle count {candles}")]
    LengthMismatch { series: usize, candles: usize },
}
