use thiserror::Error;

/// Failures talking to market-data collaborators
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned status {status} for {symbol}")]
    Status { symbol: String, status: u16 },

    #[error("provider error for {symbol}: {message}")]
    Provider { symbol: String, message: String },

    #[error("malformed response for {symbol}: {reason}")]
    Decode { symbol: String, reason: String },

    #[error("invalid provider URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("symbol universe unavailable for {market}: {reason}")]
    UniverseUnavailable { market: String, reason: String },
}

impl MarketDataError {
    /// Worth retrying: connection trouble, timeouts, rate limiting and 5xx
    pub fn is_transient(&self) -> bool {
        match self {
            MarketDataError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            MarketDataError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
