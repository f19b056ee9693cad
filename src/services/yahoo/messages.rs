//! Chart API response shapes

use chrono::DateTime;
use serde::Deserialize;

use crate::models::indicators::Candle;

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

impl ChartResult {
    /// Convert the column arrays into candles.
    ///
    /// Bars with a missing price are dropped, missing volume counts as zero.
    /// Output is sorted by time with duplicate timestamps collapsed to the last bar.
    pub fn into_candles(self) -> Vec<Candle> {
        let Some(quote) = self.indicators.quote.into_iter().next() else {
            return Vec::new();
        };

        let value = |column: &[Option<f64>], i: usize| column.get(i).copied().flatten();

        let mut candles: Vec<Candle> = self
            .timestamp
            .iter()
            .enumerate()
            .filter_map(|(i, &ts)| {
                let timestamp = DateTime::from_timestamp(ts, 0)?;
                let open = value(&quote.open, i)?;
                let high = value(&quote.high, i)?;
                let low = value(&quote.low, i)?;
                let close = value(&quote.close, i)?;
                let volume = value(&quote.volume, i).unwrap_or(0.0);
                Some(Candle::new(open, high, low, close, volume, timestamp))
            })
            .collect();

        candles.sort_by_key(|c| c.timestamp);
        candles.reverse();
        candles.dedup_by_key(|c| c.timestamp);
        candles.reverse();
        candles
    }
}
