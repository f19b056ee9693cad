//! Yahoo Finance chart API candle source

use std::time::Duration;

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::Utc;
use tracing::{debug, warn};
use url::Url;

use super::messages::ChartResponse;
use crate::models::indicators::Candle;
use crate::services::error::MarketDataError;
use crate::services::market_data::{CandleRequest, CandleSource};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; cci-scanner)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_MAX_RETRIES: usize = 2;

pub struct YahooCandleSource {
    base_url: String,
    client: reqwest::Client,
    max_retries: usize,
}

impl YahooCandleSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn chart_url(&self, request: &CandleRequest) -> Result<Url, MarketDataError> {
        let mut url = Url::parse(&self.base_url)?;
        let ticker = request.ticker();
        url.path_segments_mut()
            .map_err(|_| MarketDataError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", ticker.as_str()]);

        let period2 = Utc::now();
        let period1 = period2 - chrono::Duration::days(i64::from(request.lookback_days));
        url.query_pairs_mut()
            .append_pair("interval", request.interval.as_str())
            .append_pair("period1", &period1.timestamp().to_string())
            .append_pair("period2", &period2.timestamp().to_string())
            .append_pair("includePrePost", "false");
        Ok(url)
    }

    async fn fetch_once(&self, request: &CandleRequest) -> Result<Vec<Candle>, MarketDataError> {
        let ticker = request.ticker();
        let url = self.chart_url(request)?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::Status {
                symbol: ticker,
                status: status.as_u16(),
            });
        }

        let body: ChartResponse = response.json().await.map_err(|e| MarketDataError::Decode {
            symbol: ticker.clone(),
            reason: e.to_string(),
        })?;

        if let Some(error) = body.chart.error {
            return Err(MarketDataError::Provider {
                symbol: ticker,
                message: format!("{}: {}", error.code, error.description),
            });
        }

        let candles = body
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .map(|result| result.into_candles())
            .unwrap_or_default();

        debug!(
            symbol = %ticker,
            interval = request.interval.as_str(),
            count = candles.len(),
            "YahooCandleSource: fetched {} candles for {}",
            candles.len(),
            ticker
        );
        Ok(candles)
    }
}

#[async_trait]
impl CandleSource for YahooCandleSource {
    async fn fetch_candles(&self, request: &CandleRequest) -> Result<Vec<Candle>, MarketDataError> {
        let backoff = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(250))
            .with_max_delay(Duration::from_secs(2))
            .with_max_times(self.max_retries);

        (|| async { self.fetch_once(request).await })
            .retry(backoff)
            .sleep(tokio::time::sleep)
            .when(MarketDataError::is_transient)
            .notify(|err: &MarketDataError, dur: Duration| {
                warn!(
                    symbol = %request.ticker(),
                    error = %err,
                    retry_in_ms = dur.as_millis() as u64,
                    "YahooCandleSource: transient failure, retrying"
                );
            })
            .await
    }
}
