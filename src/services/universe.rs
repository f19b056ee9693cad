//! Symbol universes per market

use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::models::scan::Market;
use crate::services::error::MarketDataError;

pub const NIFTY_200_CSV_URL: &str =
    "https://nsearchives.nseindia.com/content/indices/ind_nifty200list.csv";

const NSE_FALLBACK: &[&str] = &["RELIANCE", "TCS", "INFY", "HDFCBANK", "ICICIBANK"];

const NSE_BUILTIN: &[&str] = &[
    "RELIANCE", "TCS", "INFY", "HDFCBANK", "ICICIBANK", "SBIN", "BHARTIARTL", "ITC", "KOTAKBANK",
    "LT", "AXISBANK", "HCLTECH", "BAJFINANCE", "ASIANPAINT", "MARUTI", "TITAN", "ULTRACEMCO",
    "SUNPHARMA", "WIPRO", "TATAMOTORS", "ADANIENT", "ADANIPORTS", "POWERGRID", "NTPC", "JSWSTEEL",
    "TATASTEEL", "HINDUNILVR", "NESTLEIND", "ONGC", "COALINDIA", "TECHM", "HINDALCO", "GRASIM",
    "HEROMOTOCO", "BAJAJ-AUTO", "EICHERMOT", "DRREDDY", "CIPLA", "DIVISLAB", "APOLLOHOSP",
    "BRITANNIA", "TATACONSUM", "UPL", "BPCL", "SBILIFE", "HDFCLIFE",
];

const US_BUILTIN: &[&str] = &[
    "AAPL", "MSFT", "NVDA", "AMD", "AVGO", "GOOGL", "META", "NFLX", "AMZN", "TSLA", "JPM", "BAC",
    "V", "MA", "XOM", "CVX", "JNJ", "PFE", "LLY", "WMT",
];

#[async_trait]
pub trait SymbolUniverse: Send + Sync {
    /// Ordered tickers (without market suffix) for one market
    async fn list_symbols(&self, market: Market) -> Result<Vec<String>, MarketDataError>;
}

/// Fixed symbol lists
#[derive(Debug, Clone)]
pub struct StaticUniverse {
    nse: Vec<String>,
    us: Vec<String>,
}

impl StaticUniverse {
    pub fn new(nse: Vec<String>, us: Vec<String>) -> Self {
        Self { nse, us }
    }

    pub fn builtin() -> Self {
        Self::new(to_owned(NSE_BUILTIN), to_owned(US_BUILTIN))
    }

    fn symbols(&self, market: Market) -> Vec<String> {
        match market {
            Market::Nse => self.nse.clone(),
            Market::Us => self.us.clone(),
        }
    }
}

impl Default for StaticUniverse {
    fn default() -> Self {
        Self::builtin()
    }
}

#[async_trait]
impl SymbolUniverse for StaticUniverse {
    async fn list_symbols(&self, market: Market) -> Result<Vec<String>, MarketDataError> {
        Ok(self.symbols(market))
    }
}

/// NSE constituents downloaded from the index CSV; US symbols from a static list.
///
/// A failed download falls back to a short list of liquid NSE names so a scan
/// still has something to do.
pub struct NseIndexUniverse {
    csv_url: String,
    client: reqwest::Client,
    us: Vec<String>,
}

impl NseIndexUniverse {
    pub fn new(csv_url: impl Into<String>) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0")
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self::with_client(csv_url, client))
    }

    pub fn with_client(csv_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            csv_url: csv_url.into(),
            client,
            us: to_owned(US_BUILTIN),
        }
    }

    pub fn with_us_symbols(mut self, us: Vec<String>) -> Self {
        self.us = us;
        self
    }

    async fn download(&self) -> Result<Vec<String>, MarketDataError> {
        let response = self.client.get(&self.csv_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::Status {
                symbol: "NIFTY 200".to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await?;
        parse_symbol_csv(&body)
    }
}

#[async_trait]
impl SymbolUniverse for NseIndexUniverse {
    async fn list_symbols(&self, market: Market) -> Result<Vec<String>, MarketDataError> {
        match market {
            Market::Us => Ok(self.us.clone()),
            Market::Nse => match self.download().await {
                Ok(symbols) if !symbols.is_empty() => {
                    info!(count = symbols.len(), "NseIndexUniverse: loaded {} NSE symbols", symbols.len());
                    Ok(symbols)
                }
                Ok(_) => {
                    warn!("NseIndexUniverse: index CSV had no symbols, using fallback list");
                    Ok(to_owned(NSE_FALLBACK))
                }
                Err(e) => {
                    warn!(error = %e, "NseIndexUniverse: failed to fetch NSE symbols, using fallback list");
                    Ok(to_owned(NSE_FALLBACK))
                }
            },
        }
    }
}

/// Extract the `Symbol` column of an index constituents CSV
pub fn parse_symbol_csv(data: &[u8]) -> Result<Vec<String>, MarketDataError> {
    let mut reader = csv::Reader::from_reader(data);
    let headers = reader.headers()?.clone();
    let column = headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case("symbol"))
        .ok_or_else(|| MarketDataError::UniverseUnavailable {
            market: Market::Nse.label().to_string(),
            reason: "CSV has no Symbol column".to_string(),
        })?;

    let mut symbols = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(symbol) = record.get(column).map(str::trim).filter(|s| !s.is_empty()) {
            symbols.push(symbol.to_string());
        }
    }
    Ok(symbols)
}

fn to_owned(symbols: &[&str]) -> Vec<String> {
    symbols.iter().map(|s| s.to_string()).collect()
}
