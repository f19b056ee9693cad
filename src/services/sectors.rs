//! Static symbol → sector lookup

use std::collections::HashMap;

pub const UNKNOWN_SECTOR: &str = "Others";

pub trait SectorLookup: Send + Sync {
    /// Sector name, or `"Others"` for unknown symbols
    fn sector_of(&self, symbol: &str) -> String;
}

const BUILTIN_SECTORS: &[(&str, &str)] = &[
    ("RELIANCE", "Energy"),
    ("TCS", "IT"),
    ("INFY", "IT"),
    ("HDFCBANK", "Bank"),
    ("ICICIBANK", "Bank"),
    ("SBIN", "Bank"),
    ("BHARTIARTL", "Telecom"),
    ("ITC", "FMCG"),
    ("KOTAKBANK", "Bank"),
    ("LT", "Infrastructure"),
    ("AXISBANK", "Bank"),
    ("HCLTECH", "IT"),
    ("BAJFINANCE", "Finance"),
    ("ASIANPAINT", "Consumer"),
    ("MARUTI", "Auto"),
    ("TITAN", "Consumer"),
    ("ULTRACEMCO", "Cement"),
    ("SUNPHARMA", "Pharma"),
    ("WIPRO", "IT"),
    ("TATAMOTORS", "Auto"),
    ("ADANIENT", "Metals"),
    ("ADANIPORTS", "Infrastructure"),
    ("POWERGRID", "Power"),
    ("NTPC", "Power"),
    ("JSWSTEEL", "Metals"),
    ("TATASTEEL", "Metals"),
    ("HINDUNILVR", "FMCG"),
    ("NESTLEIND", "FMCG"),
    ("ONGC", "Energy"),
    ("COALINDIA", "Energy"),
    ("TECHM", "IT"),
    ("HINDALCO", "Metals"),
    ("GRASIM", "Cement"),
    ("HEROMOTOCO", "Auto"),
    ("BAJAJ-AUTO", "Auto"),
    ("EICHERMOT", "Auto"),
    ("DRREDDY", "Pharma"),
    ("CIPLA", "Pharma"),
    ("DIVISLAB", "Pharma"),
    ("APOLLOHOSP", "Pharma"),
    ("BRITANNIA", "FMCG"),
    ("TATACONSUM", "FMCG"),
    ("UPL", "Chemicals"),
    ("BPCL", "Energy"),
    ("SBILIFE", "Insurance"),
    ("HDFCLIFE", "Insurance"),
    ("AAPL", "Technology"),
    ("MSFT", "Technology"),
    ("NVDA", "Semiconductors"),
    ("AMD", "Semiconductors"),
    ("AVGO", "Semiconductors"),
    ("GOOGL", "Communication"),
    ("META", "Communication"),
    ("NFLX", "Communication"),
    ("AMZN", "Consumer"),
    ("TSLA", "Auto"),
    ("JPM", "Bank"),
    ("BAC", "Bank"),
    ("V", "Finance"),
    ("MA", "Finance"),
    ("XOM", "Energy"),
    ("CVX", "Energy"),
    ("JNJ", "Pharma"),
    ("PFE", "Pharma"),
    ("LLY", "Pharma"),
    ("WMT", "Consumer"),
];

pub struct StaticSectorMap {
    sectors: HashMap<String, String>,
}

impl StaticSectorMap {
    pub fn new() -> Self {
        Self::from_pairs(BUILTIN_SECTORS.iter().copied())
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            sectors: pairs
                .into_iter()
                .map(|(symbol, sector)| (symbol.to_string(), sector.to_string()))
                .collect(),
        }
    }
}

impl Default for StaticSectorMap {
    fn default() -> Self {
        Self::new()
    }
}

impl SectorLookup for StaticSectorMap {
    fn sector_of(&self, symbol: &str) -> String {
        self.sectors
            .get(symbol)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_SECTOR.to_string())
    }
}
