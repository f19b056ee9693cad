//! Unit tests for alert formatting

use cci_scanner::models::indicators::TrendBias;
use cci_scanner::models::scan::Market;
use cci_scanner::models::signal::{SignalDirection, SignalRecord};
use cci_scanner::services::notify::format_alert;
use chrono::Utc;

fn record(symbol: &str, market: Market, direction: SignalDirection) -> SignalRecord {
    SignalRecord {
        symbol: symbol.to_string(),
        market,
        direction,
        cci: 123.456,
        price: 3500.5,
        time: Utc::now(),
        candle_time: Utc::now(),
        whale_vol: true,
        trend: TrendBias::Up,
        sniper_trend: true,
        win_rate: 66.7,
        wins: 2,
        total_trades: 3,
        sector: "IT".to_string(),
        breadth_aligned: true,
        confidence: 80,
    }
}

#[test]
fn test_no_alert_without_signals() {
    assert!(format_alert(&[]).is_none());
}

#[test]
fn test_alert_lists_each_signal() {
    let signals = vec![
        record("TCS", Market::Nse, SignalDirection::Bullish),
        record("AAPL", Market::Us, SignalDirection::Bearish),
    ];

    let alert = format_alert(&signals).unwrap();
    assert_eq!(alert.subject, "CCI Scanner: 2 Stocks Crossed CCI ±100");
    assert!(alert.body.contains(
        "TCS [NSE] BULLISH: Price 3500.50, CCI 123.46, Win rate 66.7% (2/3), Confidence 80%"
    ));
    assert!(alert.body.contains("AAPL [US] BEARISH"));
}
