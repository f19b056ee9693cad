//! Unit tests for confidence scoring and ranking

use cci_scanner::models::indicators::TrendBias;
use cci_scanner::models::scan::Market;
use cci_scanner::models::signal::{SignalDirection, SignalRecord};
use cci_scanner::signals::scoring::{
    apply_score, confidence_breakdown, is_breadth_aligned, rank_signals, ScoringContext,
};
use chrono::Utc;

fn record(symbol: &str, direction: SignalDirection) -> SignalRecord {
    SignalRecord {
        symbol: symbol.to_string(),
        market: Market::Nse,
        direction,
        cci: 120.0,
        price: 100.0,
        time: Utc::now(),
        candle_time: Utc::now(),
        whale_vol: false,
        trend: TrendBias::Neutral,
        sniper_trend: false,
        win_rate: 0.0,
        wins: 0,
        total_trades: 0,
        sector: "Others".to_string(),
        breadth_aligned: false,
        confidence: 0,
    }
}

#[test]
fn test_all_components_score_100() {
    let mut signal = record("TCS", SignalDirection::Bullish);
    signal.sniper_trend = true;
    signal.whale_vol = true;
    signal.win_rate = 75.0;
    signal.sector = "IT".to_string();
    let ctx = ScoringContext::new(70.0, vec!["IT".to_string()]);

    let breakdown = apply_score(&mut signal, &ctx);
    assert_eq!(breakdown.total(), 100);
    assert_eq!(signal.confidence, 100);
    assert!(signal.breadth_aligned);
}

#[test]
fn test_no_components_score_zero() {
    let mut signal = record("TCS", SignalDirection::Bullish);
    let ctx = ScoringContext::new(30.0, vec!["Bank".to_string()]);

    apply_score(&mut signal, &ctx);
    assert_eq!(signal.confidence, 0);
    assert!(!signal.breadth_aligned);
}

#[test]
fn test_win_rate_must_exceed_threshold() {
    let mut signal = record("TCS", SignalDirection::Bullish);
    signal.win_rate = 60.0;
    let breakdown = confidence_breakdown(&signal, &ScoringContext::default());
    assert!(!breakdown.win_rate);

    signal.win_rate = 60.1;
    let breakdown = confidence_breakdown(&signal, &ScoringContext::default());
    assert!(breakdown.win_rate);
    assert_eq!(breakdown.total(), 20);
}

#[test]
fn test_breadth_alignment() {
    assert!(is_breadth_aligned(SignalDirection::Bullish, 50.1));
    assert!(!is_breadth_aligned(SignalDirection::Bullish, 50.0));
    assert!(is_breadth_aligned(SignalDirection::Bearish, 49.9));
    assert!(!is_breadth_aligned(SignalDirection::Bearish, 50.0));
}

#[test]
fn test_rank_by_confidence_then_symbol() {
    let mut a = record("ZEE", SignalDirection::Bullish);
    a.confidence = 40;
    let mut b = record("ABB", SignalDirection::Bearish);
    b.confidence = 40;
    let mut c = record("MRF", SignalDirection::Bullish);
    c.confidence = 80;

    let mut signals = vec![a, b, c];
    rank_signals(&mut signals);
    let order: Vec<&str> = signals.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(order, vec!["MRF", "ABB", "ZEE"]);
}
