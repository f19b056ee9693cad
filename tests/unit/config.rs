//! Unit tests for scanner configuration defaults

use cci_scanner::config::ScannerConfig;
use cci_scanner::logging::is_production;
use std::time::Duration;

#[test]
fn test_defaults() {
    let config = ScannerConfig::default();
    assert_eq!(config.port, 8080);
    assert_eq!(config.workers, 20);
    assert_eq!(config.cci_period, 20);
    assert_eq!(config.min_bars, 50);
    assert_eq!(config.scan_timeout(), Some(Duration::from_secs(240)));
    assert_eq!(config.staleness(), chrono::Duration::hours(12));
    assert!(config.scan_nse && config.scan_us);
}

#[test]
fn test_zero_timeout_disables() {
    let config = ScannerConfig {
        scan_timeout_seconds: 0,
        ..ScannerConfig::default()
    };
    assert_eq!(config.scan_timeout(), None);
}

#[test]
fn test_evaluator_params_follow_config() {
    let config = ScannerConfig {
        cci_period: 14,
        min_bars: 30,
        ..ScannerConfig::default()
    };
    let params = config.evaluator_params();
    assert_eq!(params.cci_period, 14);
    assert_eq!(params.min_bars, 30);
    assert_eq!(params.backtest.warmup_bars, 15);
    assert_eq!(params.daily_lookback_days, 450);
    assert_eq!(params.trend_period, 200);
}

#[test]
fn test_production_environments() {
    assert!(is_production("production"));
    assert!(is_production("prod"));
    assert!(!is_production("sandbox"));
}
