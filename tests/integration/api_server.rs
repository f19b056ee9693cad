//! Integration tests for the API Server
//!
//! Tests HTTP endpoints, health checks, metrics, and scan triggering.

use std::sync::Arc;

use axum_test::TestServer;
use cci_scanner::core::feed::FeedStore;
use cci_scanner::core::http::{create_router, AppState};
use cci_scanner::core::runtime::ScanService;
use cci_scanner::metrics::Metrics;
use cci_scanner::models::signal::SignalRecord;
use serde_json::{json, Value};

use crate::test_utils::{five_symbol_service, five_symbol_universe, orchestrator, FakeCandleSource};

/// Test helper bundling the HTTP server with its service
#[allow(dead_code)]
struct TestApiServer {
    server: TestServer,
    metrics: Arc<Metrics>,
    service: Arc<ScanService>,
}

impl TestApiServer {
    fn new() -> Self {
        Self::with_service(five_symbol_service())
    }

    fn with_service(service: ScanService) -> Self {
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let service = Arc::new(service.with_metrics(metrics.clone()));
        let state = AppState::new(service.clone(), metrics.clone());

        let app = create_router(state);
        let server = TestServer::new(app).expect("start test server");

        Self {
            server,
            metrics,
            service,
        }
    }
}

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new();
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "cci-scanner");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn health_endpoint_reports_degraded_when_every_evaluation_fails() {
    let failing = ScanService::new(
        orchestrator(FakeCandleSource::new(), Arc::new(five_symbol_universe()), 4, None),
        FeedStore::default(),
    );
    let app = TestApiServer::with_service(failing);

    let body: Value = app.server.get("/health").await.json();
    assert_eq!(body["status"], "healthy");

    app.service.run_scan(true, false).await;

    let body: Value = app.server.get("/health").await.json();
    assert_eq!(body["status"], "degraded");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn health_endpoint_stays_healthy_after_successful_scan() {
    let app = TestApiServer::new();
    app.service.run_scan(true, false).await;

    let body: Value = app.server.get("/health").await.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new();
    app.server.get("/health").await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    for metric in [
        "http_requests_total",
        "http_request_duration_seconds",
        "http_requests_in_flight",
        "scans_total",
        "feed_size",
    ] {
        assert!(body.contains(metric), "Expected {} metric", metric);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn signals_endpoint_starts_empty() {
    let app = TestApiServer::new();
    let response = app.server.get("/api/signals").await;
    assert_eq!(response.status_code(), 200);

    let body: Vec<SignalRecord> = response.json();
    assert!(body.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn scan_endpoint_runs_scan_and_fills_feed() {
    let app = TestApiServer::new();

    let response = app
        .server
        .post("/api/scan")
        .add_query_param("us", false)
        .await;
    assert_eq!(response.status_code(), 200);

    let report: Value = response.json();
    assert_eq!(report["stats"]["market_label"], "NSE");
    assert_eq!(report["stats"]["total_scanned"], 5);
    assert_eq!(report["signals"][0]["symbol"], "TCS");
    assert_eq!(report["signals"][0]["type"], "BULLISH");
    assert_eq!(report["signals"][0]["trend"], "UP");
    assert_eq!(report["sectors"][0]["sector"], "IT");

    let feed: Vec<SignalRecord> = app.server.get("/api/signals").await.json();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].symbol, "TCS");

    assert_eq!(app.metrics.scans_total.get(), 1);
    assert_eq!(
        app.metrics
            .symbol_evaluations_total
            .with_label_values(&["no_signal"])
            .get(),
        4
    );
    assert_eq!(app.metrics.feed_size.get(), 1.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn scan_endpoint_defaults_to_enabled_markets() {
    let app = TestApiServer::with_service(five_symbol_service().with_markets(true, false));

    let report: Value = app.server.post("/api/scan").await.json();
    assert_eq!(report["stats"]["market_label"], "NSE");

    let report: Value = app
        .server
        .post("/api/scan")
        .add_query_param("us", true)
        .await
        .json();
    assert_eq!(report["stats"]["market_label"], "NSE + US");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn status_endpoint_reports_last_scan() {
    let app = TestApiServer::new();

    let body: Value = app.server.get("/api/status").await.json();
    assert_eq!(body["status"], "idle");
    assert_eq!(body["scheduler"], false);
    assert!(body["last_scan"].is_null());

    app.service.run_scan(true, false).await;

    let body: Value = app.server.get("/api/status").await.json();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["last_scan"]["signals_found"], 1);
}

#[tokio::test]
async fn inject_endpoint_prepends_record() {
    let app = TestApiServer::new();

    let record = json!({
        "symbol": "NVDA",
        "market": "US",
        "type": "BEARISH",
        "cci": -140.2,
        "price": 880.5,
        "time": "2024-03-04T15:00:00Z",
        "candle_time": "2024-03-04T14:45:00Z",
        "whale_vol": false,
        "trend": "DOWN",
        "sniper_trend": true,
        "win_rate": 50.0,
        "wins": 1,
        "total_trades": 2,
        "sector": "Semiconductors"
    });

    let response = app.server.post("/api/signals/inject").json(&record).await;
    assert_eq!(response.status_code(), 200);

    let feed: Vec<SignalRecord> = response.json();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].symbol, "NVDA");
    assert_eq!(feed[0].confidence, 0);
    assert!(!feed[0].breadth_aligned);
}
