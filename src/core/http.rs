//! HTTP endpoint server using Axum

use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::core::runtime::ScanService;
use crate::core::scheduler::ScanScheduler;
use crate::metrics::Metrics;
use crate::models::scan::ScanReport;
use crate::models::signal::SignalRecord;

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub service: Arc<ScanService>,
    pub scheduler: Option<Arc<ScanScheduler>>,
}

impl AppState {
    pub fn new(service: Arc<ScanService>, metrics: Arc<Metrics>) -> Self {
        Self {
            metrics,
            start_time: Arc::new(Instant::now()),
            service,
            scheduler: None,
        }
    }

    pub fn with_scheduler(mut self, scheduler: Arc<ScanScheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }
}

/// Degraded when every evaluation in the last scan failed
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let degraded = state
        .service
        .last_stats()
        .await
        .is_some_and(|stats| stats.all_failed());
    let status = if degraded { "degraded" } else { "healthy" };
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": status,
        "uptime_seconds": uptime_seconds,
        "service": "cci-scanner"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();
    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Deserialize)]
struct ScanQuery {
    nse: Option<bool>,
    us: Option<bool>,
}

/// Current feed, newest first
async fn list_signals(State(state): State<AppState>) -> Json<Vec<SignalRecord>> {
    let feed = state.service.get_feed().await;
    Json(feed.as_ref().clone())
}

async fn scan_status(State(state): State<AppState>) -> Json<Value> {
    let scheduler_running = match &state.scheduler {
        Some(scheduler) => scheduler.is_running().await,
        None => false,
    };
    let last_scan = state.service.last_stats().await;
    let status = if last_scan.is_some() { "ready" } else { "idle" };

    Json(json!({
        "status": status,
        "scheduler": scheduler_running,
        "last_scan": last_scan,
    }))
}

/// Run a scan now; the enabled markets unless overridden in the query
async fn trigger_scan(
    State(state): State<AppState>,
    Query(params): Query<ScanQuery>,
) -> Json<ScanReport> {
    let enabled = state.service.enabled_markets();
    let include_nse = params.nse.unwrap_or(enabled.nse);
    let include_us = params.us.unwrap_or(enabled.us);
    info!(
        nse = include_nse,
        us = include_us,
        "API: manual scan requested"
    );
    Json(state.service.run_scan(include_nse, include_us).await)
}

async fn inject_signal(
    State(state): State<AppState>,
    Json(record): Json<SignalRecord>,
) -> Json<Vec<SignalRecord>> {
    let feed = state.service.inject_signal(record).await;
    Json(feed.as_ref().clone())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/signals", get(list_signals))
        .route("/api/signals/inject", post(inject_signal))
        .route("/api/status", get(scan_status))
        .route("/api/scan", post(trigger_scan))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(
    port: u16,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
