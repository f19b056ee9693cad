//! Prometheus metrics for the scanner

use prometheus::{
    Encoder, Gauge, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry,
    TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: Gauge,
    pub http_request_duration_seconds: Histogram,
    pub scans_total: IntCounter,
    pub scan_duration_seconds: Histogram,
    pub symbol_evaluations_total: IntCounterVec,
    pub signals_total: IntCounterVec,
    pub feed_size: Gauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::with_opts(Opts::new("http_requests_total", "Total HTTP requests"))?;
        registry.register(Box::new(http_requests_total.clone()))?;

        let http_requests_in_flight = Gauge::with_opts(Opts::new(
            "http_requests_in_flight",
            "HTTP requests currently being served",
        ))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;

        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;

        let scans_total = IntCounter::with_opts(Opts::new("scans_total", "Completed scans"))?;
        registry.register(Box::new(scans_total.clone()))?;

        let scan_duration_seconds = Histogram::with_opts(
            HistogramOpts::new("scan_duration_seconds", "Wall-clock duration of a scan")
                .buckets(vec![1.0, 5.0, 15.0, 30.0, 60.0, 120.0, 240.0, 600.0]),
        )?;
        registry.register(Box::new(scan_duration_seconds.clone()))?;

        let symbol_evaluations_total = IntCounterVec::new(
            Opts::new("symbol_evaluations_total", "Symbol evaluations by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(symbol_evaluations_total.clone()))?;

        let signals_total = IntCounterVec::new(
            Opts::new("signals_total", "Signals emitted by direction"),
            &["direction"],
        )?;
        registry.register(Box::new(signals_total.clone()))?;

        let feed_size = Gauge::with_opts(Opts::new("feed_size", "Records currently in the feed"))?;
        registry.register(Box::new(feed_size.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
            scans_total,
            scan_duration_seconds,
            symbol_evaluations_total,
            signals_total,
            feed_size,
        })
    }

    /// Prometheus text exposition of every registered metric
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
