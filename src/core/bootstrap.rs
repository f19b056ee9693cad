//! Wiring of the production collaborators from configuration

use std::sync::Arc;

use crate::config::ScannerConfig;
use crate::core::feed::FeedStore;
use crate::core::orchestrator::{OrchestratorConfig, ScanOrchestrator};
use crate::core::runtime::ScanService;
use crate::metrics::Metrics;
use crate::services::calendar::SessionCalendar;
use crate::services::sectors::StaticSectorMap;
use crate::services::universe::NseIndexUniverse;
use crate::services::yahoo::YahooCandleSource;
use crate::services::MarketDataError;
use crate::signals::evaluator::SymbolEvaluator;

/// Yahoo candles, the NIFTY 200 universe and the built-in sector map
pub fn build_service(
    config: &ScannerConfig,
    metrics: Option<Arc<Metrics>>,
) -> Result<ScanService, MarketDataError> {
    let source = Arc::new(YahooCandleSource::new(config.market_data_base_url.clone())?);
    let universe = Arc::new(NseIndexUniverse::new(config.nse_universe_url.clone())?);
    let evaluator = Arc::new(SymbolEvaluator::with_params(
        source,
        Arc::new(StaticSectorMap::new()),
        config.evaluator_params(),
    ));

    let orchestrator = ScanOrchestrator::new(
        evaluator,
        universe,
        OrchestratorConfig {
            workers: config.workers,
            scan_timeout: config.scan_timeout(),
        },
    );

    let mut service = ScanService::new(orchestrator, FeedStore::new(config.staleness()))
        .with_markets(config.scan_nse, config.scan_us);
    if config.market_hours_only {
        service = service.with_calendar(Arc::new(SessionCalendar::default()));
    }
    if let Some(metrics) = metrics {
        service = service.with_metrics(metrics);
    }
    Ok(service)
}
