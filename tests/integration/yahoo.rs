//! Integration tests for the Yahoo candle source and NSE universe against a mock server

use cci_scanner::models::scan::Market;
use cci_scanner::services::market_data::{CandleRequest, CandleSource, Interval};
use cci_scanner::services::universe::{NseIndexUniverse, SymbolUniverse};
use cci_scanner::services::yahoo::YahooCandleSource;
use cci_scanner::services::MarketDataError;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chart_body() -> serde_json::Value {
    json!({
        "chart": {
            "result": [{
                "meta": { "symbol": "TCS.NS" },
                "timestamp": [1709528400, 1709529300, 1709530200],
                "indicators": {
                    "quote": [{
                        "open":   [3500.0, 3502.0, 3504.0],
                        "high":   [3505.0, 3507.0, 3509.0],
                        "low":    [3495.0, 3497.0, 3499.0],
                        "close":  [3502.0, 3504.0, 3506.0],
                        "volume": [12000, 9000, 15000]
                    }]
                }
            }],
            "error": null
        }
    })
}

fn request() -> CandleRequest {
    CandleRequest::new("TCS", ".NS", Interval::FifteenMinutes, 10)
}

#[tokio::test]
async fn fetches_and_decodes_chart() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/TCS.NS"))
        .and(query_param("interval", "15m"))
        .and(query_param("includePrePost", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body()))
        .expect(1)
        .mount(&server)
        .await;

    let source = YahooCandleSource::with_client(server.uri(), reqwest::Client::new());
    let candles = source.fetch_candles(&request()).await.unwrap();

    assert_eq!(candles.len(), 3);
    assert_eq!(candles[0].close, 3502.0);
    assert_eq!(candles[2].volume, 15000.0);
    assert!(candles.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/TCS.NS"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let source = YahooCandleSource::with_client(server.uri(), reqwest::Client::new())
        .with_max_retries(3);
    let result = source.fetch_candles(&request()).await;

    assert!(matches!(
        result,
        Err(MarketDataError::Status { status: 404, .. })
    ));
}

#[tokio::test]
async fn server_errors_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/TCS.NS"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/TCS.NS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body()))
        .expect(1)
        .mount(&server)
        .await;

    let source = YahooCandleSource::with_client(server.uri(), reqwest::Client::new())
        .with_max_retries(2);
    let candles = source.fetch_candles(&request()).await.unwrap();
    assert_eq!(candles.len(), 3);
}

#[tokio::test]
async fn provider_error_envelope_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/GONE.NS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "chart": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
            }
        })))
        .mount(&server)
        .await;

    let source = YahooCandleSource::with_client(server.uri(), reqwest::Client::new());
    let request = CandleRequest::new("GONE", ".NS", Interval::Daily, 450);
    let result = source.fetch_candles(&request).await;

    assert!(matches!(result, Err(MarketDataError::Provider { .. })));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/TCS.NS"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
        .mount(&server)
        .await;

    let source = YahooCandleSource::with_client(server.uri(), reqwest::Client::new());
    let result = source.fetch_candles(&request()).await;

    assert!(matches!(result, Err(MarketDataError::Decode { .. })));
}

#[tokio::test]
async fn nse_universe_reads_index_csv() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/indices/nifty200.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "Company Name,Industry,Symbol,Series,ISIN Code\n\
             Reliance Industries Ltd.,Oil Gas,RELIANCE,EQ,INE002A01018\n\
             HDFC Bank Ltd.,Financial Services,HDFCBANK,EQ,INE040A01034\n",
        ))
        .mount(&server)
        .await;

    let universe = NseIndexUniverse::with_client(
        format!("{}/indices/nifty200.csv", server.uri()),
        reqwest::Client::new(),
    )
    .with_us_symbols(vec!["AAPL".to_string()]);

    assert_eq!(
        universe.list_symbols(Market::Nse).await.unwrap(),
        vec!["RELIANCE", "HDFCBANK"]
    );
    assert_eq!(universe.list_symbols(Market::Us).await.unwrap(), vec!["AAPL"]);
}

#[tokio::test]
async fn nse_universe_falls_back_when_download_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/indices/nifty200.csv"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let universe = NseIndexUniverse::with_client(
        format!("{}/indices/nifty200.csv", server.uri()),
        reqwest::Client::new(),
    );

    let symbols = universe.list_symbols(Market::Nse).await.unwrap();
    assert_eq!(symbols.len(), 5);
    assert!(symbols.contains(&"RELIANCE".to_string()));
}
