//! Ratio proxy against a stub Binance upstream

use crate::support::{closed_port, spawn_proxy, spawn_server, spawn_stub, BINANCE_PATH};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use market_pulse::ratio::RatioSample;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type Queries = Arc<Mutex<Vec<HashMap<String, String>>>>;

async fn fetch(proxy: &str, query: &str) -> (StatusCode, Option<String>, Value) {
    let response = reqwest::get(format!("{proxy}/api/longshort{query}"))
        .await
        .unwrap();
    let status = response.status();
    let cache_control = response
        .headers()
        .get("cache-control")
        .map(|v| v.to_str().unwrap().to_string());
    let body = response.json::<Value>().await.unwrap();
    (status, cache_control, body)
}

#[tokio::test]
async fn test_ratio_path_end_to_end() {
    let upstream = spawn_stub(
        BINANCE_PATH,
        StatusCode::OK,
        r#"[{"symbol":"BTCUSDT","longShortRatio":"2.0","longAccount":"0.6","shortAccount":"0.4","timestamp":1704067200000}]"#,
    )
    .await;
    let proxy = spawn_proxy(&upstream).await;

    let (status, cache_control, body) = fetch(&proxy, "?symbol=btcusdt").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        cache_control.as_deref(),
        Some("s-maxage=300, stale-while-revalidate=60")
    );

    let sample: RatioSample = serde_json::from_value(body).unwrap();
    assert_eq!(sample.symbol, "BTCUSDT");
    assert_eq!(sample.interval, "5m");
    assert_eq!(sample.ratio, Some(2.0));
    assert!((sample.long_pct - 66.67).abs() < 0.01);
    assert!((sample.short_pct - 33.33).abs() < 0.01);
    assert_eq!(sample.long_pct + sample.short_pct, 100.0);
}

#[tokio::test]
async fn test_nan_ratio_uses_accounts() {
    let upstream = spawn_stub(
        BINANCE_PATH,
        StatusCode::OK,
        r#"[{"longShortRatio":"NaN","longAccount":"0.7","shortAccount":"0.3"}]"#,
    )
    .await;
    let proxy = spawn_proxy(&upstream).await;

    let (status, _, body) = fetch(&proxy, "?symbol=ETHUSDT").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["ratio"].is_null());
    assert!((body["longPct"].as_f64().unwrap() - 70.0).abs() < 1e-9);
    assert!((body["shortPct"].as_f64().unwrap() - 30.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_upstream_query_parameters() {
    let queries: Queries = Arc::default();
    let app = Router::new()
        .route(
            BINANCE_PATH,
            get(
                |State(queries): State<Queries>, Query(q): Query<HashMap<String, String>>| async move {
                    queries.lock().unwrap().push(q);
                    Json(json!([{ "longShortRatio": "1.0" }]))
                },
            ),
        )
        .with_state(queries.clone());
    let upstream = spawn_server(app).await;
    let proxy = spawn_proxy(&upstream).await;

    let (status, _, _) = fetch(&proxy, "?symbol=solusdt&period=1h").await;
    assert_eq!(status, StatusCode::OK);

    let seen = queries.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0]["symbol"], "SOLUSDT");
    assert_eq!(seen[0]["period"], "5m");
    assert_eq!(seen[0]["limit"], "1");
}

#[tokio::test]
async fn test_upstream_429_forwarded() {
    let upstream = spawn_stub(
        BINANCE_PATH,
        StatusCode::TOO_MANY_REQUESTS,
        r#"{"code":-1003,"msg":"Too many requests"}"#,
    )
    .await;
    let proxy = spawn_proxy(&upstream).await;

    let (status, _, body) = fetch(&proxy, "?symbol=BTCUSDT").await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body, json!({ "error": "Upstream error", "status": 429 }));
}

#[tokio::test]
async fn test_empty_upstream_is_502() {
    let upstream = spawn_stub(BINANCE_PATH, StatusCode::OK, "[]").await;
    let proxy = spawn_proxy(&upstream).await;

    let (status, _, body) = fetch(&proxy, "").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({ "error": "No data" }));
}

#[tokio::test]
async fn test_malformed_upstream_is_500() {
    let upstream = spawn_stub(BINANCE_PATH, StatusCode::OK, "<html>maintenance</html>").await;
    let proxy = spawn_proxy(&upstream).await;

    let (status, _, body) = fetch(&proxy, "").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch long/short" }));
}

#[tokio::test]
async fn test_unreachable_upstream_is_500() {
    let upstream = closed_port().await;
    let proxy = spawn_proxy(&upstream).await;

    let (status, _, body) = fetch(&proxy, "?symbol=BTCUSDT").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch long/short" }));
}

#[tokio::test]
async fn test_non_array_upstream_is_502() {
    let upstream = spawn_stub(
        BINANCE_PATH,
        StatusCode::OK,
        r#"{"code":-1121,"msg":"Invalid symbol."}"#,
    )
    .await;
    let proxy = spawn_proxy(&upstream).await;

    let (status, _, body) = fetch(&proxy, "?symbol=NOPE").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({ "error": "No data" }));
}
