//! Sentiment poller against a live proxy

use crate::support::{spawn_proxy, spawn_server, BINANCE_PATH};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use market_pulse::sentiment::{ProxyClient, SentimentPoller, SentimentView};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Queries = Arc<Mutex<Vec<HashMap<String, String>>>>;

fn symbols() -> Vec<String> {
    ["BTCUSDT", "ETHUSDT", "SOLUSDT"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn poller(proxy: &str) -> SentimentPoller {
    let client = ProxyClient::new(proxy, Duration::from_secs(5)).unwrap();
    SentimentPoller::new(Arc::new(client), symbols())
}

/// Binance stub where ETHUSDT is rate limited and the rest carry fixed ratios
async fn spawn_binance() -> String {
    let app = Router::new().route(
        BINANCE_PATH,
        get(|Query(q): Query<HashMap<String, String>>| async move {
            let reply: Response = match q.get("symbol").map(String::as_str) {
                Some("BTCUSDT") => Json(json!([{ "longShortRatio": "3.0" }])).into_response(),
                Some("SOLUSDT") => Json(json!([{ "longShortRatio": "NaN", "longAccount": "0.4", "shortAccount": "0.6" }]))
                    .into_response(),
                _ => StatusCode::TOO_MANY_REQUESTS.into_response(),
            };
            reply
        }),
    );
    spawn_server(app).await
}

#[tokio::test]
async fn test_round_through_real_proxy() {
    let binance = spawn_binance().await;
    let proxy = spawn_proxy(&binance).await;
    let poller = poller(&proxy);

    let summary = poller.run_round().await;
    assert_eq!(summary.updated.len(), 2);
    assert_eq!(summary.failed, vec!["ETHUSDT".to_string()]);

    let map = poller.snapshot().await;
    assert_eq!(map.len(), 2);
    assert!((map.get("BTCUSDT").unwrap().long_pct - 75.0).abs() < 1e-9);
    assert!(map.get("ETHUSDT").is_none());
    assert_eq!(map.get("SOLUSDT").unwrap().ratio, None);

    let views = poller.views().await;
    assert_eq!(
        views,
        vec![
            SentimentView {
                symbol: "BTCUSDT".to_string(),
                long: 75,
                short: 25,
                ratio_label: "3.00".to_string(),
            },
            SentimentView {
                symbol: "ETHUSDT".to_string(),
                long: 50,
                short: 50,
                ratio_label: "—".to_string(),
            },
            SentimentView {
                symbol: "SOLUSDT".to_string(),
                long: 40,
                short: 60,
                ratio_label: "—".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_client_sends_only_symbol() {
    let queries: Queries = Arc::default();
    let app = Router::new()
        .route(
            "/api/longshort",
            get(
                |State(queries): State<Queries>, Query(q): Query<HashMap<String, String>>| async move {
                    let symbol = q.get("symbol").cloned().unwrap_or_default();
                    queries.lock().unwrap().push(q);
                    Json(json!({
                        "symbol": symbol,
                        "interval": "5m",
                        "ratio": 1.0,
                        "longPct": 50.0,
                        "shortPct": 50.0,
                    }))
                },
            ),
        )
        .with_state(queries.clone());
    let proxy = spawn_server(app).await;

    let summary = poller(&proxy).run_round().await;
    assert_eq!(summary.updated.len(), 3);
    assert!(summary.failed.is_empty());

    let seen = queries.lock().unwrap();
    assert_eq!(seen.len(), 3);
    for q in seen.iter() {
        assert_eq!(q.len(), 1, "unexpected params: {q:?}");
        assert!(q.contains_key("symbol"));
    }
}

#[tokio::test]
async fn test_failed_round_keeps_previous_values() {
    let healthy = Arc::new(Mutex::new(true));
    let app = Router::new()
        .route(
            "/api/longshort",
            get(
                |State(healthy): State<Arc<Mutex<bool>>>, Query(q): Query<HashMap<String, String>>| async move {
                    if !*healthy.lock().unwrap() {
                        return StatusCode::BAD_GATEWAY.into_response();
                    }
                    Json(json!({
                        "symbol": q.get("symbol"),
                        "interval": "5m",
                        "ratio": 0.5,
                        "longPct": 33.33,
                        "shortPct": 66.67,
                    }))
                    .into_response()
                },
            ),
        )
        .with_state(healthy.clone());
    let proxy = spawn_server(app).await;
    let poller = poller(&proxy);

    poller.run_round().await;
    let before = poller.snapshot().await;
    assert_eq!(before.len(), 3);

    *healthy.lock().unwrap() = false;
    let summary = poller.run_round().await;
    assert!(summary.updated.is_empty());
    assert_eq!(summary.failed.len(), 3);

    let after = poller.snapshot().await;
    for symbol in symbols() {
        assert_eq!(after.get(&symbol), before.get(&symbol));
    }
    assert_eq!(poller.view().await.long, 33);
}
