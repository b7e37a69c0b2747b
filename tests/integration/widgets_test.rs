//! Widget clients against stub alternative.me and CoinGecko servers

use crate::support::{closed_port, spawn_server, spawn_stub};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use market_pulse::widgets::{
    AltseasonClient, FearGreedClient, FearGreedGauge, Trend, TrendingClient,
};
use reqwest::Client;
use serde_json::json;

#[tokio::test]
async fn test_fear_greed_reading() {
    let base = spawn_stub(
        "/fng/",
        StatusCode::OK,
        r#"{"name":"Fear and Greed Index","data":[{"value":"27","value_classification":"Fear","timestamp":"1704067200"}]}"#,
    )
    .await;

    let mut gauge = FearGreedGauge::new(FearGreedClient::new(base, Client::new()));
    let reading = gauge.refresh().await;

    assert_eq!(reading.value, 27.0);
    assert_eq!(reading.label, "Fear");
    assert_eq!(reading.band(), "Fear");
    assert_eq!(reading.trend, Trend::Flat);
}

#[tokio::test]
async fn test_fear_greed_upstream_error_reads_neutral() {
    let base = spawn_stub("/fng/", StatusCode::SERVICE_UNAVAILABLE, "{}").await;

    let mut gauge = FearGreedGauge::new(FearGreedClient::new(base, Client::new()));
    let reading = gauge.refresh().await;

    assert_eq!(reading.rounded(), 50);
    assert_eq!(reading.label, "Neutral");
}

#[tokio::test]
async fn test_trending_top_five() {
    let coins: Vec<_> = (1..=7)
        .map(|i| {
            json!({ "item": { "id": format!("coin{i}"), "name": format!("Coin {i}"), "symbol": format!("c{i}"), "market_cap_rank": i * 10 } })
        })
        .collect();
    let app = Router::new().route(
        "/search/trending",
        get(move || {
            let body = json!({ "coins": coins, "nfts": [] });
            async move { Json(body) }
        }),
    );
    let base = spawn_server(app).await;

    let trending = TrendingClient::new(base, Client::new()).refresh().await;
    assert_eq!(trending.len(), 5);
    assert_eq!(trending[0].name, "Coin 1");
    assert_eq!(trending[4].market_cap_rank, Some(50));
}

#[tokio::test]
async fn test_trending_unreachable_is_empty() {
    let base = closed_port().await;
    assert!(TrendingClient::new(base, Client::new()).refresh().await.is_empty());
}

#[tokio::test]
async fn test_altseason_from_global_and_markets() {
    let app = Router::new()
        .route(
            "/global",
            get(|| async { Json(json!({ "data": { "market_cap_percentage": { "btc": 60.0, "eth": 12.0 } } })) }),
        )
        .route(
            "/coins/markets",
            get(|| async {
                Json(json!([
                    { "id": "bitcoin", "symbol": "btc", "price_change_percentage_30d_in_currency": 10.0, "total_volume": 300.0 },
                    { "id": "ethereum", "symbol": "eth", "price_change_percentage_30d_in_currency": 20.0, "total_volume": 100.0 },
                    { "id": "solana", "symbol": "sol", "price_change_percentage_30d_in_currency": -5.0, "total_volume": 100.0 },
                ]))
            }),
        );
    let base = spawn_server(app).await;

    let reading = AltseasonClient::new(base, Client::new())
        .refresh()
        .await
        .unwrap();

    let b = reading.breakdown;
    assert!((b.dominance - 40.0).abs() < 1e-9);
    assert!((b.performance - 50.0).abs() < 1e-9);
    assert!((b.breadth - 50.0).abs() < 1e-9);
    assert!((b.volume - 40.0).abs() < 1e-9);
    let expected = 0.4 * 50.0 + 0.3 * 40.0 + 0.2 * 50.0 + 0.1 * 40.0;
    assert!((reading.composite - expected).abs() < 1e-9);
}

#[tokio::test]
async fn test_altseason_missing_dominance_is_none() {
    let app = Router::new()
        .route("/global", get(|| async { Json(json!({ "data": {} })) }))
        .route("/coins/markets", get(|| async { Json(json!([])) }));
    let base = spawn_server(app).await;

    assert!(AltseasonClient::new(base, Client::new()).refresh().await.is_none());
}
