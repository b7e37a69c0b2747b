//! Shared helpers for integration tests

use axum::http::{header, StatusCode};
use axum::routing::get;
use axum::Router;
use market_pulse::config::ServerConfig;
use market_pulse::proxy::{router, AppState};
use market_pulse::ratio::BinanceRatioClient;
use std::sync::Arc;
use std::time::Duration;

pub const BINANCE_PATH: &str = "/futures/data/globalLongShortAccountRatio";

/// Serve `app` on an ephemeral port and return its base URL
pub async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Server answering `path` with a fixed status and JSON body
pub async fn spawn_stub(path: &str, status: StatusCode, body: &'static str) -> String {
    let app = Router::new().route(
        path,
        get(move || async move { (status, [(header::CONTENT_TYPE, "application/json")], body) }),
    );
    spawn_server(app).await
}

/// Real ratio proxy pointed at `upstream`
pub async fn spawn_proxy(upstream: &str) -> String {
    let source = BinanceRatioClient::new(upstream, Duration::from_secs(5)).unwrap();
    let state = AppState::new(Arc::new(source), ServerConfig::default().cache_control());
    spawn_server(router(state)).await
}

/// Base URL of a port nothing listens on
pub async fn closed_port() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
