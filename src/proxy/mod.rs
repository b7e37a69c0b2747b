//! Ratio proxy HTTP server
//!
//! Serves `GET /api/longshort`, forwarding to the upstream long/short ratio
//! source and returning a normalized, cacheable split.

mod error;
mod handler;

pub use error::ProxyError;
pub use handler::{resolve_symbol, LongShortQuery};

use crate::config::Config;
use crate::ratio::{BinanceRatioClient, RatioSource};
use axum::routing::get;
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared state handed to every request
pub struct AppState {
    pub source: Arc<dyn RatioSource>,
    /// `Cache-Control` value for successful responses
    pub cache_control: String,
}

impl AppState {
    pub fn new(source: Arc<dyn RatioSource>, cache_control: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            source,
            cache_control: cache_control.into(),
        })
    }
}

/// Assemble the proxy router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/longshort", get(handler::longshort))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Bind the configured address and serve until Ctrl+C
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let source = BinanceRatioClient::new(
        config.upstream.binance_base_url.clone(),
        config.upstream.timeout(),
    )?;
    let state = AppState::new(Arc::new(source), config.server.cache_control());

    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(%addr, upstream = %config.upstream.binance_base_url, "Ratio proxy listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Ratio proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        return;
    }
    tracing::info!("Shutdown signal received, stopping proxy");
}
