//! `GET /api/longshort` handler

use super::{AppState, ProxyError};
use crate::ratio::{normalize, RatioSample, DEFAULT_SYMBOL, FIXED_INTERVAL};
use crate::telemetry::{increment_counter, CounterMetric};
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

/// Query string accepted by the proxy. Unknown parameters such as a client
/// `period` are ignored: the server-side interval is authoritative.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LongShortQuery {
    pub symbol: Option<String>,
}

impl LongShortQuery {
    /// Read raw query pairs. A repeated `symbol` keeps its first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let symbol = pairs
            .into_iter()
            .find_map(|(key, value)| (key == "symbol").then_some(value));
        Self { symbol }
    }
}

/// Upper-cased symbol, or the default when absent or blank
pub fn resolve_symbol(symbol: Option<&str>) -> String {
    match symbol.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_uppercase(),
        _ => DEFAULT_SYMBOL.to_string(),
    }
}

pub async fn longshort(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, ProxyError> {
    let query = LongShortQuery::from_pairs(pairs);
    let symbol = resolve_symbol(query.symbol.as_deref());
    let result = fetch_sample(&state, symbol).await;

    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.outcome(),
    };
    increment_counter(CounterMetric::ProxyRequest(outcome));

    let sample = result?;
    Ok((
        [(header::CACHE_CONTROL, state.cache_control.clone())],
        Json(sample),
    )
        .into_response())
}

async fn fetch_sample(state: &AppState, symbol: String) -> Result<RatioSample, ProxyError> {
    let entry = state
        .source
        .latest(&symbol, FIXED_INTERVAL)
        .await?
        .ok_or(ProxyError::NoData)?;

    let sample = RatioSample::new(symbol, FIXED_INTERVAL, normalize(&entry));
    tracing::debug!(
        symbol = %sample.symbol,
        long_pct = sample.long_pct,
        short_pct = sample.short_pct,
        "Served long/short sample"
    );
    Ok(sample)
}
