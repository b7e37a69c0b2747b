//! Binance Futures long/short account ratio client

use super::{RatioSource, UpstreamError, UpstreamRatioEntry};
use crate::telemetry::{record_latency, LatencyMetric};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};

/// Binance Futures REST base URL
pub const BINANCE_FUTURES_URL: &str = "https://fapi.binance.com";

/// Client for `GET /futures/data/globalLongShortAccountRatio`
pub struct BinanceRatioClient {
    base_url: String,
    client: Client,
}

impl BinanceRatioClient {
    /// Create a client against `base_url` with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// Create a client reusing an existing HTTP client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/futures/data/globalLongShortAccountRatio", self.base_url)
    }

    /// Pick the most recent entry out of an upstream body.
    ///
    /// Anything other than a non-empty array means "no data". An element that
    /// is not an object yields an empty entry, which normalizes to neutral.
    fn parse_body(body: &[u8]) -> Result<Option<UpstreamRatioEntry>, UpstreamError> {
        let data: Value = serde_json::from_slice(body)?;
        let last = match data {
            Value::Array(mut items) => items.pop(),
            _ => None,
        };
        Ok(last.map(|item| serde_json::from_value(item).unwrap_or_default()))
    }

    async fn fetch_latest(
        &self,
        symbol: &str,
        interval: &str,
    ) -> Result<Option<UpstreamRatioEntry>, UpstreamError> {
        tracing::debug!(symbol, interval, "Fetching long/short ratio from Binance");

        let response = self
            .client
            .get(self.endpoint())
            .query(&[("symbol", symbol), ("period", interval), ("limit", "1")])
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(symbol, status = status.as_u16(), "Binance rejected long/short query");
            return Err(UpstreamError::Status(status));
        }

        let body = response.bytes().await?;
        Self::parse_body(&body)
    }
}

#[async_trait]
impl RatioSource for BinanceRatioClient {
    async fn latest(
        &self,
        symbol: &str,
        interval: &str,
    ) -> Result<Option<UpstreamRatioEntry>, UpstreamError> {
        let started = Instant::now();
        let result = self.fetch_latest(symbol, interval).await;
        record_latency(LatencyMetric::UpstreamFetch, started.elapsed());
        result
    }
}
