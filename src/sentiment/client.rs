//! HTTP client for the ratio proxy

use super::SentimentSource;
use crate::ratio::RatioSample;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Calls `GET {base}/api/longshort?symbol=...`.
///
/// No interval is sent: the proxy serves a single fixed bucket.
pub struct ProxyClient {
    base_url: String,
    client: Client,
}

impl ProxyClient {
    /// Create a client against the proxy at `base_url`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/api/longshort", self.base_url)
    }
}

#[async_trait]
impl SentimentSource for ProxyClient {
    async fn fetch(&self, symbol: &str) -> anyhow::Result<RatioSample> {
        let response = self
            .client
            .get(self.endpoint())
            .query(&[("symbol", symbol)])
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Proxy error: {}", response.status());
        }

        Ok(response.json::<RatioSample>().await?)
    }
}
