//! Top trending searches from CoinGecko

use super::get_json;
use crate::telemetry::{record_latency, LatencyMetric};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Instant;

/// Number of coins shown
const TOP_N: usize = 5;

/// One trending coin
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrendingCoin {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
}

/// Pull the first five `coins[].item` entries out of `/search/trending`
pub fn parse_trending(json: &Value) -> Vec<TrendingCoin> {
    let Some(coins) = json["coins"].as_array() else {
        return Vec::new();
    };

    coins
        .iter()
        .filter_map(|c| serde_json::from_value(c["item"].clone()).ok())
        .take(TOP_N)
        .collect()
}

/// Numbered list, or "No data" when empty
pub fn render_trending(coins: &[TrendingCoin]) -> String {
    if coins.is_empty() {
        return "Top-5 Search Trends: No data".to_string();
    }

    let mut out = String::from("Top-5 Search Trends");
    for (idx, coin) in coins.iter().enumerate() {
        let rank = coin
            .market_cap_rank
            .map(|r| format!(" (mcap #{r})"))
            .unwrap_or_default();
        out.push_str(&format!(
            "\n  #{} {} {}{}",
            idx + 1,
            coin.name,
            coin.symbol.to_uppercase(),
            rank
        ));
    }
    out
}

/// Client for `GET /search/trending`
pub struct TrendingClient {
    base_url: String,
    client: Client,
}

impl TrendingClient {
    pub fn new(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub async fn fetch(&self) -> anyhow::Result<Vec<TrendingCoin>> {
        let url = format!("{}/search/trending", self.base_url);
        let json = get_json(&self.client, &url, &[]).await?;
        Ok(parse_trending(&json))
    }

    /// Fetch, reading any failure as an empty list
    pub async fn refresh(&self) -> Vec<TrendingCoin> {
        let started = Instant::now();
        let result = self.fetch().await;
        record_latency(LatencyMetric::WidgetRefresh, started.elapsed());

        result.unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Trending fetch failed");
            Vec::new()
        })
    }
}
