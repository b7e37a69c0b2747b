//! Market-data widgets
//!
//! Small polled displays backed by public APIs: the Fear & Greed index,
//! CoinGecko trending searches, and a composite Altseason index.

mod altseason;
mod fear_greed;
mod trending;

pub use altseason::{compute_altseason, AltseasonBreakdown, AltseasonClient, AltseasonReading};
pub use fear_greed::{FearGreedClient, FearGreedGauge, FearGreedReading, Trend};
pub use trending::{parse_trending, render_trending, TrendingClient, TrendingCoin};

use reqwest::Client;
use serde_json::Value;

/// alternative.me API base URL
pub const ALTERNATIVE_ME_URL: &str = "https://api.alternative.me";

/// CoinGecko public API base URL
pub const COINGECKO_URL: &str = "https://api.coingecko.com/api/v3";

/// GET `url` and decode the body as JSON, failing on non-success statuses
async fn get_json(client: &Client, url: &str, query: &[(&str, &str)]) -> anyhow::Result<Value> {
    let response = client.get(url).query(query).send().await?;

    if !response.status().is_success() {
        anyhow::bail!("{} returned {}", url, response.status());
    }

    Ok(response.json::<Value>().await?)
}
