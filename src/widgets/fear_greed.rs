//! Fear & Greed gauge
//!
//! Backed by the alternative.me index. Any failure reads as a neutral 50.

use super::get_json;
use crate::ratio::finite_number;
use crate::telemetry::{record_latency, set_gauge, GaugeMetric, LatencyMetric};
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::time::Instant;

const NEUTRAL_VALUE: f64 = 50.0;
const NEUTRAL_LABEL: &str = "Neutral";

/// Direction of the index since the previous reading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    #[default]
    Flat,
}

impl Trend {
    pub fn between(previous: f64, current: f64) -> Self {
        if current > previous {
            Trend::Up
        } else if current < previous {
            Trend::Down
        } else {
            Trend::Flat
        }
    }

    fn arrow(self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Flat => "→",
        }
    }
}

/// One gauge reading
#[derive(Debug, Clone, PartialEq)]
pub struct FearGreedReading {
    /// Index value in [0, 100]
    pub value: f64,
    /// Upstream classification text
    pub label: String,
    pub trend: Trend,
}

impl FearGreedReading {
    pub fn rounded(&self) -> u8 {
        self.value.round().clamp(0.0, 100.0) as u8
    }

    /// Band shown under the gauge, derived from the rounded value
    pub fn band(&self) -> &'static str {
        match self.rounded() {
            0..=20 => "Extreme Fear",
            21..=40 => "Fear",
            41..=60 => "Neutral",
            61..=80 => "Greed",
            _ => "Extreme Greed",
        }
    }
}

impl fmt::Display for FearGreedReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fear & Greed {:>3} {} {}",
            self.rounded(),
            self.band(),
            self.trend.arrow()
        )
    }
}

/// Extract value and classification from a `/fng/` response
pub fn parse_fear_greed(json: &Value) -> (f64, String) {
    let latest = &json["data"][0];
    let value = finite_number(&latest["value"])
        .unwrap_or(NEUTRAL_VALUE)
        .clamp(0.0, 100.0);
    let label = latest["value_classification"]
        .as_str()
        .unwrap_or(NEUTRAL_LABEL)
        .to_string();
    (value, label)
}

/// Client for `GET /fng/?limit=1`
pub struct FearGreedClient {
    base_url: String,
    client: Client,
}

impl FearGreedClient {
    pub fn new(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub async fn fetch(&self) -> anyhow::Result<(f64, String)> {
        let url = format!("{}/fng/", self.base_url);
        let json = get_json(&self.client, &url, &[("limit", "1")]).await?;
        Ok(parse_fear_greed(&json))
    }
}

/// Gauge state carried across polls
pub struct FearGreedGauge {
    client: FearGreedClient,
    previous: Option<f64>,
    trend: Trend,
}

impl FearGreedGauge {
    pub fn new(client: FearGreedClient) -> Self {
        Self {
            client,
            previous: None,
            trend: Trend::Flat,
        }
    }

    /// Fetch a new reading. A failed fetch reads as neutral and leaves the
    /// trend baseline untouched.
    pub async fn refresh(&mut self) -> FearGreedReading {
        let started = Instant::now();
        let result = self.client.fetch().await;
        record_latency(LatencyMetric::WidgetRefresh, started.elapsed());

        match result {
            Ok((value, label)) => self.apply(value, label),
            Err(e) => {
                tracing::debug!(error = %e, "Fear & Greed fetch failed");
                FearGreedReading {
                    value: NEUTRAL_VALUE,
                    label: NEUTRAL_LABEL.to_string(),
                    trend: self.trend,
                }
            }
        }
    }

    fn apply(&mut self, value: f64, label: String) -> FearGreedReading {
        if let Some(previous) = self.previous {
            self.trend = Trend::between(previous, value);
        }
        self.previous = Some(value);
        set_gauge(GaugeMetric::FearGreed, value);

        FearGreedReading {
            value,
            label,
            trend: self.trend,
        }
    }
}
