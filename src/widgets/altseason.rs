//! Composite Altseason index
//!
//! Weighted blend of four signals over the top 100 alts by market cap:
//! performance vs BTC over 30d (40%), non-BTC dominance (30%), breadth of
//! positive 30d returns (20%), and alt share of traded volume (10%).

use super::get_json;
use crate::ratio::finite_number;
use crate::telemetry::{record_latency, set_gauge, GaugeMetric, LatencyMetric};
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::time::Instant;

const TOP_ALTS: usize = 100;

const WEIGHT_PERFORMANCE: f64 = 0.4;
const WEIGHT_DOMINANCE: f64 = 0.3;
const WEIGHT_BREADTH: f64 = 0.2;
const WEIGHT_VOLUME: f64 = 0.1;

/// Component scores, each a percentage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AltseasonBreakdown {
    /// 100 minus BTC dominance
    pub dominance: f64,
    /// Share of alts outperforming BTC over 30d
    pub performance: f64,
    /// Share of alts with positive 30d returns
    pub breadth: f64,
    /// Alt share of alt+BTC volume
    pub volume: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AltseasonReading {
    /// Weighted composite in [0, 100]; higher means stronger altseason
    pub composite: f64,
    pub breakdown: AltseasonBreakdown,
}

impl AltseasonReading {
    pub fn btc_dominance(&self) -> f64 {
        100.0 - self.breakdown.dominance
    }
}

impl fmt::Display for AltseasonReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Altseason Index {:.1}%  (BTC Dominance {:.1}%)",
            self.composite,
            self.btc_dominance()
        )
    }
}

fn is_btc(market: &Value) -> bool {
    market["id"].as_str() == Some("bitcoin")
        || market["symbol"]
            .as_str()
            .is_some_and(|s| s.eq_ignore_ascii_case("btc"))
}

fn change_30d(market: &Value) -> Option<f64> {
    finite_number(&market["price_change_percentage_30d_in_currency"])
        .or_else(|| finite_number(&market["price_change_percentage_30d"]))
}

fn volume(market: &Value) -> f64 {
    finite_number(&market["total_volume"]).unwrap_or(0.0)
}

/// Score the market list against BTC dominance.
///
/// Returns `None` when dominance is not finite or `markets` is not an array.
pub fn compute_altseason(btc_dominance: f64, markets: &Value) -> Option<AltseasonReading> {
    if !btc_dominance.is_finite() {
        return None;
    }
    let markets = markets.as_array()?;

    let btc = markets.iter().find(|m| is_btc(m));
    let btc_30d = btc.and_then(change_30d);
    let btc_volume = btc.map_or(0.0, volume);

    let alts: Vec<&Value> = markets.iter().filter(|m| !is_btc(m)).take(TOP_ALTS).collect();
    let denominator = alts.len().max(1) as f64;

    let outperforming = alts
        .iter()
        .filter(|a| matches!((change_30d(a), btc_30d), (Some(a30), Some(b30)) if a30 > b30))
        .count();
    let positive = alts
        .iter()
        .filter(|a| change_30d(a).is_some_and(|a30| a30 > 0.0))
        .count();
    let alt_volume: f64 = alts.iter().map(|a| volume(a)).sum();

    let performance = outperforming as f64 / denominator * 100.0;
    let breadth = positive as f64 / denominator * 100.0;
    let volume_share = if alt_volume + btc_volume > 0.0 {
        alt_volume / (alt_volume + btc_volume) * 100.0
    } else {
        0.0
    };
    let dominance = (100.0 - btc_dominance).clamp(0.0, 100.0);

    let composite = (WEIGHT_PERFORMANCE * performance
        + WEIGHT_DOMINANCE * dominance
        + WEIGHT_BREADTH * breadth
        + WEIGHT_VOLUME * volume_share)
        .clamp(0.0, 100.0);

    Some(AltseasonReading {
        composite,
        breakdown: AltseasonBreakdown {
            dominance,
            performance,
            breadth,
            volume: volume_share,
        },
    })
}

/// Client for CoinGecko `/global` and `/coins/markets`
pub struct AltseasonClient {
    base_url: String,
    client: Client,
}

impl AltseasonClient {
    pub fn new(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub async fn fetch(&self) -> anyhow::Result<Option<AltseasonReading>> {
        let global = get_json(&self.client, &format!("{}/global", self.base_url), &[]).await?;
        let btc_dominance = finite_number(&global["data"]["market_cap_percentage"]["btc"])
            .or_else(|| finite_number(&global["market_cap_percentage"]["btc"]))
            .unwrap_or(f64::NAN);

        // One extra row so BTC can be dropped and 100 alts remain
        let markets = get_json(
            &self.client,
            &format!("{}/coins/markets", self.base_url),
            &[
                ("vs_currency", "usd"),
                ("order", "market_cap_desc"),
                ("per_page", "101"),
                ("page", "1"),
                ("price_change_percentage", "30d"),
            ],
        )
        .await?;

        Ok(compute_altseason(btc_dominance, &markets))
    }

    /// Fetch, reading any failure as "no reading"
    pub async fn refresh(&self) -> Option<AltseasonReading> {
        let started = Instant::now();
        let result = self.fetch().await;
        record_latency(LatencyMetric::WidgetRefresh, started.elapsed());

        let reading = result.unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Altseason fetch failed");
            None
        });
        if let Some(reading) = &reading {
            set_gauge(GaugeMetric::AltseasonIndex, reading.composite);
        }
        reading
    }
}
