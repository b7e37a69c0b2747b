//! Long/short ratio types

use super::Normalized;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The only time bucket the proxy serves
pub const FIXED_INTERVAL: &str = "5m";

/// Symbol used when the caller does not name one
pub const DEFAULT_SYMBOL: &str = "BTCUSDT";

/// One normalized long/short observation, as served by `/api/longshort`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatioSample {
    /// Uppercase ticker (e.g., "BTCUSDT")
    pub symbol: String,
    /// Time bucket label
    pub interval: String,
    /// Raw upstream long/short ratio, when finite
    #[serde(default)]
    pub ratio: Option<f64>,
    /// Long share in [0, 100]
    pub long_pct: f64,
    /// Short share in [0, 100], always `100 - long_pct`
    pub short_pct: f64,
}

impl RatioSample {
    /// Build a sample from a normalized split
    pub fn new(symbol: impl Into<String>, interval: impl Into<String>, split: Normalized) -> Self {
        Self {
            symbol: symbol.into(),
            interval: interval.into(),
            ratio: split.ratio,
            long_pct: split.long_pct,
            short_pct: split.short_pct,
        }
    }
}

/// One element of the upstream `globalLongShortAccountRatio` array.
///
/// Binance sends the numeric fields as strings, but nothing about their shape
/// is trusted: anything that does not read as a finite number is treated as
/// missing by the normalizer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamRatioEntry {
    #[serde(default)]
    pub long_short_ratio: Value,
    #[serde(default)]
    pub long_account: Value,
    #[serde(default)]
    pub short_account: Value,
}

impl UpstreamRatioEntry {
    /// Entry built from string fields, as Binance sends them
    pub fn from_strings(ratio: &str, long_account: &str, short_account: &str) -> Self {
        Self {
            long_short_ratio: Value::String(ratio.to_string()),
            long_account: Value::String(long_account.to_string()),
            short_account: Value::String(short_account.to_string()),
        }
    }
}

/// Errors talking to the upstream exchange API
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Upstream answered with a non-success status
    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),
    /// Request could not be sent or the body could not be read
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Body was not valid JSON
    #[error("upstream body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}
