//! Configuration types for market-pulse
//!
//! Every section has defaults, so an empty file is a valid configuration.

use crate::ratio::{BINANCE_FUTURES_URL, DEFAULT_SYMBOL};
use crate::telemetry::LogFormat;
use crate::widgets::{ALTERNATIVE_ME_URL, COINGECKO_URL};
use serde::Deserialize;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub poller: PollerConfig,
    #[serde(default)]
    pub widgets: WidgetsConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Ratio proxy HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Fresh window granted to shared caches (`s-maxage`)
    #[serde(default = "default_cache_max_age")]
    pub cache_max_age_secs: u64,

    /// Grace window for serving stale responses while revalidating
    #[serde(default = "default_stale_while_revalidate")]
    pub stale_while_revalidate_secs: u64,
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_cache_max_age() -> u64 {
    300 // 5 minutes
}
fn default_stale_while_revalidate() -> u64 {
    60
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            cache_max_age_secs: default_cache_max_age(),
            stale_while_revalidate_secs: default_stale_while_revalidate(),
        }
    }
}

impl ServerConfig {
    /// `Cache-Control` value attached to successful proxy responses
    pub fn cache_control(&self) -> String {
        format!(
            "s-maxage={}, stale-while-revalidate={}",
            self.cache_max_age_secs, self.stale_while_revalidate_secs
        )
    }
}

/// Third-party market data endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_binance_url")]
    pub binance_base_url: String,

    #[serde(default = "default_alternative_me_url")]
    pub alternative_me_base_url: String,

    #[serde(default = "default_coingecko_url")]
    pub coingecko_base_url: String,

    /// Per-request timeout for every outbound call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_binance_url() -> String {
    BINANCE_FUTURES_URL.to_string()
}
fn default_alternative_me_url() -> String {
    ALTERNATIVE_ME_URL.to_string()
}
fn default_coingecko_url() -> String {
    COINGECKO_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            binance_base_url: default_binance_url(),
            alternative_me_base_url: default_alternative_me_url(),
            coingecko_base_url: default_coingecko_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Sentiment poller configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PollerConfig {
    /// Base URL of the ratio proxy
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,

    /// Symbols polled every round
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Symbol displayed at startup
    #[serde(default = "default_selected")]
    pub selected: String,
}

fn default_proxy_url() -> String {
    "http://127.0.0.1:3000".to_string()
}
fn default_symbols() -> Vec<String> {
    vec![
        "BTCUSDT".to_string(),
        "ETHUSDT".to_string(),
        "SOLUSDT".to_string(),
    ]
}
/// `tokio::time::interval` rejects a zero period
const MIN_POLL_INTERVAL_SECS: u64 = 1;

fn default_poll_interval() -> u64 {
    3600 // 1 hour
}
fn default_selected() -> String {
    DEFAULT_SYMBOL.to_string()
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            proxy_url: default_proxy_url(),
            symbols: default_symbols(),
            poll_interval_secs: default_poll_interval(),
            selected: default_selected(),
        }
    }
}

impl PollerConfig {
    /// Round period, never shorter than one second
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(MIN_POLL_INTERVAL_SECS))
    }
}

/// Market-data widget configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetsConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

impl Default for WidgetsConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
        }
    }
}

impl WidgetsConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(MIN_POLL_INTERVAL_SECS))
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Serve Prometheus metrics on this port when set
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that parse but cannot run
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.poller.poll_interval_secs == 0 {
            anyhow::bail!("poller.poll_interval_secs must be greater than zero");
        }
        if self.widgets.poll_interval_secs == 0 {
            anyhow::bail!("widgets.poll_interval_secs must be greater than zero");
        }
        if self.poller.symbols.iter().all(|s| s.trim().is_empty()) {
            anyhow::bail!("poller.symbols must name at least one symbol");
        }
        Ok(())
    }
}
