//! Directional sentiment
//!
//! Polls the ratio proxy for a fixed set of symbols, keeps the latest good
//! sample per symbol, and renders the selected one as a long/short bar.

mod client;
mod map;
mod poller;
mod view;

pub use client::ProxyClient;
pub use map::{RoundSummary, SentimentEntry, SentimentMap};
pub use poller::SentimentPoller;
pub use view::SentimentView;

use crate::ratio::RatioSample;
use async_trait::async_trait;

/// Source of normalized long/short samples for the poller
#[async_trait]
pub trait SentimentSource: Send + Sync {
    /// Fetch the current sample for `symbol`
    async fn fetch(&self, symbol: &str) -> anyhow::Result<RatioSample>;
}
