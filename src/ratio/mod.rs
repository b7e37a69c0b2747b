//! Long/short account ratio
//!
//! Fetches the Binance Futures global long/short account ratio and turns the
//! most recent sample into a long/short percentage split.

mod binance;
mod normalize;
mod types;

pub use binance::{BinanceRatioClient, BINANCE_FUTURES_URL};
pub(crate) use normalize::finite_number;
pub use normalize::{normalize, split_from_accounts, split_from_ratio, Normalized};
pub use types::{RatioSample, UpstreamError, UpstreamRatioEntry, DEFAULT_SYMBOL, FIXED_INTERVAL};

use async_trait::async_trait;

/// Source of upstream long/short samples
#[async_trait]
pub trait RatioSource: Send + Sync {
    /// Fetch the most recent entry for `symbol` in the given time bucket.
    ///
    /// Returns `Ok(None)` when the upstream answered successfully but carried
    /// no data points.
    async fn latest(
        &self,
        symbol: &str,
        interval: &str,
    ) -> Result<Option<UpstreamRatioEntry>, UpstreamError>;
}
