//! Sentiment poll rounds

use super::{RoundSummary, SentimentMap, SentimentSource, SentimentView};
use crate::poll::{spawn_periodic, PollHandle};
use crate::telemetry::{
    increment_counter, record_latency, set_gauge, CounterMetric, GaugeMetric, LatencyMetric,
};
use futures_util::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Keeps every tracked symbol fresh and remembers which one is displayed.
///
/// Cloning shares the same map and selection. The map has a single writer:
/// the round-completion step in [`SentimentPoller::run_round`].
#[derive(Clone)]
pub struct SentimentPoller {
    source: Arc<dyn SentimentSource>,
    symbols: Arc<[String]>,
    map: Arc<RwLock<SentimentMap>>,
    selected: Arc<RwLock<String>>,
}

impl SentimentPoller {
    /// Create a poller over `symbols`, initially displaying the first one.
    ///
    /// Symbols are trimmed and upper-cased to match the tickers the proxy
    /// returns; blanks and duplicates are dropped.
    pub fn new(source: Arc<dyn SentimentSource>, symbols: Vec<String>) -> Self {
        let mut tracked: Vec<String> = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let symbol = symbol.trim().to_uppercase();
            if !symbol.is_empty() && !tracked.contains(&symbol) {
                tracked.push(symbol);
            }
        }
        let symbols = tracked;

        let selected = symbols.first().cloned().unwrap_or_default();
        Self {
            source,
            symbols: symbols.into(),
            map: Arc::new(RwLock::new(SentimentMap::new())),
            selected: Arc::new(RwLock::new(selected)),
        }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Fetch every tracked symbol concurrently, then merge once all settle.
    ///
    /// A failing symbol never blocks or erases the others; it keeps its last
    /// good entry.
    pub async fn run_round(&self) -> RoundSummary {
        let started = Instant::now();

        let fetches = self.symbols.iter().map(|symbol| {
            let source = self.source.clone();
            async move {
                let result = source.fetch(symbol).await;
                if let Err(e) = &result {
                    tracing::debug!(symbol = %symbol, error = %e, "Sentiment fetch failed");
                }
                (symbol.clone(), result)
            }
        });
        let results = join_all(fetches).await;

        let (summary, populated) = {
            let mut map = self.map.write().await;
            let summary = map.merge(results);
            (summary, map.len())
        };

        record_latency(LatencyMetric::PollRound, started.elapsed());
        for _ in &summary.updated {
            increment_counter(CounterMetric::PollSuccess);
        }
        for _ in &summary.failed {
            increment_counter(CounterMetric::PollFailure);
        }
        set_gauge(GaugeMetric::SymbolsWithData, populated as f64);

        tracing::info!(
            updated = summary.updated.len(),
            failed = summary.failed.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Sentiment round complete"
        );

        summary
    }

    /// Run a round now and then every `period` until the handle is shut down
    pub fn spawn(&self, period: Duration) -> PollHandle {
        let poller = self.clone();
        spawn_periodic("sentiment", period, move || {
            let poller = poller.clone();
            async move {
                poller.run_round().await;
            }
        })
    }

    /// Change the displayed symbol. Returns false for untracked symbols.
    pub async fn select(&self, symbol: &str) -> bool {
        let symbol = symbol.trim().to_uppercase();
        if !self.symbols.contains(&symbol) {
            return false;
        }
        *self.selected.write().await = symbol;
        true
    }

    pub async fn selected(&self) -> String {
        self.selected.read().await.clone()
    }

    /// Copy of the current map
    pub async fn snapshot(&self) -> SentimentMap {
        self.map.read().await.clone()
    }

    /// Render the selected symbol
    pub async fn view(&self) -> SentimentView {
        let symbol = self.selected().await;
        let map = self.map.read().await;
        SentimentView::new(&symbol, map.get(&symbol))
    }

    /// Render every tracked symbol, in tracking order
    pub async fn views(&self) -> Vec<SentimentView> {
        let map = self.map.read().await;
        self.symbols
            .iter()
            .map(|symbol| SentimentView::new(symbol, map.get(symbol)))
            .collect()
    }
}
