//! Per-symbol sentiment state

use crate::ratio::RatioSample;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Latest good sample for one symbol
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentEntry {
    pub long_pct: f64,
    pub short_pct: f64,
    pub ratio: Option<f64>,
    /// When this entry was merged
    pub updated_at: DateTime<Utc>,
}

impl SentimentEntry {
    fn from_sample(sample: &RatioSample, updated_at: DateTime<Utc>) -> Self {
        Self {
            long_pct: sample.long_pct,
            short_pct: sample.short_pct,
            ratio: sample.ratio,
            updated_at,
        }
    }
}

/// Result of merging one poll round
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundSummary {
    /// Symbols whose entry was replaced
    pub updated: Vec<String>,
    /// Symbols that failed and kept their previous entry, if any
    pub failed: Vec<String>,
}

/// Symbol to latest good sample.
///
/// Entries are only inserted or overwritten, never removed: a failed fetch
/// keeps whatever was there before.
#[derive(Debug, Clone, Default)]
pub struct SentimentMap {
    entries: HashMap<String, SentimentEntry>,
}

impl SentimentMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, symbol: &str) -> Option<&SentimentEntry> {
        self.entries.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge one round of per-symbol results.
    ///
    /// Successes overwrite by symbol; failures leave the map untouched for
    /// that symbol. Result order does not matter.
    pub fn merge<E>(&mut self, results: Vec<(String, Result<RatioSample, E>)>) -> RoundSummary {
        let now = Utc::now();
        let mut summary = RoundSummary::default();

        for (symbol, result) in results {
            match result {
                Ok(sample) => {
                    self.entries
                        .insert(symbol.clone(), SentimentEntry::from_sample(&sample, now));
                    summary.updated.push(symbol);
                }
                Err(_) => summary.failed.push(symbol),
            }
        }

        summary
    }
}
