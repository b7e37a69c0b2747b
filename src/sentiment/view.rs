//! Long/short bar rendering

use super::SentimentEntry;
use std::fmt;

/// Placeholder shown when there is no usable ratio
const RATIO_PLACEHOLDER: &str = "—";

/// Bar width in characters for the text rendering
const BAR_WIDTH: usize = 40;

/// Display model for the selected symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentimentView {
    pub symbol: String,
    /// Rounded long share
    pub long: u8,
    /// `100 - long`, so the two segments always fill the bar
    pub short: u8,
    pub ratio_label: String,
}

impl SentimentView {
    /// Build the view for `symbol`; missing data renders as a neutral split
    pub fn new(symbol: &str, entry: Option<&SentimentEntry>) -> Self {
        let long_pct = entry.map_or(50.0, |e| e.long_pct);
        let long = long_pct.round().clamp(0.0, 100.0) as u8;

        let ratio_label = match entry.and_then(|e| e.ratio) {
            Some(ratio) if ratio != 0.0 => format!("{ratio:.2}"),
            _ => RATIO_PLACEHOLDER.to_string(),
        };

        Self {
            symbol: symbol.to_string(),
            long,
            short: 100 - long,
            ratio_label,
        }
    }

    /// Ticker without the quote asset, as shown on the selector
    pub fn short_name(&self) -> &str {
        self.symbol.strip_suffix("USDT").unwrap_or(&self.symbol)
    }

    /// Two-segment bar: long cells then short cells, `width` cells total
    pub fn bar(&self, width: usize) -> String {
        let long_cells = (width * self.long as usize + 50) / 100;
        let short_cells = width - long_cells;
        format!("{}{}", "█".repeat(long_cells), "░".repeat(short_cells))
    }
}

impl fmt::Display for SentimentView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<5} Long {:>3}% {} Short {:>3}%  ratio {}",
            self.short_name(),
            self.long,
            self.bar(BAR_WIDTH),
            self.short,
            self.ratio_label
        )
    }
}
