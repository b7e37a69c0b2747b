//! Long/short normalization ladder
//!
//! Preference order:
//! 1. the precomputed odds ratio, when finite and positive
//! 2. the long/short account fractions, when finite with a positive sum
//! 3. a neutral 50/50 split
//!
//! Whatever path is taken, both shares are clamped to [0, 100] at the end.

use super::UpstreamRatioEntry;
use serde_json::Value;

/// Neutral share used when nothing upstream is usable
const NEUTRAL_PCT: f64 = 50.0;

/// A long/short percentage split
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalized {
    /// Raw upstream ratio, when finite
    pub ratio: Option<f64>,
    pub long_pct: f64,
    pub short_pct: f64,
}

/// Read a JSON number or numeric string as a finite `f64`
pub(crate) fn finite_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Long share implied by a long:short odds ratio
pub fn split_from_ratio(ratio: f64) -> Option<f64> {
    if ratio.is_finite() && ratio > 0.0 {
        Some(ratio / (1.0 + ratio) * 100.0)
    } else {
        None
    }
}

/// Long share implied by the long and short account fractions
pub fn split_from_accounts(long_account: f64, short_account: f64) -> Option<f64> {
    let total = long_account + short_account;
    if long_account.is_finite() && short_account.is_finite() && total > 0.0 {
        Some(long_account / total * 100.0)
    } else {
        None
    }
}

/// Normalize one upstream entry into a clamped long/short split.
///
/// Never fails: unusable inputs fall through to the neutral split.
pub fn normalize(entry: &UpstreamRatioEntry) -> Normalized {
    let ratio = finite_number(&entry.long_short_ratio);

    let long_pct = ratio
        .and_then(split_from_ratio)
        .or_else(|| {
            let long_account = finite_number(&entry.long_account)?;
            let short_account = finite_number(&entry.short_account)?;
            split_from_accounts(long_account, short_account)
        })
        .unwrap_or(NEUTRAL_PCT);
    let short_pct = 100.0 - long_pct;

    Normalized {
        ratio,
        long_pct: long_pct.clamp(0.0, 100.0),
        short_pct: short_pct.clamp(0.0, 100.0),
    }
}
