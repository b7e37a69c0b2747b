//! market-pulse: data services behind a trading landing site
//!
//! This library provides:
//! - A long/short ratio proxy over the Binance Futures data API
//! - A sentiment poller that keeps per-symbol long/short splits fresh
//! - Fear & Greed, trending-coin and Altseason widgets
//! - A cancellable periodic poll scheduler
//! - Structured logging and Prometheus metrics

pub mod cli;
pub mod config;
pub mod poll;
pub mod proxy;
pub mod ratio;
pub mod sentiment;
pub mod telemetry;
pub mod widgets;
