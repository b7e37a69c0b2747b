//! CLI interface for market-pulse
//!
//! Provides subcommands for:
//! - `serve`: Run the long/short ratio proxy
//! - `poll`: Poll the proxy and render the sentiment bar
//! - `widgets`: Fetch the Fear & Greed, Trending and Altseason widgets
//! - `config`: Show the effective configuration

mod poll;
mod serve;
mod widgets;

pub use poll::PollArgs;
pub use serve::ServeArgs;
pub use widgets::WidgetsArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "market-pulse")]
#[command(about = "Long/short sentiment proxy and market-data widgets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the ratio proxy HTTP server
    Serve(ServeArgs),
    /// Poll the ratio proxy and render the sentiment bar
    Poll(PollArgs),
    /// Fetch the market-data widgets
    Widgets(WidgetsArgs),
    /// Show the effective configuration
    Config,
}

/// Resolve on Ctrl+C, logging if the handler cannot be installed
pub(crate) async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
