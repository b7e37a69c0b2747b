//! Poll command implementation

use super::ctrl_c;
use crate::config::Config;
use crate::sentiment::{ProxyClient, SentimentPoller};
use clap::Args;
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct PollArgs {
    /// Ratio proxy base URL (overrides config)
    #[arg(long)]
    pub proxy_url: Option<String>,

    /// Symbol to display (must be one of the tracked symbols)
    #[arg(short, long)]
    pub select: Option<String>,

    /// Run a single round, print every symbol, and exit
    #[arg(long)]
    pub once: bool,
}

impl PollArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let proxy_url = self
            .proxy_url
            .clone()
            .unwrap_or_else(|| config.poller.proxy_url.clone());
        let client = ProxyClient::new(proxy_url.clone(), config.upstream.timeout())?;
        let poller = SentimentPoller::new(Arc::new(client), config.poller.symbols.clone());

        let selected = self.select.as_deref().unwrap_or(&config.poller.selected);
        if !poller.select(selected).await {
            tracing::warn!(symbol = selected, "Not a tracked symbol, keeping default selection");
        }

        tracing::info!(
            proxy = %proxy_url,
            symbols = ?poller.symbols(),
            "Starting sentiment poller"
        );

        if self.once {
            poller.run_round().await;
            for view in poller.views().await {
                println!("{view}");
            }
            return Ok(());
        }

        let handle = poller.spawn(config.poller.poll_interval());

        // Redraw tick, independent of the poll period
        let mut redraw = tokio::time::interval(Duration::from_secs(5));
        let mut last = None;
        let shutdown = ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = redraw.tick() => {
                    let view = poller.view().await;
                    if last.as_ref() != Some(&view) {
                        println!("{view}");
                        last = Some(view);
                    }
                }
            }
        }

        tracing::info!("Stopping sentiment poller");
        handle.shutdown().await;
        Ok(())
    }
}
