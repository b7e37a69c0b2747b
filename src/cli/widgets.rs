//! Widgets command implementation

use super::ctrl_c;
use crate::config::Config;
use crate::poll::spawn_periodic;
use crate::widgets::{
    render_trending, AltseasonClient, FearGreedClient, FearGreedGauge, TrendingClient,
};
use clap::Args;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Args, Debug)]
pub struct WidgetsArgs {
    /// Keep polling on the configured period until Ctrl+C
    #[arg(short, long)]
    pub watch: bool,
}

/// The three widgets sharing one HTTP client
struct WidgetSet {
    fear_greed: Mutex<FearGreedGauge>,
    trending: TrendingClient,
    altseason: AltseasonClient,
}

impl WidgetSet {
    fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.upstream.timeout()).build()?;
        let upstream = &config.upstream;

        Ok(Self {
            fear_greed: Mutex::new(FearGreedGauge::new(FearGreedClient::new(
                upstream.alternative_me_base_url.clone(),
                client.clone(),
            ))),
            trending: TrendingClient::new(upstream.coingecko_base_url.clone(), client.clone()),
            altseason: AltseasonClient::new(upstream.coingecko_base_url.clone(), client),
        })
    }

    /// Refresh all widgets concurrently and print them
    async fn refresh_and_print(&self) {
        let (fear_greed, trending, altseason) = tokio::join!(
            async { self.fear_greed.lock().await.refresh().await },
            self.trending.refresh(),
            self.altseason.refresh(),
        );

        println!("{fear_greed}");
        match altseason {
            Some(reading) => println!("{reading}"),
            None => println!("Altseason Index —"),
        }
        println!("{}", render_trending(&trending));
    }
}

impl WidgetsArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let widgets = Arc::new(WidgetSet::new(config)?);

        if !self.watch {
            widgets.refresh_and_print().await;
            return Ok(());
        }

        let handle = spawn_periodic("widgets", config.widgets.poll_interval(), move || {
            let widgets = widgets.clone();
            async move { widgets.refresh_and_print().await }
        });

        ctrl_c().await;
        tracing::info!("Stopping widget poller");
        handle.shutdown().await;
        Ok(())
    }
}
