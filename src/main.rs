use clap::Parser;
use market_pulse::cli::{Cli, Commands};
use market_pulse::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            toml::from_str(include_str!("../config.toml.example"))?
        }
    };

    // Initialize telemetry
    market_pulse::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Serve(args) => {
            tracing::info!("Starting ratio proxy");
            args.execute(&config).await?;
        }
        Commands::Poll(args) => {
            args.execute(&config).await?;
        }
        Commands::Widgets(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Server: {}:{} ({})",
                config.server.bind,
                config.server.port,
                config.server.cache_control()
            );
            println!("  Binance: {}", config.upstream.binance_base_url);
            println!(
                "  Poller: {} every {}s, symbols {:?}",
                config.poller.proxy_url, config.poller.poll_interval_secs, config.poller.symbols
            );
            println!("  Widgets: every {}s", config.widgets.poll_interval_secs);
            println!(
                "  Telemetry: level={}, format={:?}, metrics_port={:?}",
                config.telemetry.log_level, config.telemetry.log_format, config.telemetry.metrics_port
            );
        }
    }

    Ok(())
}
