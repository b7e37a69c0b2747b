//! End-to-end configuration checks

use market_pulse::config::Config;
use market_pulse::telemetry::LogFormat;

#[test]
fn test_config_example_parses() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();

    assert_eq!(config.server.port, 3000);
    assert_eq!(
        config.server.cache_control(),
        "s-maxage=300, stale-while-revalidate=60"
    );
    assert_eq!(config.upstream.binance_base_url, "https://fapi.binance.com");
    assert_eq!(config.poller.symbols, vec!["BTCUSDT", "ETHUSDT", "SOLUSDT"]);
    assert_eq!(config.poller.poll_interval_secs, 3600);
    assert_eq!(config.telemetry.log_format, LogFormat::Pretty);
    assert!(config.telemetry.metrics_port.is_none());
}
