//! Prometheus metrics

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Binance long/short ratio fetch
    UpstreamFetch,
    /// One full sentiment poll round
    PollRound,
    /// One widget refresh
    WidgetRefresh,
}

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Proxy request, labelled by outcome
    ProxyRequest(&'static str),
    /// Symbol fetched successfully during a poll round
    PollSuccess,
    /// Symbol that failed during a poll round
    PollFailure,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Tracked symbols that have data
    SymbolsWithData,
    /// Latest Fear & Greed value
    FearGreed,
    /// Latest Altseason composite
    AltseasonIndex,
}

/// Install the Prometheus recorder and serve `/metrics` on `port`
pub fn install_exporter(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics exporter: {}", e))?;

    tracing::info!(%addr, "Metrics exporter listening");
    Ok(())
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let metric_name = match metric {
        LatencyMetric::UpstreamFetch => "marketpulse_upstream_fetch_seconds",
        LatencyMetric::PollRound => "marketpulse_poll_round_seconds",
        LatencyMetric::WidgetRefresh => "marketpulse_widget_refresh_seconds",
    };

    metrics::histogram!(metric_name).record(duration.as_secs_f64());
}

/// Increment a counter by one
pub fn increment_counter(metric: CounterMetric) {
    match metric {
        CounterMetric::ProxyRequest(outcome) => {
            metrics::counter!("marketpulse_proxy_requests_total", "outcome" => outcome).increment(1)
        }
        CounterMetric::PollSuccess => {
            metrics::counter!("marketpulse_poll_symbol_success_total").increment(1)
        }
        CounterMetric::PollFailure => {
            metrics::counter!("marketpulse_poll_symbol_failure_total").increment(1)
        }
    }
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    let metric_name = match metric {
        GaugeMetric::SymbolsWithData => "marketpulse_symbols_with_data",
        GaugeMetric::FearGreed => "marketpulse_fear_greed_value",
        GaugeMetric::AltseasonIndex => "marketpulse_altseason_index",
    };

    metrics::gauge!(metric_name).set(value);
}
