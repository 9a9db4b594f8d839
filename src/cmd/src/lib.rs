use std::net::SocketAddr;

use common::types::METRIC_HTTP_REQUESTS_TOTAL;
use common::types::METRIC_HTTP_REQUEST_TIME_SECONDS;
use metrics::describe_counter;
use metrics::describe_histogram;
use metrics::Unit;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;

pub mod command;
pub mod config;
pub mod error;

/// Installs the Prometheus recorder together with its scrape endpoint.
pub fn init_metrics(listen: SocketAddr) -> error::Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(listen)
        .install()?;
    info!("metrics exporter listening on {listen}");

    describe_counter!(METRIC_HTTP_REQUESTS_TOTAL, "number of http requests");
    describe_histogram!(
        METRIC_HTTP_REQUEST_TIME_SECONDS,
        Unit::Seconds,
        "http request time"
    );

    Ok(())
}
