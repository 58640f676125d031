// src/telemetry.rs
use std::net::SocketAddr;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder when `METRICS_ADDR` is set. The builder's
/// own HTTP listener serves `/metrics`; with the variable unset, the
/// `metrics` macros throughout the pipeline stay no-ops.
pub fn init_from_env() -> Result<()> {
    let Ok(addr) = std::env::var("METRICS_ADDR") else {
        return Ok(());
    };
    let addr: SocketAddr = addr.parse().context("parsing METRICS_ADDR")?;
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .context("installing prometheus exporter")?;
    tracing::info!(%addr, "metrics exporter listening");
    Ok(())
}
