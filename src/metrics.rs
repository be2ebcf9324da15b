use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::pricing::{AreaType, MaterialType};

/// Initialize Prometheus metrics exporter
///
/// Fails if a global recorder is already installed.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;

    init_metric_descriptions();

    Ok(handle)
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!("tile_quotes_total", "Total number of quotes computed");
    describe_histogram!("tile_quote_total_rub", "Final quote totals in rubles");
    describe_counter!(
        "tile_price_table_writes_total",
        "Price table write attempts by outcome"
    );
    describe_counter!(
        "tile_auth_failures_total",
        "Rejected admin authentication attempts"
    );
    describe_counter!("tile_estimates_total", "Estimates rendered and archived");
    describe_gauge!("tile_estimator_info", "Service version information");

    gauge!("tile_estimator_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record a computed quote
pub fn record_quote(area_type: AreaType, material: MaterialType, final_total: f64) {
    counter!(
        "tile_quotes_total",
        "area_type" => area_type.as_str(),
        "material" => material.as_str(),
    )
    .increment(1);
    histogram!("tile_quote_total_rub").record(final_total);
}

/// Record a price table write attempt ("ok", "unauthorized", "disabled", "invalid", "error")
pub fn record_price_table_write(outcome: &'static str) {
    counter!("tile_price_table_writes_total", "outcome" => outcome).increment(1);
}

pub fn record_auth_failure(endpoint: &str) {
    counter!("tile_auth_failures_total", "endpoint" => endpoint.to_string()).increment(1);
}

pub fn record_estimate() {
    counter!("tile_estimates_total").increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_metrics() {
        init_metric_descriptions();

        record_quote(AreaType::Bathroom, MaterialType::Tile, 16815.0);
        record_price_table_write("ok");
        record_auth_failure("/api/prices");
        record_estimate();

        // No recorder installed here; calls must simply not panic
    }
}
