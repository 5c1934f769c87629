// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::info;

use crate::utils::errors::MetricsError;

/// 安装 Prometheus 导出器并注册扫描指标的描述
///
/// 未调用时所有指标宏均为空操作
pub fn init_metrics(listen_addr: &str) -> Result<SocketAddr, MetricsError> {
    let addr: SocketAddr = listen_addr
        .parse()
        .map_err(|source| MetricsError::InvalidAddress {
            addr: listen_addr.to_string(),
            source,
        })?;

    PrometheusBuilder::new().with_http_listener(addr).install()?;
    describe_metrics();

    info!("Metrics exporter listening on {}", addr);
    Ok(addr)
}

fn describe_metrics() {
    describe_counter!("probe_requests_total", "Probe requests issued");
    describe_counter!(
        "probe_transport_errors_total",
        "Probes that failed with a transport error or timeout"
    );
    describe_counter!("probe_valid_total", "Valid tokens found, by response type");
    describe_counter!(
        "scan_candidates_completed_total",
        "Candidates whose probe has finished"
    );
    describe_histogram!(
        "probe_duration_seconds",
        Unit::Seconds,
        "Probe round-trip time"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_listen_addr_is_rejected() {
        let result = init_metrics("not-an-address");
        assert!(matches!(result, Err(MetricsError::InvalidAddress { .. })));
    }
}
