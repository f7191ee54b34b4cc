//! Network Metrics Collector
//!
//! # Metrics Produced
//! - `dsm_network_info` - NAS identity (value is always 1)
//!   - Labels: hostname, gateway, workgroup
//! - `dsm_network_dns_server_info` - Configured DNS servers (value is always 1)
//!   - Labels: server
//! - `dsm_network_interface_info` - Interfaces (value is always 1)
//!   - Labels: interface, mac, type

use super::{collect_with_handler, require_update, CollectionResult};
use crate::dsm::{ApiClient, DsmNetwork, NetworkInfo};
use crate::metrics::MetricsCollector;

/// Refreshes network info from DSM and publishes it
pub fn collect_network_metrics<C: ApiClient>(
    network: &mut DsmNetwork<C>,
    metrics: &MetricsCollector,
) -> CollectionResult {
    let result = require_update(DsmNetwork::<C>::API_KEY, network.update());
    collect_with_handler("network", result, |_| {
        publish_network(network.info(), metrics)
    })
}

fn publish_network(info: &NetworkInfo, metrics: &MetricsCollector) {
    metrics.reset_network();

    metrics
        .network_info
        .with_label_values(&[
            info.hostname().unwrap_or_default(),
            info.gateway().unwrap_or_default(),
            info.workgroup().unwrap_or_default(),
        ])
        .set(1);

    for server in info.dns().unwrap_or_default() {
        metrics
            .network_dns_server_info
            .with_label_values(&[server.as_str()])
            .set(1);
    }

    for interface in info.interfaces() {
        metrics
            .network_interface_info
            .with_label_values(&[
                interface.id.as_str(),
                interface.mac.as_deref().unwrap_or_default(),
                interface.kind.as_deref().unwrap_or_default(),
            ])
            .set(1);
    }
}
