//! Prometheus Metrics Definitions
//!
//! This module defines all Prometheus metrics exposed by the DSM exporter.
//!
//! # Metric Categories
//!
//! ## Network
//! - Host identity (hostname, gateway, workgroup) and DNS servers
//! - Interfaces with their MAC addresses
//!
//! ## Storage
//! - Volume status, capacity and usage percentage
//! - Average/maximum temperature of the disks backing each volume
//! - Disk identity, status, temperature and health thresholds
//!
//! # Metric Types
//!
//! - **Gauge**: Current value (e.g., `up`)
//! - **IntGaugeVec**: Info-style metrics whose value is always 1, and 0/1 flags
//! - **GaugeVec**: Labelled measurements (e.g., volume size by volume id)
//!
//! All metrics use the `dsm_` namespace prefix.

use prometheus::{Encoder, Gauge, GaugeVec, IntGaugeVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

const NAMESPACE: &str = "dsm";

/// Metrics collector for Synology DSM
#[derive(Clone)]
pub struct MetricsCollector {
    registry: Arc<Registry>,

    pub up: Arc<Gauge>,

    // Network metrics
    pub network_info: Arc<IntGaugeVec>,
    pub network_dns_server_info: Arc<IntGaugeVec>,
    pub network_interface_info: Arc<IntGaugeVec>,

    // Volume metrics
    pub volume_status_info: Arc<IntGaugeVec>,
    pub volume_size_total_bytes: Arc<GaugeVec>,
    pub volume_size_used_bytes: Arc<GaugeVec>,
    pub volume_used_percent: Arc<GaugeVec>,
    pub volume_disk_temperature_avg_celsius: Arc<GaugeVec>,
    pub volume_disk_temperature_max_celsius: Arc<GaugeVec>,

    // Disk metrics
    pub disk_info: Arc<IntGaugeVec>,
    pub disk_status_info: Arc<IntGaugeVec>,
    pub disk_temperature_celsius: Arc<GaugeVec>,
    pub disk_exceed_bad_sector_threshold: Arc<IntGaugeVec>,
    pub disk_below_remain_life_threshold: Arc<IntGaugeVec>,
}

fn gauge_vec(name: &str, help: &str, labels: &[&str]) -> prometheus::Result<GaugeVec> {
    GaugeVec::new(Opts::new(name, help).namespace(NAMESPACE), labels)
}

fn int_gauge_vec(name: &str, help: &str, labels: &[&str]) -> prometheus::Result<IntGaugeVec> {
    IntGaugeVec::new(Opts::new(name, help).namespace(NAMESPACE), labels)
}

impl MetricsCollector {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let up = Gauge::new(
            "dsm_up",
            "Whether the last collection reached DSM (1=up, 0=down)",
        )?;

        // Network metrics
        let network_info = int_gauge_vec(
            "network_info",
            "NAS network identity (value is always 1)",
            &["hostname", "gateway", "workgroup"],
        )?;
        let network_dns_server_info = int_gauge_vec(
            "network_dns_server_info",
            "Configured DNS server (value is always 1)",
            &["server"],
        )?;
        let network_interface_info = int_gauge_vec(
            "network_interface_info",
            "Network interface information (value is always 1)",
            &["interface", "mac", "type"],
        )?;

        // Volume metrics
        let volume_status_info = int_gauge_vec(
            "volume_status_info",
            "Volume status and RAID type (value is always 1)",
            &["volume", "status", "device_type"],
        )?;
        let volume_size_total_bytes = gauge_vec(
            "volume_size_total_bytes",
            "Total size of the volume in bytes",
            &["volume"],
        )?;
        let volume_size_used_bytes = gauge_vec(
            "volume_size_used_bytes",
            "Used size of the volume in bytes",
            &["volume"],
        )?;
        let volume_used_percent = gauge_vec(
            "volume_used_percent",
            "Used space of the volume as a percentage of its total size",
            &["volume"],
        )?;
        let volume_disk_temperature_avg_celsius = gauge_vec(
            "volume_disk_temperature_avg_celsius",
            "Average temperature of the disks backing the volume",
            &["volume"],
        )?;
        let volume_disk_temperature_max_celsius = gauge_vec(
            "volume_disk_temperature_max_celsius",
            "Maximum temperature of the disks backing the volume",
            &["volume"],
        )?;

        // Disk metrics
        let disk_info = int_gauge_vec(
            "disk_info",
            "Disk information (value is always 1)",
            &["disk", "name", "device", "model"],
        )?;
        let disk_status_info = int_gauge_vec(
            "disk_status_info",
            "Disk status and S.M.A.R.T. verdict (value is always 1)",
            &["disk", "status", "smart_status"],
        )?;
        let disk_temperature_celsius = gauge_vec(
            "disk_temperature_celsius",
            "Current temperature of the disk in Celsius",
            &["disk"],
        )?;
        let disk_exceed_bad_sector_threshold = int_gauge_vec(
            "disk_exceed_bad_sector_threshold",
            "Disk exceeded its bad sector threshold (0=no, 1=yes)",
            &["disk"],
        )?;
        let disk_below_remain_life_threshold = int_gauge_vec(
            "disk_below_remain_life_threshold",
            "Disk fell below its remaining life threshold (0=no, 1=yes)",
            &["disk"],
        )?;

        registry.register(Box::new(up.clone()))?;
        registry.register(Box::new(network_info.clone()))?;
        registry.register(Box::new(network_dns_server_info.clone()))?;
        registry.register(Box::new(network_interface_info.clone()))?;
        registry.register(Box::new(volume_status_info.clone()))?;
        registry.register(Box::new(volume_size_total_bytes.clone()))?;
        registry.register(Box::new(volume_size_used_bytes.clone()))?;
        registry.register(Box::new(volume_used_percent.clone()))?;
        registry.register(Box::new(volume_disk_temperature_avg_celsius.clone()))?;
        registry.register(Box::new(volume_disk_temperature_max_celsius.clone()))?;
        registry.register(Box::new(disk_info.clone()))?;
        registry.register(Box::new(disk_status_info.clone()))?;
        registry.register(Box::new(disk_temperature_celsius.clone()))?;
        registry.register(Box::new(disk_exceed_bad_sector_threshold.clone()))?;
        registry.register(Box::new(disk_below_remain_life_threshold.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            up: Arc::new(up),
            network_info: Arc::new(network_info),
            network_dns_server_info: Arc::new(network_dns_server_info),
            network_interface_info: Arc::new(network_interface_info),
            volume_status_info: Arc::new(volume_status_info),
            volume_size_total_bytes: Arc::new(volume_size_total_bytes),
            volume_size_used_bytes: Arc::new(volume_size_used_bytes),
            volume_used_percent: Arc::new(volume_used_percent),
            volume_disk_temperature_avg_celsius: Arc::new(volume_disk_temperature_avg_celsius),
            volume_disk_temperature_max_celsius: Arc::new(volume_disk_temperature_max_celsius),
            disk_info: Arc::new(disk_info),
            disk_status_info: Arc::new(disk_status_info),
            disk_temperature_celsius: Arc::new(disk_temperature_celsius),
            disk_exceed_bad_sector_threshold: Arc::new(disk_exceed_bad_sector_threshold),
            disk_below_remain_life_threshold: Arc::new(disk_below_remain_life_threshold),
        })
    }

    /// Set a labelled gauge, skipping absent values
    pub fn set_gauge(&self, gauge: &GaugeVec, labels: &[&str], value: Option<f64>) {
        if let Some(value) = value {
            gauge.with_label_values(labels).set(value);
        }
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Drop all network series before a fresh snapshot is published
    pub fn reset_network(&self) {
        self.network_info.reset();
        self.network_dns_server_info.reset();
        self.network_interface_info.reset();
    }

    /// Drop all volume and disk series so removed devices stop being exported
    pub fn reset_storage(&self) {
        self.volume_status_info.reset();
        self.volume_size_total_bytes.reset();
        self.volume_size_used_bytes.reset();
        self.volume_used_percent.reset();
        self.volume_disk_temperature_avg_celsius.reset();
        self.volume_disk_temperature_max_celsius.reset();
        self.disk_info.reset();
        self.disk_status_info.reset();
        self.disk_temperature_celsius.reset();
        self.disk_exceed_bad_sector_threshold.reset();
        self.disk_below_remain_life_threshold.reset();
    }
}
