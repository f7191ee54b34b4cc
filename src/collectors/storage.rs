//! Storage Metrics Collector
//!
//! Collects volume capacity/health and per-disk health from the storage topology.
//!
//! # Metrics Produced
//! - `dsm_volume_status_info` - Volume status (value is always 1)
//!   - Labels: volume, status, device_type
//! - `dsm_volume_size_total_bytes` / `dsm_volume_size_used_bytes` - Volume capacity
//!   - Labels: volume
//! - `dsm_volume_used_percent` - Used space in percent (omitted for empty volumes)
//!   - Labels: volume
//! - `dsm_volume_disk_temperature_avg_celsius` / `_max_celsius` - Temperature of the
//!   disks backing the volume (omitted when no disk reports one)
//!   - Labels: volume
//! - `dsm_disk_info` - Disk information (value is always 1)
//!   - Labels: disk, name, device, model
//! - `dsm_disk_status_info` - Disk status (value is always 1)
//!   - Labels: disk, status, smart_status
//! - `dsm_disk_temperature_celsius` - Disk temperature
//!   - Labels: disk
//! - `dsm_disk_exceed_bad_sector_threshold` / `dsm_disk_below_remain_life_threshold`
//!   - Labels: disk

use super::{collect_with_handler, require_update, CollectionResult};
use crate::dsm::{ApiClient, DsmStorage, StorageInfo};
use crate::metrics::MetricsCollector;

/// Refreshes storage topology from DSM and publishes it
pub fn collect_storage_metrics<C: ApiClient>(
    storage: &mut DsmStorage<C>,
    metrics: &MetricsCollector,
) -> CollectionResult {
    let result = require_update(DsmStorage::<C>::API_KEY, storage.update());
    collect_with_handler("storage", result, |_| {
        publish_storage(storage.info(), metrics)
    })
}

fn publish_storage(info: &StorageInfo, metrics: &MetricsCollector) {
    metrics.reset_storage();

    for volume_id in info.volumes_ids() {
        let labels = [volume_id];

        metrics
            .volume_status_info
            .with_label_values(&[
                volume_id,
                info.volume_status(volume_id).unwrap_or_default(),
                info.volume_device_type(volume_id).unwrap_or_default(),
            ])
            .set(1);

        metrics.set_gauge(
            &metrics.volume_size_total_bytes,
            &labels,
            info.volume_size_total(volume_id).map(|bytes| bytes as f64),
        );
        metrics.set_gauge(
            &metrics.volume_size_used_bytes,
            &labels,
            info.volume_size_used(volume_id).map(|bytes| bytes as f64),
        );
        metrics.set_gauge(
            &metrics.volume_used_percent,
            &labels,
            info.volume_percentage_used(volume_id),
        );
        metrics.set_gauge(
            &metrics.volume_disk_temperature_avg_celsius,
            &labels,
            info.volume_disk_temp_avg(volume_id).map(|temp| temp as f64),
        );
        metrics.set_gauge(
            &metrics.volume_disk_temperature_max_celsius,
            &labels,
            info.volume_disk_temp_max(volume_id).map(|temp| temp as f64),
        );
    }

    for disk in info.disks() {
        let disk_id = disk.id.as_str();

        metrics
            .disk_info
            .with_label_values(&[
                disk_id,
                disk.name.as_deref().unwrap_or_default(),
                disk.device.as_deref().unwrap_or_default(),
                disk.model.as_deref().unwrap_or_default(),
            ])
            .set(1);

        metrics
            .disk_status_info
            .with_label_values(&[
                disk_id,
                disk.status.as_deref().unwrap_or_default(),
                disk.smart_status.as_deref().unwrap_or_default(),
            ])
            .set(1);

        // DSM reports 0 for disks without a sensor reading
        metrics.set_gauge(
            &metrics.disk_temperature_celsius,
            &[disk_id],
            disk.temp.filter(|temp| *temp > 0).map(|temp| temp as f64),
        );

        if let Some(exceeded) = disk.exceed_bad_sector_thr {
            metrics
                .disk_exceed_bad_sector_threshold
                .with_label_values(&[disk_id])
                .set(i64::from(exceeded));
        }
        if let Some(below) = disk.below_remain_life_thr {
            metrics
                .disk_below_remain_life_threshold
                .with_label_values(&[disk_id])
                .set(i64::from(below));
        }
    }
}
