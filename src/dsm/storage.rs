//! DSM storage topology (`SYNO.Storage.CGI.Storage`)
//!
//! Besides plain lookups, [`StorageInfo`] answers questions that need the pool
//! topology: which physical disks sit under a volume, and how hot they run.
//!
//! # Disk resolution
//!
//! A volume is backed by pool disks in one of two ways:
//!
//! - **RAID**: the pool's `deploy_path` is the volume id
//! - **SHR**: one of the pool's `pool_child` entries has the volume id, and the
//!   child shares the parent pool's full disk set
//!
//! Both checks run for every pool and every match appends the pool's disks, so a
//! disk can appear more than once.

use super::types::{Disk, StorageInfo, StoragePool, Volume};
use super::{is_truthy, ApiClient};
use crate::error::Result;
use crate::format::bytes_to_readable;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Cached view of disks, storage pools and volumes
pub struct DsmStorage<C> {
    client: Arc<C>,
    snapshot: Arc<StorageInfo>,
}

impl<C: ApiClient> DsmStorage<C> {
    pub const API_KEY: &'static str = "SYNO.Storage.CGI.Storage";

    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            snapshot: Arc::default(),
        }
    }

    /// Fetch `SYNO.Storage.CGI.Storage` / `load_info` and replace the snapshot
    ///
    /// Some DSM versions wrap the topology in a `data` object and some return it
    /// bare; both are accepted.
    pub fn update(&mut self) -> Result<bool> {
        let Some(mut raw) = self
            .client
            .get(Self::API_KEY, "load_info")?
            .filter(is_truthy)
        else {
            debug!("{} returned no data, keeping cached storage info", Self::API_KEY);
            return Ok(false);
        };

        let payload = if raw.get("data").is_some_and(is_truthy) {
            raw["data"].take()
        } else {
            raw
        };

        self.snapshot = Arc::new(serde_json::from_value(payload)?);
        debug!(
            "Storage info updated ({} volumes, {} disks, {} pools)",
            self.snapshot.volumes.len(),
            self.snapshot.disks.len(),
            self.snapshot.storage_pools.len()
        );
        Ok(true)
    }
}

impl<C> DsmStorage<C> {
    pub fn info(&self) -> &StorageInfo {
        &self.snapshot
    }

    /// Shared handle on the current snapshot
    pub fn snapshot(&self) -> Arc<StorageInfo> {
        self.snapshot.clone()
    }
}

impl StorageInfo {
    // Root

    /// Internal disks
    pub fn disks(&self) -> &[Disk] {
        &self.disks
    }

    pub fn env(&self) -> Option<&Value> {
        self.env.as_ref()
    }

    pub fn storage_pools(&self) -> &[StoragePool] {
        &self.storage_pools
    }

    pub fn volumes(&self) -> &[Volume] {
        &self.volumes
    }

    // Volume

    pub fn volumes_ids(&self) -> Vec<&str> {
        self.volumes.iter().map(|volume| volume.id.as_str()).collect()
    }

    pub fn get_volume(&self, volume_id: &str) -> Option<&Volume> {
        self.volumes.iter().find(|volume| volume.id == volume_id)
    }

    /// Status of the volume (normal, degraded, ...)
    pub fn volume_status(&self, volume_id: &str) -> Option<&str> {
        self.get_volume(volume_id)?.status.as_deref()
    }

    /// RAID level or SHR flavour backing the volume
    pub fn volume_device_type(&self, volume_id: &str) -> Option<&str> {
        self.get_volume(volume_id)?.device_type.as_deref()
    }

    pub fn volume_size_total(&self, volume_id: &str) -> Option<u64> {
        self.get_volume(volume_id)?.size.as_ref()?.total
    }

    pub fn volume_size_total_readable(&self, volume_id: &str) -> Option<String> {
        self.volume_size_total(volume_id).map(bytes_to_readable)
    }

    pub fn volume_size_used(&self, volume_id: &str) -> Option<u64> {
        self.get_volume(volume_id)?.size.as_ref()?.used
    }

    pub fn volume_size_used_readable(&self, volume_id: &str) -> Option<String> {
        self.volume_size_used(volume_id).map(bytes_to_readable)
    }

    /// Used space as a percentage of total, one decimal place
    ///
    /// Rounds the exact binary value to nearest, ties to even.
    pub fn volume_percentage_used(&self, volume_id: &str) -> Option<f64> {
        let total = self.volume_size_total(volume_id)?;
        let used = self.volume_size_used(volume_id)?;
        if used == 0 || total == 0 {
            return None;
        }

        let percentage = used as f64 / total as f64 * 100.0;
        format!("{percentage:.1}").parse().ok()
    }

    /// Average temperature of the disks backing the volume, in whole degrees
    ///
    /// Only positive readings count; disks reporting 0, a negative value or no
    /// temperature are left out.
    pub fn volume_disk_temp_avg(&self, volume_id: &str) -> Option<i64> {
        let temps = self.volume_disk_temps(volume_id);
        if temps.is_empty() {
            return None;
        }

        let mean = temps.iter().sum::<i64>() as f64 / temps.len() as f64;
        Some(mean.round_ties_even() as i64)
    }

    /// Hottest disk backing the volume, positive readings only
    pub fn volume_disk_temp_max(&self, volume_id: &str) -> Option<i64> {
        self.volume_disk_temps(volume_id).into_iter().max()
    }

    fn volume_disk_temps(&self, volume_id: &str) -> Vec<i64> {
        self.disks_for_volume(volume_id)
            .into_iter()
            .filter_map(|disk| disk.temp)
            .filter(|temp| *temp > 0)
            .collect()
    }

    /// Disks backing a volume, see the module docs for the RAID/SHR rules
    pub fn disks_for_volume(&self, volume_id: &str) -> Vec<&Disk> {
        let mut disks = Vec::new();
        for pool in &self.storage_pools {
            if pool.deploy_path.as_deref() == Some(volume_id) {
                disks.extend(self.pool_disks(pool));
            }
            for child in &pool.pool_child {
                if child.id == volume_id {
                    disks.extend(self.pool_disks(pool));
                }
            }
        }
        disks
    }

    fn pool_disks<'a>(&'a self, pool: &'a StoragePool) -> impl Iterator<Item = &'a Disk> + 'a {
        pool.disks.iter().filter_map(move |disk_id| self.get_disk(disk_id))
    }

    // Disk

    pub fn disks_ids(&self) -> Vec<&str> {
        self.disks.iter().map(|disk| disk.id.as_str()).collect()
    }

    pub fn get_disk(&self, disk_id: &str) -> Option<&Disk> {
        self.disks.iter().find(|disk| disk.id == disk_id)
    }

    pub fn disk_name(&self, disk_id: &str) -> Option<&str> {
        self.get_disk(disk_id)?.name.as_deref()
    }

    /// Device node of the disk (e.g. `/dev/sda`)
    pub fn disk_device(&self, disk_id: &str) -> Option<&str> {
        self.get_disk(disk_id)?.device.as_deref()
    }

    /// S.M.A.R.T. verdict
    pub fn disk_smart_status(&self, disk_id: &str) -> Option<&str> {
        self.get_disk(disk_id)?.smart_status.as_deref()
    }

    pub fn disk_status(&self, disk_id: &str) -> Option<&str> {
        self.get_disk(disk_id)?.status.as_deref()
    }

    pub fn disk_exceed_bad_sector_thr(&self, disk_id: &str) -> Option<bool> {
        self.get_disk(disk_id)?.exceed_bad_sector_thr
    }

    pub fn disk_below_remain_life_thr(&self, disk_id: &str) -> Option<bool> {
        self.get_disk(disk_id)?.below_remain_life_thr
    }

    pub fn disk_temp(&self, disk_id: &str) -> Option<i64> {
        self.get_disk(disk_id)?.temp
    }
}
