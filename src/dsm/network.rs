//! DSM network configuration (`SYNO.DSM.Network`)

use super::types::{Interface, NetworkInfo};
use super::{is_truthy, ApiClient};
use crate::error::{DsmError, Result};
use std::sync::Arc;
use tracing::debug;

/// Cached view of the NAS network configuration
pub struct DsmNetwork<C> {
    client: Arc<C>,
    snapshot: Arc<NetworkInfo>,
}

impl<C: ApiClient> DsmNetwork<C> {
    pub const API_KEY: &'static str = "SYNO.DSM.Network";

    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            snapshot: Arc::default(),
        }
    }

    /// Fetch `SYNO.DSM.Network` / `list` and replace the snapshot
    ///
    /// Returns `Ok(false)` when the client had nothing to offer; the previous
    /// snapshot is kept as-is in that case and on every error.
    pub fn update(&mut self) -> Result<bool> {
        let Some(mut raw) = self.client.get(Self::API_KEY, "list")?.filter(is_truthy) else {
            debug!("{} returned no data, keeping cached network info", Self::API_KEY);
            return Ok(false);
        };

        let data = raw
            .get_mut("data")
            .map(serde_json::Value::take)
            .ok_or_else(|| DsmError::Api(format!("{} response has no data field", Self::API_KEY)))?;

        self.snapshot = Arc::new(serde_json::from_value(data)?);
        debug!(
            "Network info updated ({} interfaces)",
            self.snapshot.interfaces.len()
        );
        Ok(true)
    }
}

impl<C> DsmNetwork<C> {
    pub fn info(&self) -> &NetworkInfo {
        &self.snapshot
    }

    /// Shared handle on the current snapshot
    pub fn snapshot(&self) -> Arc<NetworkInfo> {
        self.snapshot.clone()
    }
}

impl NetworkInfo {
    pub fn dns(&self) -> Option<&[String]> {
        self.dns.as_deref()
    }

    pub fn gateway(&self) -> Option<&str> {
        self.gateway.as_deref()
    }

    pub fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    pub fn workgroup(&self) -> Option<&str> {
        self.workgroup.as_deref()
    }

    pub fn interfaces(&self) -> &[Interface] {
        &self.interfaces
    }

    /// First interface with the given id, in listing order
    pub fn interface(&self, id: &str) -> Option<&Interface> {
        self.interfaces.iter().find(|interface| interface.id == id)
    }

    /// MAC addresses of every interface that reports one
    pub fn macs(&self) -> Vec<&str> {
        self.interfaces
            .iter()
            .filter_map(|interface| interface.mac.as_deref())
            .filter(|mac| !mac.is_empty())
            .collect()
    }
}
