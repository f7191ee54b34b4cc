//! Synology DSM Accessors
//!
//! Typed, read-only views over the JSON documents served by a DSM appliance.
//!
//! # Architecture
//!
//! - **Client**: the embedding application implements [`ApiClient`] (HTTP transport,
//!   session handling and DSM error codes all live there)
//! - **Components**: [`DsmNetwork`] and [`DsmStorage`] each own one endpoint; `update()`
//!   fetches it and swaps in a freshly decoded snapshot
//! - **Snapshots**: [`NetworkInfo`] and [`StorageInfo`] are immutable and shared through
//!   `Arc`, so a reader holding one is never affected by a later `update()`
//!
//! # Example
//!
//! ```no_run
//! use synology_dsm_exporter::dsm::{ApiClient, SynologyDsm};
//! use synology_dsm_exporter::error::Result;
//!
//! struct MyClient;
//!
//! impl ApiClient for MyClient {
//!     fn get(&self, _api: &str, _method: &str) -> Result<Option<serde_json::Value>> {
//!         Ok(None)
//!     }
//! }
//!
//! # fn example() -> Result<()> {
//! let mut dsm = SynologyDsm::new(MyClient);
//! dsm.update()?;
//! for volume_id in dsm.storage().info().volumes_ids() {
//!     println!("{volume_id}: {:?}", dsm.storage().info().volume_percentage_used(volume_id));
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use serde_json::Value;
use std::sync::Arc;

pub mod network;
pub mod storage;
pub mod types;

pub use network::DsmNetwork;
pub use storage::DsmStorage;
pub use types::{NetworkInfo, StorageInfo};

/// Request side of the DSM Web API
///
/// `Ok(None)` (or any falsy document, see [`is_truthy`]) means "nothing new"; the
/// calling component then keeps serving its previous snapshot.
pub trait ApiClient {
    fn get(&self, api: &str, method: &str) -> Result<Option<Value>>;
}

/// Whether a JSON document counts as a real answer.
///
/// `null`, `false`, `0`, `""`, `[]` and `{}` are all treated as "no data".
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// One appliance: a shared client plus one instance of each component
pub struct SynologyDsm<C> {
    client: Arc<C>,
    network: DsmNetwork<C>,
    storage: DsmStorage<C>,
}

impl<C: ApiClient> SynologyDsm<C> {
    pub fn new(client: C) -> Self {
        let client = Arc::new(client);
        Self {
            network: DsmNetwork::new(client.clone()),
            storage: DsmStorage::new(client.clone()),
            client,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn network(&self) -> &DsmNetwork<C> {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut DsmNetwork<C> {
        &mut self.network
    }

    pub fn storage(&self) -> &DsmStorage<C> {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut DsmStorage<C> {
        &mut self.storage
    }

    /// Refresh network then storage, stopping at the first error
    pub fn update(&mut self) -> Result<()> {
        self.network.update()?;
        self.storage.update()?;
        Ok(())
    }
}
