//! Metrics Collectors
//!
//! Each collector refreshes one DSM component and publishes its snapshot as
//! Prometheus metrics.
//!
//! # Architecture
//!
//! Collectors follow a consistent pattern:
//! - Call `update()` on the component (blocking, goes through the [`ApiClient`])
//! - Treat an update that loaded nothing as a failure, leaving published series alone
//! - Reset the labelled metric families they own
//! - Re-populate them from the component's current snapshot
//! - Return `CollectionResult`
//!
//! # Error Handling
//!
//! A failed `update()` is non-fatal: it is logged as a warning, the previously
//! published series stay in place, and the collector reports
//! [`CollectionStatus::Failed`].
//!
//! [`ApiClient`]: crate::dsm::ApiClient

use crate::error::DsmError;
use tracing::{info, warn};

pub mod network;
pub mod storage;

pub use network::collect_network_metrics;
pub use storage::collect_storage_metrics;

/// Status of a metrics collection operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionStatus {
    /// Metrics were successfully collected and updated
    Success,
    /// Collection failed but is non-fatal (already logged as warning)
    Failed,
}

/// Result type for collector functions
///
/// - `Ok(CollectionStatus::Success)` = Collection succeeded
/// - `Ok(CollectionStatus::Failed)` = Collection failed but non-fatal (logged as warning)
/// - `Err(_)` = Fatal error (should propagate)
pub type CollectionResult = Result<CollectionStatus, anyhow::Error>;

/// Helper to reduce boilerplate in collectors
///
/// - On success: processes the value, logs success, returns `CollectionStatus::Success`
/// - On error: logs warning, returns `CollectionStatus::Failed` (non-fatal)
///
/// # Examples
///
/// ```
/// use synology_dsm_exporter::collectors::{collect_with_handler, CollectionStatus};
///
/// let status = collect_with_handler("example", Ok::<_, String>(3), |n| assert_eq!(n, 3));
/// assert_eq!(status.unwrap(), CollectionStatus::Success);
/// ```
pub fn collect_with_handler<T, E, P>(name: &str, result: Result<T, E>, process: P) -> CollectionResult
where
    E: std::fmt::Display,
    P: FnOnce(T),
{
    match result {
        Ok(data) => {
            process(data);
            info!("Updated {} metrics", name);
            Ok(CollectionStatus::Success)
        }
        Err(e) => {
            warn!("Failed to query {}: {}", name, e);
            Ok(CollectionStatus::Failed)
        }
    }
}

/// Turn an `update()` outcome into a query result
///
/// `Ok(false)` means DSM answered with nothing, so there is no fresh snapshot
/// to publish.
pub(crate) fn require_update(api: &str, updated: Result<bool, DsmError>) -> Result<(), DsmError> {
    if updated? {
        Ok(())
    } else {
        Err(DsmError::Api(format!("{} returned no data", api)))
    }
}
