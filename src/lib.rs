//! Synology DSM Accessors and Prometheus Exporter
//!
//! Typed, read-only views over the Synology DSM JSON management API, plus a small
//! Prometheus exporter that publishes them.
//!
//! # Overview
//!
//! The [`dsm`] module turns the payloads of two DSM endpoints into immutable
//! snapshots with lookup and aggregate helpers: network identity and interfaces,
//! and the storage topology of disks, storage pools and volumes (capacity, usage
//! percentage, and the temperature of the disks behind each volume, resolved
//! through RAID or SHR pool membership).
//!
//! Talking to the NAS is left to the embedding application, which implements
//! [`dsm::ApiClient`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   ApiClient::get    ┌──────────────────────────┐
//! │  Synology   │ ◄────────────────►  │  SynologyDsm             │
//! │    DSM      │  (your transport)   │  ┌────────────┐          │      HTTP      ┌────────────┐
//! └─────────────┘                     │  │ DsmNetwork │ ─┐       │ ◄────────────► │ Prometheus │
//!                                     │  └────────────┘  │ ┌───┐ │   /metrics     └────────────┘
//!                                     │  ┌────────────┐  ├►│ M │ │
//!                                     │  │ DsmStorage │ ─┘ └───┘ │
//!                                     │  └────────────┘          │
//!                                     └──────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`dsm`] - API client trait, components and payload types
//! - [`format`] - Human-readable byte counts
//! - [`metrics`] - Prometheus metric definitions
//! - [`collectors`] - Snapshot to metrics publishing
//! - [`server`] - HTTP server and collection loop
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```no_run
//! use synology_dsm_exporter::{config::Config, dsm::{ApiClient, SynologyDsm}, server};
//!
//! struct MyClient;
//!
//! impl ApiClient for MyClient {
//!     fn get(
//!         &self,
//!         _api: &str,
//!         _method: &str,
//!     ) -> synology_dsm_exporter::error::Result<Option<serde_json::Value>> {
//!         Ok(None)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/Default.toml")?;
//!     server::start(config, SynologyDsm::new(MyClient)).await?;
//!     Ok(())
//! }
//! ```

pub mod collectors;
pub mod config;
pub mod dsm;
pub mod error;
pub mod format;
pub mod metrics;
pub mod server;
