use crate::error::DsmError;
use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricsConfig {
    #[serde(default = "default_scrape_interval")]
    pub scrape_interval_seconds: u64,
    #[serde(default = "default_true")]
    pub collect_network_metrics: bool,
    #[serde(default = "default_true")]
    pub collect_storage_metrics: bool,
}

fn default_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9100
}

fn default_scrape_interval() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            port: default_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            scrape_interval_seconds: default_scrape_interval(),
            collect_network_metrics: default_true(),
            collect_storage_metrics: default_true(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        // Load environment variables from .env if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("DSM_EXPORTER").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the collection loop or listener cannot run with
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.metrics.scrape_interval_seconds == 0 {
            return Err(DsmError::Config(
                "metrics.scrape_interval_seconds must be greater than zero".to_string(),
            ));
        }
        if self.server.port == 0 {
            return Err(DsmError::Config(
                "server.port must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
