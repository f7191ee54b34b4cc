//! HTTP Server and Metrics Collection
//!
//! This module implements the Prometheus exporter HTTP server and the metric collection loop.
//!
//! # Architecture
//!
//! - **HTTP Server**: Axum-based server exposing `/metrics`, `/health`, and `/` endpoints
//! - **Collection Loop**: Background task that periodically refreshes the DSM components and
//!   updates metrics. The DSM client is blocking, so each pass runs on tokio's blocking pool
//! - **State Management**: The DSM facade sits behind `Arc<Mutex<_>>`; HTTP handlers only
//!   see the metrics registry
//!
//! # Endpoints
//!
//! - `GET /` - HTML landing page with links to metrics and health
//! - `GET /metrics` - Prometheus metrics in text format
//! - `GET /health` - Health check (returns 200 if DSM is reachable, 503 otherwise)

use crate::collectors::{self, CollectionStatus};
use crate::config::{Config, MetricsConfig};
use crate::dsm::{ApiClient, SynologyDsm};
use crate::error::DsmError;
use crate::metrics::MetricsCollector;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::{Arc, Mutex};
use tokio::time::{interval, Duration};
use tracing::{error, info};

pub async fn start<C>(config: Config, dsm: SynologyDsm<C>) -> anyhow::Result<()>
where
    C: ApiClient + Send + Sync + 'static,
{
    config.validate()?;

    let metrics = MetricsCollector::new()?;
    let dsm = Arc::new(Mutex::new(dsm));

    // Start background metrics collection
    tokio::spawn(collect_metrics_loop(
        dsm,
        metrics.clone(),
        config.metrics.clone(),
    ));

    let app = router(metrics);

    // Start the server
    let addr = format!("{}:{}", config.server.addr, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| DsmError::Server(format!("failed to bind {}: {}", addr, e)))?;

    info!("Metrics server listening on {}", addr);
    info!("Metrics available at http://{}/metrics", addr);

    axum::serve(listener, app).await.map_err(DsmError::Io)?;

    Ok(())
}

/// Build the exporter router around a metrics registry
pub fn router(metrics: MetricsCollector) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(metrics)
}

async fn collect_metrics_loop<C>(
    dsm: Arc<Mutex<SynologyDsm<C>>>,
    metrics: MetricsCollector,
    config: MetricsConfig,
) where
    C: ApiClient + Send + Sync + 'static,
{
    let mut ticker = interval(Duration::from_secs(config.scrape_interval_seconds));

    loop {
        ticker.tick().await;

        let dsm = dsm.clone();
        let pass_metrics = metrics.clone();
        let pass_config = config.clone();
        let outcome = tokio::task::spawn_blocking(move || {
            let mut guard = dsm
                .lock()
                .map_err(|_| anyhow::anyhow!("DSM state lock poisoned"))?;
            collect_metrics(&mut *guard, &pass_metrics, &pass_config)
        })
        .await;

        match outcome {
            Ok(Ok(())) => metrics.up.set(1.0),
            Ok(Err(e)) => {
                error!("Failed to collect metrics: {}", e);
                metrics.up.set(0.0);
            }
            Err(e) => {
                error!("Collection task aborted: {}", e);
                metrics.up.set(0.0);
            }
        }
    }
}

/// Run one collection pass over every enabled collector
///
/// Fails only when every enabled collector failed, so `dsm_up` drops to 0 when DSM
/// is unreachable but stays at 1 for partial outages.
pub fn collect_metrics<C: ApiClient>(
    dsm: &mut SynologyDsm<C>,
    metrics: &MetricsCollector,
    config: &MetricsConfig,
) -> anyhow::Result<()> {
    info!("Collecting metrics from DSM");

    let mut any_success = false;
    let mut any_enabled = false;

    // Helper macro to track success
    macro_rules! collect {
        ($collector:expr) => {
            any_enabled = true;
            match $collector? {
                CollectionStatus::Success => any_success = true,
                CollectionStatus::Failed => { /* Already logged */ }
            }
        };
    }

    if config.collect_network_metrics {
        collect!(collectors::collect_network_metrics(dsm.network_mut(), metrics));
    }

    if config.collect_storage_metrics {
        collect!(collectors::collect_storage_metrics(dsm.storage_mut(), metrics));
    }

    if any_enabled && !any_success {
        anyhow::bail!("Failed to collect any metrics from DSM - check the API client");
    }

    Ok(())
}

async fn root_handler() -> impl IntoResponse {
    axum::response::Html(
        r#"<html>
<head><title>Synology DSM Exporter</title></head>
<body>
<h1>Synology DSM Prometheus Exporter</h1>
<p><a href="/metrics">Metrics</a></p>
<p><a href="/health">Health</a></p>
</body>
</html>"#,
    )
}

async fn metrics_handler(State(metrics): State<MetricsCollector>) -> Response {
    match metrics.render() {
        Ok(rendered) => rendered.into_response(),
        Err(e) => {
            error!("Failed to render metrics: {}", e);
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error rendering metrics: {}", e),
            )
                .into_response()
        }
    }
}

async fn health_handler(State(metrics): State<MetricsCollector>) -> impl IntoResponse {
    if metrics.up.get() > 0.0 {
        (axum::http::StatusCode::OK, "OK")
    } else {
        (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            "DSM API unreachable",
        )
    }
}
