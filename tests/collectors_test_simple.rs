//! Simplified collector tests focusing on critical behavior

mod common;

use common::{network_response, storage_payload, FakeClient, NETWORK_API, STORAGE_API};
use std::sync::Arc;
use synology_dsm_exporter::collectors::{
    collect_network_metrics, collect_storage_metrics, collect_with_handler, CollectionStatus,
};
use synology_dsm_exporter::dsm::{DsmNetwork, DsmStorage};
use synology_dsm_exporter::error::DsmError;
use synology_dsm_exporter::metrics::MetricsCollector;

fn create_test_metrics() -> MetricsCollector {
    MetricsCollector::new().expect("Failed to create test metrics")
}

#[test]
fn test_collect_with_handler_success() {
    // Given: A successful update returning data
    // When: The handler processes the result
    let result = collect_with_handler("test", Ok::<Vec<String>, DsmError>(vec!["data".to_string()]), |data| {
        assert_eq!(data.len(), 1);
        assert_eq!(data[0], "data");
    });

    // Then: Collection should succeed
    assert_eq!(result.unwrap(), CollectionStatus::Success);
}

#[test]
fn test_collect_with_handler_error() {
    // Given: An update that fails with an error
    let result = collect_with_handler(
        "test",
        Err::<Vec<String>, DsmError>(DsmError::Transport("Test error".to_string())),
        |_data| {
            panic!("Should not process data on error");
        },
    );

    // Then: Collection should fail gracefully without panic
    assert_eq!(result.unwrap(), CollectionStatus::Failed);
}

#[test]
fn test_collect_with_handler_anyhow_error() {
    let result = collect_with_handler(
        "test",
        Err::<Vec<String>, anyhow::Error>(anyhow::anyhow!("Test error")),
        |_data| {
            panic!("Should not process data on error");
        },
    );

    assert_eq!(result.unwrap(), CollectionStatus::Failed);
}

#[test]
fn test_network_collector_publishes_snapshot() {
    // Given: A network component backed by a client with data
    common::init_tracing();
    let metrics = create_test_metrics();
    let mut network = DsmNetwork::new(Arc::new(
        FakeClient::new().respond(NETWORK_API, "list", network_response()),
    ));

    // When: Collecting
    let status = collect_network_metrics(&mut network, &metrics).unwrap();

    // Then: Identity, DNS and interfaces are exported
    assert_eq!(status, CollectionStatus::Success);
    let rendered = metrics.render().unwrap();
    assert!(rendered.contains(
        "dsm_network_info{gateway=\"192.168.1.1\",hostname=\"HOME-NAS\",workgroup=\"WORKGROUP\"} 1"
    ));
    assert!(rendered.contains("dsm_network_dns_server_info{server=\"192.168.1.1\"} 1"));
    assert!(rendered.contains(
        "dsm_network_interface_info{interface=\"eth1\",mac=\"00-11-32-XX-XX-5A\",type=\"lan\"} 1"
    ));
}

#[test]
fn test_storage_collector_publishes_snapshot() {
    // Given: A storage component with one RAID and one SHR pool
    common::init_tracing();
    let metrics = create_test_metrics();
    let mut storage = DsmStorage::new(Arc::new(
        FakeClient::new().respond(STORAGE_API, "load_info", storage_payload()),
    ));

    // When: Collecting
    let status = collect_storage_metrics(&mut storage, &metrics).unwrap();

    // Then: Volume and disk series reflect the derived values
    assert_eq!(status, CollectionStatus::Success);
    let rendered = metrics.render().unwrap();
    assert!(rendered.contains("dsm_volume_size_total_bytes{volume=\"volume_1\"} 200"));
    assert!(rendered.contains("dsm_volume_size_used_bytes{volume=\"volume_1\"} 50"));
    assert!(rendered.contains("dsm_volume_used_percent{volume=\"volume_1\"} 25"));
    assert!(rendered.contains("dsm_volume_disk_temperature_avg_celsius{volume=\"volume_1\"} 35"));
    assert!(rendered.contains("dsm_volume_disk_temperature_max_celsius{volume=\"volume_1\"} 40"));
    assert!(rendered.contains("dsm_volume_disk_temperature_max_celsius{volume=\"volume_3\"} 35"));
    assert!(rendered.contains(
        "dsm_volume_status_info{device_type=\"shr_without_disk_protect\",status=\"degraded\",volume=\"volume_2\"} 1"
    ));
    assert!(rendered.contains("dsm_disk_temperature_celsius{disk=\"sata2\"} 40"));
    assert!(rendered.contains("dsm_disk_exceed_bad_sector_threshold{disk=\"sata3\"} 1"));
    assert!(rendered.contains("dsm_disk_below_remain_life_threshold{disk=\"sata1\"} 0"));

    // volume_2 has no used bytes and volume_3 no size at all
    assert!(!rendered.contains("dsm_volume_used_percent{volume=\"volume_2\"}"));
    assert!(!rendered.contains("dsm_volume_size_total_bytes{volume=\"volume_3\"}"));
    // sata3 has no temperature reading
    assert!(!rendered.contains("dsm_disk_temperature_celsius{disk=\"sata3\"}"));
}

#[test]
fn test_failed_update_keeps_previous_series() {
    // Given: A storage component that succeeds once and then fails
    let metrics = create_test_metrics();
    let mut storage = DsmStorage::new(Arc::new(
        FakeClient::new()
            .respond(STORAGE_API, "load_info", storage_payload())
            .fail(STORAGE_API, "load_info", "timeout"),
    ));
    collect_storage_metrics(&mut storage, &metrics).unwrap();

    // When: The next collection fails
    let status = collect_storage_metrics(&mut storage, &metrics).unwrap();

    // Then: The failure is non-fatal and series survive
    assert_eq!(status, CollectionStatus::Failed);
    let rendered = metrics.render().unwrap();
    assert!(rendered.contains("dsm_volume_size_total_bytes{volume=\"volume_1\"} 200"));
}

#[test]
fn test_network_collector_without_any_answer_publishes_nothing() {
    // Given: A client that has never returned network data
    let metrics = create_test_metrics();
    let mut network = DsmNetwork::new(Arc::new(
        FakeClient::new().respond_none(NETWORK_API, "list"),
    ));

    // When: Collecting
    let status = collect_network_metrics(&mut network, &metrics).unwrap();

    // Then: The pass counts as failed and no placeholder identity is exported
    assert_eq!(status, CollectionStatus::Failed);
    let rendered = metrics.render().unwrap();
    assert!(!rendered.contains("dsm_network_info{"));
    assert!(!rendered.contains("dsm_network_interface_info{"));
}

#[test]
fn test_storage_collector_without_any_answer_publishes_nothing() {
    let metrics = create_test_metrics();
    let mut storage = DsmStorage::new(Arc::new(FakeClient::new()));

    let status = collect_storage_metrics(&mut storage, &metrics).unwrap();

    assert_eq!(status, CollectionStatus::Failed);
    assert!(!metrics.render().unwrap().contains("dsm_volume_status_info{"));
}

#[test]
fn test_empty_answer_keeps_previous_series() {
    // Given: Storage that loaded once and then gets an empty answer
    let metrics = create_test_metrics();
    let mut storage = DsmStorage::new(Arc::new(
        FakeClient::new()
            .respond(STORAGE_API, "load_info", storage_payload())
            .respond(STORAGE_API, "load_info", serde_json::json!({})),
    ));
    collect_storage_metrics(&mut storage, &metrics).unwrap();

    // When: The next answer carries no data
    let status = collect_storage_metrics(&mut storage, &metrics).unwrap();

    // Then: The pass fails and the published series are untouched
    assert_eq!(status, CollectionStatus::Failed);
    let rendered = metrics.render().unwrap();
    assert!(rendered.contains("dsm_volume_size_total_bytes{volume=\"volume_1\"} 200"));
    assert!(rendered.contains("dsm_disk_temperature_celsius{disk=\"sata2\"} 40"));
}

#[test]
fn test_removed_volume_stops_being_exported() {
    let metrics = create_test_metrics();
    let mut storage = DsmStorage::new(Arc::new(
        FakeClient::new()
            .respond(STORAGE_API, "load_info", storage_payload())
            .respond(
                STORAGE_API,
                "load_info",
                serde_json::json!({"volumes": [{"id": "volume_1", "size": {"total": 10, "used": 5}}]}),
            ),
    ));
    collect_storage_metrics(&mut storage, &metrics).unwrap();

    collect_storage_metrics(&mut storage, &metrics).unwrap();

    let rendered = metrics.render().unwrap();
    assert!(rendered.contains("dsm_volume_size_total_bytes{volume=\"volume_1\"} 10"));
    assert!(!rendered.contains("volume_2"));
    assert!(!rendered.contains("sata1"));
}

#[test]
fn test_collection_status_enum() {
    let success = CollectionStatus::Success;
    let failed = CollectionStatus::Failed;

    assert_eq!(success, CollectionStatus::Success);
    assert_eq!(failed, CollectionStatus::Failed);
    assert_ne!(success, failed);
}
