use synology_dsm_exporter::config::Config;

#[test]
fn test_config_load() {
    // This assumes config/Default.toml exists relative to where cargo test is run
    let config = Config::load("config/Default.toml").expect("Failed to load default config");
    assert_eq!(config.server.port, 9100);
    assert!(config.metrics.collect_storage_metrics);
}
