use dashboard_migrator::{load_migrator_config, MigratorConfig};
use std::path::PathBuf;

#[test]
fn default_when_file_missing() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("missing.json");
    let config = load_migrator_config(Some(missing.to_str().unwrap())).unwrap();
    assert_eq!(
        config.dashboards_dir,
        PathBuf::from("grafana/provisioning/dashboards")
    );
}

#[test]
fn parses_configured_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("migrator_config.json");
    std::fs::write(&path, r#"{"dashboards_dir": "dashboards/live"}"#).unwrap();
    let config = load_migrator_config(Some(path.to_str().unwrap())).unwrap();
    assert_eq!(config.dashboards_dir, PathBuf::from("dashboards/live"));
}

#[test]
fn invalid_file_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("migrator_config.json");
    std::fs::write(&path, "not json").unwrap();
    assert!(load_migrator_config(Some(path.to_str().unwrap())).is_err());
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("migrator_config.json");
    std::fs::write(&path, "{}").unwrap();
    let config = load_migrator_config(Some(path.to_str().unwrap())).unwrap();
    assert_eq!(config.dashboards_dir, MigratorConfig::default().dashboards_dir);
}
