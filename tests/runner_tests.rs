use dashboard_migrator::{
    discover_dashboard_files, run_migration, DocumentTransformer, MigratorConfig,
};
use std::fs;

const OLD_DASHBOARD: &str = r#"{
  "templating": {
    "list": [
      {"name": "datasource"},
      {"name": "coin", "definition": "SELECT DISTINCT coin FROM hl_fills", "query": "SELECT DISTINCT coin FROM hl_fills"}
    ]
  },
  "panels": [
    {
      "targets": [
        {"rawSql": "SELECT SUM(sz)\nFROM hl_fills\nWHERE coin = '${coin}'\nGROUP BY coin"}
      ]
    }
  ]
}"#;

fn config_for(dir: &std::path::Path) -> MigratorConfig {
    MigratorConfig {
        dashboards_dir: dir.to_path_buf(),
    }
}

#[test]
fn discovery_returns_sorted_json_files_only() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("b.json"), "{}")?;
    fs::write(dir.path().join("a.json"), "{}")?;
    fs::write(dir.path().join("notes.txt"), "ignored")?;

    let files = discover_dashboard_files(dir.path())?;
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap())
        .collect();
    assert_eq!(names, ["a.json", "b.json"]);
    Ok(())
}

#[test]
fn discovery_of_missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    assert!(discover_dashboard_files(&missing).is_err());
}

#[test]
fn updated_documents_are_written_back() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("trading.json");
    fs::write(&path, OLD_DASHBOARD)?;

    let report = run_migration(&config_for(dir.path()), false)?;
    assert_eq!(report.updated.len(), 1);
    assert!(report.unchanged.is_empty());
    assert!(report.failed.is_empty());

    let written = fs::read_to_string(&path)?;
    assert_ne!(written, OLD_DASHBOARD);
    assert!(written.contains("market_type"));
    Ok(())
}

#[test]
fn second_run_reports_unchanged() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("trading.json");
    fs::write(&path, OLD_DASHBOARD)?;

    run_migration(&config_for(dir.path()), false)?;
    let after_first = fs::read_to_string(&path)?;

    let report = run_migration(&config_for(dir.path()), false)?;
    assert!(report.updated.is_empty());
    assert_eq!(report.unchanged.len(), 1);
    assert_eq!(fs::read_to_string(&path)?, after_first);
    Ok(())
}

#[test]
fn a_bad_document_does_not_abort_the_batch() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("broken.json"), "not json at all")?;
    fs::write(dir.path().join("ok.json"), OLD_DASHBOARD)?;

    let report = run_migration(&config_for(dir.path()), false)?;
    assert_eq!(report.updated.len(), 1);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].0.ends_with("broken.json"));
    assert!(report.failed[0].1.contains("Parse error"));
    Ok(())
}

#[test]
fn dry_run_reports_but_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("trading.json");
    fs::write(&path, OLD_DASHBOARD)?;

    let report = run_migration(&config_for(dir.path()), true)?;
    assert_eq!(report.updated.len(), 1);
    assert_eq!(fs::read_to_string(&path)?, OLD_DASHBOARD);
    Ok(())
}

#[test]
fn already_migrated_corpus_is_left_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let transformer = DocumentTransformer::new()?;
    let migrated = transformer.transform(OLD_DASHBOARD)?;
    let path = dir.path().join("trading.json");
    fs::write(&path, &migrated.text)?;

    let report = run_migration(&config_for(dir.path()), false)?;
    assert!(report.updated.is_empty());
    assert_eq!(report.unchanged.len(), 1);
    assert_eq!(fs::read_to_string(&path)?, migrated.text);
    Ok(())
}
