//! Sequential per-document driver loop.

use crate::config::MigratorConfig;
use crate::discovery::{discover_dashboard_files, DashboardFileOperations};
use crate::error::MigrationResult;
use crate::migration::DocumentTransformer;
use log::{error, info};
use std::path::Path;

/// Outcome of a migration run over a dashboard directory.
#[derive(Debug, Default)]
pub struct MigrationReport {
    /// Documents whose migrated text differed and were written back.
    pub updated: Vec<String>,
    /// Documents already in the target shape; left untouched on disk.
    pub unchanged: Vec<String>,
    /// Documents that failed, with error messages. A failure never aborts
    /// the batch.
    pub failed: Vec<(String, String)>,
}

impl MigrationReport {
    pub fn summary(&self) -> String {
        format!(
            "{} updated, {} unchanged, {} failed",
            self.updated.len(),
            self.unchanged.len(),
            self.failed.len()
        )
    }
}

/// Migrate every dashboard document in the configured directory.
///
/// Documents are processed strictly sequentially; each transformation is a
/// pure function of that document's content. With `dry_run` set, changed
/// documents are reported but nothing is written.
pub fn run_migration(config: &MigratorConfig, dry_run: bool) -> MigrationResult<MigrationReport> {
    let transformer = DocumentTransformer::new()?;
    let files = discover_dashboard_files(&config.dashboards_dir)?;

    let mut report = MigrationReport::default();
    for path in files {
        let display = path.display().to_string();
        info!("Processing {}", display);
        match migrate_file(&transformer, &path, dry_run) {
            Ok(true) => {
                info!("Updated {}", display);
                report.updated.push(display);
            }
            Ok(false) => report.unchanged.push(display),
            Err(e) => {
                error!("Failed to migrate {}: {}", display, e);
                report.failed.push((display, e.to_string()));
            }
        }
    }

    info!("Migration finished: {}", report.summary());
    Ok(report)
}

fn migrate_file(
    transformer: &DocumentTransformer,
    path: &Path,
    dry_run: bool,
) -> MigrationResult<bool> {
    let original = DashboardFileOperations::read_dashboard_file(path)?;
    let migrated = transformer.transform(&original)?;
    if migrated.changed && !dry_run {
        DashboardFileOperations::write_dashboard_file(path, &migrated.text)?;
    }
    Ok(migrated.changed)
}
