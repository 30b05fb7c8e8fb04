use crate::error::{MigrationError, MigrationResult};
use log::info;
use std::path::{Path, PathBuf};

/// Discover dashboard documents in the given directory.
///
/// Returns every regular file with a `json` extension, sorted by path so the
/// processing order (and the resulting report) is stable run-to-run.
pub fn discover_dashboard_files(dir: &Path) -> MigrationResult<Vec<PathBuf>> {
    info!("Discovering dashboards in {}", dir.display());

    let entries = std::fs::read_dir(dir).map_err(|e| {
        MigrationError::File(format!("Failed to read directory {}: {}", dir.display(), e))
    })?;

    let mut files = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            files.push(path);
        }
    }
    files.sort();

    info!("Discovered {} dashboard file(s)", files.len());
    Ok(files)
}

/// Handles file-based operations for dashboard documents
pub struct DashboardFileOperations;

impl DashboardFileOperations {
    /// Read a dashboard document as raw text
    pub fn read_dashboard_file(path: &Path) -> MigrationResult<String> {
        std::fs::read_to_string(path).map_err(|e| {
            MigrationError::File(format!("Failed to read file {}: {}", path.display(), e))
        })
    }

    /// Write a migrated dashboard document back to disk
    pub fn write_dashboard_file(path: &Path, text: &str) -> MigrationResult<()> {
        std::fs::write(path, text).map_err(|e| {
            MigrationError::File(format!("Failed to write file {}: {}", path.display(), e))
        })
    }
}
