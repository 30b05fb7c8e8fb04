use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a migration run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigratorConfig {
    /// Directory containing the dashboard JSON documents
    #[serde(default = "default_dashboards_dir")]
    pub dashboards_dir: PathBuf,
}

fn default_dashboards_dir() -> PathBuf {
    PathBuf::from("grafana/provisioning/dashboards")
}

impl Default for MigratorConfig {
    fn default() -> Self {
        Self {
            dashboards_dir: default_dashboards_dir(),
        }
    }
}

/// Load a migrator configuration from the given path or from the
/// `MIGRATOR_CONFIG` environment variable.
///
/// If the file does not exist, a default [`MigratorConfig`] is returned. A
/// file that exists but does not parse is an error.
pub fn load_migrator_config(path: Option<&str>) -> Result<MigratorConfig, std::io::Error> {
    use std::fs;

    let config_path = path
        .map(|p| p.to_string())
        .or_else(|| std::env::var("MIGRATOR_CONFIG").ok())
        .unwrap_or_else(|| "config/migrator_config.json".to_string());

    if let Ok(config_str) = fs::read_to_string(&config_path) {
        match serde_json::from_str::<MigratorConfig>(&config_str) {
            Ok(cfg) => Ok(cfg),
            Err(e) => {
                log::error!("Failed to parse migrator configuration: {}", e);
                Err(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            }
        }
    } else {
        Ok(MigratorConfig::default())
    }
}
