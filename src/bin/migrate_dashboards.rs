use clap::Parser;
use dashboard_migrator::{load_migrator_config, run_migration};
use log::info;
use std::path::PathBuf;

/// Migrate Grafana dashboard definitions to the normalized markets schema.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the migrator configuration file
    #[arg(short, long, default_value = "config/migrator_config.json")]
    config: String,

    /// Override the configured dashboards directory
    #[arg(short, long)]
    dashboards_dir: Option<PathBuf>,

    /// Report what would change without writing any files
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    info!("Loading config from: {}", cli.config);
    let mut config = load_migrator_config(Some(&cli.config))?;
    if let Some(dir) = cli.dashboards_dir {
        config.dashboards_dir = dir;
    }

    let report = run_migration(&config, cli.dry_run)?;

    for path in &report.updated {
        println!("{}: updated", path);
    }
    for path in &report.unchanged {
        println!("{}: unchanged", path);
    }
    for (path, message) in &report.failed {
        println!("{}: error: {}", path, message);
    }
    println!("\n{}", report.summary());

    Ok(())
}
