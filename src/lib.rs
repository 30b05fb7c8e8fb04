//! # Dashboard Migrator
//!
//! Migrates a corpus of Grafana dashboard definitions (JSON documents) from
//! the old vendor-prefixed data schema (`hl_fills`, `hl_hourly_user_stats`,
//! flat `coin` column) to the normalized schema (generic table names joined
//! against a `markets` lookup table, a `symbol` column and a `market_type`
//! dimension).
//!
//! ## Core Components
//!
//! * `migration` - The per-document transformation pipeline: ordered SQL text
//!   rewrite rules, templating-variable edits, panel query augmentation and
//!   change detection
//! * `discovery` - Dashboard file enumeration and whole-document read/write
//! * `runner` - The sequential per-document driver loop and its report
//! * `config` - Migrator configuration loading
//! * `error` - Error types and handling
//!
//! ## Architecture
//!
//! Each document is processed independently: the raw text is run through the
//! SQL rewrite rules first, the result is parsed as JSON and the structural
//! mutators run in sequence, then the document is re-serialized. A document
//! is written back only when the final text differs from the original, so
//! re-running the migration over an already-migrated corpus is a no-op.

pub mod config;
pub mod discovery;
pub mod error;
pub mod migration;
pub mod runner;

// Re-export main types for convenience
pub use config::{load_migrator_config, MigratorConfig};
pub use discovery::{discover_dashboard_files, DashboardFileOperations};
pub use error::{MigrationError, MigrationResult};
pub use migration::{
    has_changed, DocumentTransformer, MigratedDocument, PanelQueryAugmenter, SqlRewriter,
    TemplatingVariableInjector, VariableDefinitionUpdater,
};
pub use runner::{run_migration, MigrationReport};
