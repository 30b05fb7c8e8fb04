//! # Migration Pipeline
//!
//! The migration module implements the per-document transformation that moves
//! a dashboard from the old data schema to the normalized markets schema.
//!
//! ## Components
//!
//! * `sql_rewriter` - Ordered text-level rewrite rules for embedded SQL
//! * `templating` - Template-variable edits: `market_type` injection and the
//!   `coin` variable definition update
//! * `panels` - Market-type filter injection into panel query WHERE clauses
//! * `document` - The orchestrating transformer and change detection
//!
//! ## Architecture
//!
//! A document flows through the pipeline in a fixed order:
//!
//! 1. The whole raw text is run through the SQL rewrite rules.
//! 2. The result is parsed as JSON.
//! 3. The structural mutators run: variable injection, panel query
//!    augmentation, `coin` definition update.
//! 4. The document is re-serialized and compared against the original.
//!
//! Rule order inside the rewriter is significant: later rules assume earlier
//! rules already ran. Every step is idempotent, so re-running the pipeline on
//! an already-migrated document leaves it byte-identical.

pub mod document;
pub mod panels;
pub mod sql_rewriter;
pub mod templating;

pub use document::{has_changed, DocumentTransformer, MigratedDocument};
pub use panels::PanelQueryAugmenter;
pub use sql_rewriter::{RewriteRule, SqlRewriter};
pub use templating::{TemplatingVariableInjector, VariableDefinitionUpdater};

use crate::error::{MigrationError, MigrationResult};
use regex::Regex;

/// Compile a rule pattern with context for the error message.
pub(crate) fn compile_pattern(pattern: &str, context: &str) -> MigrationResult<Regex> {
    Regex::new(pattern).map_err(|e| {
        MigrationError::InvalidRule(format!("{}: {} - pattern: {}", context, e, pattern))
    })
}
