//! The orchestrating document transformer and change detection.

use super::panels::PanelQueryAugmenter;
use super::sql_rewriter::SqlRewriter;
use super::templating::{TemplatingVariableInjector, VariableDefinitionUpdater};
use crate::error::{MigrationError, MigrationResult};
use serde_json::Value;

/// Result of transforming one document.
#[derive(Debug)]
pub struct MigratedDocument {
    /// The fully serialized document text.
    pub text: String,
    /// Whether the serialized text differs from the original.
    pub changed: bool,
}

/// Runs the full per-document pipeline.
///
/// The raw text is rewritten first (table renames, joins, column
/// substitutions operate on the embedded SQL wherever it appears), then the
/// result is parsed and the structural mutators run, then the document is
/// re-serialized. Transformations always run; change detection is purely
/// observational.
pub struct DocumentTransformer {
    rewriter: SqlRewriter,
    augmenter: PanelQueryAugmenter,
}

impl DocumentTransformer {
    pub fn new() -> MigrationResult<Self> {
        Ok(Self {
            rewriter: SqlRewriter::new()?,
            augmenter: PanelQueryAugmenter::new()?,
        })
    }

    /// Transform one document given as raw text.
    ///
    /// Output is pretty JSON with 2-space indentation and the original field
    /// order preserved, so migrated documents diff cleanly under version
    /// control. Documents missing `templating` or `panels` skip the
    /// corresponding mutators.
    pub fn transform(&self, original: &str) -> MigrationResult<MigratedDocument> {
        let rewritten = self.rewriter.rewrite(original);

        let mut document: Value = serde_json::from_str(&rewritten)
            .map_err(|e| MigrationError::Parse(format!("document is not valid JSON: {}", e)))?;

        TemplatingVariableInjector::inject_market_type(&mut document);
        self.augmenter.augment_panels(&mut document);
        VariableDefinitionUpdater::update_coin_definition(&mut document);

        let text = serde_json::to_string_pretty(&document).map_err(|e| {
            MigrationError::Serialization(format!("failed to serialize document: {}", e))
        })?;
        let changed = has_changed(original, &text);

        Ok(MigratedDocument { text, changed })
    }
}

/// Whether a transformation changed the document text.
pub fn has_changed(original: &str, migrated: &str) -> bool {
    original != migrated
}
