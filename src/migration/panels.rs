//! Market-type filter injection into panel query WHERE clauses.

use super::compile_pattern;
use crate::error::MigrationResult;
use regex::{Captures, Regex};
use serde_json::Value;

/// Conjunct appended after the first WHERE clause line. The "All" sentinel
/// keeps the filter transparent when no market type is selected.
const MARKET_TYPE_FILTER: &str =
    "  AND ('${market_type}' = 'All' OR m.market_type = '${market_type}')";

/// Appends the market-type filter to panel target queries.
pub struct PanelQueryAugmenter {
    where_clause: Regex,
}

impl PanelQueryAugmenter {
    pub fn new() -> MigrationResult<Self> {
        Ok(Self {
            where_clause: compile_pattern(r"WHERE\s+[^\n]+", "WHERE clause pattern")?,
        })
    }

    /// Augment every panel target's `rawSql` in the document.
    ///
    /// Documents without a `panels` array, panels without `targets`, and
    /// targets without a non-empty `rawSql` string are skipped.
    pub fn augment_panels(&self, document: &mut Value) {
        let panels = match document.get_mut("panels").and_then(Value::as_array_mut) {
            Some(panels) => panels,
            None => return,
        };

        for panel in panels.iter_mut() {
            let targets = match panel.get_mut("targets").and_then(Value::as_array_mut) {
                Some(targets) => targets,
                None => continue,
            };
            for target in targets.iter_mut() {
                let sql = match target.get("rawSql").and_then(Value::as_str) {
                    Some(sql) if !sql.is_empty() => sql.to_string(),
                    _ => continue,
                };
                if let Some(augmented) = self.augment_query(&sql) {
                    if let Some(obj) = target.as_object_mut() {
                        obj.insert("rawSql".to_string(), Value::String(augmented));
                    }
                }
            }
        }
    }

    /// Inject the filter conjunct after the first WHERE clause line.
    ///
    /// Returns `None` when the query has no WHERE clause or already
    /// references the market type dimension. Only the first occurrence is
    /// augmented; queries with further WHERE-bearing subqueries keep those
    /// untouched.
    pub fn augment_query(&self, sql: &str) -> Option<String> {
        if !sql.contains("WHERE") || sql.contains("m.market_type") {
            return None;
        }
        // Closure replacement: the injected text itself contains `${...}`,
        // which a replacement string would treat as a capture reference.
        let augmented = self.where_clause.replacen(sql, 1, |caps: &Captures| {
            format!("{}\n{}", &caps[0], MARKET_TYPE_FILTER)
        });
        Some(augmented.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn augments_first_where_only() {
        let augmenter = PanelQueryAugmenter::new().unwrap();
        let sql = "SELECT * FROM fills\nWHERE time > now()\nAND sz > 0";
        let out = augmenter.augment_query(sql).unwrap();
        assert_eq!(
            out,
            "SELECT * FROM fills\nWHERE time > now()\n  AND ('${market_type}' = 'All' OR m.market_type = '${market_type}')\nAND sz > 0"
        );
    }

    #[test]
    fn skips_queries_without_where() {
        let augmenter = PanelQueryAugmenter::new().unwrap();
        assert!(augmenter.augment_query("SELECT 1").is_none());
    }

    #[test]
    fn skips_queries_already_filtered() {
        let augmenter = PanelQueryAugmenter::new().unwrap();
        let sql = "SELECT * FROM fills WHERE m.market_type = 'spot'";
        assert!(augmenter.augment_query(sql).is_none());
    }
}
