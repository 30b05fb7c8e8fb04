//! Ordered text-level rewrite rules for embedded SQL.
//!
//! The queries in the corpus are heterogeneous hand-written SQL fragments, so
//! the rewrites are textual pattern rules rather than AST manipulation. Rules
//! are data held in a fixed order: later rules run on the output of earlier
//! ones (the join rules assume the table renames already happened). A rule
//! that matches nothing is a silent no-op.

use super::compile_pattern;
use crate::error::MigrationResult;
use regex::{Captures, Regex};

/// Replacement expression for the old flat `coin` column.
const MARKET_SYMBOL: &str = "m.symbol";

const FILLS_JOIN: &str = "FROM fills f JOIN markets m ON f.market_id = m.id";
const HOURLY_STATS_JOIN: &str = "FROM hourly_user_stats hus JOIN markets m ON hus.market_id = m.id";

/// A single ordered rewrite rule.
pub enum RewriteRule {
    /// Literal substring substitution.
    Literal {
        find: &'static str,
        replace: &'static str,
    },
    /// Regex substitution applied to every match. `replacement` may reference
    /// capture groups with `${n}`.
    Pattern {
        pattern: Regex,
        replacement: &'static str,
    },
    /// Regex substitution that consults the context captured around a match.
    /// The decision function returns `None` to keep the match unchanged.
    Contextual {
        pattern: Regex,
        decide: fn(&Captures) -> Option<String>,
    },
}

impl RewriteRule {
    /// Apply this rule globally across the text.
    pub fn apply(&self, text: &str) -> String {
        match self {
            RewriteRule::Literal { find, replace } => text.replace(find, replace),
            RewriteRule::Pattern {
                pattern,
                replacement,
            } => pattern.replace_all(text, *replacement).into_owned(),
            RewriteRule::Contextual { pattern, decide } => pattern
                .replace_all(text, |caps: &Captures| {
                    decide(caps).unwrap_or_else(|| caps[0].to_string())
                })
                .into_owned(),
        }
    }
}

/// Applies the ordered rewrite rules to raw query text.
///
/// Pure: the same input always produces the same output, and running the
/// rewriter over its own output is a no-op.
pub struct SqlRewriter {
    rules: Vec<RewriteRule>,
}

impl SqlRewriter {
    pub fn new() -> MigrationResult<Self> {
        Ok(Self {
            rules: build_rules()?,
        })
    }

    /// Run every rule, in order, over the text.
    pub fn rewrite(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, rule| rule.apply(&acc))
    }
}

fn build_rules() -> MigrationResult<Vec<RewriteRule>> {
    Ok(vec![
        // Table renames.
        RewriteRule::Literal {
            find: "hl_fills",
            replace: "fills",
        },
        RewriteRule::Literal {
            find: "hl_hourly_user_stats",
            replace: "hourly_user_stats",
        },
        // Markets lookup joins. Text already carrying the join alias is left
        // alone so re-runs do not stack a second join.
        RewriteRule::Contextual {
            pattern: compile_pattern(r"\bFROM fills\b(?P<joined> f JOIN)?", "fills join rule")?,
            decide: join_fills,
        },
        RewriteRule::Contextual {
            pattern: compile_pattern(
                r"\bFROM hourly_user_stats\b(?P<joined> hus JOIN)?",
                "hourly_user_stats join rule",
            )?,
            decide: join_hourly_stats,
        },
        // Bare `coin` identifiers become the joined symbol column. The
        // captured context keeps template references, quoted names, alias
        // positions and the shapes owned by the rules below out of reach.
        RewriteRule::Contextual {
            pattern: compile_pattern(
                r#"(?P<pre>["']|\$\{?|\bDISTINCT |\bGROUP BY |\bORDER BY |\bAS\s+|\bSELECT\s+)?\bcoin\b(?P<post>\s*AS\b| = '\$|,)?"#,
                "bare coin rule",
            )?,
            decide: replace_bare_coin,
        },
        // DISTINCT keeps the caller-visible column name as an alias.
        RewriteRule::Literal {
            find: "DISTINCT coin",
            replace: "DISTINCT m.symbol AS coin",
        },
        // Equality filters against the selector variable; the right-hand
        // template syntax is preserved exactly.
        RewriteRule::Literal {
            find: "coin = '${coin}'",
            replace: "m.symbol = '${coin}'",
        },
        RewriteRule::Literal {
            find: "coin = '$coin'",
            replace: "m.symbol = '$coin'",
        },
        // Grouping and ordering keys, single-key and trailing multi-key forms.
        RewriteRule::Literal {
            find: "GROUP BY coin",
            replace: "GROUP BY m.symbol",
        },
        RewriteRule::Pattern {
            pattern: compile_pattern(r"GROUP BY ([^,\n]+), coin", "multi-key GROUP BY rule")?,
            replacement: "GROUP BY ${1}, m.symbol",
        },
        RewriteRule::Literal {
            find: "ORDER BY coin",
            replace: "ORDER BY m.symbol",
        },
        RewriteRule::Pattern {
            pattern: compile_pattern(r"ORDER BY ([^,\n]+), coin", "multi-key ORDER BY rule")?,
            replacement: "ORDER BY ${1}, m.symbol",
        },
        // Projections keep the caller-visible output column name `coin`.
        RewriteRule::Pattern {
            pattern: compile_pattern(r"SELECT\s+coin,", "SELECT projection rule")?,
            replacement: "SELECT m.symbol AS coin,",
        },
        RewriteRule::Pattern {
            pattern: compile_pattern(r"SELECT\s+coin\s+AS", "SELECT alias rule")?,
            replacement: "SELECT m.symbol AS",
        },
    ])
}

fn join_fills(caps: &Captures) -> Option<String> {
    if caps.name("joined").is_some() {
        None
    } else {
        Some(FILLS_JOIN.to_string())
    }
}

fn join_hourly_stats(caps: &Captures) -> Option<String> {
    if caps.name("joined").is_some() {
        None
    } else {
        Some(HOURLY_STATS_JOIN.to_string())
    }
}

/// Decide whether a bare `coin` occurrence is rewritten.
///
/// Skipped occurrences: `$coin`/`${coin}` template references, identifiers
/// directly behind a quote (JSON names such as `"coin"` must survive for the
/// structural mutators to find the variable), alias positions on either side
/// of `AS`, and the DISTINCT / GROUP BY / ORDER BY / equality / `SELECT coin,`
/// shapes that later rules rewrite themselves. Anything else is rewritten,
/// including `coin` inside comments or another table's column of the same
/// name; the rule is a textual heuristic, not a SQL parser.
fn replace_bare_coin(caps: &Captures) -> Option<String> {
    let pre = caps.name("pre").map(|m| m.as_str()).unwrap_or("");
    let post = caps.name("post").map(|m| m.as_str()).unwrap_or("");

    let select_prefix = pre.starts_with("SELECT");
    if !pre.is_empty() && !select_prefix {
        return None;
    }
    if post.trim_start().starts_with("AS") || post.starts_with(" = '$") {
        return None;
    }
    if select_prefix && post == "," {
        return None;
    }
    Some(format!("{}{}{}", pre, MARKET_SYMBOL, post))
}
