//! Template-variable edits: `market_type` injection and the `coin` selector
//! definition update.

use log::info;
use serde_json::{json, Value};

pub const MARKET_TYPE_VARIABLE: &str = "market_type";
pub const COIN_VARIABLE: &str = "coin";
const DATASOURCE_VARIABLE: &str = "datasource";

/// Enumeration query for the market type selector, with an "All" sentinel.
const MARKET_TYPE_QUERY: &str =
    "SELECT 'All' AS market_type UNION SELECT 'spot' UNION SELECT 'perp' ORDER BY 1";

/// Symbol enumeration for the coin selector, filtered by the currently
/// selected market type ("All" selects every symbol).
const COIN_QUERY: &str = "SELECT 'All' UNION SELECT DISTINCT m.symbol FROM markets m WHERE ('${market_type}' = 'All' OR m.market_type = '${market_type}') ORDER BY 1";

/// Ensures the `market_type` selector variable exists exactly once.
pub struct TemplatingVariableInjector;

impl TemplatingVariableInjector {
    /// Insert the `market_type` variable when absent.
    ///
    /// The variable lands immediately after `datasource` when one exists,
    /// otherwise at the head of the list. An existing `market_type` variable
    /// is never touched or validated. Documents without a `templating.list`
    /// array are skipped.
    pub fn inject_market_type(document: &mut Value) {
        let list = match variable_list_mut(document) {
            Some(list) => list,
            None => return,
        };

        if list.iter().any(|var| variable_name(var) == Some(MARKET_TYPE_VARIABLE)) {
            return;
        }

        let position = list
            .iter()
            .position(|var| variable_name(var) == Some(DATASOURCE_VARIABLE))
            .map(|idx| idx + 1)
            .unwrap_or(0);
        list.insert(position, market_type_variable());
        info!("Injected '{}' templating variable", MARKET_TYPE_VARIABLE);
    }
}

/// Rewrites the `coin` selector to enumerate symbols from the markets table.
pub struct VariableDefinitionUpdater;

impl VariableDefinitionUpdater {
    /// Replace the `coin` variable's `definition` and `query` with the
    /// market-type-filtered symbol enumeration. No-op when the variable does
    /// not exist.
    pub fn update_coin_definition(document: &mut Value) {
        let list = match variable_list_mut(document) {
            Some(list) => list,
            None => return,
        };

        for var in list.iter_mut() {
            if variable_name(var) != Some(COIN_VARIABLE) {
                continue;
            }
            if let Some(obj) = var.as_object_mut() {
                obj.insert("definition".to_string(), Value::String(COIN_QUERY.to_string()));
                obj.insert("query".to_string(), Value::String(COIN_QUERY.to_string()));
                info!("Updated '{}' variable definition", COIN_VARIABLE);
            }
        }
    }
}

fn variable_list_mut(document: &mut Value) -> Option<&mut Vec<Value>> {
    document
        .get_mut("templating")?
        .get_mut("list")?
        .as_array_mut()
}

fn variable_name(var: &Value) -> Option<&str> {
    var.get("name").and_then(Value::as_str)
}

fn market_type_variable() -> Value {
    json!({
        "allValue": "All",
        "current": {
            "selected": true,
            "text": "All",
            "value": "All"
        },
        "datasource": {
            "type": "postgres",
            "uid": "${datasource}"
        },
        "definition": MARKET_TYPE_QUERY,
        "hide": 0,
        "includeAll": false,
        "label": "Market Type",
        "multi": false,
        "name": "market_type",
        "options": [],
        "query": MARKET_TYPE_QUERY,
        "refresh": 1,
        "regex": "",
        "skipUrlSync": false,
        "sort": 0,
        "type": "query"
    })
}
