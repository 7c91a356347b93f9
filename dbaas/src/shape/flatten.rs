//! Nested-object flattening.

use serde_json::{Map, Value};

/// Flatten a nested object into a flat map keyed by dot-joined paths to
/// every non-container leaf.
///
/// Recurses through both objects and arrays; array children become `a.0`,
/// `a.1`, and so on. Empty containers contribute no entries. Non-object
/// sources flatten to an empty map.
///
/// # Examples
/// ```
/// # use dbaas::shape::flatten;
/// # use serde_json::json;
/// let flat = flatten(&json!({"a": {"b": 1, "c": 2}}));
/// assert_eq!(flat.get("a.b"), Some(&json!(1)));
/// assert_eq!(flat.get("a.c"), Some(&json!(2)));
/// ```
pub fn flatten(source: &Value) -> Map<String, Value> {
    let mut out = Map::new();
    if let Value::Object(map) = source {
        for (key, value) in map {
            flatten_into(&mut out, key.clone(), value);
        }
    }
    out
}

fn flatten_into(out: &mut Map<String, Value>, prefix: String, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(out, format!("{prefix}.{key}"), child);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(out, format!("{prefix}.{index}"), child);
            }
        }
        leaf => {
            out.insert(prefix, leaf.clone());
        }
    }
}
