//! Dotted-path access over JSON values.

use serde_json::Value;

/// Value at a dot-notation path (`"coords.lat"`). Array segments are
/// numeric indexes (`"items.0.id"`).
pub fn dotted_path<'a>(path: &str, source: &'a Value) -> Option<&'a Value> {
    let mut current = source;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// JS-style truthiness: `null`, `false`, zero, and the empty string are
/// falsy; containers (even empty ones) are truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Object(_) | Value::Array(_) => true,
    }
}

/// Value at the first path if truthy, else the value at the second path
/// (even if falsy). Missing paths yield `null`.
///
/// # Examples
/// ```
/// # use dbaas::shape::path_or_path;
/// # use serde_json::json;
/// let source = json!({"a": {"b": "B"}, "c": "C"});
/// assert_eq!(path_or_path("a.b", "c", &source), json!("B"));
/// assert_eq!(path_or_path("missing", "c", &source), json!("C"));
/// ```
pub fn path_or_path(first: &str, second: &str, source: &Value) -> Value {
    if let Some(value) = dotted_path(first, source) {
        if is_truthy(value) {
            return value.clone();
        }
    }
    dotted_path(second, source).cloned().unwrap_or(Value::Null)
}

/// Fetch the value at `path` and apply `transform` to it. The transform
/// receives `None` when the path does not resolve.
pub fn path_to<T>(path: &str, transform: impl FnOnce(Option<&Value>) -> T, source: &Value) -> T {
    transform(dotted_path(path, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dotted_path_walks_objects_and_arrays() {
        let source = json!({"a": {"b": [1, {"c": 2}]}});
        assert_eq!(dotted_path("a.b.0", &source), Some(&json!(1)));
        assert_eq!(dotted_path("a.b.1.c", &source), Some(&json!(2)));
        assert_eq!(dotted_path("a.x", &source), None);
        assert_eq!(dotted_path("a.b.notanumber", &source), None);
    }

    #[test]
    fn path_or_path_skips_falsy_first_values() {
        let source = json!({"empty": "", "zero": 0, "fallback": false});
        // Falsy first path: second wins, even though it is falsy too.
        assert_eq!(path_or_path("empty", "fallback", &source), json!(false));
        assert_eq!(path_or_path("zero", "missing", &source), Value::Null);
        // Truthy first path wins outright.
        let source = json!({"a": {"b": "B"}, "c": "C"});
        assert_eq!(path_or_path("a.b", "c", &source), json!("B"));
    }

    #[test]
    fn truthiness_follows_js_rules() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!("x")));
    }

    #[test]
    fn path_to_applies_the_transform() {
        let source = json!({"a": {"b": 2}});
        let doubled = path_to(
            "a.b",
            |v| v.and_then(Value::as_i64).unwrap_or(0) * 2,
            &source,
        );
        assert_eq!(doubled, 4);
    }
}
