//! Declarative template projection.
//!
//! A [`Template`] describes a destination object whose leaves are resolved
//! against a source: paths dereference into it, transform functions receive
//! the whole source, nested templates recurse, literals pass through. This
//! is the mechanism used to project wire payloads into UI-friendly shapes
//! and back.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// One node of a projection template.
#[derive(Clone)]
pub enum Template {
    /// Dereference the source at these path segments.
    Path(Vec<String>),
    /// Invoke the function with the full source.
    Apply(Arc<dyn Fn(&Value) -> Value + Send + Sync>),
    /// A nested object template.
    Map(BTreeMap<String, Template>),
    /// An array of templates, projected element-wise.
    Seq(Vec<Template>),
    /// A constant carried through unchanged.
    Literal(Value),
}

impl Template {
    /// Path leaf from explicit segments.
    pub fn path<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Template::Path(segments.into_iter().map(Into::into).collect())
    }

    /// Path leaf from dot notation (`"data.uuid"`).
    pub fn dotted(path: &str) -> Self {
        Template::Path(path.split('.').map(str::to_string).collect())
    }

    /// Transform leaf: the function receives the full source object.
    pub fn apply(f: impl Fn(&Value) -> Value + Send + Sync + 'static) -> Self {
        Template::Apply(Arc::new(f))
    }

    /// Nested object template.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Template)>,
    {
        Template::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        )
    }

    /// Literal leaf.
    pub fn literal(value: impl Into<Value>) -> Self {
        Template::Literal(value.into())
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Template::Path(segments) => f.debug_tuple("Path").field(segments).finish(),
            Template::Apply(_) => f.write_str("Apply(..)"),
            Template::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Template::Seq(items) => f.debug_tuple("Seq").field(items).finish(),
            Template::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
        }
    }
}

/// Resolve a template against a source object.
///
/// Unresolvable paths project to `null`.
///
/// # Examples
/// ```
/// # use dbaas::shape::{project, Template};
/// # use serde_json::json;
/// let tpl = Template::map([
///     ("id", Template::dotted("data.uuid")),
///     ("kind", Template::literal("database")),
/// ]);
/// let projected = project(&tpl, &json!({"data": {"uuid": 42}}));
/// assert_eq!(projected, json!({"id": 42, "kind": "database"}));
/// ```
pub fn project(template: &Template, source: &Value) -> Value {
    match template {
        Template::Path(segments) => {
            let mut current = source;
            for segment in segments {
                current = match current {
                    Value::Object(map) => match map.get(segment) {
                        Some(value) => value,
                        None => return Value::Null,
                    },
                    Value::Array(items) => match segment
                        .parse::<usize>()
                        .ok()
                        .and_then(|i| items.get(i))
                    {
                        Some(value) => value,
                        None => return Value::Null,
                    },
                    _ => return Value::Null,
                };
            }
            current.clone()
        }
        Template::Apply(f) => f(source),
        Template::Map(entries) => Value::Object(
            entries
                .iter()
                .map(|(key, tpl)| (key.clone(), project(tpl, source)))
                .collect(),
        ),
        Template::Seq(items) => {
            Value::Array(items.iter().map(|tpl| project(tpl, source)).collect())
        }
        Template::Literal(value) => value.clone(),
    }
}
