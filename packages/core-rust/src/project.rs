//! Schema-to-JSON projection.
//!
//! [`project`] maps a field sequence to a `serde_json` object, applying
//! the per-kind default coercion rules. It is pure and total: it never
//! mutates its input, never fails, and never emits a non-finite number.
//! The whole tree is re-projected after every mutation; trees are small
//! and incremental recomputation is deliberately not attempted.
//!
//! # Coercion rules
//!
//! - Fields with an empty or whitespace-only name are skipped, at every
//!   nesting depth.
//! - `nested` fields project recursively; an empty child sequence yields
//!   `{}`.
//! - `string` fields project their raw default as-is, or `""` when none
//!   was typed.
//! - `number` fields parse their raw default as an integer first, then a
//!   float. An absent, empty, unparseable, or non-finite default projects
//!   as `0`, keeping the output free of `NaN`/`null` artifacts.
//! - Duplicate names: the last-declared value wins, and the key keeps the
//!   position of its first occurrence (`serde_json` map insert semantics
//!   with `preserve_order`).

use serde_json::{Map, Value};

use crate::field::{Field, FieldValue};

/// Projects a field sequence to a JSON object, in declaration order.
///
/// The `preserve_order` feature of `serde_json` makes the returned map
/// keep insertion order through serialization, so the rendered preview
/// is stable across runs.
///
/// # Examples
///
/// ```
/// use fieldcraft_core::field::{Field, FieldId, FieldKind, FieldValue};
/// use fieldcraft_core::project::project;
///
/// let mut field = Field::new(FieldId(0), FieldKind::String);
/// field.name = "title".to_string();
/// field.value = FieldValue::String { default: Some("Hello".to_string()) };
///
/// let out = project(&[field]);
/// assert_eq!(serde_json::to_string(&out).unwrap(), r#"{"title":"Hello"}"#);
/// ```
#[must_use]
pub fn project(fields: &[Field]) -> Map<String, Value> {
    let mut out = Map::new();
    for field in fields {
        if field.has_blank_name() {
            continue;
        }
        let value = match &field.value {
            FieldValue::Nested { children } => Value::Object(project(children)),
            FieldValue::String { default } => {
                Value::String(default.clone().unwrap_or_default())
            }
            FieldValue::Number { default } => coerce_number(default.as_deref()),
        };
        out.insert(field.name.clone(), value);
    }
    out
}

/// Coerces a raw number default to a JSON number, falling back to `0`.
fn coerce_number(raw: Option<&str>) -> Value {
    let Some(raw) = raw else {
        return Value::from(0);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::from(0);
    }
    // Integer first so "42" renders as 42, not 42.0.
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::from(int);
    }
    match trimmed.parse::<f64>() {
        Ok(float) if float.is_finite() => {
            serde_json::Number::from_f64(float).map_or_else(|| Value::from(0), Value::Number)
        }
        _ => {
            tracing::debug!(raw = %raw, "unparseable number default coerced to 0");
            Value::from(0)
        }
    }
}
