//! Field definitions for the schema tree.
//!
//! A [`Field`] is one node in the user-built schema: a name, a stable
//! identity, and a kind-determined payload. The payload is an enum, so a
//! field can never simultaneously hold a scalar default and children —
//! the shape invariant is enforced by construction rather than checked.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stable, opaque identity of a field.
///
/// Assigned once at creation by the owning [`SchemaTree`](crate::SchemaTree)
/// and never reused, even after the field is removed. Identity survives
/// re-renders and sibling reordering; it is *not* positional (paths are).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldId(pub u64);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Closed set of field kinds a user can pick in the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Scalar text value.
    String,
    /// Scalar numeric value.
    Number,
    /// Holds an ordered sequence of child fields instead of a value.
    Nested,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Nested => "nested",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing a [`FieldKind`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field kind {input:?} (expected string, number, or nested)")]
pub struct ParseKindError {
    /// The text that failed to parse.
    pub input: String,
}

impl FromStr for FieldKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(FieldKind::String),
            "number" => Ok(FieldKind::Number),
            "nested" => Ok(FieldKind::Nested),
            other => Err(ParseKindError {
                input: other.to_string(),
            }),
        }
    }
}

/// Kind-determined payload of a field.
///
/// Scalar kinds carry the raw default text exactly as the user typed it
/// (`None` until something is typed); type coercion happens only at
/// projection time. `Nested` carries the ordered child sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum FieldValue {
    /// Text field with an optional raw default.
    String {
        /// Raw default as typed; projects to `""` when absent.
        default: Option<String>,
    },
    /// Numeric field with an optional raw default.
    Number {
        /// Raw default as typed; projects to `0` when absent or empty.
        default: Option<String>,
    },
    /// Object field holding an ordered sequence of children.
    Nested {
        /// Child fields, in declaration order.
        children: Vec<Field>,
    },
}

impl FieldValue {
    /// Returns the empty payload for a kind: no default for scalars,
    /// no children for nested.
    #[must_use]
    pub fn empty(kind: FieldKind) -> Self {
        match kind {
            FieldKind::String => FieldValue::String { default: None },
            FieldKind::Number => FieldValue::Number { default: None },
            FieldKind::Nested => FieldValue::Nested {
                children: Vec::new(),
            },
        }
    }

    /// Returns the kind this payload belongs to.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::String { .. } => FieldKind::String,
            FieldValue::Number { .. } => FieldKind::Number,
            FieldValue::Nested { .. } => FieldKind::Nested,
        }
    }
}

/// A node in the schema tree.
///
/// # Examples
///
/// ```
/// use fieldcraft_core::SchemaTree;
/// use fieldcraft_core::field::FieldKind;
///
/// let mut tree = SchemaTree::new();
/// let mut field = tree.create_field(FieldKind::String);
/// field.name = "title".to_string();
/// assert_eq!(field.kind(), FieldKind::String);
/// assert!(field.children().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Stable identity, unique within the owning tree.
    pub id: FieldId,
    /// User-supplied key. May be empty mid-edit; empty and whitespace-only
    /// names are excluded from projection.
    pub name: String,
    /// Kind-determined payload.
    #[serde(flatten)]
    pub value: FieldValue,
}

impl Field {
    /// Creates a field with the given id and the empty payload for `kind`.
    #[must_use]
    pub fn new(id: FieldId, kind: FieldKind) -> Self {
        Self {
            id,
            name: String::new(),
            value: FieldValue::empty(kind),
        }
    }

    /// Returns this field's kind.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.value.kind()
    }

    /// Returns the child sequence, or `None` for scalar fields.
    #[must_use]
    pub fn children(&self) -> Option<&[Field]> {
        match &self.value {
            FieldValue::Nested { children } => Some(children),
            _ => None,
        }
    }

    /// Mutable access to the child sequence, or `None` for scalar fields.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Field>> {
        match &mut self.value {
            FieldValue::Nested { children } => Some(children),
            _ => None,
        }
    }

    /// Returns the raw default text, or `None` for nested fields and for
    /// scalars with nothing typed yet.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        match &self.value {
            FieldValue::String { default } | FieldValue::Number { default } => default.as_deref(),
            FieldValue::Nested { .. } => None,
        }
    }

    /// Whether the name would be excluded from projection.
    #[must_use]
    pub fn has_blank_name(&self) -> bool {
        self.name.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_matches_kind() {
        assert_eq!(
            FieldValue::empty(FieldKind::String),
            FieldValue::String { default: None }
        );
        assert_eq!(
            FieldValue::empty(FieldKind::Number),
            FieldValue::Number { default: None }
        );
        assert_eq!(
            FieldValue::empty(FieldKind::Nested),
            FieldValue::Nested {
                children: Vec::new()
            }
        );
    }

    #[test]
    fn kind_round_trips_through_display_and_parse() {
        for kind in [FieldKind::String, FieldKind::Number, FieldKind::Nested] {
            assert_eq!(kind.to_string().parse::<FieldKind>(), Ok(kind));
        }
        assert!("object".parse::<FieldKind>().is_err());
    }

    #[test]
    fn scalar_field_has_no_children() {
        let field = Field::new(FieldId(1), FieldKind::Number);
        assert!(field.children().is_none());
        assert_eq!(field.default_value(), None);
    }

    #[test]
    fn nested_field_has_empty_children() {
        let field = Field::new(FieldId(2), FieldKind::Nested);
        assert_eq!(field.children(), Some(&[][..]));
        assert_eq!(field.default_value(), None);
    }

    #[test]
    fn blank_name_detection_includes_whitespace() {
        let mut field = Field::new(FieldId(3), FieldKind::String);
        assert!(field.has_blank_name());
        field.name = "   \t".to_string();
        assert!(field.has_blank_name());
        field.name = "title".to_string();
        assert!(!field.has_blank_name());
    }
}
