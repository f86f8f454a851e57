//! Rendered JSON preview of a schema tree.
//!
//! The preview is the serialization boundary of the builder: the
//! projection is pretty-printed with 2-space indentation and paired with
//! the stats the editor surface displays alongside it (root field count
//! and byte size of the rendered text).

use serde_json::Value;

use crate::project::project;
use crate::tree::SchemaTree;

/// Pretty-printed projection of a schema tree, plus display stats.
///
/// # Examples
///
/// ```
/// use fieldcraft_core::{SchemaPreview, SchemaTree};
///
/// let preview = SchemaPreview::render(&SchemaTree::new());
/// assert_eq!(preview.json, "{}");
/// assert_eq!(preview.byte_len, 2);
/// assert_eq!(preview.field_count, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaPreview {
    /// The projection serialized with 2-space indentation.
    pub json: String,
    /// Byte length of `json` (UTF-8).
    pub byte_len: usize,
    /// Number of root fields in the tree, named or not.
    pub field_count: usize,
}

impl SchemaPreview {
    /// Projects `tree` and renders the result.
    #[must_use]
    pub fn render(tree: &SchemaTree) -> Self {
        let object = Value::Object(project(tree.fields()));
        // to_string_pretty on a Value cannot fail: no non-string keys,
        // no fallible Serialize impls.
        let json = serde_json::to_string_pretty(&object).unwrap_or_else(|_| "{}".to_string());
        let byte_len = json.len();
        Self {
            json,
            byte_len,
            field_count: tree.len(),
        }
    }
}
