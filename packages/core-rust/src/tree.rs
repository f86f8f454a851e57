//! The mutable schema tree and its structural operations.
//!
//! [`SchemaTree`] owns the ordered sequence of root [`Field`]s and a
//! monotonic id allocator. All structural mutation goes through
//! path-addressed operations; an operation either applies fully or fails
//! with a [`TreeError`] leaving the tree untouched. There is no partial
//! mutation path.
//!
//! The tree is single-writer by construction: it is a plain owned value,
//! and every operation takes `&mut self`. Callers interleave mutations
//! and reads on one timeline; nothing here blocks or suspends.

use serde::{Deserialize, Serialize};

use crate::field::{Field, FieldId, FieldKind, FieldValue};
use crate::path::FieldPath;

/// Errors from path-addressed structural operations.
///
/// Every variant carries the offending path so callers can surface the
/// failure without re-deriving context. No variant is fatal; the tree is
/// unchanged after any error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The path does not address an existing field.
    #[error("no field exists at path {path}")]
    InvalidPath {
        /// The path that failed to resolve.
        path: FieldPath,
    },
    /// Children were expected at a field that is not `nested`.
    #[error("field at path {path} is {kind}, not nested, and cannot hold children")]
    NotNested {
        /// Path of the scalar field.
        path: FieldPath,
        /// The field's actual kind.
        kind: FieldKind,
    },
    /// A scalar default was set on a `nested` field.
    #[error("field at path {path} is nested and has no scalar default")]
    NotScalar {
        /// Path of the nested field.
        path: FieldPath,
    },
}

/// Ordered, recursively nested collection of field definitions.
///
/// # Examples
///
/// ```
/// use fieldcraft_core::path::FieldPath;
/// use fieldcraft_core::field::FieldKind;
/// use fieldcraft_core::SchemaTree;
///
/// let mut tree = SchemaTree::new();
/// let field = tree.create_field(FieldKind::Nested);
/// tree.insert_field(&FieldPath::root(), field).unwrap();
/// tree.set_field_name(&FieldPath::from([0]), "address").unwrap();
///
/// let child = tree.create_field(FieldKind::String);
/// tree.insert_field(&FieldPath::from([0]), child).unwrap();
/// assert_eq!(tree.total_fields(), 2);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaTree {
    /// Root field sequence, in declaration order.
    fields: Vec<Field>,
    /// Next id to hand out. Only ever incremented, so removed ids are
    /// never reused.
    next_id: u64,
}

impl SchemaTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detached field with a fresh unique id, an empty name, and
    /// the empty payload for `kind`.
    ///
    /// The field is not yet part of the tree; pass it to
    /// [`insert_field`](Self::insert_field). The id is consumed even if the
    /// field is never inserted.
    pub fn create_field(&mut self, kind: FieldKind) -> Field {
        let id = FieldId(self.next_id);
        self.next_id += 1;
        Field::new(id, kind)
    }

    /// Appends `field` to the children of the `nested` field at
    /// `parent_path`, or to the root sequence for the root path.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPath`] if `parent_path` resolves to nothing;
    /// [`TreeError::NotNested`] if it resolves to a scalar field.
    pub fn insert_field(&mut self, parent_path: &FieldPath, field: Field) -> Result<(), TreeError> {
        self.children_of_mut(parent_path)?.push(field);
        Ok(())
    }

    /// Removes and returns the field at `path`, discarding nothing: the
    /// entire subtree comes back with it.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPath`] if the path (including its final index)
    /// does not address an existing field. The tree is unchanged on error.
    pub fn remove_field(&mut self, path: &FieldPath) -> Result<Field, TreeError> {
        let (parent_segments, index) = path
            .split_last()
            .ok_or_else(|| TreeError::InvalidPath { path: path.clone() })?;
        let siblings = self
            .children_of_mut(&FieldPath::new(parent_segments.to_vec()))
            .map_err(|_| TreeError::InvalidPath { path: path.clone() })?;
        if index >= siblings.len() {
            return Err(TreeError::InvalidPath { path: path.clone() });
        }
        Ok(siblings.remove(index))
    }

    /// Changes the kind of the field at `path`, resetting its payload:
    /// switching to `nested` discards any scalar default and starts with
    /// empty children; switching away discards any children and starts
    /// with no default. A same-kind change still resets.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPath`] if the path resolves to nothing.
    pub fn change_field_kind(&mut self, path: &FieldPath, kind: FieldKind) -> Result<(), TreeError> {
        let field = self.field_mut(path)?;
        field.value = FieldValue::empty(kind);
        Ok(())
    }

    /// Sets the name of the field at `path`. Blank names are allowed; they
    /// are simply excluded from projection.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPath`] if the path resolves to nothing.
    pub fn set_field_name(&mut self, path: &FieldPath, name: impl Into<String>) -> Result<(), TreeError> {
        let field = self.field_mut(path)?;
        field.name = name.into();
        Ok(())
    }

    /// Sets the raw default text of the scalar field at `path`.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPath`] if the path resolves to nothing;
    /// [`TreeError::NotScalar`] if the field is `nested`.
    pub fn set_field_default(
        &mut self,
        path: &FieldPath,
        raw: impl Into<String>,
    ) -> Result<(), TreeError> {
        let field = self.field_mut(path)?;
        match &mut field.value {
            FieldValue::String { default } | FieldValue::Number { default } => {
                *default = Some(raw.into());
                Ok(())
            }
            FieldValue::Nested { .. } => Err(TreeError::NotScalar { path: path.clone() }),
        }
    }

    /// Returns the field at `path`, or `None` if the path does not resolve.
    /// The root path addresses the sequence, not a field, and returns `None`.
    #[must_use]
    pub fn get(&self, path: &FieldPath) -> Option<&Field> {
        let (first, rest) = path.segments().split_first()?;
        let mut field = self.fields.get(*first)?;
        for &index in rest {
            field = field.children()?.get(index)?;
        }
        Some(field)
    }

    /// The root field sequence, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Number of root fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the tree has no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total field count across all nesting levels.
    #[must_use]
    pub fn total_fields(&self) -> usize {
        fn count(fields: &[Field]) -> usize {
            fields
                .iter()
                .map(|f| 1 + f.children().map_or(0, count))
                .sum()
        }
        count(&self.fields)
    }

    /// Resolves `path` to a mutable field.
    fn field_mut(&mut self, path: &FieldPath) -> Result<&mut Field, TreeError> {
        let err = || TreeError::InvalidPath { path: path.clone() };
        let (first, rest) = path.segments().split_first().ok_or_else(err)?;
        let mut field = self.fields.get_mut(*first).ok_or_else(err)?;
        for &index in rest {
            field = field
                .children_mut()
                .and_then(|children| children.get_mut(index))
                .ok_or_else(err)?;
        }
        Ok(field)
    }

    /// Resolves `path` to the mutable child sequence it addresses: the
    /// root sequence for the root path, otherwise the children of the
    /// `nested` field at `path`.
    fn children_of_mut(&mut self, path: &FieldPath) -> Result<&mut Vec<Field>, TreeError> {
        if path.is_root() {
            return Ok(&mut self.fields);
        }
        let kind = self.field_mut(path)?.kind();
        match &mut self.field_mut(path)?.value {
            FieldValue::Nested { children } => Ok(children),
            _ => Err(TreeError::NotNested {
                path: path.clone(),
                kind,
            }),
        }
    }
}
