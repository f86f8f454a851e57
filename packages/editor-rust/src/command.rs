//! Editor commands: the single-writer mutation interface over the tree.
//!
//! Every structural or scalar change the editor surface can request is a
//! variant here. Commands are applied one at a time by
//! [`SchemaEditor::apply`](crate::SchemaEditor::apply); there is no other
//! write path to the tree.

use fieldcraft_core::{FieldKind, FieldPath};

/// A mutation request against the schema tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    /// Create a fresh field of `kind` and append it under `parent`
    /// (the root path appends to the root sequence).
    AddField {
        /// Path of the `nested` parent, or the root path.
        parent: FieldPath,
        /// Kind of the new field.
        kind: FieldKind,
    },
    /// Remove the field at `path`, discarding its subtree.
    RemoveField {
        /// Path of the field to remove.
        path: FieldPath,
    },
    /// Change the kind of the field at `path`, resetting its payload.
    ChangeKind {
        /// Path of the field to retype.
        path: FieldPath,
        /// The new kind.
        kind: FieldKind,
    },
    /// Set the name of the field at `path`.
    SetName {
        /// Path of the field to rename.
        path: FieldPath,
        /// The new name; may be blank mid-edit.
        name: String,
    },
    /// Set the raw default text of the scalar field at `path`.
    SetDefault {
        /// Path of the scalar field.
        path: FieldPath,
        /// The raw text as typed.
        value: String,
    },
}

impl EditorCommand {
    /// Short verb for logging.
    #[must_use]
    pub fn verb(&self) -> &'static str {
        match self {
            EditorCommand::AddField { .. } => "add",
            EditorCommand::RemoveField { .. } => "remove",
            EditorCommand::ChangeKind { .. } => "change-kind",
            EditorCommand::SetName { .. } => "set-name",
            EditorCommand::SetDefault { .. } => "set-default",
        }
    }

    /// The path this command targets (the parent path for `AddField`).
    #[must_use]
    pub fn target(&self) -> &FieldPath {
        match self {
            EditorCommand::AddField { parent, .. } => parent,
            EditorCommand::RemoveField { path }
            | EditorCommand::ChangeKind { path, .. }
            | EditorCommand::SetName { path, .. }
            | EditorCommand::SetDefault { path, .. } => path,
        }
    }
}
