//! The editor session: one tree, one writer, a live preview.
//!
//! [`SchemaEditor`] owns the [`SchemaTree`] and is its only writer. Each
//! [`EditorCommand`] runs to completion before the next is considered;
//! after every successful mutation the projection is re-run in full and
//! the cached preview replaced, then observers are notified. A failed
//! command changes nothing, including the preview.

use std::sync::Arc;

use fieldcraft_core::{Field, FieldPath, SchemaPreview, SchemaTree, TreeError};

use crate::command::EditorCommand;
use crate::observer::{ChangeEvent, ChangeObserver};

/// Interactive editing session over a single schema tree.
///
/// # Examples
///
/// ```
/// use fieldcraft_core::{FieldKind, FieldPath};
/// use fieldcraft_editor::{EditorCommand, SchemaEditor};
///
/// let mut editor = SchemaEditor::new();
/// editor
///     .apply(&EditorCommand::AddField {
///         parent: FieldPath::root(),
///         kind: FieldKind::String,
///     })
///     .unwrap();
/// editor
///     .apply(&EditorCommand::SetName {
///         path: FieldPath::from([0]),
///         name: "title".to_string(),
///     })
///     .unwrap();
/// assert!(editor.preview().json.contains("\"title\""));
/// ```
pub struct SchemaEditor {
    tree: SchemaTree,
    preview: SchemaPreview,
    observers: Vec<Arc<dyn ChangeObserver>>,
}

impl Default for SchemaEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaEditor {
    /// Creates a session over an empty tree.
    #[must_use]
    pub fn new() -> Self {
        let tree = SchemaTree::new();
        let preview = SchemaPreview::render(&tree);
        Self {
            tree,
            preview,
            observers: Vec::new(),
        }
    }

    /// Registers an observer. Observers are notified in registration order
    /// after each successful mutation.
    pub fn add_observer(&mut self, observer: Arc<dyn ChangeObserver>) {
        self.observers.push(observer);
    }

    /// Applies a command, regenerates the preview, and notifies observers.
    /// Returns the fresh preview.
    ///
    /// # Errors
    ///
    /// Propagates the [`TreeError`] of the underlying operation. On error
    /// the tree and the cached preview are unchanged and no observer runs.
    pub fn apply(&mut self, command: &EditorCommand) -> Result<&SchemaPreview, TreeError> {
        match command {
            EditorCommand::AddField { parent, kind } => {
                let field = self.tree.create_field(*kind);
                self.tree.insert_field(parent, field)?;
            }
            EditorCommand::RemoveField { path } => {
                self.tree.remove_field(path)?;
            }
            EditorCommand::ChangeKind { path, kind } => {
                self.tree.change_field_kind(path, *kind)?;
            }
            EditorCommand::SetName { path, name } => {
                self.tree.set_field_name(path, name.clone())?;
            }
            EditorCommand::SetDefault { path, value } => {
                self.tree.set_field_default(path, value.clone())?;
            }
        }

        self.preview = SchemaPreview::render(&self.tree);
        let event = ChangeEvent {
            command,
            tree: &self.tree,
            preview: &self.preview,
            blank_names: blank_names(self.tree.fields()),
        };
        for observer in &self.observers {
            observer.schema_changed(&event);
        }
        Ok(&self.preview)
    }

    /// Read-only snapshot of the tree.
    #[must_use]
    pub fn tree(&self) -> &SchemaTree {
        &self.tree
    }

    /// The preview rendered after the last successful mutation (or the
    /// empty-tree preview for a fresh session).
    #[must_use]
    pub fn preview(&self) -> &SchemaPreview {
        &self.preview
    }

    /// Paths of every field in the tree, depth-first in declaration order.
    /// Recomputed on demand; stale after the next structural mutation.
    #[must_use]
    pub fn field_paths(&self) -> Vec<FieldPath> {
        fn walk(fields: &[Field], base: &FieldPath, out: &mut Vec<FieldPath>) {
            for (index, field) in fields.iter().enumerate() {
                let path = base.child(index);
                out.push(path.clone());
                if let Some(children) = field.children() {
                    walk(children, &path, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(self.tree.fields(), &FieldPath::root(), &mut out);
        out
    }
}

/// Counts fields (at any depth) whose name is blank.
fn blank_names(fields: &[Field]) -> usize {
    fields
        .iter()
        .map(|field| {
            usize::from(field.has_blank_name())
                + field.children().map_or(0, blank_names)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use fieldcraft_core::FieldKind;

    use super::*;

    /// Observer that records the preview stats it was handed.
    #[derive(Default)]
    struct Recording {
        events: Mutex<Vec<(String, usize, usize)>>,
    }

    impl ChangeObserver for Recording {
        fn schema_changed(&self, event: &ChangeEvent<'_>) {
            self.events.lock().unwrap().push((
                event.command.verb().to_string(),
                event.preview.byte_len,
                event.blank_names,
            ));
        }
    }

    fn add(parent: FieldPath, kind: FieldKind) -> EditorCommand {
        EditorCommand::AddField { parent, kind }
    }

    #[test]
    fn fresh_session_previews_an_empty_object() {
        let editor = SchemaEditor::new();
        assert_eq!(editor.preview().json, "{}");
        assert!(editor.tree().is_empty());
    }

    #[test]
    fn preview_refreshes_after_each_mutation() {
        let mut editor = SchemaEditor::new();
        editor.apply(&add(FieldPath::root(), FieldKind::String)).unwrap();
        assert_eq!(editor.preview().json, "{}"); // still unnamed

        editor
            .apply(&EditorCommand::SetName {
                path: FieldPath::from([0]),
                name: "title".to_string(),
            })
            .unwrap();
        assert_eq!(editor.preview().json, "{\n  \"title\": \"\"\n}");

        editor
            .apply(&EditorCommand::SetDefault {
                path: FieldPath::from([0]),
                value: "Hello".to_string(),
            })
            .unwrap();
        assert_eq!(editor.preview().json, "{\n  \"title\": \"Hello\"\n}");
    }

    #[test]
    fn failed_command_leaves_preview_untouched() {
        let mut editor = SchemaEditor::new();
        editor.apply(&add(FieldPath::root(), FieldKind::String)).unwrap();
        editor
            .apply(&EditorCommand::SetName {
                path: FieldPath::from([0]),
                name: "a".to_string(),
            })
            .unwrap();
        let before = editor.preview().clone();

        let err = editor
            .apply(&EditorCommand::RemoveField {
                path: FieldPath::from([5]),
            })
            .unwrap_err();
        assert!(matches!(err, TreeError::InvalidPath { .. }));
        assert_eq!(editor.preview(), &before);
    }

    #[test]
    fn observers_run_after_successful_mutations_only() {
        let recording = Arc::new(Recording::default());
        let mut editor = SchemaEditor::new();
        editor.add_observer(recording.clone());

        editor.apply(&add(FieldPath::root(), FieldKind::Number)).unwrap();
        let _ = editor.apply(&EditorCommand::RemoveField {
            path: FieldPath::from([9]),
        });

        let events = recording.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        let (verb, byte_len, blank) = &events[0];
        assert_eq!(verb, "add");
        assert_eq!(*byte_len, 2); // "{}": the new field is unnamed
        assert_eq!(*blank, 1);
    }

    #[test]
    fn nested_editing_end_to_end() {
        let mut editor = SchemaEditor::new();
        editor.apply(&add(FieldPath::root(), FieldKind::Nested)).unwrap();
        editor
            .apply(&EditorCommand::SetName {
                path: FieldPath::from([0]),
                name: "address".to_string(),
            })
            .unwrap();
        editor.apply(&add(FieldPath::from([0]), FieldKind::String)).unwrap();
        editor
            .apply(&EditorCommand::SetName {
                path: FieldPath::from([0, 0]),
                name: "city".to_string(),
            })
            .unwrap();
        editor
            .apply(&EditorCommand::SetDefault {
                path: FieldPath::from([0, 0]),
                value: "NYC".to_string(),
            })
            .unwrap();

        assert_eq!(
            editor.preview().json,
            "{\n  \"address\": {\n    \"city\": \"NYC\"\n  }\n}"
        );
    }

    #[test]
    fn field_paths_lists_depth_first_declaration_order() {
        let mut editor = SchemaEditor::new();
        editor.apply(&add(FieldPath::root(), FieldKind::Nested)).unwrap();
        editor.apply(&add(FieldPath::from([0]), FieldKind::String)).unwrap();
        editor.apply(&add(FieldPath::root(), FieldKind::Number)).unwrap();

        let paths: Vec<String> = editor.field_paths().iter().map(ToString::to_string).collect();
        assert_eq!(paths, ["0", "0.0", "1"]);
    }

    mod props {
        use proptest::prelude::*;

        use super::*;

        /// Strategy: an arbitrary command aimed at small path indices, so
        /// some commands succeed and some fail.
        fn arb_command() -> impl Strategy<Value = EditorCommand> {
            let path = proptest::collection::vec(0usize..3, 0..3).prop_map(FieldPath::new);
            let nonempty = proptest::collection::vec(0usize..3, 1..3).prop_map(FieldPath::new);
            let kind = prop_oneof![
                Just(FieldKind::String),
                Just(FieldKind::Number),
                Just(FieldKind::Nested),
            ];
            prop_oneof![
                (path.clone(), kind.clone())
                    .prop_map(|(parent, kind)| EditorCommand::AddField { parent, kind }),
                nonempty
                    .clone()
                    .prop_map(|path| EditorCommand::RemoveField { path }),
                (nonempty.clone(), kind)
                    .prop_map(|(path, kind)| EditorCommand::ChangeKind { path, kind }),
                (nonempty.clone(), "[a-z]{0,6}")
                    .prop_map(|(path, name)| EditorCommand::SetName { path, name }),
                (nonempty, "[a-z0-9]{0,6}")
                    .prop_map(|(path, value)| EditorCommand::SetDefault { path, value }),
            ]
        }

        fn collect_ids(fields: &[Field], out: &mut Vec<u64>) {
            for field in fields {
                out.push(field.id.0);
                if let Some(children) = field.children() {
                    collect_ids(children, out);
                }
            }
        }

        proptest! {
            #[test]
            fn ids_stay_unique_under_arbitrary_command_sequences(
                commands in proptest::collection::vec(arb_command(), 0..40)
            ) {
                let mut editor = SchemaEditor::new();
                for command in &commands {
                    let _ = editor.apply(command);
                }
                let mut ids = Vec::new();
                collect_ids(editor.tree().fields(), &mut ids);
                let count = ids.len();
                ids.sort_unstable();
                ids.dedup();
                prop_assert_eq!(ids.len(), count);
            }

            #[test]
            fn preview_always_matches_a_fresh_render(
                commands in proptest::collection::vec(arb_command(), 0..40)
            ) {
                let mut editor = SchemaEditor::new();
                for command in &commands {
                    let _ = editor.apply(command);
                }
                prop_assert_eq!(
                    editor.preview(),
                    &SchemaPreview::render(editor.tree())
                );
            }
        }
    }
}
