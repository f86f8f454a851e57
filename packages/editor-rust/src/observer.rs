//! Change observation hooks for the editor.
//!
//! The original builder surface logged every state change unconditionally.
//! Here that becomes an explicit, injectable observer: anything that wants
//! to react to a successful mutation registers a [`ChangeObserver`] with
//! the editor. The editor itself has no hardcoded side effects.

use fieldcraft_core::{SchemaPreview, SchemaTree};

use crate::command::EditorCommand;

/// Snapshot handed to observers after each successful mutation.
#[derive(Debug, Clone, Copy)]
pub struct ChangeEvent<'a> {
    /// The command that was applied.
    pub command: &'a EditorCommand,
    /// The tree after the mutation.
    pub tree: &'a SchemaTree,
    /// The freshly regenerated preview.
    pub preview: &'a SchemaPreview,
    /// Fields (at any depth) whose name is still blank. Non-fatal: they
    /// are simply excluded from the preview, but a surface may flag them.
    pub blank_names: usize,
}

/// Observer for successful schema mutations.
///
/// Used as `Arc<dyn ChangeObserver>`. Called synchronously after the
/// preview is regenerated, in registration order.
pub trait ChangeObserver: Send + Sync {
    /// Called after each successful mutation.
    fn schema_changed(&self, event: &ChangeEvent<'_>);
}

/// Observer that logs each change through `tracing`.
///
/// Debug-logs the applied command and preview stats; warns when blank
/// field names are present, as a soft validation signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ChangeObserver for TracingObserver {
    fn schema_changed(&self, event: &ChangeEvent<'_>) {
        tracing::debug!(
            command = event.command.verb(),
            path = %event.command.target(),
            fields = event.tree.total_fields(),
            bytes = event.preview.byte_len,
            "schema changed"
        );
        if event.blank_names > 0 {
            tracing::warn!(
                count = event.blank_names,
                "fields without a name are excluded from the preview"
            );
        }
    }
}
