//! Fieldcraft Editor — command layer, change observers, and the interactive preview loop.

pub mod command;
pub mod editor;
pub mod observer;
pub mod repl;

pub use command::EditorCommand;
pub use editor::SchemaEditor;
pub use observer::{ChangeEvent, ChangeObserver, TracingObserver};
pub use repl::{parse_line, ParseError, ReplAction};

#[cfg(test)]
mod tests {
    #[test]
    fn crate_loads() {
        // Empty body: if this test runs, the crate compiles and loads.
    }
}
