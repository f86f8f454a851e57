//! Fieldcraft Core — schema field tree, path addressing, and JSON projection.

pub mod field;
pub mod path;
pub mod preview;
pub mod project;
pub mod tree;

pub use field::{Field, FieldId, FieldKind, FieldValue};
pub use path::FieldPath;
pub use preview::SchemaPreview;
pub use project::project;
pub use tree::{SchemaTree, TreeError};
