//! Line-driven interactive session over a [`SchemaEditor`].
//!
//! Reads one command per line, applies it, and prints the regenerated
//! preview after every successful mutation, mirroring the side-by-side
//! builder/preview surface of the original app. Parse and tree errors are
//! printed and the loop continues; only end-of-input or `quit` ends it.
//!
//! # Command language
//!
//! ```text
//! add [parent] [kind]     append a field ("." = root; kind defaults to string)
//! rm <path>               remove the field at path
//! kind <path> <kind>      change a field's kind (string | number | nested)
//! name <path> <text>      set a field's name
//! default <path> <text>   set a scalar field's default
//! show                    reprint the current preview
//! tree                    list fields with paths, ids, and kinds
//! help                    print this summary
//! quit                    end the session
//! ```
//!
//! Paths are dot-joined indices (`2.0.1`), as rendered by `tree`.

use std::io::{BufRead, Write};

use fieldcraft_core::{Field, FieldKind, FieldPath};

use crate::command::EditorCommand;
use crate::editor::SchemaEditor;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplAction {
    /// A mutation to apply.
    Command(EditorCommand),
    /// Reprint the current preview.
    Show,
    /// List the fields with their paths.
    Tree,
    /// Print the command summary.
    Help,
    /// End the session.
    Quit,
    /// Blank line; ignored.
    Nothing,
}

/// Errors from parsing an input line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The first word is not a known command.
    #[error("unknown command {verb:?}; try \"help\"")]
    UnknownCommand {
        /// The unrecognized verb.
        verb: String,
    },
    /// The command is missing a required argument.
    #[error("{verb}: missing {missing}")]
    MissingArgument {
        /// The command verb.
        verb: &'static str,
        /// Description of what was expected.
        missing: &'static str,
    },
    /// A path argument did not parse.
    #[error(transparent)]
    BadPath(#[from] fieldcraft_core::path::ParsePathError),
    /// A kind argument did not parse.
    #[error(transparent)]
    BadKind(#[from] fieldcraft_core::field::ParseKindError),
}

/// Parses one input line into a [`ReplAction`].
///
/// # Errors
///
/// Returns a [`ParseError`] describing the malformed input; the caller
/// prints it and keeps the session running.
pub fn parse_line(line: &str) -> Result<ReplAction, ParseError> {
    let line = line.trim();
    let Some((verb, rest)) = split_word(line) else {
        return Ok(ReplAction::Nothing);
    };
    match verb {
        "add" => {
            let (parent, rest) = match split_word(rest) {
                None => (FieldPath::root(), ""),
                Some((word, rest)) => (word.parse()?, rest),
            };
            let kind = match split_word(rest) {
                None => FieldKind::String,
                Some((word, _)) => word.parse()?,
            };
            Ok(ReplAction::Command(EditorCommand::AddField { parent, kind }))
        }
        "rm" => {
            let (path, _) = require_word(rest, "rm", "a field path")?;
            Ok(ReplAction::Command(EditorCommand::RemoveField {
                path: path.parse()?,
            }))
        }
        "kind" => {
            let (path, rest) = require_word(rest, "kind", "a field path")?;
            let (kind, _) = require_word(rest, "kind", "a kind (string | number | nested)")?;
            Ok(ReplAction::Command(EditorCommand::ChangeKind {
                path: path.parse()?,
                kind: kind.parse()?,
            }))
        }
        "name" => {
            let (path, rest) = require_word(rest, "name", "a field path")?;
            Ok(ReplAction::Command(EditorCommand::SetName {
                path: path.parse()?,
                name: rest.to_string(),
            }))
        }
        "default" => {
            let (path, rest) = require_word(rest, "default", "a field path")?;
            Ok(ReplAction::Command(EditorCommand::SetDefault {
                path: path.parse()?,
                value: rest.to_string(),
            }))
        }
        "show" => Ok(ReplAction::Show),
        "tree" => Ok(ReplAction::Tree),
        "help" => Ok(ReplAction::Help),
        "quit" | "exit" => Ok(ReplAction::Quit),
        other => Err(ParseError::UnknownCommand {
            verb: other.to_string(),
        }),
    }
}

/// Splits the first whitespace-delimited word off `text`.
/// The remainder keeps its internal spacing (names and defaults may
/// contain spaces).
fn split_word(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => Some((word, rest.trim_start())),
        None => Some((text, "")),
    }
}

fn require_word<'a>(
    text: &'a str,
    verb: &'static str,
    missing: &'static str,
) -> Result<(&'a str, &'a str), ParseError> {
    split_word(text).ok_or(ParseError::MissingArgument { verb, missing })
}

/// Runs the session loop until end-of-input or `quit`.
///
/// # Errors
///
/// Only I/O failures on `input`/`output` abort the loop; command errors
/// are printed and the session continues.
pub fn run(
    editor: &mut SchemaEditor,
    input: impl BufRead,
    mut output: impl Write,
) -> anyhow::Result<()> {
    writeln!(output, "fieldcraft — live JSON schema builder (\"help\" for commands)")?;
    print_preview(editor, &mut output)?;

    for line in input.lines() {
        let line = line?;
        match parse_line(&line) {
            Ok(ReplAction::Command(command)) => match editor.apply(&command) {
                Ok(_) => print_preview(editor, &mut output)?,
                Err(err) => writeln!(output, "error: {err}")?,
            },
            Ok(ReplAction::Show) => print_preview(editor, &mut output)?,
            Ok(ReplAction::Tree) => print_tree(editor, &mut output)?,
            Ok(ReplAction::Help) => writeln!(output, "{HELP}")?,
            Ok(ReplAction::Quit) => break,
            Ok(ReplAction::Nothing) => {}
            Err(err) => writeln!(output, "error: {err}")?,
        }
    }
    Ok(())
}

const HELP: &str = "\
add [parent] [kind]     append a field (\".\" = root; kind defaults to string)
rm <path>               remove the field at path
kind <path> <kind>      change a field's kind (string | number | nested)
name <path> <text>      set a field's name
default <path> <text>   set a scalar field's default
show                    reprint the current preview
tree                    list fields with paths, ids, and kinds
help                    print this summary
quit                    end the session";

fn print_preview(editor: &SchemaEditor, output: &mut impl Write) -> std::io::Result<()> {
    let preview = editor.preview();
    writeln!(output, "{}", preview.json)?;
    writeln!(
        output,
        "fields: {}  size: {} bytes",
        preview.field_count, preview.byte_len
    )
}

fn print_tree(editor: &SchemaEditor, output: &mut impl Write) -> std::io::Result<()> {
    if editor.tree().is_empty() {
        return writeln!(output, "(no fields)");
    }
    fn walk(fields: &[Field], base: &FieldPath, output: &mut impl Write) -> std::io::Result<()> {
        for (index, field) in fields.iter().enumerate() {
            let path = base.child(index);
            let name = if field.has_blank_name() {
                "(unnamed)"
            } else {
                field.name.as_str()
            };
            write!(output, "{path}  {}  {}  {name}", field.id, field.kind())?;
            match field.default_value() {
                Some(raw) if !raw.is_empty() => writeln!(output, " = {raw:?}")?,
                _ => writeln!(output)?,
            }
            if let Some(children) = field.children() {
                walk(children, &path, output)?;
            }
        }
        Ok(())
    }
    walk(editor.tree().fields(), &FieldPath::root(), output)
}
