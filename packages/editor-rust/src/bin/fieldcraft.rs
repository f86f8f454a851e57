//! Interactive schema builder over stdin/stdout.

use std::io;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fieldcraft_editor::{repl, SchemaEditor, TracingObserver};

#[derive(Debug, Parser)]
#[command(name = "fieldcraft", about = "Build a nested JSON schema with a live preview")]
struct Args {
    /// Tracing filter directive (overridden by RUST_LOG).
    #[arg(long, env = "FIELDCRAFT_LOG", default_value = "info")]
    log: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log)),
        )
        .with_writer(io::stderr)
        .init();

    let mut editor = SchemaEditor::new();
    editor.add_observer(Arc::new(TracingObserver));

    let stdin = io::stdin();
    let stdout = io::stdout();
    repl::run(&mut editor, stdin.lock(), stdout.lock())
}
