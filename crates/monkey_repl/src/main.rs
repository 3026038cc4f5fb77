//! Monkey interpreter CLI

use std::path::PathBuf;

use clap::Parser;

mod repl;

#[derive(Parser)]
#[command(name = "monkey", version, about = "Interpreter for the Monkey programming language")]
struct Cli {
    /// Source file to run; starts the REPL when omitted
    file: Option<PathBuf>,

    /// Prompt shown before each REPL line
    #[arg(long, default_value = ">> ")]
    prompt: String,
}

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.file {
        Some(file) => repl::run_file(&file),
        None => repl::repl(&cli.prompt),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG`. Nothing is installed when it is unset.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }
}
