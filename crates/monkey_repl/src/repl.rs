use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use rustyline::error::ReadlineError;
use rustyline::Editor;
use thiserror::Error;
use tracing::debug;

use monkey_interpreter::{interpret, object::Object, Environment};
use monkey_parser::parser::ParseError;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Error)]
pub enum ReplError {
    #[error("could not read input: {0}")]
    Readline(#[from] ReadlineError),
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("{0} parser error(s)")]
    Parse(usize),
    #[error("program stopped with an error")]
    Runtime,
}

pub fn repl(prompt: &str) -> Result<(), ReplError> {
    println!("Monkey v{}", VERSION);

    // One environment for the whole session so bindings survive between lines
    let env = Rc::new(RefCell::new(Environment::new()));

    // `()` can be used when no completer is required
    let mut rl = Editor::<()>::new();
    loop {
        let readline = rl.readline(prompt);
        match readline {
            Ok(line) => {
                if line.trim() == "exit" || line.trim() == "quit" {
                    break;
                }
                // Skip empty lines
                else if line.trim().is_empty() {
                    continue;
                }

                rl.add_history_entry(line.as_str());

                match interpret(&line, Rc::clone(&env)) {
                    Ok(result) => println!("{}", result.to_code_string()),
                    Err(errors) => print_parser_errors(&errors),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// Evaluate a whole file once and print its result.
pub fn run_file(path: &Path) -> Result<(), ReplError> {
    let source = std::fs::read_to_string(path).map_err(|source| ReplError::Io {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), bytes = source.len(), "running file");

    let env = Rc::new(RefCell::new(Environment::new()));
    match interpret(&source, env) {
        Ok(result) => {
            println!("{}", result.to_code_string());

            match result.as_ref() {
                Object::Error(_) => Err(ReplError::Runtime),
                _ => Ok(()),
            }
        }
        Err(errors) => {
            print_parser_errors(&errors);
            Err(ReplError::Parse(errors.len()))
        }
    }
}

fn print_parser_errors(errors: &[ParseError]) {
    println!("parser errors:");
    for error in errors {
        println!("\t{}", error);
    }
}
