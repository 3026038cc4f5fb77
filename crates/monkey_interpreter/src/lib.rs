//! Evaluation of Monkey programs parsed by [`monkey_parser`].

use std::{cell::RefCell, rc::Rc};

use monkey_parser::{lexer::Lexer, parser::ParseError, parser::Parser};

pub mod builtin;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod object;

pub use environment::Environment;
pub use evaluator::Evaluator;

use object::Object;

/// Parse and evaluate `source` in `env`, printing `puts` output to stdout.
///
/// Parser diagnostics are returned as `Err` and nothing is evaluated. Runtime errors
/// are not an `Err`: they come back as an [`Object::Error`] result.
pub fn interpret(
    source: &str,
    env: Rc<RefCell<Environment>>,
) -> Result<Rc<Object>, Vec<ParseError>> {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program()?;

    Ok(Evaluator::new_with_env(env).eval(&program))
}
