use thiserror::Error;

use crate::{builtin::Builtin, object::ObjectType};
use monkey_parser::token::Token;

/// Every way evaluation can fail.
///
/// Errors travel as ordinary values ([`Object::Error`](crate::object::Object::Error)),
/// so the `Display` output is the message a user sees.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum RuntimeError {
    /// A prefix operator applied to an operand it does not support (e.g. `-true`)
    #[error("unknown operator: {operator}{right}")]
    UnknownPrefixOperator { operator: Token, right: ObjectType },
    /// An infix operator applied to operands of the same type that do not support it
    /// (e.g. `true + false`)
    #[error("unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        left: ObjectType,
        operator: Token,
        right: ObjectType,
    },
    /// An infix operator applied to operands of different types (e.g. `1 + true`)
    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: ObjectType,
        operator: Token,
        right: ObjectType,
    },
    /// Integer division with a zero divisor
    #[error("division by zero")]
    DivisionByZero,
    /// When referencing an identifier that is neither bound nor a builtin
    #[error("identifier not found: {0}")]
    IdentifierNotFound(String),
    /// When an object that is not a function is used with function call syntax
    #[error("not a function: {0}")]
    NotAFunction(ObjectType),
    /// When a call's argument count does not match what the callee accepts
    #[error("wrong number of arguments. got={got}, want={expected}")]
    BadArity { expected: usize, got: usize },
    /// When a builtin receives an argument of a type it cannot handle at all
    #[error("argument to `{builtin}` not supported, got {got}")]
    UnsupportedArgument { builtin: Builtin, got: ObjectType },
    /// When a builtin requires an argument of one specific type
    #[error("argument to `{builtin}` must be {expected}, got {got}")]
    InvalidArgumentType {
        builtin: Builtin,
        expected: ObjectType,
        got: ObjectType,
    },
    /// When a hash literal key or hash index is not an integer, boolean or string
    #[error("unusable as hash key: {0}")]
    UnusableAsHashKey(ObjectType),
    /// When attempting to index an object that does not support it (e.g. `1[0]`)
    #[error("index operator not supported: {0}")]
    IndexNotSupported(ObjectType),
    /// When `puts` could not write to its output
    #[error("could not write output: {0}")]
    Output(String),
}
