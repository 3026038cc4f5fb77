use std::{fmt::Display, io::Write, rc::Rc};

use tracing::debug;

use crate::{
    error::RuntimeError,
    object::{Array, Object, ObjectType},
};

/// Native functions, looked up by name whenever an identifier is not bound.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Builtin {
    Len,
    First,
    Last,
    Rest,
    Push,
    Puts,
}

impl Builtin {
    pub fn lookup(name: &str) -> Option<Builtin> {
        match name {
            "len" => Some(Builtin::Len),
            "first" => Some(Builtin::First),
            "last" => Some(Builtin::Last),
            "rest" => Some(Builtin::Rest),
            "push" => Some(Builtin::Push),
            "puts" => Some(Builtin::Puts),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Len => "len",
            Builtin::First => "first",
            Builtin::Last => "last",
            Builtin::Rest => "rest",
            Builtin::Push => "push",
            Builtin::Puts => "puts",
        }
    }

    /// Call the builtin with already evaluated arguments.
    ///
    /// `out` is where `puts` writes; no other builtin touches it.
    pub fn apply(
        &self,
        args: &[Rc<Object>],
        out: &mut dyn Write,
    ) -> Result<Rc<Object>, RuntimeError> {
        debug!(builtin = self.name(), args = args.len(), "applying builtin");

        match self {
            Builtin::Len => {
                let arg = exactly_one(args)?;
                match arg.as_ref() {
                    Object::String(str) => {
                        Ok(Rc::new(Object::Integer(str.chars().count() as i64)))
                    }
                    Object::Array(arr) => Ok(Rc::new(Object::Integer(arr.elements.len() as i64))),
                    other => Err(RuntimeError::UnsupportedArgument {
                        builtin: *self,
                        got: other.object_type(),
                    }),
                }
            }
            Builtin::First => {
                let arr = self.array_argument(exactly_one(args)?)?;
                Ok(arr.elements.first().map_or_else(null, Rc::clone))
            }
            Builtin::Last => {
                let arr = self.array_argument(exactly_one(args)?)?;
                Ok(arr.elements.last().map_or_else(null, Rc::clone))
            }
            Builtin::Rest => {
                let arr = self.array_argument(exactly_one(args)?)?;
                match arr.elements.split_first() {
                    Some((_, rest)) => Ok(Rc::new(Object::Array(Array {
                        elements: rest.to_vec(),
                    }))),
                    None => Ok(null()),
                }
            }
            Builtin::Push => {
                check_arity(args, 2)?;
                let arr = self.array_argument(&args[0])?;

                // The original array is left untouched
                let mut elements = arr.elements.clone();
                elements.push(Rc::clone(&args[1]));

                Ok(Rc::new(Object::Array(Array { elements })))
            }
            Builtin::Puts => {
                for arg in args {
                    writeln!(out, "{}", arg).map_err(|e| RuntimeError::Output(e.to_string()))?;
                }

                Ok(null())
            }
        }
    }

    fn array_argument<'o>(&self, arg: &'o Object) -> Result<&'o Array, RuntimeError> {
        match arg {
            Object::Array(arr) => Ok(arr),
            other => Err(RuntimeError::InvalidArgumentType {
                builtin: *self,
                expected: ObjectType::Array,
                got: other.object_type(),
            }),
        }
    }
}

impl Display for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn null() -> Rc<Object> {
    Rc::new(Object::Null)
}

fn check_arity(args: &[Rc<Object>], expected: usize) -> Result<(), RuntimeError> {
    if args.len() != expected {
        return Err(RuntimeError::BadArity {
            expected,
            got: args.len(),
        });
    }

    Ok(())
}

fn exactly_one(args: &[Rc<Object>]) -> Result<&Rc<Object>, RuntimeError> {
    match args {
        [arg] => Ok(arg),
        _ => Err(RuntimeError::BadArity {
            expected: 1,
            got: args.len(),
        }),
    }
}
