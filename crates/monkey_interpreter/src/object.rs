use std::{cell::RefCell, collections::BTreeMap, fmt::Display, hash::Hasher, rc::Rc};

use rustc_hash::FxHasher;

use crate::{builtin::Builtin, environment::Environment, error::RuntimeError};

use monkey_parser::ast::{BlockStatement, IdentifierLiteral};

#[derive(Debug, PartialEq)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(String),
    Null,
    Array(Array),
    Hash(Hash),
    Function(Function),
    Builtin(Builtin),
    /// Special object to encapsulate a return-ed value while it goes up scopes.
    /// This is never seen by the user.
    ReturnValue(Rc<Object>),
    Error(RuntimeError),
}

/// The runtime type of an [`Object`], as shown in error messages.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum ObjectType {
    Integer,
    Boolean,
    String,
    Null,
    Array,
    Hash,
    Function,
    Builtin,
    ReturnValue,
    Error,
}

impl Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ObjectType::Integer => "INTEGER",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::String => "STRING",
            ObjectType::Null => "NULL",
            ObjectType::Array => "ARRAY",
            ObjectType::Hash => "HASH",
            ObjectType::Function => "FUNCTION",
            ObjectType::Builtin => "BUILTIN",
            ObjectType::ReturnValue => "RETURN_VALUE",
            ObjectType::Error => "ERROR",
        };

        write!(f, "{}", name)
    }
}

impl Object {
    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::String(_) => ObjectType::String,
            Object::Null => ObjectType::Null,
            Object::Array(_) => ObjectType::Array,
            Object::Hash(_) => ObjectType::Hash,
            Object::Function(_) => ObjectType::Function,
            Object::Builtin(_) => ObjectType::Builtin,
            Object::ReturnValue(_) => ObjectType::ReturnValue,
            Object::Error(_) => ObjectType::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Whether this object stops evaluation of the enclosing expression: an error, or a
    /// return on its way to the function or program boundary.
    pub fn is_signal(&self) -> bool {
        matches!(self, Self::Error(_) | Self::ReturnValue(_))
    }

    /// Everything except `false` and `null` counts as true in a condition.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Boolean(false) | Object::Null)
    }

    /// The structural key of this object, if it can be used as a hash key.
    ///
    /// Only integers, booleans and strings are hashable. Equal values always give
    /// equal keys, whichever object they live in.
    pub fn hash_key(&self) -> Option<HashKey> {
        let value = match self {
            Object::Integer(value) => *value as u64,
            Object::Boolean(value) => *value as u64,
            Object::String(value) => {
                let mut hasher = FxHasher::default();
                hasher.write(value.as_bytes());
                hasher.finish()
            }
            _ => return None,
        };

        Some(HashKey {
            kind: self.object_type(),
            value,
        })
    }

    /// Converts the given value to a string (in the format of a code object).
    ///
    /// Use this anywhere a programmer expects to see the code-version of an object (e.g. in the REPL).
    /// # Examples
    /// ```rust
    /// use monkey_interpreter::object::Object;
    ///
    /// let obj = Object::String("hello world".to_string());
    ///
    /// assert_eq!(obj.to_code_string(), "\"hello world\"");
    /// ```
    pub fn to_code_string(&self) -> String {
        match self {
            Object::String(value) => format!("\"{}\"", value),
            value => value.to_string(),
        }
    }
}

impl Display for Object {
    /// Inspect form at runtime (what `puts` prints)
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::String(value) => write!(f, "{}", value),
            Object::Null => write!(f, "null"),
            Object::Array(array) => write!(f, "{}", array),
            Object::Hash(hash) => write!(f, "{}", hash),
            Object::Function(func) => write!(f, "{}", func),
            Object::Builtin(builtin) => write!(f, "builtin function {}", builtin),
            Object::ReturnValue(obj) => write!(f, "{}", obj),
            Object::Error(error) => write!(f, "ERROR: {}", error),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Array {
    pub elements: Vec<Rc<Object>>,
}

impl Display for Array {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let elements: Vec<String> = self.elements.iter().map(|e| e.to_string()).collect();
        write!(f, "[{}]", elements.join(", "))
    }
}

/// Lookup key for [`Hash`] entries: the key object's type plus a number derived from
/// its value.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct HashKey {
    pub kind: ObjectType,
    pub value: u64,
}

/// A hash entry, keeping the original key object around for printing.
#[derive(Debug, PartialEq)]
pub struct HashPair {
    pub key: Rc<Object>,
    pub value: Rc<Object>,
}

#[derive(Debug, PartialEq, Default)]
pub struct Hash {
    pub pairs: BTreeMap<HashKey, HashPair>,
}

impl Hash {
    pub fn get(&self, key: &HashKey) -> Option<Rc<Object>> {
        self.pairs.get(key).map(|pair| Rc::clone(&pair.value))
    }
}

impl Display for Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pairs: Vec<String> = self
            .pairs
            .values()
            .map(|pair| format!("{}: {}", pair.key, pair.value))
            .collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

pub struct Function {
    pub parameters: Vec<IdentifierLiteral>,
    /// Shared with the literal this function was created from
    pub body: Rc<BlockStatement>,
    /// The environment the literal was evaluated in
    pub env: Rc<RefCell<Environment>>,
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params: Vec<String> = self.parameters.iter().map(|p| p.to_string()).collect();

        write!(f, "fn({}) {{\n{}\n}}", params.join(", "), self.body)
    }
}

impl std::fmt::Debug for Function {
    // The environment is left out: it usually holds this very function
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish()
    }
}

impl PartialEq for Function {
    /// Two functions are the same only if they come from the same literal in the same scope
    fn eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.body, &other.body) && Rc::ptr_eq(&self.env, &other.env)
    }
}
