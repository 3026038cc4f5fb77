use std::{cell::RefCell, rc::Rc};

use rustc_hash::FxHashMap;

use crate::object::Object;

/// A scope of variable bindings, optionally nested inside an outer scope.
///
/// Function calls get a fresh environment enclosed by the environment the function
/// was defined in, which is how closures keep their captured variables alive.
#[derive(Debug, Default)]
pub struct Environment {
    store: FxHashMap<String, Rc<Object>>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            store: FxHashMap::default(),
            outer: None,
        }
    }

    /// Create a new environment that is enclosed by a given outer environment
    pub fn new_enclosed(outer: Rc<RefCell<Environment>>) -> Self {
        Environment {
            store: FxHashMap::default(),
            outer: Some(outer),
        }
    }

    pub fn get(&self, name: &str) -> Option<Rc<Object>> {
        match self.store.get(name) {
            Some(obj) => Some(Rc::clone(obj)),
            // If not found in this environment, look for it in the outer environment
            None => match self.outer {
                Some(ref outer) => outer.borrow().get(name),
                None => None,
            },
        }
    }

    /// Bind `name` in this environment, shadowing any binding in outer environments.
    pub fn set(&mut self, name: String, value: Rc<Object>) {
        self.store.insert(name, value);
    }

    /// Number of environments in the chain, counting this one.
    pub fn depth(&self) -> usize {
        match &self.outer {
            Some(parent_env) => 1 + parent_env.borrow().depth(),
            None => 1,
        }
    }
}
