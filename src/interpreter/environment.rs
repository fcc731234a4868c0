use crate::value::Value;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

/// A single scope: its own bindings plus a link to the enclosing scope.
///
/// One environment is created for the global scope at program start and one
/// per closure invocation, parented to the closure's *captured* environment
/// rather than the caller's. Environments stay alive for as long as any
/// closure or active evaluation can still reach them through an `Rc`.
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<IndexMap<Rc<str>, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    pub fn global() -> Rc<Self> {
        Rc::new(Self {
            bindings: RefCell::new(IndexMap::new()),
            parent: None,
        })
    }

    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Self {
            bindings: RefCell::new(IndexMap::new()),
            parent: Some(parent),
        })
    }

    /// Binds `name` in this environment. Returns `false` if the name is
    /// already bound *here*; bindings in ancestor scopes are irrelevant to
    /// the check and are shadowed, not replaced.
    pub fn define(&self, name: Rc<str>, value: Value) -> bool {
        let mut bindings = self.bindings.borrow_mut();
        if bindings.contains_key(&name) {
            return false;
        }
        bindings.insert(name, value);
        true
    }

    /// Resolves `name`, searching this scope first and then each parent in
    /// turn.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        match &self.parent {
            Some(parent) => parent.lookup(name),
            None => None,
        }
    }
}
