use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use failure::Error;

use crate::builtins::PRIMITIVES;
use crate::errors::RunError;
use crate::values::{Primitive, Value};

/// one frame of the environment chain: a mapping from symbol to value plus
/// an optional outer frame. The chain is passed around in an
/// `Rc<RefCell<>>`, which allows frames to be shared between closures with
/// interior mutability.
#[derive(Debug)]
pub struct Env {
    pub vars: HashMap<String, Value>,
    pub outer: Option<EnvRef>,
}

/// an interior-mutable, reference-counted smart pointer wrapper around an
/// `Env`
pub type EnvRef = Rc<RefCell<Env>>;

impl Env {
    pub fn new(outer: Option<EnvRef>) -> Env {
        Env {
            vars: HashMap::new(),
            outer,
        }
    }

    /// create a fresh root frame seeded with its own copy of the
    /// primitive library
    pub fn root() -> EnvRef {
        let mut root = Env::new(None);
        for &(name, func) in PRIMITIVES {
            root.bind(name, Value::Primitive(Primitive { name, func }));
        }
        Rc::new(RefCell::new(root))
    }

    /// insert or overwrite a binding in this frame; used for parameter and
    /// `let` binding, which carry no redefinition check
    pub fn bind(&mut self, name: &str, value: Value) {
        self.vars.insert(name.to_owned(), value);
    }

    /// resolve a symbol in this frame, delegating to the outer frame when
    /// absent here
    pub fn lookup(&self, name: &str) -> Result<Value, Error> {
        match self.vars.get(name) {
            Some(value) => Ok(value.clone()),
            None => match &self.outer {
                Some(outer) => outer.borrow().lookup(name),
                None => Err(RunError::UnboundVar(name.to_owned()).into()),
            },
        }
    }

    /// one-shot definition: checked only in this exact frame, never walks
    /// outward; fails if the symbol is already bound here
    pub fn define(&mut self, name: &str, value: Value) -> Result<(), Error> {
        if self.vars.contains_key(name) {
            Err(RunError::Redefinition(name.to_owned()).into())
        } else {
            self.vars.insert(name.to_owned(), value);
            Ok(())
        }
    }

    /// mutate the nearest binding of the symbol, walking outward; never
    /// creates a new binding
    pub fn update(&mut self, name: &str, value: Value) -> Result<(), Error> {
        if self.vars.contains_key(name) {
            self.vars.insert(name.to_owned(), value);
            Ok(())
        } else {
            match &self.outer {
                Some(outer) => outer.borrow_mut().update(name, value),
                None => Err(RunError::UpdateUnbound(name.to_owned()).into()),
            }
        }
    }
}

// {{{ tests
#[cfg(test)]
mod tests {
    use super::*;

    fn frame(outer: Option<EnvRef>) -> EnvRef {
        Rc::new(RefCell::new(Env::new(outer)))
    }

    #[test]
    fn lookup_walks_outward() {
        let outer = frame(None);
        outer.borrow_mut().bind("x", Value::Number(1));
        let inner = frame(Some(outer));

        assert_eq!(inner.borrow().lookup("x").unwrap(), Value::Number(1));
        assert!(inner.borrow().lookup("y").is_err());
    }

    #[test]
    fn inner_binding_shadows_outer() {
        let outer = frame(None);
        outer.borrow_mut().bind("x", Value::Number(1));
        let inner = frame(Some(outer));
        inner.borrow_mut().bind("x", Value::Number(2));

        assert_eq!(inner.borrow().lookup("x").unwrap(), Value::Number(2));
    }

    #[test]
    fn define_checks_only_the_current_frame() {
        let outer = frame(None);
        outer.borrow_mut().define("x", Value::Number(1)).unwrap();
        let inner = frame(Some(outer));

        // same symbol in an inner frame is fine
        inner.borrow_mut().define("x", Value::Number(2)).unwrap();
        // but not twice in the same frame
        assert!(inner.borrow_mut().define("x", Value::Number(3)).is_err());
    }

    #[test]
    fn update_mutates_the_nearest_binding() {
        let outer = frame(None);
        outer.borrow_mut().bind("x", Value::Number(1));
        let inner = frame(Some(outer.clone()));

        inner.borrow_mut().update("x", Value::Number(5)).unwrap();
        assert_eq!(outer.borrow().lookup("x").unwrap(), Value::Number(5));
    }

    #[test]
    fn update_never_creates_a_binding() {
        let env = frame(None);
        assert!(env.borrow_mut().update("x", Value::Number(1)).is_err());
        assert!(env.borrow().lookup("x").is_err());
    }

    #[test]
    fn root_is_seeded_with_primitives() {
        let root = Env::root();
        match root.borrow().lookup("+").unwrap() {
            Value::Primitive(p) => assert_eq!(p.name, "+"),
            other => panic!("expected a primitive, got {}", other),
        };
    }

    #[test]
    fn roots_do_not_alias() {
        let a = Env::root();
        let b = Env::root();
        a.borrow_mut().bind("x", Value::Number(1));
        assert!(b.borrow().lookup("x").is_err());
    }
}
// }}}
