use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::interpreter::prelude::{RuntimeError, RuntimeErrorType};
use crate::parser::prelude::Identifier;

use super::prelude::Value;

/// One lexical scope: a name-to-value store plus a link to the scope it
/// is nested in. Lookups walk outward along `enclosing` until the chain
/// ends.
///
/// A slot holding `None` is declared but not yet initialized (`var x;`),
/// which is different from a slot holding `Some(Value::Nil)`
/// (`var x = nil;`). Reading the former is a runtime error.
#[derive(Debug, Default, Clone)]
pub struct Environment {
    store: HashMap<String, Option<Value>>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enclosed(enclosing: Rc<RefCell<Environment>>) -> Self {
        Self {
            store: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Creates or shadows a binding in this scope, never in an enclosing
    /// one. Redefinition is allowed and silent.
    pub fn define(&mut self, name: impl Into<String>, value: Option<Value>) {
        self.store.insert(name.into(), value);
    }

    pub fn get(&self, name: &Identifier) -> Result<Value, RuntimeError> {
        match self.store.get(&name.value) {
            Some(Some(value)) => Ok(value.clone()),
            Some(None) => Err(RuntimeError {
                error: RuntimeErrorType::UninitializedVariable {
                    name: name.value.clone(),
                },
                span: name.location,
            }),
            None => match &self.enclosing {
                Some(enclosing) => enclosing.borrow().get(name),
                None => Err(RuntimeError {
                    error: RuntimeErrorType::UndefinedVariable {
                        name: name.value.clone(),
                    },
                    span: name.location,
                })
            }
        }
    }

    /// Overwrites an existing binding, walking outward to find it.
    /// Assignment never creates a binding; a name that is nowhere on the
    /// chain is an error.
    pub fn assign(&mut self, name: &Identifier, value: Value) -> Result<Value, RuntimeError> {
        match self.store.get_mut(&name.value) {
            Some(slot) => {
                *slot = Some(value.clone());
                Ok(value)
            },
            None => match &self.enclosing {
                Some(enclosing) => enclosing.borrow_mut().assign(name, value),
                None => Err(RuntimeError {
                    error: RuntimeErrorType::UndefinedVariable {
                        name: name.value.clone(),
                    },
                    span: name.location,
                })
            }
        }
    }
}
