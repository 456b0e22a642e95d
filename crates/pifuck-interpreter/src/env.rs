//! The global namespaces of a running program.
//!
//! There is exactly one variable table and one function table. Blocks,
//! function bodies and included files all read and write the same `Env`, so a
//! variable declared inside an `if` is still visible after it.

use std::collections::HashMap;
use std::rc::Rc;

use crate::value::VariableValue;
use pifuck_syntax::ast::Stmt;

#[derive(Clone, Default)]
pub struct Env {
    /// Variables by name
    variables: HashMap<String, VariableValue>,
    /// Function bodies by name, shared so a call can run while the body is
    /// redefined
    functions: HashMap<String, Rc<[Stmt]>>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&VariableValue> {
        self.variables.get(name)
    }

    /// Bind or overwrite a variable.
    pub fn define(&mut self, name: impl Into<String>, value: VariableValue) {
        self.variables.insert(name.into(), value);
    }

    pub(crate) fn remove(&mut self, name: &str) {
        self.variables.remove(name);
    }

    /// Store a function body, replacing any earlier definition.
    pub(crate) fn define_function(&mut self, name: &str, body: &[Stmt]) {
        self.functions.insert(name.to_string(), Rc::from(body.to_vec()));
    }

    pub(crate) fn function(&self, name: &str) -> Option<Rc<[Stmt]>> {
        self.functions.get(name).cloned()
    }

    /// Variables sorted by name.
    pub fn vars_snapshot(&self) -> Vec<(String, VariableValue)> {
        let mut vars: Vec<(String, VariableValue)> = self
            .variables
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        vars.sort_by(|a, b| a.0.cmp(&b.0));
        vars
    }

    pub fn function_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn clear(&mut self) {
        self.variables.clear();
        self.functions.clear();
    }
}
