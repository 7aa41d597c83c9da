//! The stack of quantified variables visible at a point of the formula.

use crate::variable::{Sort, Variable};

/// Variables in scope, innermost last
#[derive(Clone, Debug, Default)]
pub struct Scope {
    vars: Vec<(String, Sort)>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, variable: &Variable) {
        self.vars.push((variable.name().to_string(), variable.sort()));
    }

    pub fn pop(&mut self) -> Option<(String, Sort)> {
        self.vars.pop()
    }

    pub fn lookup(&self, name: &str) -> Option<Sort> {
        self.vars
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, sort)| *sort)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn depth(&self) -> usize {
        self.vars.len()
    }
}
