//! Variable assignments for the model checker
//!
//! Bindings follow strict stack discipline: every bind returns a [`Binding`]
//! guard, and dropping the guard restores whatever the name meant before.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use crate::checker::EvalError;
use crate::graph::{VertexId, VertexSet};
use crate::variable::Sort;

/// Values of the element and set variables currently in scope
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assignment {
    elements: HashMap<String, VertexId>,
    sets: HashMap<String, VertexSet>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to a vertex until the returned guard is dropped
    pub fn bind_element(&mut self, name: &str, vertex: VertexId) -> Binding<'_> {
        let previous = Previous::Element(self.elements.insert(name.to_string(), vertex));
        Binding {
            assignment: self,
            name: name.to_string(),
            previous: Some(previous),
        }
    }

    /// Bind `name` to a vertex set until the returned guard is dropped
    pub fn bind_set(&mut self, name: &str, set: VertexSet) -> Binding<'_> {
        let previous = Previous::Set(self.sets.insert(name.to_string(), set));
        Binding {
            assignment: self,
            name: name.to_string(),
            previous: Some(previous),
        }
    }

    pub fn element(&self, name: &str) -> Result<VertexId, EvalError> {
        self.elements
            .get(name)
            .copied()
            .ok_or_else(|| EvalError::UnassignedVariable {
                name: name.to_string(),
                sort: Sort::Element,
            })
    }

    pub fn set(&self, name: &str) -> Result<&VertexSet, EvalError> {
        self.sets.get(name).ok_or_else(|| EvalError::UnassignedVariable {
            name: name.to_string(),
            sort: Sort::Set,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.sets.is_empty()
    }
}

#[derive(Debug)]
enum Previous {
    Element(Option<VertexId>),
    Set(Option<VertexSet>),
}

/// A live binding. Derefs to the assignment so evaluation can continue
/// through the guard.
#[derive(Debug)]
pub struct Binding<'a> {
    assignment: &'a mut Assignment,
    name: String,
    previous: Option<Previous>,
}

impl Deref for Binding<'_> {
    type Target = Assignment;

    fn deref(&self) -> &Assignment {
        &*self.assignment
    }
}

impl DerefMut for Binding<'_> {
    fn deref_mut(&mut self) -> &mut Assignment {
        &mut *self.assignment
    }
}

impl Drop for Binding<'_> {
    fn drop(&mut self) {
        let name = std::mem::take(&mut self.name);
        match self.previous.take() {
            Some(Previous::Element(Some(vertex))) => {
                self.assignment.elements.insert(name, vertex);
            }
            Some(Previous::Element(None)) => {
                self.assignment.elements.remove(&name);
            }
            Some(Previous::Set(Some(set))) => {
                self.assignment.sets.insert(name, set);
            }
            Some(Previous::Set(None)) => {
                self.assignment.sets.remove(&name);
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_a_binding_unassigns() {
        let mut assignment = Assignment::new();
        {
            let bound = assignment.bind_element("x", 3);
            assert_eq!(bound.element("x"), Ok(3));
        }
        assert!(assignment.element("x").is_err());
        assert!(assignment.is_empty());
    }

    #[test]
    fn inner_binding_restores_outer_value() {
        let mut assignment = Assignment::new();
        let mut outer = assignment.bind_element("x", 1);
        {
            let inner = outer.bind_element("x", 2);
            assert_eq!(inner.element("x"), Ok(2));
        }
        assert_eq!(outer.element("x"), Ok(1));
    }

    #[test]
    fn element_and_set_namespaces_are_separate() {
        let mut assignment = Assignment::new();
        let set: VertexSet = [0, 2].into_iter().collect();
        let mut bound = assignment.bind_set("X", set.clone());
        let bound = bound.bind_element("x", 1);
        assert_eq!(bound.set("X"), Ok(&set));
        assert!(bound.element("X").is_err());
    }
}
