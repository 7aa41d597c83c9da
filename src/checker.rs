//! Brute-force model checking
//!
//! Quantifiers are decided by trying every witness: each vertex for an element
//! variable, each of the 2^n vertex subsets for a set variable. The cost is
//! exponential in the number of set quantifiers, which is fine for the small
//! graphs this is meant for.

use tracing::{instrument, trace};

use crate::assignment::Assignment;
use crate::ast::*;
use crate::graph::{Graph, VertexId};

/// An evaluation fault. Formulas that pass semantic analysis never produce
/// one.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("Unassigned {sort} variable '{name}'")]
    UnassignedVariable { name: String, sort: Sort },

    #[error("'=' and '≠' are not supported between {left} and {right} variables")]
    SortMismatch { left: Sort, right: Sort },

    #[error("'{relation}' takes {expected} arguments, but was applied to {found}")]
    ArityMismatch {
        relation: String,
        expected: usize,
        found: usize,
    },

    #[error("Argument '{argument}' for '{relation}' is not an element variable")]
    NotAnElement { relation: String, argument: String },
}

/// Evaluate a closed formula on `graph`
pub fn evaluate<S>(graph: &Graph, formula: &Formula<S>) -> Result<bool, EvalError> {
    ModelChecker::new(graph).check(formula)
}

/// Evaluates formulas against one graph
#[derive(Clone, Copy, Debug)]
pub struct ModelChecker<'g> {
    graph: &'g Graph,
}

impl<'g> ModelChecker<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Evaluate a closed formula
    #[instrument(skip_all, fields(vertices = self.graph.vertex_count(), edges = self.graph.edge_count()))]
    pub fn check<S>(&self, formula: &Formula<S>) -> Result<bool, EvalError> {
        let mut assignment = Assignment::new();
        let result = self.holds(formula, &mut assignment)?;
        trace!(result, "model check finished");
        Ok(result)
    }

    /// Evaluate `formula` with its free variables taken from `assignment`.
    /// The assignment is unchanged afterwards.
    pub fn check_with<S>(
        &self,
        formula: &Formula<S>,
        assignment: &mut Assignment,
    ) -> Result<bool, EvalError> {
        self.holds(formula, assignment)
    }

    fn holds<S>(&self, formula: &Formula<S>, assignment: &mut Assignment) -> Result<bool, EvalError> {
        match formula {
            Formula::Quantified {
                quantifier,
                variable,
                body,
            } => self.quantified(quantifier.node, &variable.node, &body.node, assignment),

            Formula::Binary {
                connective,
                left,
                right,
            } => {
                let left = self.holds(&left.node, assignment)?;
                match connective.node {
                    BinaryConnective::And if !left => Ok(false),
                    BinaryConnective::Or if left => Ok(true),
                    BinaryConnective::Implies if !left => Ok(true),
                    BinaryConnective::And | BinaryConnective::Or | BinaryConnective::Implies => {
                        self.holds(&right.node, assignment)
                    }
                    BinaryConnective::Iff => Ok(left == self.holds(&right.node, assignment)?),
                }
            }

            Formula::Unary { connective, inner } => match connective.node {
                UnaryConnective::Not => Ok(!self.holds(&inner.node, assignment)?),
            },

            Formula::BinaryPredicate {
                operator,
                left,
                right,
            } => {
                let equal = match (&left.node, &right.node) {
                    (Variable::Element(l), Variable::Element(r)) => {
                        assignment.element(l)? == assignment.element(r)?
                    }
                    (Variable::Set(l), Variable::Set(r)) => assignment.set(l)? == assignment.set(r)?,
                    (l, r) => {
                        return Err(EvalError::SortMismatch {
                            left: l.sort(),
                            right: r.sort(),
                        })
                    }
                };
                Ok(match operator.node {
                    BinaryOperator::Eq => equal,
                    BinaryOperator::Neq => !equal,
                })
            }

            Formula::RelationPredicate {
                relation,
                arguments,
            } => {
                let relation = &relation.node;
                let vertices = self.arguments(relation, arguments, assignment)?;
                match (relation, vertices.as_slice()) {
                    (Relation::Edge, &[x, y]) => Ok(self.graph.adjacent(x, y)),
                    (Relation::Set(name), &[x]) => Ok(assignment.set(name)?.contains(x)),
                    _ => Err(EvalError::ArityMismatch {
                        relation: relation.name().to_string(),
                        expected: relation.arity(),
                        found: vertices.len(),
                    }),
                }
            }
        }
    }

    fn quantified<S>(
        &self,
        quantifier: Quantifier,
        variable: &Variable,
        body: &Formula<S>,
        assignment: &mut Assignment,
    ) -> Result<bool, EvalError> {
        // ∃ stops at the first witness, ∀ at the first counterexample
        let decisive = quantifier == Quantifier::Exists;

        match variable {
            Variable::Element(name) => {
                trace!(%quantifier, name = name.as_str(), "searching vertices");
                for vertex in 0..self.graph.vertex_count() {
                    let value = {
                        let mut bound = assignment.bind_element(name, vertex);
                        self.holds(body, &mut bound)?
                    };
                    if value == decisive {
                        trace!(name = name.as_str(), vertex, value, "decided");
                        return Ok(decisive);
                    }
                }
            }
            Variable::Set(name) => {
                trace!(%quantifier, name = name.as_str(), "searching vertex subsets");
                for set in self.graph.all_vertex_subsets() {
                    let value = {
                        let mut bound = assignment.bind_set(name, set);
                        self.holds(body, &mut bound)?
                    };
                    if value == decisive {
                        trace!(name = name.as_str(), value, "decided");
                        return Ok(decisive);
                    }
                }
            }
        }
        Ok(!decisive)
    }

    /// Look up relation arguments, all of which must be element variables
    fn arguments<S>(
        &self,
        relation: &Relation,
        arguments: &[Spanned<Variable, S>],
        assignment: &Assignment,
    ) -> Result<Vec<VertexId>, EvalError> {
        arguments
            .iter()
            .map(|argument| match &argument.node {
                Variable::Element(name) => assignment.element(name),
                Variable::Set(name) => Err(EvalError::NotAnElement {
                    relation: relation.name().to_string(),
                    argument: name.clone(),
                }),
            })
            .collect()
    }
}
