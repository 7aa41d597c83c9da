//! Abstract Syntax Tree for MSO formulas
//!
//! Every node is wrapped in [`Spanned`], which pairs it with a source
//! location. The annotation type is a parameter so that the model checker can
//! also run on trees built by hand without any locations (`Formula<()>`).

use std::fmt;
use std::ops::Range;

pub use crate::variable::{Relation, Sort, Variable};

/// A half-open interval `[start, end)` of character offsets, for error reporting
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} is after end {end}");
        Self { start, end }
    }

    /// The smallest span covering both `self` and `other`
    pub fn join(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The covered text. Offsets count characters, not bytes.
    pub fn slice(&self, source: &str) -> String {
        source.chars().skip(self.start).take(self.len()).collect()
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A node with source location
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spanned<T, S = Span> {
    pub node: T,
    pub span: S,
}

impl<T, S> Spanned<T, S> {
    pub fn new(node: T, span: S) -> Self {
        Self { node, span }
    }
}

impl<T> Spanned<T, ()> {
    /// A node without location
    pub fn bare(node: T) -> Self {
        Self { node, span: () }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quantifier {
    Exists,
    Forall,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryConnective {
    And,
    Or,
    Implies,
    Iff,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryConnective {
    Not,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Eq,
    Neq,
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantifier::Exists => write!(f, "∃"),
            Quantifier::Forall => write!(f, "∀"),
        }
    }
}

impl fmt::Display for BinaryConnective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryConnective::And => write!(f, "∧"),
            BinaryConnective::Or => write!(f, "∨"),
            BinaryConnective::Implies => write!(f, "→"),
            BinaryConnective::Iff => write!(f, "↔"),
        }
    }
}

impl fmt::Display for UnaryConnective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryConnective::Not => write!(f, "¬"),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOperator::Eq => write!(f, "="),
            BinaryOperator::Neq => write!(f, "≠"),
        }
    }
}

/// Formulas of monadic second-order logic over graphs
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Formula<S = Span> {
    /// `∃x φ`, `∀X φ`
    Quantified {
        quantifier: Spanned<Quantifier, S>,
        variable: Spanned<Variable, S>,
        body: Box<Spanned<Formula<S>, S>>,
    },

    /// `φ ∧ ψ`, `φ ∨ ψ`, `φ → ψ`, `φ ↔ ψ`
    Binary {
        connective: Spanned<BinaryConnective, S>,
        left: Box<Spanned<Formula<S>, S>>,
        right: Box<Spanned<Formula<S>, S>>,
    },

    /// `¬φ`
    Unary {
        connective: Spanned<UnaryConnective, S>,
        inner: Box<Spanned<Formula<S>, S>>,
    },

    /// `x = y`, `X ≠ Y`
    BinaryPredicate {
        operator: Spanned<BinaryOperator, S>,
        left: Spanned<Variable, S>,
        right: Spanned<Variable, S>,
    },

    /// `E(x, y)`, `X(x)`
    RelationPredicate {
        relation: Spanned<Relation, S>,
        arguments: Vec<Spanned<Variable, S>>,
    },
}

impl<S> Formula<S> {
    /// Drop all source locations, keeping the tree shape
    pub fn strip_spans(&self) -> Formula<()> {
        fn bare<T: Clone, S>(spanned: &Spanned<T, S>) -> Spanned<T, ()> {
            Spanned::bare(spanned.node.clone())
        }
        fn boxed<S>(spanned: &Spanned<Formula<S>, S>) -> Box<Spanned<Formula<()>, ()>> {
            Box::new(Spanned::bare(spanned.node.strip_spans()))
        }

        match self {
            Formula::Quantified {
                quantifier,
                variable,
                body,
            } => Formula::Quantified {
                quantifier: bare(quantifier),
                variable: bare(variable),
                body: boxed(body),
            },
            Formula::Binary {
                connective,
                left,
                right,
            } => Formula::Binary {
                connective: bare(connective),
                left: boxed(left),
                right: boxed(right),
            },
            Formula::Unary { connective, inner } => Formula::Unary {
                connective: bare(connective),
                inner: boxed(inner),
            },
            Formula::BinaryPredicate {
                operator,
                left,
                right,
            } => Formula::BinaryPredicate {
                operator: bare(operator),
                left: bare(left),
                right: bare(right),
            },
            Formula::RelationPredicate {
                relation,
                arguments,
            } => Formula::RelationPredicate {
                relation: bare(relation),
                arguments: arguments.iter().map(bare).collect(),
            },
        }
    }

    /// Number of quantifier nodes, element and set alike
    pub fn quantifier_count(&self) -> usize {
        match self {
            Formula::Quantified { body, .. } => 1 + body.node.quantifier_count(),
            Formula::Binary { left, right, .. } => {
                left.node.quantifier_count() + right.node.quantifier_count()
            }
            Formula::Unary { inner, .. } => inner.node.quantifier_count(),
            Formula::BinaryPredicate { .. } | Formula::RelationPredicate { .. } => 0,
        }
    }
}

// ============================================================================
// Span-free construction
// ============================================================================

impl Formula<()> {
    pub fn quantified(quantifier: Quantifier, variable: Variable, body: Formula<()>) -> Self {
        Formula::Quantified {
            quantifier: Spanned::bare(quantifier),
            variable: Spanned::bare(variable),
            body: Box::new(Spanned::bare(body)),
        }
    }

    pub fn exists(variable: Variable, body: Formula<()>) -> Self {
        Self::quantified(Quantifier::Exists, variable, body)
    }

    pub fn forall(variable: Variable, body: Formula<()>) -> Self {
        Self::quantified(Quantifier::Forall, variable, body)
    }

    pub fn binary(connective: BinaryConnective, left: Formula<()>, right: Formula<()>) -> Self {
        Formula::Binary {
            connective: Spanned::bare(connective),
            left: Box::new(Spanned::bare(left)),
            right: Box::new(Spanned::bare(right)),
        }
    }

    pub fn and(left: Formula<()>, right: Formula<()>) -> Self {
        Self::binary(BinaryConnective::And, left, right)
    }

    pub fn or(left: Formula<()>, right: Formula<()>) -> Self {
        Self::binary(BinaryConnective::Or, left, right)
    }

    pub fn implies(left: Formula<()>, right: Formula<()>) -> Self {
        Self::binary(BinaryConnective::Implies, left, right)
    }

    pub fn iff(left: Formula<()>, right: Formula<()>) -> Self {
        Self::binary(BinaryConnective::Iff, left, right)
    }

    pub fn negate(inner: Formula<()>) -> Self {
        Formula::Unary {
            connective: Spanned::bare(UnaryConnective::Not),
            inner: Box::new(Spanned::bare(inner)),
        }
    }

    pub fn compare(operator: BinaryOperator, left: Variable, right: Variable) -> Self {
        Formula::BinaryPredicate {
            operator: Spanned::bare(operator),
            left: Spanned::bare(left),
            right: Spanned::bare(right),
        }
    }

    pub fn equal(left: Variable, right: Variable) -> Self {
        Self::compare(BinaryOperator::Eq, left, right)
    }

    pub fn not_equal(left: Variable, right: Variable) -> Self {
        Self::compare(BinaryOperator::Neq, left, right)
    }

    pub fn relation(relation: Relation, arguments: Vec<Variable>) -> Self {
        Formula::RelationPredicate {
            relation: Spanned::bare(relation),
            arguments: arguments.into_iter().map(Spanned::bare).collect(),
        }
    }

    /// `E(left, right)`
    pub fn edge(left: Variable, right: Variable) -> Self {
        Self::relation(Relation::Edge, vec![left, right])
    }

    /// `set(element)`
    pub fn member(set: &str, element: Variable) -> Self {
        Self::relation(Relation::Set(set.to_string()), vec![element])
    }
}
