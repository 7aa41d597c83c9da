//! Two-sorted variables and the relations they can be applied to.

use std::fmt;

/// The sort of a variable: single vertices or sets of vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sort {
    Element,
    Set,
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sort::Element => write!(f, "element"),
            Sort::Set => write!(f, "set"),
        }
    }
}

/// A variable occurrence. The sort is fixed by the spelling of the name:
/// lowercase-initial names are element variables, all others set variables.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Variable {
    Element(String),
    Set(String),
}

impl Variable {
    /// Classify an identifier the way the lexer does
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.chars().next().is_some_and(char::is_lowercase) {
            Variable::Element(name)
        } else {
            Variable::Set(name)
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Variable::Element(name) | Variable::Set(name) => name,
        }
    }

    pub fn sort(&self) -> Sort {
        match self {
            Variable::Element(_) => Sort::Element,
            Variable::Set(_) => Sort::Set,
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A relation symbol in predicate position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    /// The built-in adjacency relation `E`
    Edge,
    /// A set variable read as a unary relation: `X(x)` means `x ∈ X`
    Set(String),
}

impl Relation {
    pub fn name(&self) -> &str {
        match self {
            Relation::Edge => "E",
            Relation::Set(name) => name,
        }
    }

    /// Number of arguments the relation expects
    pub fn arity(&self) -> usize {
        match self {
            Relation::Edge => 2,
            Relation::Set(_) => 1,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
