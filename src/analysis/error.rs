//! Semantic error and warning types.

use crate::variable::Sort;

/// Problems that make a formula meaningless. Any of these blocks evaluation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SemanticError {
    #[error("Duplicate variable '{0}'")]
    DuplicateVariable(String),

    #[error("Variable '{0}' does not exist")]
    UndeclaredVariable(String),

    #[error("Cannot compare {left_sort} variable '{left}' to {right_sort} variable '{right}'")]
    SortMismatch {
        left: String,
        left_sort: Sort,
        right: String,
        right_sort: Sort,
    },

    #[error("Expected {expected} argument{} for '{relation}', but found {found}", plural(.expected))]
    ArityMismatch {
        relation: String,
        expected: usize,
        found: usize,
    },

    #[error("Argument for '{relation}' must be element variable, not set variable")]
    SetArgument { relation: String, argument: String },
}

/// Advisory findings. They never block evaluation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SemanticWarning {
    #[error("Variable '{0}' is never used")]
    UnusedVariable(String),

    #[error("'{0} = {0}' is always true")]
    AlwaysTrue(String),

    #[error("'{0} ≠ {0}' is always false")]
    AlwaysFalse(String),

    #[error("'E({0},{0})' is always false")]
    SelfLoop(String),
}

fn plural(count: &usize) -> &'static str {
    if *count == 1 {
        ""
    } else {
        "s"
    }
}
