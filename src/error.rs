//! Pipeline errors

use crate::checker::EvalError;
use crate::diagnostic::Diagnostic;
use crate::lexer::LexError;
use crate::parser::ParseError;

/// Any failure of [`parse`](crate::parse) or [`run`](crate::run).
/// Semantic problems are not errors here; they are reported in the analysis.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("lexical error: {0}")]
    Lex(#[from] LexError),

    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),

    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}

impl Error {
    /// The error as a source diagnostic, if it has a location
    pub fn diagnostic(&self) -> Option<Diagnostic> {
        match self {
            Error::Lex(error) => Some(error.clone().into()),
            Error::Parse(error) => Some(error.clone().into()),
            Error::Eval(_) => None,
        }
    }
}
