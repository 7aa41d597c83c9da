//! msocheck: monadic second-order logic over finite graphs
//!
//! Formulas quantify over vertices (`x`, `y`) and over vertex sets (`X`, `Y`),
//! with `E(x, y)` for adjacency and `X(x)` for membership. A formula goes
//! through lexing, parsing and semantic analysis, and a formula without
//! semantic errors is then decided on a concrete graph by brute force.

pub mod analysis;
pub mod assignment;
pub mod ast;
pub mod checker;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod graph;
pub mod lexer;
pub mod parser;
pub mod pretty;
pub mod variable;

pub use analysis::{analyze, Analysis};
pub use assignment::Assignment;
pub use ast::*;
pub use checker::{evaluate, EvalError, ModelChecker};
pub use diagnostic::{Diagnostic, Severity};
pub use error::Error;
pub use graph::{Graph, Vertex};
pub use lexer::lexer;
pub use parser::parser;
pub use pretty::{to_source, Notation};

use tracing::debug;

/// Parse a formula, reporting the first lexical or syntax error
pub fn parse(source: &str) -> Result<Spanned<Formula>, Error> {
    let tokens = lexer::TokenStream::new(source)?;
    let formula = parser::parse_tokens(tokens)?;
    debug!(quantifiers = formula.node.quantifier_count(), "parsed formula");
    Ok(formula)
}

/// The result of running a formula through the whole pipeline
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub formula: Spanned<Formula>,
    pub analysis: Analysis,
    /// `None` when semantic errors kept the formula from being evaluated
    pub result: Option<bool>,
}

impl Outcome {
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.analysis.diagnostics()
    }
}

/// Parse, analyze, and if the formula is valid, evaluate it on `graph`
pub fn run(source: &str, graph: &Graph) -> Result<Outcome, Error> {
    let formula = parse(source)?;
    let analysis = analyze(&formula);
    let result = if analysis.is_valid() {
        Some(evaluate(graph, &formula.node)?)
    } else {
        debug!(errors = analysis.errors.len(), "skipping evaluation");
        None
    };
    Ok(Outcome {
        formula,
        analysis,
        result,
    })
}
