//! Semantic analysis: scoping, sort and arity checks over a parsed formula
//!
//! The analyzer walks the whole tree once. Errors mean the formula has no
//! meaning and must not be evaluated; warnings flag parts that are legal but
//! almost certainly not what the author meant.

mod error;
mod scope;

pub use error::{SemanticError, SemanticWarning};
pub use scope::Scope;

use tracing::debug;

use crate::ast::*;
use crate::diagnostic::{Diagnostic, Severity};

/// Result of analyzing one formula
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Analysis {
    pub errors: Vec<Spanned<SemanticError>>,
    pub warnings: Vec<Spanned<SemanticWarning>>,
    valid: bool,
}

impl Analysis {
    /// Whether the formula may be evaluated
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Errors first, then warnings, each in traversal order
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let errors = self
            .errors
            .iter()
            .map(|e| Diagnostic::new(Severity::Error, e.node.to_string(), e.span));
        let warnings = self
            .warnings
            .iter()
            .map(|w| Diagnostic::new(Severity::Warning, w.node.to_string(), w.span));
        errors.chain(warnings).collect()
    }
}

/// Analyze a parsed formula
pub fn analyze(formula: &Spanned<Formula>) -> Analysis {
    let mut analyzer = SemanticAnalyzer::new();
    let valid = analyzer.analyze(formula);
    debug!(
        valid,
        errors = analyzer.errors.len(),
        warnings = analyzer.warnings.len(),
        "analyzed formula"
    );
    Analysis {
        errors: analyzer.errors,
        warnings: analyzer.warnings,
        valid,
    }
}

/// Traversal state. One analyzer checks one formula.
#[derive(Debug, Default)]
pub struct SemanticAnalyzer {
    scope: Scope,
    /// Every variable name seen in a predicate so far, in order
    referenced: Vec<String>,
    errors: Vec<Spanned<SemanticError>>,
    warnings: Vec<Spanned<SemanticWarning>>,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check `formula`, collecting errors and warnings. Returns whether it is
    /// valid. Every sub-formula is visited even after an error.
    pub fn analyze(&mut self, formula: &Spanned<Formula>) -> bool {
        match &formula.node {
            Formula::Quantified { variable, body, .. } => self.quantified(variable, body),
            Formula::Binary { left, right, .. } => {
                let left = self.analyze(left);
                let right = self.analyze(right);
                left && right
            }
            Formula::Unary { inner, .. } => self.analyze(inner),
            Formula::BinaryPredicate {
                operator,
                left,
                right,
            } => self.comparison(operator.node, left, right, formula.span),
            Formula::RelationPredicate {
                relation,
                arguments,
            } => self.relation(relation, arguments, formula.span),
        }
    }

    fn quantified(&mut self, variable: &Spanned<Variable>, body: &Spanned<Formula>) -> bool {
        let name = variable.node.name();
        let mut valid = true;
        if self.scope.contains(name) {
            self.error(SemanticError::DuplicateVariable(name.to_string()), variable.span);
            valid = false;
        }

        let mark = self.referenced.len();
        self.scope.push(&variable.node);
        let body_valid = self.analyze(body);
        self.scope.pop();

        if !self.referenced[mark..].iter().any(|r| r == name) {
            self.warn(SemanticWarning::UnusedVariable(name.to_string()), variable.span);
        }
        valid && body_valid
    }

    fn comparison(
        &mut self,
        operator: BinaryOperator,
        left: &Spanned<Variable>,
        right: &Spanned<Variable>,
        span: Span,
    ) -> bool {
        let mut valid = self.require_in_scope(left);

        if left.node.name() == right.node.name() {
            let name = left.node.name().to_string();
            let warning = match operator {
                BinaryOperator::Eq => SemanticWarning::AlwaysTrue(name),
                BinaryOperator::Neq => SemanticWarning::AlwaysFalse(name),
            };
            self.warn(warning, span);
        } else {
            valid &= self.require_in_scope(right);
            if left.node.sort() != right.node.sort() {
                self.error(
                    SemanticError::SortMismatch {
                        left: left.node.name().to_string(),
                        left_sort: left.node.sort(),
                        right: right.node.name().to_string(),
                        right_sort: right.node.sort(),
                    },
                    span,
                );
                valid = false;
            }
        }

        self.reference(&left.node);
        self.reference(&right.node);
        valid
    }

    fn relation(
        &mut self,
        relation: &Spanned<Relation>,
        arguments: &[Spanned<Variable>],
        span: Span,
    ) -> bool {
        let mut valid = true;
        let name = relation.node.name().to_string();

        if let Relation::Set(set) = &relation.node {
            if !self.scope.contains(set) {
                self.error(SemanticError::UndeclaredVariable(set.clone()), relation.span);
                valid = false;
            }
        }

        let expected = relation.node.arity();
        if arguments.len() != expected {
            // The grammar guarantees at least one argument
            let arguments_span = match (arguments.first(), arguments.last()) {
                (Some(first), Some(last)) => first.span.join(last.span),
                _ => span,
            };
            self.error(
                SemanticError::ArityMismatch {
                    relation: name.clone(),
                    expected,
                    found: arguments.len(),
                },
                arguments_span,
            );
            valid = false;
        }

        for argument in arguments {
            if argument.node.sort() != Sort::Element {
                self.error(
                    SemanticError::SetArgument {
                        relation: name.clone(),
                        argument: argument.node.name().to_string(),
                    },
                    argument.span,
                );
                valid = false;
            }
            valid &= self.require_in_scope(argument);
        }

        if let (Relation::Edge, [x, y]) = (&relation.node, arguments) {
            if x.node.name() == y.node.name() {
                self.warn(SemanticWarning::SelfLoop(x.node.name().to_string()), span);
            }
        }

        self.referenced.push(name);
        for argument in arguments {
            self.reference(&argument.node);
        }
        valid
    }

    fn require_in_scope(&mut self, variable: &Spanned<Variable>) -> bool {
        let name = variable.node.name();
        if self.scope.contains(name) {
            true
        } else {
            self.error(SemanticError::UndeclaredVariable(name.to_string()), variable.span);
            false
        }
    }

    fn reference(&mut self, variable: &Variable) {
        self.referenced.push(variable.name().to_string());
    }

    fn error(&mut self, error: SemanticError, span: Span) {
        debug!(%span, "semantic error: {}", error);
        self.errors.push(Spanned::new(error, span));
    }

    fn warn(&mut self, warning: SemanticWarning, span: Span) {
        debug!(%span, "semantic warning: {}", warning);
        self.warnings.push(Spanned::new(warning, span));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_shadowing_prefers_innermost() {
        let mut scope = Scope::new();
        scope.push(&Variable::Element("x".into()));
        scope.push(&Variable::Set("X".into()));
        assert_eq!(scope.lookup("X"), Some(Sort::Set));
        assert_eq!(scope.depth(), 2);
        scope.pop();
        assert_eq!(scope.lookup("X"), None);
        assert!(scope.contains("x"));
    }

    #[test]
    fn arity_message_pluralizes() {
        let one = SemanticError::ArityMismatch {
            relation: "X".into(),
            expected: 1,
            found: 2,
        };
        let two = SemanticError::ArityMismatch {
            relation: "E".into(),
            expected: 2,
            found: 1,
        };
        assert_eq!(one.to_string(), "Expected 1 argument for 'X', but found 2");
        assert_eq!(two.to_string(), "Expected 2 arguments for 'E', but found 1");
    }
}
