//! Pretty-printer for MSO formulas
//!
//! Renders AST back to source syntax for round-trip testing. Every operand
//! of a connective and every quantifier body is parenthesized, so the output
//! parses back to the same tree whatever the precedence.

use std::fmt;

use crate::ast::*;

/// Which spelling of the logical symbols to use
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Notation {
    /// `∀`, `→`, `≠`
    #[default]
    Unicode,
    /// `\forall`, `\implies`, `\neq`
    Ascii,
}

/// Render `formula` in the given notation
pub fn to_source<S>(formula: &Formula<S>, notation: Notation) -> String {
    let mut pretty = Pretty::new(notation);
    pretty.formula(formula);
    pretty.finish()
}

/// A pretty-printer accumulating into a string
pub struct Pretty {
    output: String,
    notation: Notation,
}

impl Pretty {
    pub fn new(notation: Notation) -> Self {
        Self {
            output: String::new(),
            notation,
        }
    }

    pub fn finish(self) -> String {
        self.output
    }

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn symbol(&mut self, unicode: &str, ascii: &str) {
        match self.notation {
            Notation::Unicode => self.write(unicode),
            Notation::Ascii => self.write(ascii),
        }
    }

    fn parenthesized<S>(&mut self, formula: &Formula<S>) {
        self.write("(");
        self.formula(formula);
        self.write(")");
    }
}

// ============ Pretty-printing implementations ============

impl Pretty {
    pub fn formula<S>(&mut self, formula: &Formula<S>) {
        match formula {
            Formula::Quantified {
                quantifier,
                variable,
                body,
            } => {
                self.quantifier(quantifier.node);
                self.write(variable.node.name());
                self.parenthesized(&body.node);
            }
            Formula::Binary {
                connective,
                left,
                right,
            } => {
                self.parenthesized(&left.node);
                self.write(" ");
                self.connective(connective.node);
                self.write(" ");
                self.parenthesized(&right.node);
            }
            Formula::Unary { connective, inner } => {
                match connective.node {
                    UnaryConnective::Not => self.symbol("¬", "\\neg"),
                }
                self.parenthesized(&inner.node);
            }
            Formula::BinaryPredicate {
                operator,
                left,
                right,
            } => {
                self.write(left.node.name());
                match operator.node {
                    BinaryOperator::Eq => self.write(" = "),
                    BinaryOperator::Neq => self.symbol(" ≠ ", " \\neq "),
                }
                self.write(right.node.name());
            }
            Formula::RelationPredicate {
                relation,
                arguments,
            } => {
                self.write(relation.node.name());
                self.write("(");
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.write(argument.node.name());
                }
                self.write(")");
            }
        }
    }

    fn quantifier(&mut self, quantifier: Quantifier) {
        // The space keeps a backslash keyword apart from the variable name
        match quantifier {
            Quantifier::Exists => self.symbol("∃", "\\exists "),
            Quantifier::Forall => self.symbol("∀", "\\forall "),
        }
    }

    fn connective(&mut self, connective: BinaryConnective) {
        match connective {
            BinaryConnective::And => self.symbol("∧", "\\land"),
            BinaryConnective::Or => self.symbol("∨", "\\lor"),
            BinaryConnective::Implies => self.symbol("→", "\\implies"),
            BinaryConnective::Iff => self.symbol("↔", "\\iff"),
        }
    }
}

impl<S> fmt::Display for Formula<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_source(self, Notation::Unicode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connectivity_like() -> Formula<()> {
        let x = || Variable::Element("x".into());
        let y = || Variable::Element("y".into());
        Formula::forall(
            x(),
            Formula::exists(
                y(),
                Formula::implies(Formula::edge(x(), y()), Formula::negate(Formula::equal(x(), y()))),
            ),
        )
    }

    #[test]
    fn unicode_output() {
        assert_eq!(
            connectivity_like().to_string(),
            "∀x(∃y((E(x, y)) → (¬(x = y))))"
        );
    }

    #[test]
    fn ascii_output() {
        assert_eq!(
            to_source(&connectivity_like(), Notation::Ascii),
            "\\forall x(\\exists y((E(x, y)) \\implies (\\neg(x = y))))"
        );
    }
}
