//! Parser for MSO formulas
//!
//! Parses token streams into AST. Precedence, loosest first: binary
//! connectives (all at one level, left-associative), negation, quantifiers,
//! then predicates and parenthesized formulas.

use chumsky::error::SimpleReason;
use chumsky::prelude::*;
use chumsky::Error as _;
use std::ops::Range;

use crate::ast::*;
use crate::lexer::{Token, TokenStream};

/// A syntax error. Parsing stops at the first one.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

/// Create a parser for a complete formula, including the end-of-input token
pub fn parser() -> impl Parser<Token, Spanned<Formula>, Error = Simple<Token>> + Clone {
    formula().then_ignore(just(Token::Eof))
}

/// Parse the remaining tokens of `tokens` as one formula
pub fn parse_tokens(tokens: TokenStream) -> Result<Spanned<Formula>, ParseError> {
    let end = tokens.eof_span().end;
    let stream = chumsky::Stream::from_iter(
        end..end + 1,
        tokens.map(|(token, span)| (token, span.range())),
    );

    parser().parse(stream).map_err(|errors| {
        errors
            .into_iter()
            .next()
            .map(|error| ParseError {
                message: describe(&error),
                span: Span::from(error.span()),
            })
            .unwrap_or_else(|| ParseError {
                message: "Unexpected end of input".to_string(),
                span: Span::new(end, end),
            })
    })
}

fn spanned<T>(node: T, span: Range<usize>) -> Spanned<T> {
    Spanned::new(node, Span::from(span))
}

// ============================================================================
// Helpers
// ============================================================================

/// `select!` records nothing as expected, so variables report it themselves
fn expected_variable(span: Range<usize>, found: Token) -> Simple<Token> {
    Simple::expected_input_found(span, [Some(Token::ElementVariable(String::new()))], Some(found))
}

fn variable() -> impl Parser<Token, Spanned<Variable>, Error = Simple<Token>> + Clone {
    filter_map(|span: Range<usize>, token: Token| match token {
        Token::ElementVariable(name) => Ok(Variable::Element(name)),
        Token::SetVariable(name) => Ok(Variable::Set(name)),
        other => Err(expected_variable(span, other)),
    })
    .map_with_span(spanned)
}

/// `( variable (, variable)* )`
fn arguments() -> impl Parser<Token, Vec<Spanned<Variable>>, Error = Simple<Token>> + Clone {
    variable()
        .separated_by(just(Token::Comma))
        .at_least(1)
        .delimited_by(just(Token::LParen), just(Token::RParen))
}

fn quantifier() -> impl Parser<Token, Spanned<Quantifier>, Error = Simple<Token>> + Clone {
    choice((
        just(Token::Exists).to(Quantifier::Exists),
        just(Token::Forall).to(Quantifier::Forall),
    ))
    .map_with_span(spanned)
}

fn connective() -> impl Parser<Token, Spanned<BinaryConnective>, Error = Simple<Token>> + Clone {
    choice((
        just(Token::And).to(BinaryConnective::And),
        just(Token::Or).to(BinaryConnective::Or),
        just(Token::Implies).to(BinaryConnective::Implies),
        just(Token::Iff).to(BinaryConnective::Iff),
    ))
    .map_with_span(spanned)
}

fn operator() -> impl Parser<Token, Spanned<BinaryOperator>, Error = Simple<Token>> + Clone {
    choice((
        just(Token::Eq).to(BinaryOperator::Eq),
        just(Token::Neq).to(BinaryOperator::Neq),
    ))
    .map_with_span(spanned)
}

// ============================================================================
// Formulas
// ============================================================================

fn formula() -> impl Parser<Token, Spanned<Formula>, Error = Simple<Token>> + Clone {
    recursive(|formula| {
        // E(x, y) -- arity is checked later, any argument count parses
        let edge = just(Token::Edge)
            .to(Relation::Edge)
            .map_with_span(spanned)
            .then(arguments())
            .map(|(relation, arguments)| Formula::RelationPredicate {
                relation,
                arguments,
            });

        // X(x)
        let membership = filter_map(|span: Range<usize>, token: Token| match token {
            Token::SetVariable(name) => Ok(Relation::Set(name)),
            other => Err(expected_variable(span, other)),
        })
        .map_with_span(spanned)
        .then(arguments())
        .map(|(relation, arguments)| Formula::RelationPredicate {
            relation,
            arguments,
        });

        // x = y, X ≠ Y
        let comparison = variable()
            .then(operator())
            .then(variable())
            .map(|((left, operator), right)| Formula::BinaryPredicate {
                operator,
                left,
                right,
            });

        let predicate = choice((edge, membership, comparison)).map_with_span(spanned);

        // The parenthesized formula takes the span of its parentheses
        let parenthesized = formula
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .map_with_span(|inner: Spanned<Formula>, span| spanned(inner.node, span));

        let atom = predicate.or(parenthesized);

        // ∀x∀y φ is ∀x(∀y(φ)); the body of a quantifier is never a binary formula
        let quantified = recursive(|quantified| {
            quantifier()
                .then(variable())
                .then(quantified)
                .map_with_span(|((quantifier, variable), body), span| {
                    spanned(
                        Formula::Quantified {
                            quantifier,
                            variable,
                            body: Box::new(body),
                        },
                        span,
                    )
                })
                .or(atom)
        });

        let unary = recursive(|unary| {
            just(Token::Not)
                .to(UnaryConnective::Not)
                .map_with_span(spanned)
                .then(unary)
                .map_with_span(|(connective, inner), span| {
                    spanned(
                        Formula::Unary {
                            connective,
                            inner: Box::new(inner),
                        },
                        span,
                    )
                })
                .or(quantified)
        });

        unary
            .clone()
            .then(connective().then(unary).repeated())
            .foldl(|left: Spanned<Formula>, (connective, right)| {
                let span = left.span.join(right.span);
                Spanned::new(
                    Formula::Binary {
                        connective,
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                    span,
                )
            })
    })
}

// ============================================================================
// Error messages
// ============================================================================

/// Render a chumsky error as a single readable sentence
fn describe(error: &Simple<Token>) -> String {
    if let SimpleReason::Custom(message) = error.reason() {
        return message.clone();
    }

    let found = match error.found() {
        None | Some(Token::Eof) => "end of input".to_string(),
        Some(token) => format!("'{}'", token),
    };

    let mut expected: Vec<String> = error
        .expected()
        .map(|token| match token {
            None | Some(Token::Eof) => "end of input".to_string(),
            Some(Token::ElementVariable(_)) | Some(Token::SetVariable(_)) => {
                "variable".to_string()
            }
            Some(token) => format!("'{}'", token),
        })
        .collect();
    expected.sort();
    expected.dedup();

    match expected.split_last() {
        None => format!("Unexpected {}", found),
        Some((last, [])) => format!("Expected {}, but found {}", last, found),
        Some((last, rest)) => format!("Expected {} or {}, but found {}", rest.join(", "), last, found),
    }
}
