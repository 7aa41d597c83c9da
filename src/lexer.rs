//! Lexer for MSO formulas
//!
//! Tokenizes source into a stream for the parser. Every connective has an
//! ASCII spelling (`\land`, `!=`, ...) and a Unicode one (`∧`, `≠`, ...); both
//! produce the same token.

use chumsky::prelude::*;
use std::fmt;

use crate::ast::{Span, Variable};

/// Token types for MSO formulas
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    // Quantifiers
    Exists,
    Forall,

    // Connectives
    And,
    Or,
    Implies,
    Iff,
    Not,

    // Operators
    Eq,
    Neq,

    // The edge relation `E`
    Edge,

    // Variables
    ElementVariable(String),
    SetVariable(String),

    // Punctuation
    LParen, // (
    RParen, // )
    Comma,  // ,

    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Exists => write!(f, "∃"),
            Token::Forall => write!(f, "∀"),
            Token::And => write!(f, "∧"),
            Token::Or => write!(f, "∨"),
            Token::Implies => write!(f, "→"),
            Token::Iff => write!(f, "↔"),
            Token::Not => write!(f, "¬"),
            Token::Eq => write!(f, "="),
            Token::Neq => write!(f, "≠"),
            Token::Edge => write!(f, "E"),
            Token::ElementVariable(name) | Token::SetVariable(name) => write!(f, "{}", name),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

/// A tokenization failure. Lexing stops at the first one.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct LexError {
    pub message: String,
    pub span: Span,
}

/// Lexer output before error extraction: malformed input becomes an
/// `Invalid` lexeme so that the first problem in source order is the one
/// reported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lexeme {
    Token(Token),
    Invalid(String),
}

fn keyword(word: Option<String>) -> Lexeme {
    let Some(word) = word else {
        return Lexeme::Invalid("Expected keyword after '\\'".to_string());
    };
    let token = match word.as_str() {
        "exists" => Token::Exists,
        "forall" => Token::Forall,
        "land" => Token::And,
        "lor" => Token::Or,
        "implies" => Token::Implies,
        "iff" => Token::Iff,
        "eq" => Token::Eq,
        "neq" => Token::Neq,
        "neg" => Token::Not,
        _ => return Lexeme::Invalid(format!("Unknown keyword '\\{}'", word)),
    };
    Lexeme::Token(token)
}

fn identifier(name: String) -> Token {
    if name == "E" {
        return Token::Edge;
    }
    match Variable::from_name(name) {
        Variable::Element(name) => Token::ElementVariable(name),
        Variable::Set(name) => Token::SetVariable(name),
    }
}

/// Create a lexer for MSO formulas
pub fn lexer() -> impl Parser<char, Vec<(Lexeme, std::ops::Range<usize>)>, Error = Simple<char>> {
    // A maximal run of letters followed by a maximal run of digits
    let word = filter(|c: &char| c.is_alphabetic())
        .repeated()
        .at_least(1)
        .chain::<char, Vec<char>, _>(filter(|c: &char| c.is_ascii_digit()).repeated())
        .collect::<String>();

    let backslash_keyword = just('\\').ignore_then(word.clone().or_not()).map(keyword);

    // `!=` must be tried before `!`
    let bang = just('!')
        .ignore_then(just('=').or_not())
        .map(|eq| Lexeme::Token(if eq.is_some() { Token::Neq } else { Token::Not }));

    let symbol = choice((
        just('(').to(Token::LParen),
        just(')').to(Token::RParen),
        just(',').to(Token::Comma),
        just('=').to(Token::Eq),
        just('≠').to(Token::Neq),
        just('∃').to(Token::Exists),
        just('∀').to(Token::Forall),
        just('∧').to(Token::And),
        just('∨').to(Token::Or),
        just('→').to(Token::Implies),
        just('↔').to(Token::Iff),
        just('¬').to(Token::Not),
    ))
    .map(Lexeme::Token);

    let name = word.map(|name| Lexeme::Token(identifier(name)));

    let illegal = any().map(|c: char| Lexeme::Invalid(format!("Illegal character '{}'", c)));

    let lexeme = choice((backslash_keyword, bang, symbol, name, illegal));

    text::whitespace()
        .ignore_then(
            lexeme
                .map_with_span(|lexeme, span| (lexeme, span))
                .then_ignore(text::whitespace())
                .repeated(),
        )
        .then_ignore(end())
}

/// Tokenize `source`. The result always ends with [`Token::Eof`], whose span
/// is empty and sits at the end of the input.
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>, LexError> {
    let lexemes = lexer().parse(source).map_err(|errors| lex_error(source, errors))?;

    let mut tokens = Vec::with_capacity(lexemes.len() + 1);
    for (lexeme, span) in lexemes {
        match lexeme {
            Lexeme::Token(token) => tokens.push((token, Span::from(span))),
            Lexeme::Invalid(message) => {
                return Err(LexError {
                    message,
                    span: Span::from(span),
                })
            }
        }
    }

    let end = source.chars().count();
    tokens.push((Token::Eof, Span::new(end, end)));
    Ok(tokens)
}

fn lex_error(source: &str, errors: Vec<Simple<char>>) -> LexError {
    let end = source.chars().count();
    match errors.into_iter().next() {
        Some(error) => {
            let message = match error.found() {
                Some(c) => format!("Illegal character '{}'", c),
                None => "Unexpected end of input".to_string(),
            };
            LexError {
                message,
                span: Span::from(error.span()),
            }
        }
        None => LexError {
            message: "Unexpected end of input".to_string(),
            span: Span::new(end, end),
        },
    }
}

/// A cursor over a token sequence
///
/// `peek` and `next` share the cursor; once the end is reached both keep
/// returning the final [`Token::Eof`].
#[derive(Clone, Debug)]
pub struct TokenStream {
    tokens: Vec<(Token, Span)>,
    position: usize,
}

impl TokenStream {
    /// Tokenize `source` into a fresh stream
    pub fn new(source: &str) -> Result<Self, LexError> {
        tokenize(source).map(Self::from_tokens)
    }

    /// Wrap an already tokenized sequence, appending an [`Token::Eof`] if it is
    /// missing
    pub fn from_tokens(mut tokens: Vec<(Token, Span)>) -> Self {
        if !matches!(tokens.last(), Some((Token::Eof, _))) {
            let end = tokens.last().map_or(0, |(_, span)| span.end);
            tokens.push((Token::Eof, Span::new(end, end)));
        }
        Self {
            tokens,
            position: 0,
        }
    }

    pub fn peek(&self) -> &(Token, Span) {
        self.tokens
            .get(self.position)
            .unwrap_or_else(|| self.eof())
    }

    /// Span of the trailing end-of-input token
    pub fn eof_span(&self) -> Span {
        self.eof().1
    }

    /// Tokens not yet consumed
    pub fn remaining(&self) -> &[(Token, Span)] {
        self.tokens.get(self.position..).unwrap_or(&[])
    }

    fn eof(&self) -> &(Token, Span) {
        // `from_tokens` guarantees a trailing Eof
        &self.tokens[self.tokens.len() - 1]
    }
}

impl Iterator for TokenStream {
    type Item = (Token, Span);

    /// Yields every token up to and including the first [`Token::Eof`]
    fn next(&mut self) -> Option<Self::Item> {
        let token = self.tokens.get(self.position)?.clone();
        self.position += 1;
        Some(token)
    }
}
