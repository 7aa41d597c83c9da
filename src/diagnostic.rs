//! Error reporting
//!
//! Every stage reports problems as [`Diagnostic`]s, which render through
//! ariadne with the offending source underlined.

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use std::fmt;
use std::io;

use crate::ast::Span;
use crate::lexer::LexError;
use crate::parser::ParseError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A located message from any stage
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>, span: Span) -> Self {
        Self {
            severity,
            message: message.into(),
            span,
        }
    }

    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Error, message, span)
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Warning, message, span)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.severity, self.span, self.message)
    }
}

impl From<LexError> for Diagnostic {
    fn from(error: LexError) -> Self {
        Self::error(error.message, error.span)
    }
}

impl From<ParseError> for Diagnostic {
    fn from(error: ParseError) -> Self {
        Self::error(error.message, error.span)
    }
}

/// Render `diagnostics` against `source`, one report each
pub fn render(source: &str, diagnostics: &[Diagnostic], color: bool) -> io::Result<String> {
    let mut output = Vec::new();
    let length = source.chars().count();
    // A trailing blank gives end-of-input spans a column to underline
    let padded = format!("{source} ");

    for diagnostic in diagnostics {
        let (kind, label_color) = match diagnostic.severity {
            Severity::Error => (ReportKind::Error, Color::Red),
            Severity::Warning => (ReportKind::Warning, Color::Yellow),
        };

        // An empty span still needs a character to point at
        let span = if diagnostic.span.is_empty() {
            let start = diagnostic.span.start.min(length);
            start..start + 1
        } else {
            diagnostic.span.start.min(length)..diagnostic.span.end.min(length + 1)
        };

        Report::build(kind, (), span.start)
            .with_config(Config::default().with_color(color))
            .with_message(&diagnostic.message)
            .with_label(
                Label::new(span)
                    .with_message(&diagnostic.message)
                    .with_color(label_color),
            )
            .finish()
            .write(Source::from(padded.as_str()), &mut output)?;
    }

    String::from_utf8(output).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_quotes_the_source_line() {
        let diagnostics = [Diagnostic::error("Variable 'y' does not exist", Span::new(3, 4))];
        let rendered = render("∃x y = x", &diagnostics, false).unwrap();
        assert!(rendered.contains("∃x y = x"));
        assert!(rendered.contains("Variable 'y' does not exist"));
    }

    #[test]
    fn render_handles_end_of_input() {
        let diagnostics = [Diagnostic::error("Expected variable, but found end of input", Span::new(2, 2))];
        let rendered = render("∃x", &diagnostics, false).unwrap();
        assert!(rendered.contains("∃x"), "{}", rendered);
        // Once in the header and once on the label under the line
        assert_eq!(rendered.matches("end of input").count(), 2, "{}", rendered);
    }

    #[test]
    fn render_handles_empty_source() {
        let diagnostics = [Diagnostic::error("Unexpected end of input", Span::new(0, 0))];
        let rendered = render("", &diagnostics, false).unwrap();
        assert_eq!(rendered.matches("end of input").count(), 2, "{}", rendered);
    }

    #[test]
    fn render_labels_every_diagnostic() {
        let diagnostics = [
            Diagnostic::error("first problem", Span::new(0, 1)),
            Diagnostic::warning("second problem", Span::new(4, 5)),
        ];
        let rendered = render("x = y", &diagnostics, false).unwrap();
        assert_eq!(rendered.matches("first problem").count(), 2);
        assert_eq!(rendered.matches("second problem").count(), 2);
        assert!(rendered.contains("Warning"));
    }
}
