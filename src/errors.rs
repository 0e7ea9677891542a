//! Weft error handling.
//!
//! A run either succeeds with an output tree or fails with one
//! [`ParseError`]: what went wrong, where in the input, and how to render
//! it. Errors propagate as ordinary `Result` values; combinators either
//! recover them locally (optional, separator misses, repetition above the
//! minimum) or hand them unchanged to the caller.

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::Mark;

// ============================================================================
// SOURCE CONTEXT - Error reporting infrastructure
// ============================================================================

/// The input text under parse plus a display name, used to render
/// diagnostics with source excerpts.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    /// Create a source context from real input content. This is the
    /// preferred constructor for error reporting.
    pub fn from_input(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Create a fallback when the real input is unavailable.
    pub fn fallback(context: &str) -> Self {
        Self {
            name: "fallback".to_string(),
            content: format!("// {}", context),
        }
    }

    /// Convert to a NamedSource for miette error reporting.
    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

impl Default for SourceContext {
    fn default() -> Self {
        Self::fallback("default context")
    }
}

/// A 0-indexed line/column pair, derived from the failure [`Mark`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl From<Mark> for Position {
    fn from(mark: Mark) -> Self {
        Self {
            line: mark.line,
            column: mark.column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

// ============================================================================
// THE ERROR TYPE
// ============================================================================

/// The single error type: essential data only, no wrapper hierarchy.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Where it happened.
    pub source_info: SourceInfo,
    /// How to help.
    pub diagnostic_info: DiagnosticInfo,
}

/// All failure kinds as a closed enum.
#[derive(Debug, Clone, Error)]
pub enum ErrorKind {
    /// A leaf parser ran out of input.
    #[error("expected {expected}, got end of input")]
    UnexpectedEnd { expected: String },

    /// A literal stopped matching partway through.
    #[error("character does not match: expected '{expected}', got '{found}'")]
    LiteralMismatch { expected: char, found: char },

    #[error("expected a digit, got '{found}'")]
    ExpectedDigit { found: char },

    #[error("expected whitespace, found '{found}'")]
    ExpectedWhitespace { found: char },

    #[error("expected end of input, got '{found}'")]
    ExpectedEnd { found: char },

    /// A repetition fell short of its minimum.
    #[error("expected at least {min} matches, got {actual}")]
    QuantityShortfall { min: usize, actual: usize },

    /// Every alternative of a first-of failed; the individual failures
    /// ride along as related diagnostics.
    #[error("no alternative matched ({} tried)", .attempts.len())]
    Exhausted { attempts: Vec<ParseError> },
}

impl ErrorKind {
    /// Error code suffix for diagnostic codes.
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::UnexpectedEnd { .. } => "unexpected_end",
            Self::LiteralMismatch { .. } => "literal_mismatch",
            Self::ExpectedDigit { .. } => "expected_digit",
            Self::ExpectedWhitespace { .. } => "expected_whitespace",
            Self::ExpectedEnd { .. } => "expected_end",
            Self::QuantityShortfall { .. } => "quantity_shortfall",
            Self::Exhausted { .. } => "exhausted",
        }
    }
}

/// Where the failure was detected.
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub source: Arc<NamedSource<String>>,
    pub primary_span: SourceSpan,
    pub position: Position,
}

/// Diagnostic enhancement data.
#[derive(Debug, Clone)]
pub struct DiagnosticInfo {
    pub help: Option<String>,
    pub error_code: String,
}

impl std::error::Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.source_info.position)
    }
}

impl Diagnostic for ParseError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.diagnostic_info.error_code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic_info
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.primary_label()),
            self.source_info.primary_span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.source_info.source)
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn Diagnostic> + 'a>> {
        match &self.kind {
            ErrorKind::Exhausted { attempts } if !attempts.is_empty() => {
                Some(Box::new(attempts.iter().map(|e| e as &dyn Diagnostic)))
            }
            _ => None,
        }
    }
}

impl ParseError {
    /// The 0-indexed position where the failure was detected.
    pub fn position(&self) -> Position {
        self.source_info.position
    }

    fn primary_label(&self) -> String {
        match &self.kind {
            ErrorKind::UnexpectedEnd { .. } => "input ended here".into(),
            ErrorKind::LiteralMismatch { .. } => "mismatch here".into(),
            ErrorKind::ExpectedDigit { .. } => "not a digit".into(),
            ErrorKind::ExpectedWhitespace { .. } => "not whitespace".into(),
            ErrorKind::ExpectedEnd { .. } => "trailing input".into(),
            ErrorKind::QuantityShortfall { .. } => "too few matches from here".into(),
            ErrorKind::Exhausted { .. } => "no alternative matched here".into(),
        }
    }
}

/// Context-aware error creation; the runner implements this against its
/// source context so errors are never assembled by hand at use sites.
pub trait ErrorReporting {
    /// Create an error of the given kind at the given input position.
    fn report(&self, kind: ErrorKind, at: Mark) -> ParseError;

    fn unexpected_end(&self, expected: &str, at: Mark) -> ParseError {
        self.report(
            ErrorKind::UnexpectedEnd {
                expected: expected.into(),
            },
            at,
        )
    }

    fn literal_mismatch(&self, expected: char, found: char, at: Mark) -> ParseError {
        self.report(ErrorKind::LiteralMismatch { expected, found }, at)
    }

    fn quantity_shortfall(&self, min: usize, actual: usize, at: Mark) -> ParseError {
        self.report(ErrorKind::QuantityShortfall { min, actual }, at)
    }

    fn exhausted(&self, attempts: Vec<ParseError>, at: Mark) -> ParseError {
        self.report(ErrorKind::Exhausted { attempts }, at)
    }
}

// ============================================================================
// ERROR FORMATTING UTILITIES
// ============================================================================

/// Prints a ParseError with full miette diagnostics: source excerpt,
/// labeled span, and any related alternative failures. For user-facing
/// display at the top level of a run.
pub fn print_error(error: ParseError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}
