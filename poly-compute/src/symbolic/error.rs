//! Errors that can occur while building, parsing, or differentiating expressions.

use ariadne::Report;
use ariadne::Fmt;
use poly_attrs::ErrorKind;
use poly_error::{Error, ErrorKind, EXPR};
use poly_parser::parser::error::kind;
use std::{
    error::Error as StdError,
    fmt::{self, Display, Formatter},
    io,
    ops::Range,
};

/// Error returned if a [`Number`] or [`Variable`] would violate its invariant.
///
/// [`Number`]: super::expr::Number
/// [`Variable`]: super::expr::Variable
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructionError {
    /// The value is negative, infinite, or NaN.
    InvalidValue(f64),

    /// The name is empty or contains something other than ASCII letters.
    InvalidName(String),
}

impl Display for ConstructionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(value) => write!(f,
                "`{}` is not a valid number: numbers must be finite and nonnegative",
                value,
            ),
            Self::InvalidName(name) => write!(f,
                "`{}` is not a valid variable name: names must be nonempty and contain only ASCII letters",
                name,
            ),
        }
    }
}

impl StdError for ConstructionError {}

/// Error returned if a derivative is requested with respect to something that cannot be a
/// variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivativeError {
    /// The name is empty or contains something other than ASCII letters.
    InvalidVariableName(String),
}

impl Display for DerivativeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidVariableName(name) => write!(f,
                "cannot differentiate with respect to `{}`: it is not a valid variable name",
                name,
            ),
        }
    }
}

impl StdError for DerivativeError {}

/// A literal in a syntax tree cannot be represented as an expression. The parser never produces
/// such literals; this only happens with syntax trees that were built by hand.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid literal: {}", reason),
    labels = [reason.to_string()],
    help = format!("only nonnegative numbers and {} are allowed", "names made of letters".fg(EXPR)),
)]
pub struct InvalidLiteral {
    /// Why the literal was rejected.
    pub reason: ConstructionError,
}

/// Error returned if an expression could not be parsed.
#[derive(Debug)]
pub enum ParseError {
    /// The input is malformed, incomplete, or has trailing content.
    Syntax(Error),

    /// A numeric literal cannot be represented.
    MalformedNumber(Error),
}

impl ParseError {
    /// Returns the underlying source-located error.
    pub fn error(&self) -> &Error {
        match self {
            Self::Syntax(err) | Self::MalformedNumber(err) => err,
        }
    }

    /// Returns the regions of the source code this error points at.
    pub fn spans(&self) -> &[Range<usize>] {
        &self.error().spans
    }

    /// Build a report from this error.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.error().build_report(src_id)
    }

    /// Report this error to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.error().report_to_stderr(src_id, input)
    }

    /// Renders the report for this error into a string. The string contains ANSI color codes.
    pub fn report_to_string(&self, src_id: &str, input: &str) -> io::Result<String> {
        self.error().report_to_string(src_id, input)
    }
}

impl From<Error> for ParseError {
    fn from(err: Error) -> Self {
        let bad_value = err.downcast_ref::<InvalidLiteral>()
            .is_some_and(|lit| matches!(lit.reason, ConstructionError::InvalidValue(_)));

        if bad_value || err.is::<kind::MalformedNumber>() {
            Self::MalformedNumber(err)
        } else {
            Self::Syntax(err)
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (category, err) = match self {
            Self::Syntax(err) => ("syntax error", err),
            Self::MalformedNumber(err) => ("malformed number", err),
        };

        write!(f, "{}", category)?;
        if let Some(span) = err.spans.first() {
            write!(f, " at {}..{}", span.start, span.end)?;
        }
        write!(f, ": {}", err.kind.message())
    }
}

impl StdError for ParseError {}
