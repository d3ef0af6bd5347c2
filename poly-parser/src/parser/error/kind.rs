use ariadne::Fmt;
use poly_attrs::ErrorKind;
pub use poly_error::ErrorKind;
use poly_error::EXPR;
use crate::tokenizer::TokenKind;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
    help = "separate values with an operator, such as `+` or `*`",
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// An operator that polynomial expressions do not support was used.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unsupported operator `{}`", op),
    labels = ["this operator"],
    help = format!("only {} and {} are supported", "`+`".fg(EXPR), "`*`".fg(EXPR)),
    note = "numbers are always nonnegative",
)]
pub struct UnsupportedOperator {
    /// The operator that was found.
    pub op: String,
}

impl UnsupportedOperator {
    /// The operators commonly found in arithmetic that are outside of the grammar.
    pub const OPERATORS: &'static [&'static str] = &["-", "/", "^", "%"];

    /// Returns true if the given lexeme is one of the recognized, unsupported operators.
    pub fn is_unsupported(lexeme: &str) -> bool {
        Self::OPERATORS.contains(&lexeme)
    }
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// Why a number literal could not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberDefect {
    /// The literal ends with a decimal point, such as `2.`.
    MissingFraction,

    /// The literal is too large to be represented.
    Overflow,
}

/// A number literal was malformed or not representable.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = match defect {
        NumberDefect::MissingFraction => "number is missing digits after its decimal point",
        NumberDefect::Overflow => "number is too large",
    },
    labels = [match defect {
        NumberDefect::MissingFraction => "there are no digits after this decimal point",
        NumberDefect::Overflow => "this number is too large",
    }],
    help = match defect {
        NumberDefect::MissingFraction => format!("write at least one digit after the point, like {}", "`2.0`".fg(EXPR)),
        NumberDefect::Overflow => "numbers must fit in a 64-bit floating-point value".to_string(),
    },
)]
pub struct MalformedNumber {
    /// What is wrong with the literal.
    pub defect: NumberDefect,
}

/// The expression was nested more deeply than the parser allows. Parentheses and binary
/// operators both count towards the depth.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expression is nested too deeply",
    labels = ["this exceeds the nesting limit"],
    help = format!("at most {} levels of parentheses and operators are allowed", max),
)]
pub struct NestingTooDeep {
    /// The maximum nesting depth.
    pub max: usize,
}
