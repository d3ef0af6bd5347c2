pub mod ast;
pub mod error;
pub mod token;

use ast::Expr;
use error::{Error, kind};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// Attempts to parse a value from the given stream of tokens, using multiple parsing functions
/// in order. The first function that succeeds is used to parse the value.
///
/// This macro also catches fatal errors and immediately short-circuits the parsing process.
///
/// If parsing is successful, the enclosing function returns the parsed value. Otherwise, the
/// macro evaluates to the error of the last attempted parsing function.
#[macro_export]
macro_rules! try_parse_catch_fatal {
    ($($expr:expr),+ $(,)?) => {{
        $(
            match $expr {
                Ok(value) => return Ok(value),
                Err(err) if err.fatal => return Err(err),
                // ignore this error and try the next parser, or return it
                err => err,
            }
        )+
    }};
}

/// A high-level parser for polynomial expressions. This is the type to use to parse an arbitrary
/// piece of source into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// The number of parentheses the parser is currently inside of.
    depth: usize,

    /// The maximum height of the parsed tree, if any. See [`Parser::max_depth`].
    max_depth: Option<usize>,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
            depth: 0,
            max_depth: None,
        }
    }

    /// Limits how deeply the parsed expression may be nested. Every pair of parentheses and
    /// every binary operator counts as one level, so `x + x + x` is as deep as `((x))`, and
    /// [`Expr::height`] of a successful parse never exceeds the limit.
    ///
    /// By default there is no limit. Callers parsing untrusted input should set one to bound the
    /// recursion depth of the parser and of every recursive operation on the resulting tree.
    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl kind::ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Moves the cursor past any whitespace tokens.
    fn skip_whitespace(&mut self) {
        while self.current_token().is_some_and(Token::is_whitespace) {
            self.cursor += 1;
        }
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        self.skip_whitespace();
        match self.tokens.get(self.cursor) {
            Some(token) => {
                self.cursor += 1;
                // cloning is cheap: only Range<_> is cloned
                Ok(token.clone())
            },
            None => Err(self.error(kind::UnexpectedEof)),
        }
    }

    /// Builds the error to report when `token` was found but one of `expected` was required.
    ///
    /// Operators outside of the grammar get a dedicated error, since they are the most likely
    /// mistake.
    pub fn unexpected(&self, token: &Token, expected: &'static [TokenKind]) -> Error {
        match token.kind {
            TokenKind::Symbol if kind::UnsupportedOperator::is_unsupported(token.lexeme) => {
                Error::new(vec![token.span.clone()], kind::UnsupportedOperator {
                    op: token.lexeme.to_string(),
                })
            },
            found => Error::new(vec![token.span.clone()], kind::UnexpectedToken {
                expected,
                found,
            }),
        }
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Parses a value from the given stream of tokens without consuming any of them. The cursor
    /// is restored whether or not parsing succeeds.
    pub fn peek<T: Parse>(&mut self) -> Result<T, Error> {
        let start = self.cursor;
        let result = T::parse(self);
        self.cursor = start;
        result
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value. This function can be used in the [`Parse::parse`]
    /// implementation of a type with the given [`Parser`], as it will automatically backtrack the
    /// cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Fails with a fatal [`kind::NestingTooDeep`] pointing at `span` if `expr`, placed inside the
    /// parentheses the parser is currently in, would exceed the configured maximum depth.
    pub fn check_depth(&self, expr: &Expr, span: Range<usize>) -> Result<(), Error> {
        match self.max_depth {
            Some(max) if self.depth + expr.height() > max => {
                Err(Error::new_fatal(vec![span], kind::NestingTooDeep { max }))
            },
            _ => Ok(()),
        }
    }

    /// Runs `f` one level of parentheses deeper. Fails with a fatal [`kind::NestingTooDeep`]
    /// pointing at `span` if that would exceed the configured maximum depth.
    pub fn nested<T, F>(&mut self, span: Range<usize>, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        if let Some(max) = self.max_depth {
            if self.depth >= max {
                return Err(Error::new_fatal(vec![span], kind::NestingTooDeep { max }));
            }
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser (apart from trailing whitespace); if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        self.skip_whitespace();

        let Some(token) = self.current_token() else {
            return Ok(value);
        };

        let err = match token.kind {
            TokenKind::CloseParen => self.error(kind::UnclosedParenthesis { opening: false }),
            TokenKind::Symbol if kind::UnsupportedOperator::is_unsupported(token.lexeme) => {
                self.unexpected(token, &[])
            },
            _ => {
                // point at everything that was left over
                let start = token.span.start;
                let end = self.eof_span().end;
                Error::new(vec![start..end], kind::ExpectedEof)
            },
        };

        log::debug!("rejecting trailing input at {:?}", err.spans);
        Err(err)
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`), which separates terms.
    Term,

    /// Precedence of multiplication (`*`), which separates factors.
    Factor,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{
        binary::Binary,
        expr::Expr,
        literal::{Literal, LitNum, LitSym},
        paren::Paren,
    };
    use token::op::{BinOp, BinOpKind};

    fn num(value: f64, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Number(LitNum { value, span }))
    }

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    fn bin(lhs: Expr, kind: BinOpKind, op_span: Range<usize>, rhs: Expr) -> Expr {
        let span = lhs.span().start..rhs.span().end;
        Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op: BinOp { kind, span: op_span },
            rhs: Box::new(rhs),
            span,
        })
    }

    fn parse(input: &str) -> Result<Expr, Error> {
        Parser::new(input).try_parse_full::<Expr>()
    }

    #[test]
    fn literal_int() {
        assert_eq!(parse("16").unwrap(), num(16.0, 0..2));
    }

    #[test]
    fn literal_float() {
        assert_eq!(parse("3.14").unwrap(), num(3.14, 0..4));
    }

    #[test]
    fn literal_symbol() {
        assert_eq!(parse("  Foo ").unwrap(), sym("Foo", 2..5));
    }

    #[test]
    fn sum_is_left_associative() {
        assert_eq!(parse("a + b + c").unwrap(), bin(
            bin(sym("a", 0..1), BinOpKind::Add, 2..3, sym("b", 4..5)),
            BinOpKind::Add,
            6..7,
            sym("c", 8..9),
        ));
    }

    #[test]
    fn product_is_left_associative() {
        assert_eq!(parse("a*b*c").unwrap(), bin(
            bin(sym("a", 0..1), BinOpKind::Mul, 1..2, sym("b", 2..3)),
            BinOpKind::Mul,
            3..4,
            sym("c", 4..5),
        ));
    }

    #[test]
    fn product_binds_tighter() {
        // 1 + 2 * x + 3 == (1 + (2 * x)) + 3
        assert_eq!(parse("1 + 2 * x + 3").unwrap(), bin(
            bin(
                num(1.0, 0..1),
                BinOpKind::Add,
                2..3,
                bin(num(2.0, 4..5), BinOpKind::Mul, 6..7, sym("x", 8..9)),
            ),
            BinOpKind::Add,
            10..11,
            num(3.0, 12..13),
        ));
    }

    #[test]
    fn product_then_sum() {
        // x * y + 1 == (x * y) + 1
        assert_eq!(parse("x * y + 1").unwrap(), bin(
            bin(sym("x", 0..1), BinOpKind::Mul, 2..3, sym("y", 4..5)),
            BinOpKind::Add,
            6..7,
            num(1.0, 8..9),
        ));
    }

    #[test]
    fn parenthesized() {
        assert_eq!(parse("(1 + x) * y").unwrap(), bin(
            Expr::Paren(Paren {
                expr: Box::new(bin(num(1.0, 1..2), BinOpKind::Add, 3..4, sym("x", 5..6))),
                span: 0..7,
            }),
            BinOpKind::Mul,
            8..9,
            sym("y", 10..11),
        ));
    }

    #[test]
    fn juxtaposition_is_rejected() {
        let err = parse("3 x").unwrap_err();
        assert!(err.is::<kind::ExpectedEof>());
        assert_eq!(err.spans, vec![2..3]);
    }

    #[test]
    fn empty_input() {
        assert!(parse("").unwrap_err().is::<kind::UnexpectedEof>());
        assert!(parse("   ").unwrap_err().is::<kind::UnexpectedEof>());
    }

    #[test]
    fn missing_operand() {
        let err = parse("1 +").unwrap_err();
        assert!(err.is::<kind::UnexpectedEof>());
        assert!(err.fatal);

        let err = parse("1 * * 2").unwrap_err();
        assert!(err.is::<kind::UnexpectedToken>());
        assert_eq!(err.spans, vec![4..5]);
    }

    #[test]
    fn negative_and_subtraction() {
        let err = parse("-3").unwrap_err();
        assert_eq!(
            err.downcast_ref::<kind::UnsupportedOperator>(),
            Some(&kind::UnsupportedOperator { op: "-".to_string() }),
        );

        let err = parse("x - 3").unwrap_err();
        assert!(err.is::<kind::UnsupportedOperator>());
        assert_eq!(err.spans, vec![2..3]);
    }

    #[test]
    fn stray_close_paren() {
        let err = parse("1 + 2)").unwrap_err();
        assert_eq!(
            err.downcast_ref::<kind::UnclosedParenthesis>(),
            Some(&kind::UnclosedParenthesis { opening: false }),
        );

        let err = parse(")").unwrap_err();
        assert!(err.is::<kind::UnclosedParenthesis>());
    }

    #[test]
    fn unclosed_paren() {
        let err = parse("(1 + (x)").unwrap_err();
        assert_eq!(
            err.downcast_ref::<kind::UnclosedParenthesis>(),
            Some(&kind::UnclosedParenthesis { opening: true }),
        );
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn junk_inside_paren() {
        let err = parse("(3 x)").unwrap_err();
        assert!(err.is::<kind::UnexpectedToken>());
        assert_eq!(err.spans, vec![3..4]);
    }

    #[test]
    fn empty_paren() {
        let err = parse("x * ()").unwrap_err();
        assert!(err.is::<kind::EmptyParenthesis>());
        assert_eq!(err.spans, vec![4..6]);
    }

    #[test]
    fn malformed_numbers() {
        let err = parse("2. + x").unwrap_err();
        assert!(err.is::<kind::MalformedNumber>());
        assert_eq!(err.spans, vec![0..2]);

        let huge = format!("{}.0", "9".repeat(400));
        assert!(parse(&huge).unwrap_err().is::<kind::MalformedNumber>());
    }

    #[test]
    fn names_do_not_contain_digits() {
        // `x1` lexes as a name followed by a number
        assert!(parse("x1").unwrap_err().is::<kind::ExpectedEof>());
    }

    #[test]
    fn nesting_limit() {
        let source = "((((x))))";
        assert!(Parser::new(source).max_depth(Some(4)).try_parse_full::<Expr>().is_ok());

        let err = Parser::new(source)
            .max_depth(Some(3))
            .try_parse_full::<Expr>()
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<kind::NestingTooDeep>(),
            Some(&kind::NestingTooDeep { max: 3 }),
        );
        assert_eq!(err.spans, vec![3..4]);

        // no limit by default
        let deep = format!("{}x{}", "(".repeat(40), ")".repeat(40));
        assert!(parse(&deep).is_ok());
    }

    #[test]
    fn height_counts_parens_and_operators() {
        assert_eq!(parse("x").unwrap().height(), 0);
        assert_eq!(parse("((x))").unwrap().height(), 2);
        assert_eq!(parse("x + x + x").unwrap().height(), 2);
        assert_eq!(parse("(x + x) * x").unwrap().height(), 3);
        assert_eq!(parse("x + x * x").unwrap().height(), 2);
    }

    #[test]
    fn operator_chain_limit() {
        let chain = |terms: usize| format!("x{}", " + x".repeat(terms));

        let expr = Parser::new(&chain(10)).max_depth(Some(10)).try_parse_full::<Expr>().unwrap();
        assert_eq!(expr.height(), 10);

        // the 11th `+` starts at byte 42
        let err = Parser::new(&chain(11))
            .max_depth(Some(10))
            .try_parse_full::<Expr>()
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<kind::NestingTooDeep>(),
            Some(&kind::NestingTooDeep { max: 10 }),
        );
        assert_eq!(err.spans, vec![42..43]);
        assert!(err.fatal);

        let err = Parser::new(&chain(5_000))
            .max_depth(Some(10))
            .try_parse_full::<Expr>()
            .unwrap_err();
        assert!(err.is::<kind::NestingTooDeep>());
    }

    #[test]
    fn parens_and_operators_share_limit() {
        let source = "(x + x) * x";
        assert!(Parser::new(source).max_depth(Some(3)).try_parse_full::<Expr>().is_ok());

        let err = Parser::new(source)
            .max_depth(Some(2))
            .try_parse_full::<Expr>()
            .unwrap_err();
        assert!(err.is::<kind::NestingTooDeep>());
        assert_eq!(err.spans, vec![8..9]);

        // inside one pair of parentheses, only one more level fits
        let err = Parser::new("(x + x + x)")
            .max_depth(Some(2))
            .try_parse_full::<Expr>()
            .unwrap_err();
        assert_eq!(err.spans, vec![7..8]);
    }
}
