use crate::{
    parser::{
        ast::expr::Expr,
        error::{kind, Error},
        token::{CloseParen, OpenParen},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parenthesized expression. A [`Paren`] can only contain a single expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this [`Paren`] was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the innermost expression in the parenthesized expression.
    pub fn innermost(&self) -> &Expr {
        let mut inner = &self.expr;
        while let Expr::Paren(paren) = inner.as_ref() {
            inner = &paren.expr;
        }
        inner
    }

    /// Parses everything after the opening parenthesis. Once an opening parenthesis has been
    /// seen, every error is fatal.
    fn parse_rest(input: &mut Parser, open_paren: OpenParen) -> Result<Self, Error> {
        if let Ok(close_paren) = input.peek::<CloseParen>() {
            return Err(Error::new_fatal(
                vec![open_paren.span.start..close_paren.span.end],
                kind::EmptyParenthesis,
            ));
        }

        let expr = input.try_parse::<Expr>().map_err(Error::into_fatal)?;
        let close_paren = match input.next_token() {
            Ok(token) if token.kind == TokenKind::CloseParen => token,
            Ok(token) => {
                let expected = &[TokenKind::Add, TokenKind::Mul, TokenKind::CloseParen];
                return Err(input.unexpected(&token, expected).into_fatal());
            },
            Err(_) => return Err(Error::new_fatal(
                vec![open_paren.span],
                kind::UnclosedParenthesis { opening: true },
            )),
        };

        Ok(Self {
            expr: Box::new(expr),
            span: open_paren.span.start..close_paren.span.end,
        })
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_paren = input.try_parse::<OpenParen>()?;
        input.nested(open_paren.span.clone(), |input| Self::parse_rest(input, open_paren))
    }
}

impl fmt::Display for Paren {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        self.expr.fmt(f)?;
        write!(f, ")")
    }
}
