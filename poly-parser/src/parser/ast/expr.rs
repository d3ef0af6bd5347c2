use crate::parser::{
    ast::{binary::Binary, literal::Literal, paren::Paren},
    error::{kind, Error},
    token::CloseParen,
    Parse,
    Parser,
    Precedence,
};
use crate::tokenizer::TokenKind;
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents a general polynomial expression.
///
/// An expression is a sum of products of primary expressions: numbers, variables, or other
/// expressions surrounded by parentheses.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A binary operation, such as `1 + 2` or `x * y`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// If this expression is an [`Expr::Paren`], returns the innermost expression in the
    /// parenthesized expression. Otherwise, returns `self`.
    pub fn innermost(&self) -> &Expr {
        match self {
            Expr::Paren(paren) => paren.innermost(),
            expr => expr,
        }
    }

    /// Returns the height of the expression: the largest number of parentheses and binary
    /// operators enclosing any literal. A lone literal has height `0`.
    ///
    /// The tree is walked with an explicit stack, so this is safe to call on arbitrarily deep
    /// expressions.
    pub fn height(&self) -> usize {
        let mut stack = vec![(self, 0)];
        let mut height = 0;

        while let Some((expr, depth)) = stack.pop() {
            height = height.max(depth);
            match expr {
                Expr::Literal(_) => (),
                Expr::Paren(paren) => stack.push((&*paren.expr, depth + 1)),
                Expr::Binary(binary) => {
                    stack.push((&*binary.lhs, depth + 1));
                    stack.push((&*binary.rhs, depth + 1));
                },
            }
        }

        height
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        if let Ok(close_paren) = input.peek::<CloseParen>() {
            return Err(Error::new_fatal(
                vec![close_paren.span],
                kind::UnclosedParenthesis { opening: false },
            ));
        }

        let lhs = input.try_parse::<Primary>()?;
        Binary::parse_expr(input, lhs.into(), Precedence::Any)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
        }
    }
}

/// Represents a primary expression.
///
/// Primary expressions are the operands of binary operators: literals and parenthesized
/// expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primary {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),
}

impl Parse for Primary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let _ = crate::try_parse_catch_fatal!(input.try_parse::<Literal>().map(Self::Literal));
        let _ = crate::try_parse_catch_fatal!(input.try_parse::<Paren>().map(Self::Paren));

        // neither alternative applies; report the token that is actually here
        let token = input.next_token()?;
        Err(input.unexpected(&token, &[TokenKind::Number, TokenKind::Name, TokenKind::OpenParen]))
    }
}

impl From<Primary> for Expr {
    fn from(primary: Primary) -> Self {
        match primary {
            Primary::Literal(literal) => Self::Literal(literal),
            Primary::Paren(paren) => Self::Paren(paren),
        }
    }
}
