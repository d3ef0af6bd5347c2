use crate::parser::{
    ast::expr::{Expr, Primary},
    error::Error,
    token::op::BinOp,
    Parser,
    Precedence,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses the operand to the right of an operator. An operator must always be followed by an
    /// operand, so failure here is fatal.
    fn parse_operand(input: &mut Parser) -> Result<Expr, Error> {
        input.try_parse::<Primary>()
            .map(Expr::from)
            .map_err(Error::into_fatal)
    }

    /// After parsing the left-hand-side, the operator, and the right-hand-side of a potential
    /// binary expression, parse ahead to see if the right-hand-side is incomplete.
    fn complete_rhs(input: &mut Parser, lhs: Expr, op: BinOp, mut rhs: Expr) -> Result<Expr, Error> {
        let precedence = op.precedence();

        // before creating the `lhs op rhs` node, we should check the precedence of the following
        // operator, if any
        // this is because we can't parse an expression like `3 + 4 * 5` as (3 + 4) * 5
        while let Ok(next_op) = input.peek::<BinOp>() {
            if next_op.precedence() > precedence {
                // this operator binds tighter, so we should parse its expression starting with
                // `rhs` first
                rhs = Self::parse_expr(input, rhs, next_op.precedence())?;
            } else {
                // this operator has lower or equal precedence; both operators are
                // left-associative, so in scenarios like `1 * 2 + 3` or `1 * 2 * 3`, `lhs`
                // becomes `1 * 2` and the operator is parsed on the next iteration of the outside
                // loop
                break;
            }
        }

        // create the binary node representing `lhs op rhs`
        let span = lhs.span().start..rhs.span().end;
        let op_span = op.span.clone();
        let node = Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        });

        // a chain of operators nests as deeply as a chain of parentheses
        input.check_depth(&node, op_span)?;
        Ok(node)
    }

    /// Parses a chain of binary operators whose precedence is at least `precedence`, using `lhs`
    /// as the leftmost operand.
    pub fn parse_expr(input: &mut Parser, mut lhs: Expr, precedence: Precedence) -> Result<Expr, Error> {
        while let Ok(op) = input.peek::<BinOp>() {
            if op.precedence() < precedence {
                break;
            }

            input.try_parse::<BinOp>()?;
            let rhs = Self::parse_operand(input)?;
            lhs = Self::complete_rhs(input, lhs, op, rhs)?;
        }

        Ok(lhs)
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op, self.rhs)
    }
}
