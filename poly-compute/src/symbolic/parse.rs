//! Conversion from source text to [`Expr`].
//!
//! Parsing happens in two steps. First, [`poly_parser`] builds a syntax tree that remembers where
//! each node came from. Then the syntax tree is lowered into an [`Expr`]: parentheses disappear
//! into the tree structure, and every literal is validated.

use poly_parser::parser::{
    ast::{Expr as AstExpr, Literal},
    error::Error,
    token::op::BinOpKind,
    Parser,
};
use std::str::FromStr;
use super::{
    error::{InvalidLiteral, ParseError},
    expr::{Expr, Number, Variable},
};

/// Parses a polynomial expression.
///
/// The input may contain nonnegative number literals, variable names made of ASCII letters, `+`,
/// `*`, parentheses, and whitespace. Multiplication binds tighter than addition, and both
/// operators are left-associative: `a + b + c` is `(a + b) + c`. Parentheses only group; they do
/// not appear in the result.
///
/// ```
/// use poly_compute::symbolic::parse;
///
/// let expr = parse("x + 2 * y").unwrap();
/// assert_eq!(expr.to_string(), "(x + (2.0 * y))");
/// ```
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    parse_with_max_depth(input, None)
}

/// Parses a polynomial expression, rejecting input that nests more than `max_depth` levels deep.
///
/// Each pair of parentheses and each `+` or `*` in a chain counts as a level, so `x + x + x` is
/// two levels deep. The resulting [`Expr`] is never deeper than the limit, which bounds the
/// recursion of [`Expr::derivative`], rendering, and comparison. With `None`, nesting is
/// unlimited, and this is equivalent to [`parse`].
pub fn parse_with_max_depth(input: &str, max_depth: Option<usize>) -> Result<Expr, ParseError> {
    let ast = Parser::new(input)
        .max_depth(max_depth)
        .try_parse_full::<AstExpr>()
        .and_then(Expr::try_from)
        .map_err(ParseError::from);

    match &ast {
        Ok(expr) => log::debug!("parsed `{}` into {} node(s)", input, expr.node_count()),
        Err(err) => log::debug!("failed to parse `{}`: {}", input, err),
    }

    ast
}

impl TryFrom<&Literal> for Expr {
    type Error = Error;

    fn try_from(literal: &Literal) -> Result<Self, Self::Error> {
        let expr = match literal {
            Literal::Number(num) => Number::new(num.value).map(Expr::Number),
            Literal::Symbol(sym) => Variable::new(sym.name.as_str()).map(Expr::Variable),
        };
        expr.map_err(|reason| Error::new(vec![literal.span()], InvalidLiteral { reason }))
    }
}

impl TryFrom<&AstExpr> for Expr {
    type Error = Error;

    fn try_from(ast: &AstExpr) -> Result<Self, Self::Error> {
        match ast.innermost() {
            AstExpr::Literal(literal) => Expr::try_from(literal),
            AstExpr::Binary(binary) => {
                let left = Expr::try_from(&*binary.lhs)?;
                let right = Expr::try_from(&*binary.rhs)?;
                Ok(match binary.op.kind {
                    BinOpKind::Add => Expr::sum(left, right),
                    BinOpKind::Mul => Expr::product(left, right),
                })
            },
            // `innermost` strips every layer of parentheses
            AstExpr::Paren(paren) => Expr::try_from(&*paren.expr),
        }
    }
}

impl TryFrom<AstExpr> for Expr {
    type Error = Error;

    fn try_from(ast: AstExpr) -> Result<Self, Self::Error> {
        Expr::try_from(&ast)
    }
}

impl FromStr for Expr {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
