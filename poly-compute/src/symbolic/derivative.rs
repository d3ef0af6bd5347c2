//! Symbolic differentiation.
//!
//! The derivative is computed by applying four rules bottom-up. No simplification is done
//! afterwards, so the result can contain terms such as `(x * 0.0)` or `(1.0 + 0.0)`. Use
//! [`simplify`](super::simplify) or an external simplifier to reduce them.

use super::{
    error::DerivativeError,
    expr::{Expr, Number, Variable},
};

/// `c' = 0`, `x' = 1`, `y' = 0`
fn leaf_rule(expr: &Expr, with: &Variable) -> Expr {
    match expr {
        Expr::Variable(var) if var == with => Expr::Number(Number::ONE),
        _ => Expr::Number(Number::ZERO),
    }
}

/// `(f + g)' = f' + g'`
fn sum_rule(f: &Expr, g: &Expr, with: &Variable) -> Expr {
    Expr::sum(f.derivative(with), g.derivative(with))
}

/// `(f * g)' = f' * g + f * g'`
fn product_rule(f: &Expr, g: &Expr, with: &Variable) -> Expr {
    let left = Expr::product(f.derivative(with), g.clone());
    let right = Expr::product(f.clone(), g.derivative(with));
    Expr::sum(left, right)
}

impl Expr {
    /// Computes the derivative of the expression with respect to the given variable.
    ///
    /// Every variable other than `with` is treated as a constant. The input is left untouched,
    /// and the result is a new, unsimplified expression.
    ///
    /// ```
    /// use poly_compute::symbolic::{Expr, Variable};
    ///
    /// let x = Variable::new("x").unwrap();
    /// let expr = Expr::from(x.clone()) * Expr::number(3.0).unwrap();
    /// assert_eq!(expr.derivative(&x).to_string(), "((1.0 * 3.0) + (x * 0.0))");
    /// ```
    pub fn derivative(&self, with: &Variable) -> Expr {
        match self {
            Self::Number(_) | Self::Variable(_) => leaf_rule(self, with),
            Self::Sum(f, g) => sum_rule(f, g, with),
            Self::Product(f, g) => product_rule(f, g, with),
        }
    }
}

/// Computes the derivative of `expr` with respect to the variable named `with`.
///
/// Returns an error if `with` is not a valid variable name. A valid name that does not appear in
/// `expr` is not an error; the derivative is then zero, but still unsimplified.
pub fn derivative(expr: &Expr, with: &str) -> Result<Expr, DerivativeError> {
    let var = Variable::new(with)
        .map_err(|_| DerivativeError::InvalidVariableName(with.to_string()))?;
    let result = expr.derivative(&var);
    log::trace!("d/d{} {} = {}", var, expr, result);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use super::super::{
        expr::tests::{num, var},
        parse::parse,
    };

    fn zero() -> Expr {
        num(0.0)
    }

    fn one() -> Expr {
        num(1.0)
    }

    /// `(1 + x) * (x * 1)`
    fn sum_times_product() -> Expr {
        (one() + var("x")) * (var("x") * one())
    }

    #[test]
    fn constant() {
        assert_eq!(derivative(&one(), "x").unwrap(), zero());
        assert_eq!(derivative(&num(2.5), "x").unwrap(), zero());
    }

    #[test]
    fn same_variable() {
        assert_eq!(derivative(&var("x"), "x").unwrap(), one());
    }

    #[test]
    fn other_variable() {
        assert_eq!(derivative(&var("y"), "x").unwrap(), zero());
        assert_eq!(derivative(&var("X"), "x").unwrap(), zero());
    }

    #[test]
    fn sum() {
        let expr = one() + var("x");
        assert_eq!(derivative(&expr, "x").unwrap(), zero() + one());
    }

    #[test]
    fn product() {
        let expr = var("x") * one();
        assert_eq!(derivative(&expr, "x").unwrap(), one() * one() + var("x") * zero());
    }

    #[test]
    fn product_of_variables() {
        let expr = var("x") * var("y");
        assert_eq!(derivative(&expr, "x").unwrap(), one() * var("y") + var("x") * zero());
        assert_eq!(derivative(&expr, "y").unwrap(), zero() * var("y") + var("x") * one());
    }

    #[test]
    fn nested_same_variable() {
        let left = (zero() + one()) * (var("x") * one());
        let right = (one() + var("x")) * (one() * one() + var("x") * zero());
        assert_eq!(derivative(&sum_times_product(), "x").unwrap(), left + right);
    }

    #[test]
    fn nested_other_variable() {
        let left = (zero() + zero()) * (var("x") * one());
        let right = (one() + var("x")) * (zero() * one() + var("x") * zero());
        assert_eq!(derivative(&sum_times_product(), "y").unwrap(), left + right);
    }

    #[test]
    fn rendered() {
        let expr = parse("x * x + 3").unwrap();
        assert_eq!(
            derivative(&expr, "x").unwrap().to_string(),
            "(((1.0 * x) + (x * 1.0)) + 0.0)",
        );
    }

    #[test]
    fn input_unchanged() {
        let expr = sum_times_product();
        let before = expr.clone();
        let _ = derivative(&expr, "x").unwrap();
        assert_eq!(expr, before);
    }

    #[test]
    fn invalid_names() {
        for name in ["", "x1", "x y", "+"] {
            assert_eq!(
                derivative(&var("x"), name),
                Err(DerivativeError::InvalidVariableName(name.to_string())),
            );
        }
    }

    #[test]
    fn repeated_derivatives_grow() {
        let mut expr = parse("x * x * x").unwrap();
        let mut sizes = vec![expr.node_count()];
        for _ in 0..3 {
            expr = derivative(&expr, "x").unwrap();
            sizes.push(expr.node_count());
        }
        assert!(sizes.windows(2).all(|w| w[0] < w[1]), "{:?}", sizes);
        assert!(!expr.is_constant());
    }
}
