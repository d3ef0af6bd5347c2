//! Substitution of variables with values from an environment.
//!
//! [`simplify`] replaces each variable bound in an [`Env`] with its value. If that leaves no
//! variables at all, the expression is evaluated down to a single [`Number`]. Nothing else is
//! rewritten: an expression that still contains variables keeps its exact shape, including terms
//! such as `(x * 0.0)`.

use std::collections::HashMap;
use super::{
    error::ConstructionError,
    expr::{Expr, Number, Variable},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An environment of variable bindings to substitute into an expression.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Env {
    /// The value bound to each variable.
    vars: HashMap<Variable, Number>,
}

impl Env {
    /// Creates an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the variable `name` to `value`, replacing any previous binding. Fails if the name
    /// is not a valid variable name, or the value is not a valid number.
    pub fn add_var(&mut self, name: &str, value: f64) -> Result<(), ConstructionError> {
        let var = Variable::new(name)?;
        let num = Number::new(value)?;
        self.insert(var, num);
        Ok(())
    }

    /// Binds an already validated variable to an already validated number, returning the
    /// previous value, if any.
    pub fn insert(&mut self, var: Variable, value: Number) -> Option<Number> {
        self.vars.insert(var, value)
    }

    /// Returns the value bound to the variable `name`, if any.
    pub fn get_var(&self, name: &str) -> Option<Number> {
        self.vars.get(name).copied()
    }

    /// Returns the value bound to the given variable, if any.
    pub fn get(&self, var: &Variable) -> Option<Number> {
        self.vars.get(var).copied()
    }

    /// Returns the number of bound variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns true if no variables are bound.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl FromIterator<(Variable, Number)> for Env {
    fn from_iter<I: IntoIterator<Item = (Variable, Number)>>(iter: I) -> Self {
        Self { vars: iter.into_iter().collect() }
    }
}

/// Replaces every variable in `expr` that is bound in `env`, leaving the others in place.
fn substitute(expr: &Expr, env: &Env) -> Expr {
    match expr {
        Expr::Number(_) => expr.clone(),
        Expr::Variable(var) => match env.get(var) {
            Some(value) => {
                log::trace!("substituting {} = {}", var, value);
                Expr::Number(value)
            },
            None => expr.clone(),
        },
        Expr::Sum(left, right) => Expr::sum(substitute(left, env), substitute(right, env)),
        Expr::Product(left, right) => Expr::product(substitute(left, env), substitute(right, env)),
    }
}

/// Evaluates an expression that contains no variables. Returns [`None`] if it does.
fn evaluate(expr: &Expr) -> Option<f64> {
    match expr {
        Expr::Number(num) => Some(num.value()),
        Expr::Variable(_) => None,
        Expr::Sum(left, right) => Some(evaluate(left)? + evaluate(right)?),
        Expr::Product(left, right) => Some(evaluate(left)? * evaluate(right)?),
    }
}

/// Substitutes the variables bound in `env` into `expr`.
///
/// If no variables remain afterwards, the expression is evaluated to a single [`Expr::Number`].
/// Otherwise, the substituted expression is returned with its shape unchanged. Variables in `env`
/// that do not appear in `expr` are ignored.
///
/// Returns an error if evaluation overflows to infinity.
///
/// ```
/// use poly_compute::symbolic::{parse, simplify, Env};
///
/// let mut env = Env::new();
/// env.add_var("x", 2.0).unwrap();
///
/// let partial = simplify(&parse("x * y + 1").unwrap(), &env).unwrap();
/// assert_eq!(partial.to_string(), "((2.0 * y) + 1.0)");
///
/// let total = simplify(&parse("x * x + 1").unwrap(), &env).unwrap();
/// assert_eq!(total.to_string(), "5.0");
/// ```
pub fn simplify(expr: &Expr, env: &Env) -> Result<Expr, ConstructionError> {
    let substituted = substitute(expr, env);
    match evaluate(&substituted) {
        Some(value) => {
            log::trace!("evaluated {} to {}", substituted, value);
            Expr::number(value)
        },
        None => Ok(substituted),
    }
}
