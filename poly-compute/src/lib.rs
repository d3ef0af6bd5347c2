//! Symbolic manipulation of polynomial expressions.
//!
//! Expressions are immutable trees of [`Expr`] nodes built from nonnegative numbers, variables,
//! sums and products. They can be parsed from text, rendered back into a canonical fully
//! parenthesized form, compared structurally, differentiated with respect to a variable, and
//! evaluated against an environment of variable bindings.
//!
//! ```
//! use poly_compute::symbolic::{derivative, parse, Expr};
//!
//! let expr = parse("x * y").unwrap();
//! let deriv = derivative(&expr, "x").unwrap();
//! assert_eq!(deriv.to_string(), "((1.0 * y) + (x * 0.0))");
//! assert_eq!(parse(&deriv.to_string()).unwrap(), deriv);
//! ```
//!
//! [`Expr`]: symbolic::Expr

pub mod symbolic;
