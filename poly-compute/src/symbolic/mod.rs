//! Algebraic manipulation of polynomial expressions.
//!
//! # Expression representation
//!
//! Expressions in this module are represented as a binary tree of [`Expr`] nodes. It's similar
//! to the [`poly_parser::parser::ast::Expr`] nodes produced by [`poly_parser`], with the main
//! difference being that [`Expr`] nodes carry no span information and no parentheses. The tree
//! structure alone determines grouping.
//!
//! For example, the source `x + (y + z)` becomes a [`Expr::Sum`] whose right operand is another
//! [`Expr::Sum`], while `x + y + z` becomes a [`Expr::Sum`] whose _left_ operand is the nested
//! sum. These two expressions are **not** equal, even though they are mathematically equivalent.
//!
//! ```
//! use poly_compute::symbolic::{parse, Expr};
//!
//! let expr = parse("x + (y + z)").unwrap();
//! assert_eq!(expr, Expr::sum(
//!     Expr::variable("x").unwrap(),
//!     Expr::sum(Expr::variable("y").unwrap(), Expr::variable("z").unwrap()),
//! ));
//! assert_ne!(expr, parse("x + y + z").unwrap());
//! ```
//!
//! # Differentiation
//!
//! [`derivative`] applies the constant, variable, sum, and product rules, and returns the result
//! as-is. It does not simplify.
//!
//! # Substitution
//!
//! [`simplify`] substitutes values for the variables bound in an [`Env`], and evaluates the
//! expression to a single number if no variables remain.

pub mod derivative;
pub mod error;
pub mod expr;
pub mod parse;
pub mod simplify;

pub use derivative::derivative;
pub use error::{ConstructionError, DerivativeError, ParseError};
pub use expr::{Expr, Number, Variable};
pub use parse::{parse, parse_with_max_depth};
pub use simplify::{simplify, Env};
