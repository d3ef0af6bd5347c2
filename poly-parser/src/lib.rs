//! Parser for polynomial expressions built from nonnegative numbers, variables, addition and
//! multiplication.
//!
//! ```
//! use poly_parser::parser::{ast::Expr, Parser};
//!
//! let mut parser = Parser::new("x * (y + 2.5)");
//! let expr = parser.try_parse_full::<Expr>().unwrap();
//! assert_eq!(expr.span(), 0..13);
//! ```

pub mod parser;
pub mod tokenizer;
