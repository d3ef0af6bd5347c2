//! The expression tree that every symbolic operation in this crate works on.
//!
//! The [`Expr`](poly_parser::parser::ast::Expr) type from `poly_parser` remembers where each node
//! came from in the source code, and keeps the parentheses the user wrote. It is convenient for
//! reporting errors, but not for manipulation. This module defines a separate [`Expr`] that
//! contains only the mathematical structure.
//!
//! # Invariants
//!
//! Leaves are validated when they are created: a [`Number`] is always finite and nonnegative, and
//! a [`Variable`] name is always a nonempty string of ASCII letters. Sums and products can be
//! built from any two expressions. Once an [`Expr`] exists, no operation on it needs to check
//! these invariants again.
//!
//! # Structural equality
//!
//! Two expressions are equal if they have the same shape and the same leaves. The order of
//! operands matters: `x + y` is **not** equal to `y + x`, and `x + y` is never equal to `x * y`.
//! Grouping matters too: `(x + y) + z` and `x + (y + z)` are different expressions.

mod iter;

pub use iter::ExprIter;
use std::{
    borrow::Borrow,
    collections::BTreeSet,
    fmt,
    hash::{Hash, Hasher},
    ops::{Add, Mul},
};
use super::error::ConstructionError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The multiplier used to combine hash codes. Combining in this way keeps the hash sensitive to
/// the order of operands.
const HASH_MULTIPLIER: u64 = 31;

/// A nonnegative, finite number.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct Number(f64);

impl Number {
    /// The number `0`.
    pub const ZERO: Number = Number(0.0);

    /// The number `1`.
    pub const ONE: Number = Number(1.0);

    /// Creates a number. Fails if the value is negative, infinite, or NaN.
    ///
    /// Negative zero is stored as positive zero.
    pub fn new(value: f64) -> Result<Self, ConstructionError> {
        if value.is_finite() && value >= 0.0 {
            // `-0.0 >= 0.0` holds, so normalize it here; `0.0 + 0.0` is `+0.0`
            Ok(Self(value + 0.0))
        } else {
            Err(ConstructionError::InvalidValue(value))
        }
    }

    /// Returns the value of the number.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns the hash code of the number, derived from its bit pattern.
    pub fn hash_code(self) -> u64 {
        let bits = self.0.to_bits();
        bits ^ (bits >> 32)
    }
}

/// [`Eq`] is implemented manually because [`Number::new`] rejects NaN, the only value for which
/// `f64` equality is not reflexive.
impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl TryFrom<f64> for Number {
    type Error = ConstructionError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Number> for f64 {
    fn from(number: Number) -> Self {
        number.0
    }
}

/// Numbers are written with at least one fractional digit, and never in exponent notation, so
/// that the output can always be parsed back.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// A variable, named by a nonempty, case-sensitive string of ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Variable(String);

impl Variable {
    /// Creates a variable. Fails if the name is empty or contains anything other than ASCII
    /// letters.
    pub fn new(name: impl Into<String>) -> Result<Self, ConstructionError> {
        let name = name.into();
        if Self::is_valid_name(&name) {
            Ok(Self(name))
        } else {
            Err(ConstructionError::InvalidName(name))
        }
    }

    /// Returns true if `name` can be used as the name of a variable.
    pub fn is_valid_name(name: &str) -> bool {
        !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphabetic())
    }

    /// Returns the name of the variable.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Returns the hash code of the variable, folded over the bytes of its name.
    pub fn hash_code(&self) -> u64 {
        self.0.bytes().fold(0, |hash, b| {
            hash.wrapping_mul(HASH_MULTIPLIER).wrapping_add(u64::from(b))
        })
    }
}

impl TryFrom<String> for Variable {
    type Error = ConstructionError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl TryFrom<&str> for Variable {
    type Error = ConstructionError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl From<Variable> for String {
    fn from(var: Variable) -> Self {
        var.0
    }
}

/// Lets maps keyed by [`Variable`] be queried with a plain `&str`. The derived [`Hash`] and [`Eq`]
/// only look at the name, so they agree with those of `str`.
impl Borrow<str> for Variable {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Variable {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An immutable polynomial expression.
///
/// Each [`Expr::Sum`] and [`Expr::Product`] exclusively owns its two operands, so an expression
/// is always a tree. Operations that produce new expressions, such as [`Expr::derivative`],
/// allocate new trees and never modify their input.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A nonnegative number, such as `2` or `0.5`.
    Number(Number),

    /// A variable, such as `x` or `foo`.
    Variable(Variable),

    /// The sum of two expressions.
    Sum(Box<Expr>, Box<Expr>),

    /// The product of two expressions.
    Product(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Creates an [`Expr::Number`]. Fails if the value is negative, infinite, or NaN.
    pub fn number(value: f64) -> Result<Self, ConstructionError> {
        Number::new(value).map(Self::Number)
    }

    /// Creates an [`Expr::Variable`]. Fails if the name is empty or contains anything other than
    /// ASCII letters.
    pub fn variable(name: impl Into<String>) -> Result<Self, ConstructionError> {
        Variable::new(name).map(Self::Variable)
    }

    /// Creates the sum `left + right`.
    pub fn sum(left: Expr, right: Expr) -> Self {
        Self::Sum(Box::new(left), Box::new(right))
    }

    /// Creates the product `left * right`.
    pub fn product(left: Expr, right: Expr) -> Self {
        Self::Product(Box::new(left), Box::new(right))
    }

    /// If the expression is an [`Expr::Number`], returns the contained number.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Self::Number(num) => Some(*num),
            _ => None,
        }
    }

    /// If the expression is an [`Expr::Variable`], returns a reference to the contained variable.
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Self::Variable(var) => Some(var),
            _ => None,
        }
    }

    /// If the expression is an [`Expr::Sum`] or [`Expr::Product`], returns its left and right
    /// operands.
    pub fn operands(&self) -> Option<(&Expr, &Expr)> {
        match self {
            Self::Sum(left, right) | Self::Product(left, right) => Some((left, right)),
            Self::Number(_) | Self::Variable(_) => None,
        }
    }

    /// Returns true if the expression does not contain any variables.
    pub fn is_constant(&self) -> bool {
        self.post_order_iter().all(|expr| !matches!(expr, Self::Variable(_)))
    }

    /// Returns the names of the variables in the expression, in sorted order and without
    /// duplicates.
    pub fn variables(&self) -> BTreeSet<&str> {
        self.post_order_iter()
            .filter_map(|expr| expr.as_variable().map(Variable::name))
            .collect()
    }

    /// Returns the number of nodes in the expression tree.
    pub fn node_count(&self) -> usize {
        self.post_order_iter().count()
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter<'_> {
        ExprIter::new(self)
    }

    /// Returns the structural hash code of the expression.
    ///
    /// Expressions that are equal always have the same hash code. The hash code of a sum or
    /// product depends on the order of its operands, and sums and products over the same
    /// operands have different hash codes.
    pub fn hash_code(&self) -> u64 {
        match self {
            Self::Number(num) => num.hash_code(),
            Self::Variable(var) => var.hash_code(),
            Self::Sum(left, right) => combine_hash(1, left, right),
            Self::Product(left, right) => combine_hash(2, left, right),
        }
    }
}

/// Combines the hash codes of two operands, salted with a tag for the kind of node.
fn combine_hash(tag: u64, left: &Expr, right: &Expr) -> u64 {
    tag.wrapping_mul(HASH_MULTIPLIER)
        .wrapping_add(left.hash_code())
        .wrapping_mul(HASH_MULTIPLIER)
        .wrapping_add(right.hash_code())
}

impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

/// Renders the expression in its canonical form. Every sum and product is surrounded by
/// parentheses, so the output is unambiguous and parses back into an equal expression.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(num) => write!(f, "{}", num),
            Self::Variable(var) => write!(f, "{}", var),
            Self::Sum(left, right) => write!(f, "({} + {})", left, right),
            Self::Product(left, right) => write!(f, "({} * {})", left, right),
        }
    }
}

impl From<Number> for Expr {
    fn from(num: Number) -> Self {
        Self::Number(num)
    }
}

impl From<Variable> for Expr {
    fn from(var: Variable) -> Self {
        Self::Variable(var)
    }
}

/// Adds two [`Expr`]s together. No simplification is done.
impl Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::sum(self, rhs)
    }
}

/// Multiplies two [`Expr`]s together. No simplification is done.
impl Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::product(self, rhs)
    }
}
