use super::Expr;

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first).
///
/// This iterator is created by [`Expr::post_order_iter`]. It keeps its own stack, so arbitrarily
/// deep expressions can be traversed without recursion.
pub struct ExprIter<'a> {
    stack: Vec<&'a Expr>,
    last_visited: Option<&'a Expr>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn new(expr: &'a Expr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a Expr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given expression is the last visited expression.
    fn is_last_visited(&self, expr: &Expr) -> bool {
        self.last_visited.is_some_and(|last| std::ptr::eq(last, expr))
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            match expr {
                Expr::Number(_) | Expr::Variable(_) => return self.visit(),
                Expr::Sum(left, right) | Expr::Product(left, right) => {
                    // both operands are done once the right one has been visited
                    if self.is_last_visited(right) {
                        return self.visit();
                    }
                    self.stack.push(right);
                    self.stack.push(left);
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::super::tests::{num, var};
    use super::*;

    #[test]
    fn leaf() {
        let expr = var("x");
        let visited = expr.post_order_iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(visited, vec!["x"]);
    }

    #[test]
    fn post_order() {
        // (x + 2) * y
        let expr = (var("x") + num(2.0)) * var("y");
        let visited = expr.post_order_iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(visited, vec![
            "x",
            "2.0",
            "(x + 2.0)",
            "y",
            "((x + 2.0) * y)",
        ]);
    }

    #[test]
    fn repeated_subtrees() {
        // equal but distinct operands must each be visited
        let expr = var("x") * var("x");
        assert_eq!(expr.post_order_iter().count(), 3);
    }

    #[test]
    fn deep_left_spine() {
        let expr = (0..2_000).fold(var("x"), |acc, _| acc + num(1.0));
        assert_eq!(expr.post_order_iter().count(), 4_001);
        assert_eq!(ExprIter::new(&expr).last(), Some(&expr));
    }
}
