use crate::error::Error;
use crate::node::{Expr, Node};
use ress::Position;

type Res = Result<(), Error>;

/// A simple reference is anything that could name a storage
/// location, the operator producing expressions can never be
/// assigned to
pub fn is_simple_reference(expr: &Expr) -> bool {
    match expr {
        Expr::Conditional(_)
        | Expr::Logical(_)
        | Expr::Binary(_)
        | Expr::Update(_)
        | Expr::Unary(_) => false,
        Expr::Paren(inner) => is_simple_reference(&inner.expr),
        _ => true,
    }
}

/// Validate the expression form of a `for-in`/`for-of` head that was
/// not re-interpreted as a pattern, `for (a.b in c)` is fine,
/// `for (a + b in c)` is not
pub fn check_loop_head_expr(expr: &Expr, pos: Position) -> Res {
    match expr {
        Expr::Ident(_) | Expr::Member(_) => Ok(()),
        Expr::Paren(inner) => check_loop_head_expr(&inner.expr, pos),
        _ => Err(Error::InvalidLHS(pos)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{BinaryExpr, BinaryOp, Ident};
    use ress::{Position, SourceLocation};

    fn ident(name: &str) -> Expr {
        Expr::Ident(Ident {
            name: name.into(),
            loc: SourceLocation::new(Position::new(1, 0), Position::new(1, name.len())),
        })
    }

    #[test]
    fn simple_references() {
        assert!(is_simple_reference(&ident("a")));
        let sum = Expr::Binary(BinaryExpr {
            operator: BinaryOp::Plus,
            left: Box::new(ident("a")),
            right: Box::new(ident("b")),
            loc: SourceLocation::new(Position::new(1, 0), Position::new(1, 5)),
        });
        assert!(!is_simple_reference(&sum));
        assert!(check_loop_head_expr(&sum, sum.loc().start).is_err());
    }
}
