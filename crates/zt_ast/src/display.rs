//! Display formatting for expressions.
//!
//! `Add`, `Sub` and `Div` render as `(A op B)`; `Mul` renders as `A * B` with no
//! parentheses of its own. Integers print as integers, other rationals as
//! their nearest `f64`, variables as their interned name.

use crate::expression::{Context, Expr, ExprId};
use num_rational::BigRational;
use num_traits::ToPrimitive;
use std::fmt;

pub struct DisplayExpr<'a> {
    pub context: &'a Context,
    pub id: ExprId,
}

impl<'a> DisplayExpr<'a> {
    pub fn new(context: &'a Context, id: ExprId) -> Self {
        Self { context, id }
    }

    fn child(&self, id: ExprId) -> DisplayExpr<'a> {
        DisplayExpr {
            context: self.context,
            id,
        }
    }
}

pub(crate) fn fmt_number(q: &BigRational, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if q.is_integer() {
        write!(f, "{}", q.numer())
    } else {
        match q.to_f64() {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "{}", q),
        }
    }
}

impl fmt::Display for DisplayExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Ok(expr) = self.context.try_get(self.id) else {
            return write!(f, "<{}>", self.id);
        };
        match expr {
            Expr::Number(q) => fmt_number(q, f),
            Expr::Variable(sym) => write!(f, "{}", self.context.sym_name(*sym)),
            Expr::Mul(l, r) => write!(f, "{} * {}", self.child(*l), self.child(*r)),
            Expr::Add(l, r) | Expr::Sub(l, r) | Expr::Div(l, r) => {
                let op = expr.as_binary().map_or("?", |(op, _, _)| op.symbol());
                write!(f, "({} {} {})", self.child(*l), op, self.child(*r))
            }
        }
    }
}
