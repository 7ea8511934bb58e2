//! Numeric evaluation of expressions.
//!
//! Every variable must be bound: an unbound variable is reported as
//! [`EvalError::UnboundVariable`] rather than defaulted. A divisor that
//! evaluates to exactly zero is [`EvalError::DivisionByZero`].

use crate::error::EvalError;
use crate::expression::{BinOp, Context, Expr, ExprId};
use crate::symbol::SymbolId;
use crate::traversal::post_order;
use num_rational::BigRational;
use num_traits::{Float, NumCast, ToPrimitive};
use rustc_hash::FxHashMap;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// A binding environment: variable identity to numeric value.
pub trait Bindings<F> {
    fn value_of(&self, sym: SymbolId) -> Option<F>;
}

impl<F: Copy, S: BuildHasher> Bindings<F> for HashMap<SymbolId, F, S> {
    fn value_of(&self, sym: SymbolId) -> Option<F> {
        self.get(&sym).copied()
    }
}

impl<F: Copy> Bindings<F> for BTreeMap<SymbolId, F> {
    fn value_of(&self, sym: SymbolId) -> Option<F> {
        self.get(&sym).copied()
    }
}

impl<F: Copy> Bindings<F> for [(SymbolId, F)] {
    fn value_of(&self, sym: SymbolId) -> Option<F> {
        self.iter().find(|(s, _)| *s == sym).map(|&(_, v)| v)
    }
}

impl<F, B: Bindings<F> + ?Sized> Bindings<F> for &B {
    fn value_of(&self, sym: SymbolId) -> Option<F> {
        (**self).value_of(sym)
    }
}

/// Environment binding nothing; evaluates closed expressions only.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBindings;

impl<F> Bindings<F> for NoBindings {
    fn value_of(&self, _sym: SymbolId) -> Option<F> {
        None
    }
}

/// Convert an exact literal to the sample type.
pub fn number_to_float<F: Float>(q: &BigRational) -> Result<F, EvalError> {
    q.to_f64()
        .and_then(<F as NumCast>::from)
        .ok_or_else(|| EvalError::NotRepresentable(q.to_string()))
}

#[inline]
fn apply<F: Float>(op: BinOp, a: F, b: F) -> Result<F, EvalError> {
    Ok(match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
        BinOp::Div => {
            if b.is_zero() {
                return Err(EvalError::DivisionByZero);
            }
            a / b
        }
    })
}

/// Evaluate `root` against `bindings`.
///
/// Shared sub-expressions are evaluated once per call.
pub fn evaluate<F, B>(ctx: &Context, root: ExprId, bindings: &B) -> Result<F, EvalError>
where
    F: Float,
    B: Bindings<F> + ?Sized,
{
    ctx.try_get(root)?;

    let mut values: FxHashMap<ExprId, F> = FxHashMap::default();
    for id in post_order(ctx, root) {
        let node = ctx.get(id);
        let value = match node {
            Expr::Number(q) => number_to_float(q)?,
            Expr::Variable(sym) => {
                bindings
                    .value_of(*sym)
                    .ok_or_else(|| EvalError::UnboundVariable {
                        name: ctx.sym_name(*sym).to_string(),
                    })?
            }
            Expr::Add(l, r) => apply(BinOp::Add, values[l], values[r])?,
            Expr::Sub(l, r) => apply(BinOp::Sub, values[l], values[r])?,
            Expr::Mul(l, r) => apply(BinOp::Mul, values[l], values[r])?,
            Expr::Div(l, r) => apply(BinOp::Div, values[l], values[r])?,
        };
        values.insert(id, value);
    }

    Ok(values[&root])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{add2, div2, mul2, sub2};
    use crate::symbol::SAMPLE_PERIOD_SYMBOL;

    #[test]
    fn test_evaluate_constant() {
        let mut ctx = Context::new();
        let five = ctx.num(5);
        let v: f64 = evaluate(&ctx, five, &NoBindings).unwrap();
        assert_eq!(v, 5.0);
    }

    #[test]
    fn test_evaluate_operators() {
        let mut ctx = Context::new();
        let t = ctx.sample_period();
        let two = ctx.num(2);
        let three = ctx.num(3);
        // ((2 / T) - 3) * (T + 2)
        let q = div2(&mut ctx, two, t);
        let d = sub2(&mut ctx, q, three);
        let s = add2(&mut ctx, t, two);
        let e = mul2(&mut ctx, d, s);

        let env: BTreeMap<SymbolId, f64> = [(SAMPLE_PERIOD_SYMBOL, 0.5)].into_iter().collect();
        let v = evaluate(&ctx, e, &env).unwrap();
        assert_eq!(v, (2.0 / 0.5 - 3.0) * (0.5 + 2.0));
    }

    #[test]
    fn test_unbound_variable_is_error() {
        let mut ctx = Context::new();
        let tau = ctx.var("tau");
        let one = ctx.num(1);
        let e = add2(&mut ctx, one, tau);
        let err = evaluate::<f64, _>(&ctx, e, &NoBindings).unwrap_err();
        assert_eq!(
            err,
            EvalError::UnboundVariable {
                name: "tau".to_string()
            }
        );
    }

    #[test]
    fn test_division_by_zero_is_error() {
        let mut ctx = Context::new();
        let one = ctx.num(1);
        let t = ctx.sample_period();
        let e = div2(&mut ctx, one, t);
        let env = [(SAMPLE_PERIOD_SYMBOL, 0.0f32)];
        let err = evaluate(&ctx, e, &env[..]).unwrap_err();
        assert_eq!(err, EvalError::DivisionByZero);
    }

    #[test]
    fn test_evaluate_in_f32() {
        let mut ctx = Context::new();
        let half = ctx.float(0.5).unwrap();
        let two = ctx.num(2);
        let e = mul2(&mut ctx, half, two);
        let v: f32 = evaluate(&ctx, e, &NoBindings).unwrap();
        assert_eq!(v, 1.0f32);
    }
}
