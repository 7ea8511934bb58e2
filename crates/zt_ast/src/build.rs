//! Build helpers for expression construction.
//!
//! Two families:
//! - Raw builders (`add2`, `sub2`, `mul2`, `div2`) always create the
//!   operation node and preserve operand order exactly.
//! - `*_fold` builders fold two numeric literals and drop additive/multiplicative
//!   identities (`0+x`, `x-0`, `1*x`, `0*x`, `x/1`). Nothing else is simplified.
//!   The polynomial layer uses these to keep convolution output small.

use crate::expression::{BinOp, Context, Expr, ExprId};
use num_rational::BigRational;
use num_traits::{One, Zero};

#[inline]
pub fn add2(ctx: &mut Context, a: ExprId, b: ExprId) -> ExprId {
    ctx.add(Expr::Add(a, b))
}

#[inline]
pub fn sub2(ctx: &mut Context, a: ExprId, b: ExprId) -> ExprId {
    ctx.add(Expr::Sub(a, b))
}

#[inline]
pub fn mul2(ctx: &mut Context, a: ExprId, b: ExprId) -> ExprId {
    ctx.add(Expr::Mul(a, b))
}

#[inline]
pub fn div2(ctx: &mut Context, a: ExprId, b: ExprId) -> ExprId {
    ctx.add(Expr::Div(a, b))
}

/// Raw builder dispatching on the operator.
#[inline]
pub fn binary(ctx: &mut Context, op: BinOp, a: ExprId, b: ExprId) -> ExprId {
    ctx.add(Expr::binary(op, a, b))
}

/// Exact value of `a op b` when both sides are literals.
///
/// Returns `None` for non-literals and for division by a literal zero, which
/// is left in the tree for evaluation to report.
fn fold_literals(ctx: &Context, op: BinOp, a: ExprId, b: ExprId) -> Option<BigRational> {
    let qa = ctx.as_number(a)?;
    let qb = ctx.as_number(b)?;
    match op {
        BinOp::Add => Some(qa + qb),
        BinOp::Sub => Some(qa - qb),
        BinOp::Mul => Some(qa * qb),
        BinOp::Div if qb.is_zero() => None,
        BinOp::Div => Some(qa / qb),
    }
}

fn is_zero(ctx: &Context, id: ExprId) -> bool {
    ctx.as_number(id).is_some_and(|q| q.is_zero())
}

fn is_one(ctx: &Context, id: ExprId) -> bool {
    ctx.as_number(id).is_some_and(|q| q.is_one())
}

/// Folding builder dispatching on the operator.
pub fn binary_fold(ctx: &mut Context, op: BinOp, a: ExprId, b: ExprId) -> ExprId {
    if let Some(q) = fold_literals(ctx, op, a, b) {
        return ctx.rational(q);
    }
    match op {
        BinOp::Add if is_zero(ctx, a) => b,
        BinOp::Add | BinOp::Sub if is_zero(ctx, b) => a,
        BinOp::Mul if is_zero(ctx, a) || is_zero(ctx, b) => ctx.zero(),
        BinOp::Mul if is_one(ctx, a) => b,
        BinOp::Mul | BinOp::Div if is_one(ctx, b) => a,
        _ => binary(ctx, op, a, b),
    }
}

#[inline]
pub fn add2_fold(ctx: &mut Context, a: ExprId, b: ExprId) -> ExprId {
    binary_fold(ctx, BinOp::Add, a, b)
}

#[inline]
pub fn sub2_fold(ctx: &mut Context, a: ExprId, b: ExprId) -> ExprId {
    binary_fold(ctx, BinOp::Sub, a, b)
}

#[inline]
pub fn mul2_fold(ctx: &mut Context, a: ExprId, b: ExprId) -> ExprId {
    binary_fold(ctx, BinOp::Mul, a, b)
}

#[inline]
pub fn div2_fold(ctx: &mut Context, a: ExprId, b: ExprId) -> ExprId {
    binary_fold(ctx, BinOp::Div, a, b)
}

/// `-x`: a negated literal for constants, `0 - x` otherwise.
pub fn neg_fold(ctx: &mut Context, x: ExprId) -> ExprId {
    if let Some(q) = ctx.as_number(x) {
        let negated = -q.clone();
        return ctx.rational(negated);
    }
    let zero = ctx.zero();
    sub2(ctx, zero, x)
}

/// Left-folded sum of `terms`; `0` for an empty slice.
pub fn sum_fold(ctx: &mut Context, terms: &[ExprId]) -> ExprId {
    match terms.split_first() {
        None => ctx.zero(),
        Some((&first, rest)) => rest
            .iter()
            .fold(first, |acc, &t| add2_fold(ctx, acc, t)),
    }
}
