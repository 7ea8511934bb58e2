//! Extraction: normalize an expression into a rational fraction of one
//! variable.
//!
//! The rewrite is a structural induction. The search variable becomes the
//! monomial `[0, 1] / [1]`, every other leaf becomes a degree-0 fraction whose
//! coefficient is the leaf itself, and each operator applies the matching
//! fraction arithmetic to its extracted operands.

use crate::budget::ExtractBudget;
use crate::error::MathError;
use crate::polynomial::Polynomial;
use crate::rational_fraction::RationalFraction;
use rustc_hash::FxHashMap;
use zt_ast::traversal::post_order;
use zt_ast::{BinOp, Context, Expr, ExprId, SymbolId};

/// Extract `expr` as a fraction in `var` under the default budget.
pub fn extract(
    ctx: &mut Context,
    expr: ExprId,
    var: SymbolId,
) -> Result<RationalFraction, MathError> {
    extract_with(ctx, expr, var, &ExtractBudget::default())
}

/// Extract `expr` as a fraction in `var`, failing once `budget` is spent.
///
/// Shared sub-expressions are extracted once.
pub fn extract_with(
    ctx: &mut Context,
    expr: ExprId,
    var: SymbolId,
    budget: &ExtractBudget,
) -> Result<RationalFraction, MathError> {
    // Children of an issued node are always issued, so checking the root is enough.
    if !ctx.contains_id(expr) {
        return Err(MathError::UnsupportedExpression(expr));
    }

    let meter = budget.meter(ctx);
    let mut done: FxHashMap<ExprId, RationalFraction> = FxHashMap::default();

    for id in post_order(ctx, expr) {
        let node = ctx.get(id).clone();
        let fraction = match node {
            Expr::Variable(sym) if sym == var => {
                let x = Polynomial::indeterminate(ctx);
                RationalFraction::from_poly(ctx, x)
            }
            Expr::Variable(_) | Expr::Number(_) => {
                RationalFraction::from_poly(ctx, Polynomial::constant(id))
            }
            Expr::Add(l, r) => combine(ctx, &done, BinOp::Add, l, r)?,
            Expr::Sub(l, r) => combine(ctx, &done, BinOp::Sub, l, r)?,
            Expr::Mul(l, r) => combine(ctx, &done, BinOp::Mul, l, r)?,
            Expr::Div(l, r) => combine(ctx, &done, BinOp::Div, l, r)?,
        };
        meter.check(ctx)?;
        done.insert(id, fraction);
    }

    let result = done
        .remove(&expr)
        .ok_or(MathError::UnsupportedExpression(expr))?;
    tracing::trace!(
        numerator_degree = result.numerator.degree(),
        denominator_degree = result.denominator.degree(),
        nodes_created = meter.created(ctx),
        "extracted rational fraction"
    );
    Ok(result)
}

fn combine(
    ctx: &mut Context,
    done: &FxHashMap<ExprId, RationalFraction>,
    op: BinOp,
    l: ExprId,
    r: ExprId,
) -> Result<RationalFraction, MathError> {
    let a = done.get(&l).ok_or(MathError::UnsupportedExpression(l))?;
    let b = done.get(&r).ok_or(MathError::UnsupportedExpression(r))?;
    Ok(match op {
        BinOp::Add => a.add(ctx, b),
        BinOp::Sub => a.sub(ctx, b),
        BinOp::Mul => a.mul(ctx, b),
        BinOp::Div => a.div(ctx, b),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use zt_ast::build::{add2, div2, mul2, sub2};
    use zt_ast::NoBindings;

    #[test]
    fn test_extract_constant() {
        let mut ctx = Context::new();
        let five = ctx.num(5);
        let x = ctx.intern_symbol("x");
        let r = extract(&mut ctx, five, x).unwrap();
        assert_eq!(r.numerator.coeffs(), &[five]);
        let one = ctx.one();
        assert_eq!(r.denominator.coeffs(), &[one]);
    }

    #[test]
    fn test_extract_search_variable() {
        let mut ctx = Context::new();
        let x_sym = ctx.intern_symbol("x");
        let x = ctx.symbol(x_sym);
        let r = extract(&mut ctx, x, x_sym).unwrap();
        assert_eq!(r.display(&ctx).to_string(), "((0)X^0 (1)X^1) / ((1)X^0)");
        for v in [-2.0, 0.0, 0.5, 7.0] {
            let got: f64 = r.evaluate(&ctx, &NoBindings, v).unwrap();
            assert_eq!(got, v);
        }
    }

    #[test]
    fn test_foreign_variable_stays_symbolic() {
        let mut ctx = Context::new();
        let tau = ctx.var("tau");
        let x = ctx.intern_symbol("x");
        let r = extract(&mut ctx, tau, x).unwrap();
        assert_eq!(r.numerator.coeffs(), &[tau]);
        assert_eq!(r.numerator.degree(), 0);
    }

    #[test]
    fn test_nested_expression_matches_direct_evaluation() {
        let mut ctx = Context::new();
        // ((x + a) * x - 3) / (a * x + 1)
        let x_sym = ctx.intern_symbol("x");
        let x = ctx.symbol(x_sym);
        let a = ctx.var("a");
        let three = ctx.num(3);
        let one = ctx.one();
        let xa = add2(&mut ctx, x, a);
        let prod = mul2(&mut ctx, xa, x);
        let num = sub2(&mut ctx, prod, three);
        let ax = mul2(&mut ctx, a, x);
        let den = add2(&mut ctx, ax, one);
        let e = div2(&mut ctx, num, den);

        let r = extract(&mut ctx, e, x_sym).unwrap();
        let a_sym = ctx.lookup_symbol("a").unwrap();
        for xv in [0.25, 1.5, -2.0] {
            let env: HashMap<SymbolId, f64> = [(x_sym, xv), (a_sym, 0.7)].into_iter().collect();
            let direct: f64 = zt_ast::evaluate(&ctx, e, &env).unwrap();
            let via: f64 = r.evaluate(&ctx, &env, xv).unwrap();
            assert!((direct - via).abs() < 1e-12, "{direct} vs {via}");
        }
    }

    #[test]
    fn test_foreign_id_is_unsupported() {
        let mut big = Context::new();
        for i in 0..10 {
            big.num(i);
        }
        let foreign = big.num(99);
        let mut small = Context::new();
        let x = small.intern_symbol("x");
        assert_eq!(
            extract(&mut small, foreign, x),
            Err(MathError::UnsupportedExpression(foreign))
        );
    }

    #[test]
    fn test_budget_exceeded() {
        let mut ctx = Context::new();
        let x_sym = ctx.intern_symbol("x");
        let x = ctx.symbol(x_sym);
        let a = ctx.var("a");
        // (x + a) / (x + a) / (x + a) ... grows without cancellation
        let base = add2(&mut ctx, x, a);
        let mut e = base;
        for _ in 0..8 {
            e = div2(&mut ctx, e, base);
            e = add2(&mut ctx, e, a);
        }
        let err = extract_with(&mut ctx, e, x_sym, &ExtractBudget::with_max_nodes(50));
        assert!(matches!(err, Err(MathError::BudgetExceeded { limit: 50, .. })));

        assert!(extract_with(&mut ctx, e, x_sym, &ExtractBudget::unlimited()).is_ok());
    }
}
