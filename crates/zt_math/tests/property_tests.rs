use proptest::prelude::*;
use std::collections::HashMap;
use zt_ast::{Context, NoBindings, SymbolId};
use zt_math::{extract, Polynomial, RationalFraction};

fn numeric(ctx: &mut Context, values: &[i64]) -> Polynomial {
    Polynomial::new(values.iter().map(|&v| ctx.num(v)).collect::<Vec<_>>())
}

fn arb_coeffs() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-9i64..10, 1..6)
}

fn arb_nonzero_coeffs() -> impl Strategy<Value = Vec<i64>> {
    (prop::collection::vec(-9i64..10, 0..4), 1i64..10).prop_map(|(mut v, lead)| {
        v.push(lead);
        v
    })
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// degree(p*q) = degree(p) + degree(q) and (p*q)(v) = p(v) * q(v).
    #[test]
    fn polynomial_product_laws(p in arb_coeffs(), q in arb_coeffs(), v in -2.0f64..2.0) {
        let mut ctx = Context::new();
        let p = numeric(&mut ctx, &p);
        let q = numeric(&mut ctx, &q);
        let pq = p.mul(&mut ctx, &q);

        prop_assert_eq!(pq.degree(), p.degree() + q.degree());

        let pv: f64 = p.evaluate(&ctx, &NoBindings, v).unwrap();
        let qv: f64 = q.evaluate(&ctx, &NoBindings, v).unwrap();
        let pqv: f64 = pq.evaluate(&ctx, &NoBindings, v).unwrap();
        prop_assert!(close(pqv, pv * qv), "{} vs {}", pqv, pv * qv);
    }

    /// Fraction arithmetic agrees with arithmetic on the evaluated fractions.
    #[test]
    fn fraction_arithmetic_matches_numeric(
        n1 in arb_coeffs(),
        d1 in arb_nonzero_coeffs(),
        n2 in arb_nonzero_coeffs(),
        d2 in arb_nonzero_coeffs(),
        v in 10.5f64..11.5,
    ) {
        // Positive leading coefficients and v > 10 keep every denominator away from zero.
        let mut ctx = Context::new();
        let r1 = RationalFraction::new(numeric(&mut ctx, &n1), numeric(&mut ctx, &d1));
        let r2 = RationalFraction::new(numeric(&mut ctx, &n2), numeric(&mut ctx, &d2));
        let a: f64 = r1.evaluate(&ctx, &NoBindings, v).unwrap();
        let b: f64 = r2.evaluate(&ctx, &NoBindings, v).unwrap();
        prop_assume!(b.abs() > 1e-6);

        let sum = r1.add(&mut ctx, &r2);
        let diff = r1.sub(&mut ctx, &r2);
        let prod = r1.mul(&mut ctx, &r2);
        let quot = r1.div(&mut ctx, &r2);

        let eval = |r: &RationalFraction| -> f64 { r.evaluate(&ctx, &NoBindings, v).unwrap() };
        prop_assert!(close(eval(&sum), a + b));
        prop_assert!(close(eval(&diff), a - b));
        prop_assert!(close(eval(&prod), a * b));
        prop_assert!(close(eval(&quot), a / b));
    }

    /// Extracting a polynomial expression in x reproduces its values.
    #[test]
    fn extraction_of_monomial_sum(c in arb_coeffs(), v in -2.0f64..2.0) {
        let mut ctx = Context::new();
        let x_sym = ctx.intern_symbol("x");
        let x = ctx.symbol(x_sym);
        // c0 + x*(c1 + x*(c2 + ...))
        let mut e = ctx.num(*c.last().unwrap());
        for &ci in c.iter().rev().skip(1) {
            let k = ctx.num(ci);
            let xe = zt_ast::build::mul2(&mut ctx, x, e);
            e = zt_ast::build::add2(&mut ctx, k, xe);
        }
        let r = extract(&mut ctx, e, x_sym).unwrap();
        prop_assert_eq!(r.numerator.degree(), c.len() - 1);
        prop_assert_eq!(r.denominator.degree(), 0);

        let env: HashMap<SymbolId, f64> = [(x_sym, v)].into_iter().collect();
        let direct: f64 = zt_ast::evaluate(&ctx, e, &env).unwrap();
        let via: f64 = r.evaluate(&ctx, &NoBindings, v).unwrap();
        prop_assert!(close(direct, via), "{} vs {}", direct, via);
    }
}
