//! A second-order low-pass checked against its hand-derived bilinear recurrence.

use approx::assert_relative_eq;
use proptest::prelude::*;
use zt_ast::build::{add2, div2, mul2};
use zt_ast::{Context, ExprId};
use zt_filter::IirFilter;

/// `w^2 / (s * (s + 2 zeta w) + w^2)`
///
/// Written in nested form: the expanded `s^2 + 2 zeta w s + w^2` would carry
/// an uncancelled `(Z + 1)` factor and realize as a third-order filter.
fn low_pass(ctx: &mut Context) -> ExprId {
    let w = ctx.var("w");
    let zeta = ctx.var("zeta");
    let s = ctx.laplace();
    let two = ctx.num(2);
    let w2 = mul2(ctx, w, w);
    let two_zeta = mul2(ctx, two, zeta);
    let two_zeta_w = mul2(ctx, two_zeta, w);
    let inner = add2(ctx, s, two_zeta_w);
    let s_inner = mul2(ctx, s, inner);
    let den = add2(ctx, s_inner, w2);
    div2(ctx, w2, den)
}

/// Reference recurrence from substituting `s = k (z - 1) / (z + 1)`, `k = 2 / T`.
fn reference(t: f64, w: f64, zeta: f64, input: &[f64]) -> Vec<f64> {
    let k = 2.0 / t;
    let w2 = w * w;
    let a0 = k * k + 2.0 * zeta * w * k + w2;
    let a1 = 2.0 * (w2 - k * k);
    let a2 = k * k - 2.0 * zeta * w * k + w2;
    let (b0, b1, b2) = (w2, 2.0 * w2, w2);
    let (mut x1, mut x2, mut y1, mut y2) = (0.0, 0.0, 0.0, 0.0);
    input
        .iter()
        .map(|&x| {
            let y = (b0 * x + b1 * x1 + b2 * x2 - a1 * y1 - a2 * y2) / a0;
            x2 = x1;
            x1 = x;
            y2 = y1;
            y1 = y;
            y
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn matches_reference_recurrence(
        t in 0.01f64..0.5,
        w in 0.5f64..10.0,
        zeta in 0.1f64..2.0,
        input in prop::collection::vec(-1.0f64..1.0, 1..40),
    ) {
        let mut ctx = Context::new();
        let h = low_pass(&mut ctx);
        let mut filter: IirFilter<f64> = IirFilter::from_laplace(ctx, h).unwrap();
        prop_assert_eq!(filter.order(), 2);
        filter.set_sample_period(t).unwrap();
        filter.set_variable_by_name("w", w).unwrap();
        filter.set_variable_by_name("zeta", zeta).unwrap();

        let got = filter.process_block(&input).unwrap();
        let expected = reference(t, w, zeta, &input);
        for (g, e) in got.iter().zip(&expected) {
            prop_assert!((g - e).abs() <= 1e-9 * (1.0 + e.abs()), "{} vs {}", g, e);
        }
    }
}

#[test]
fn dc_gain_is_unity() {
    let mut ctx = Context::new();
    let h = low_pass(&mut ctx);
    let mut filter: IirFilter<f64> = IirFilter::from_laplace(ctx, h).unwrap();
    filter.set_sample_period(0.1).unwrap();
    filter.set_variable_by_name("w", 3.0).unwrap();
    filter.set_variable_by_name("zeta", 0.7).unwrap();
    let out = filter.process_block(&vec![1.0; 3000]).unwrap();
    assert_relative_eq!(out[out.len() - 1], 1.0, epsilon = 1e-9);
}
