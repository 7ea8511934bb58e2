//! Continuous-to-discrete mapping via the bilinear transform.

use crate::budget::TransformOptions;
use crate::error::MathError;
use crate::extract::extract_with;
use crate::rational_fraction::RationalFraction;
use zt_ast::build::{add2, div2, mul2, sub2};
use zt_ast::{substitute, Context, ExprId, LAPLACE_SYMBOL, Z_SYMBOL};

/// The expression `(2 * (Z - 1)) / (T * (Z + 1))`, i.e. `(2/T) (Z-1)/(Z+1)`.
pub fn bilinear_approximation(ctx: &mut Context) -> ExprId {
    let z = ctx.z();
    let t = ctx.sample_period();
    let one = ctx.one();
    let two = ctx.num(2);
    let z_minus_1 = sub2(ctx, z, one);
    let z_plus_1 = add2(ctx, z, one);
    let num = mul2(ctx, two, z_minus_1);
    let den = mul2(ctx, t, z_plus_1);
    div2(ctx, num, den)
}

/// Map `h_s`, a transfer function in `s`, to a fraction in `Z`.
///
/// Coefficients keep `T` and every other free variable of `h_s` symbolic.
pub fn bilinear_transform(ctx: &mut Context, h_s: ExprId) -> Result<RationalFraction, MathError> {
    bilinear_transform_with(ctx, h_s, &TransformOptions::default())
}

pub fn bilinear_transform_with(
    ctx: &mut Context,
    h_s: ExprId,
    options: &TransformOptions,
) -> Result<RationalFraction, MathError> {
    if !ctx.contains_id(h_s) {
        return Err(MathError::UnsupportedExpression(h_s));
    }
    let approx = bilinear_approximation(ctx);
    let h_z = substitute(ctx, h_s, LAPLACE_SYMBOL, approx)
        .map_err(|_| MathError::UnsupportedExpression(h_s))?;
    let fraction = extract_with(ctx, h_z, Z_SYMBOL, &options.budget)?;
    tracing::debug!(
        numerator_degree = fraction.numerator.degree(),
        denominator_degree = fraction.denominator.degree(),
        arena_nodes = ctx.len(),
        "bilinear transform"
    );
    Ok(fraction)
}
