//! Rational fractions: an unreduced numerator/denominator polynomial pair.
//!
//! Arithmetic always cross-multiplies and never cancels common factors, so
//! polynomial degrees only grow across repeated operations.

use crate::polynomial::{DisplayPoly, Polynomial};
use std::collections::BTreeSet;
use std::fmt;
use zt_ast::{Bindings, Context, EvalError, SymbolId};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RationalFraction {
    pub numerator: Polynomial,
    pub denominator: Polynomial,
}

impl RationalFraction {
    pub fn new(numerator: Polynomial, denominator: Polynomial) -> Self {
        RationalFraction {
            numerator,
            denominator,
        }
    }

    /// `p / 1`.
    pub fn from_poly(ctx: &mut Context, p: Polynomial) -> Self {
        let one = ctx.one();
        RationalFraction::new(p, Polynomial::constant(one))
    }

    /// `(n1*d2 + n2*d1) / (d1*d2)`
    pub fn add(&self, ctx: &mut Context, other: &Self) -> Self {
        let a = self.numerator.mul(ctx, &other.denominator);
        let b = other.numerator.mul(ctx, &self.denominator);
        let numerator = a.add(ctx, &b);
        let denominator = self.denominator.mul(ctx, &other.denominator);
        RationalFraction::new(numerator, denominator)
    }

    /// `(n1*d2 - n2*d1) / (d1*d2)`
    pub fn sub(&self, ctx: &mut Context, other: &Self) -> Self {
        let a = self.numerator.mul(ctx, &other.denominator);
        let b = other.numerator.mul(ctx, &self.denominator);
        let numerator = a.sub(ctx, &b);
        let denominator = self.denominator.mul(ctx, &other.denominator);
        RationalFraction::new(numerator, denominator)
    }

    /// `(n1*n2) / (d1*d2)`
    pub fn mul(&self, ctx: &mut Context, other: &Self) -> Self {
        let numerator = self.numerator.mul(ctx, &other.numerator);
        let denominator = self.denominator.mul(ctx, &other.denominator);
        RationalFraction::new(numerator, denominator)
    }

    /// `(n1*d2) / (d1*n2)`
    pub fn div(&self, ctx: &mut Context, other: &Self) -> Self {
        let numerator = self.numerator.mul(ctx, &other.denominator);
        let denominator = self.denominator.mul(ctx, &other.numerator);
        RationalFraction::new(numerator, denominator)
    }

    /// `r + p = (n + d*p) / d`
    pub fn add_poly(&self, ctx: &mut Context, p: &Polynomial) -> Self {
        let dp = self.denominator.mul(ctx, p);
        let numerator = self.numerator.add(ctx, &dp);
        RationalFraction::new(numerator, self.denominator.clone())
    }

    /// `r - p = (n - d*p) / d`
    pub fn sub_poly(&self, ctx: &mut Context, p: &Polynomial) -> Self {
        let dp = self.denominator.mul(ctx, p);
        let numerator = self.numerator.sub(ctx, &dp);
        RationalFraction::new(numerator, self.denominator.clone())
    }

    /// `p - r = (d*p - n) / d`
    pub fn poly_sub(&self, ctx: &mut Context, p: &Polynomial) -> Self {
        let dp = self.denominator.mul(ctx, p);
        let numerator = dp.sub(ctx, &self.numerator);
        RationalFraction::new(numerator, self.denominator.clone())
    }

    /// `r * p = (n*p) / d`
    pub fn mul_poly(&self, ctx: &mut Context, p: &Polynomial) -> Self {
        let numerator = self.numerator.mul(ctx, p);
        RationalFraction::new(numerator, self.denominator.clone())
    }

    /// `r / p = n / (d*p)`
    pub fn div_poly(&self, ctx: &mut Context, p: &Polynomial) -> Self {
        let denominator = self.denominator.mul(ctx, p);
        RationalFraction::new(self.numerator.clone(), denominator)
    }

    /// `p / r = (d*p) / n`
    pub fn poly_div(&self, ctx: &mut Context, p: &Polynomial) -> Self {
        let numerator = self.denominator.mul(ctx, p);
        RationalFraction::new(numerator, self.numerator.clone())
    }

    /// Realizable as a causal filter: `degree(num) <= degree(den)`.
    pub fn is_causal(&self) -> bool {
        self.numerator.degree() <= self.denominator.degree()
    }

    /// Value at `at`, i.e. `num(at) / den(at)`, without a zero-divisor check.
    pub fn evaluate<F, B>(&self, ctx: &Context, bindings: &B, at: F) -> Result<F, EvalError>
    where
        F: num_traits::Float,
        B: Bindings<F> + ?Sized,
    {
        let n = self.numerator.evaluate(ctx, bindings, at)?;
        let d = self.denominator.evaluate(ctx, bindings, at)?;
        Ok(n / d)
    }

    pub fn free_symbols(&self, ctx: &Context) -> BTreeSet<SymbolId> {
        let mut out = self.numerator.free_symbols(ctx);
        out.extend(self.denominator.free_symbols(ctx));
        out
    }

    pub fn display<'a>(&'a self, ctx: &'a Context) -> DisplayFraction<'a> {
        DisplayFraction {
            numerator: self.numerator.display(ctx),
            denominator: self.denominator.display(ctx),
        }
    }
}

/// `(numerator) / (denominator)`
pub struct DisplayFraction<'a> {
    numerator: DisplayPoly<'a>,
    denominator: DisplayPoly<'a>,
}

impl<'a> DisplayFraction<'a> {
    pub fn with_indeterminate(self, name: &'a str) -> Self {
        DisplayFraction {
            numerator: self.numerator.with_indeterminate(name),
            denominator: self.denominator.with_indeterminate(name),
        }
    }
}

impl fmt::Display for DisplayFraction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) / ({})", self.numerator, self.denominator)
    }
}
