//! Dense polynomials whose coefficients are expression ids.

use smallvec::SmallVec;
use std::collections::BTreeSet;
use std::fmt;
use zt_ast::build::{add2_fold, mul2_fold, neg_fold, sub2_fold, sum_fold};
use zt_ast::traversal::collect_symbols_into;
use zt_ast::{Bindings, Context, DisplayExpr, EvalError, ExprId, SymbolId};

/// Coefficient storage; most transfer functions stay within a few terms.
pub type Coeffs = SmallVec<[ExprId; 4]>;

/// Univariate polynomial whose coefficients are expressions.
///
/// `coeffs[i]` is the coefficient of the indeterminate to the power `i`. The
/// indeterminate itself is implicit. No trailing-zero trimming is done, since
/// a symbolic coefficient cannot in general be known to vanish.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Polynomial {
    coeffs: Coeffs,
}

impl Polynomial {
    pub fn new<I: IntoIterator<Item = ExprId>>(coeffs: I) -> Self {
        Polynomial {
            coeffs: coeffs.into_iter().collect(),
        }
    }

    /// The identically-zero polynomial (no coefficients).
    pub fn zero() -> Self {
        Polynomial::default()
    }

    /// Degree-0 polynomial with the single coefficient `c`.
    pub fn constant(c: ExprId) -> Self {
        Polynomial::new([c])
    }

    /// The indeterminate itself: `[0, 1]`.
    pub fn indeterminate(ctx: &mut Context) -> Self {
        let zero = ctx.zero();
        let one = ctx.one();
        Polynomial::new([zero, one])
    }

    pub fn coeffs(&self) -> &[ExprId] {
        &self.coeffs
    }

    pub fn coeff(&self, power: usize) -> Option<ExprId> {
        self.coeffs.get(power).copied()
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// `len - 1`, and 0 for the empty polynomial.
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Term-by-term sum; a term missing on one side is the other side's term.
    pub fn add(&self, ctx: &mut Context, other: &Self) -> Self {
        let len = self.len().max(other.len());
        let mut coeffs = Coeffs::with_capacity(len);
        for i in 0..len {
            let c = match (self.coeff(i), other.coeff(i)) {
                (Some(a), Some(b)) => add2_fold(ctx, a, b),
                (Some(a), None) | (None, Some(a)) => a,
                (None, None) => break,
            };
            coeffs.push(c);
        }
        Polynomial { coeffs }
    }

    /// Term-by-term difference; a missing left term negates the right one.
    pub fn sub(&self, ctx: &mut Context, other: &Self) -> Self {
        let len = self.len().max(other.len());
        let mut coeffs = Coeffs::with_capacity(len);
        for i in 0..len {
            let c = match (self.coeff(i), other.coeff(i)) {
                (Some(a), Some(b)) => sub2_fold(ctx, a, b),
                (Some(a), None) => a,
                (None, Some(b)) => neg_fold(ctx, b),
                (None, None) => break,
            };
            coeffs.push(c);
        }
        Polynomial { coeffs }
    }

    /// Convolution: `r[k] = Σ_{i+j=k} p[i] * q[j]`, length `len(p) + len(q) - 1`.
    ///
    /// The product of anything with the empty polynomial is empty.
    pub fn mul(&self, ctx: &mut Context, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return Polynomial::zero();
        }
        let len = self.len() + other.len() - 1;
        let mut coeffs = Coeffs::with_capacity(len);
        let mut products: Vec<ExprId> = Vec::with_capacity(self.len().min(other.len()));
        for k in 0..len {
            products.clear();
            let lo = k.saturating_sub(other.len() - 1);
            let hi = k.min(self.len() - 1);
            for i in lo..=hi {
                let term = mul2_fold(ctx, self.coeffs[i], other.coeffs[k - i]);
                products.push(term);
            }
            coeffs.push(sum_fold(ctx, &products));
        }
        Polynomial { coeffs }
    }

    /// Horner evaluation at `at`; the empty polynomial evaluates to zero.
    pub fn evaluate<F, B>(&self, ctx: &Context, bindings: &B, at: F) -> Result<F, EvalError>
    where
        F: num_traits::Float,
        B: Bindings<F> + ?Sized,
    {
        let mut acc = F::zero();
        for &c in self.coeffs.iter().rev() {
            acc = acc * at + zt_ast::evaluate(ctx, c, bindings)?;
        }
        Ok(acc)
    }

    /// Numeric value of every coefficient, lowest power first.
    pub fn evaluate_coeffs<F, B>(&self, ctx: &Context, bindings: &B) -> Result<Vec<F>, EvalError>
    where
        F: num_traits::Float,
        B: Bindings<F> + ?Sized,
    {
        self.coeffs
            .iter()
            .map(|&c| zt_ast::evaluate(ctx, c, bindings))
            .collect()
    }

    pub fn free_symbols(&self, ctx: &Context) -> BTreeSet<SymbolId> {
        let mut out = BTreeSet::new();
        for &c in &self.coeffs {
            collect_symbols_into(ctx, c, &mut out);
        }
        out
    }

    pub fn display<'a>(&'a self, ctx: &'a Context) -> DisplayPoly<'a> {
        DisplayPoly {
            context: ctx,
            poly: self,
            indeterminate: "X",
        }
    }
}

/// `(c0)X^0 (c1)X^1 ...`
pub struct DisplayPoly<'a> {
    pub context: &'a Context,
    pub poly: &'a Polynomial,
    pub indeterminate: &'a str,
}

impl<'a> DisplayPoly<'a> {
    pub fn with_indeterminate(mut self, name: &'a str) -> Self {
        self.indeterminate = name;
        self
    }
}

impl fmt::Display for DisplayPoly<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (power, &c) in self.poly.coeffs().iter().enumerate() {
            if power > 0 {
                write!(f, " ")?;
            }
            write!(
                f,
                "({}){}^{}",
                DisplayExpr::new(self.context, c),
                self.indeterminate,
                power
            )?;
        }
        Ok(())
    }
}
