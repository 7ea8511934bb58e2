//! Direct-form IIR recurrence over a symbolic Z-domain fraction.
//!
//! For order `N = degree(den)`:
//!
//! ```text
//! y = ( Σ_{i=0..=N} num[i] * in(i) - Σ_{i=0..N} den[i] * out(i) ) / den[N]
//! ```
//!
//! where `in(N)` is the new sample, `in(i)` / `out(i)` for `i < N` are the
//! `i`-th oldest buffered input / output, and numerator terms past its
//! degree are absent. Coefficients are evaluated against the store on every
//! call so that parameter changes take effect on the next sample.

use crate::error::FilterError;
use crate::history::HistoryRing;
use crate::store::VariableStore;
use num_traits::Float;
use std::collections::BTreeSet;
use zt_ast::traversal::collect_symbols;
use zt_ast::{Context, ExprId, SymbolId, LAPLACE_SYMBOL, SAMPLE_PERIOD_SYMBOL, Z_SYMBOL};
use zt_math::{
    bilinear_transform_with, MathError, Polynomial, RationalFraction, TransformOptions,
};

#[derive(Debug, Clone)]
pub struct IirFilter<F> {
    context: Context,
    fraction: RationalFraction,
    store: VariableStore<F>,
    inputs: HistoryRing<F>,
    outputs: HistoryRing<F>,
}

impl<F: Float> IirFilter<F> {
    /// Realize `fraction`, a fraction in `Z` built inside `context`.
    pub fn new(context: Context, fraction: RationalFraction) -> Result<Self, FilterError> {
        Self::with_extra_symbols(context, fraction, BTreeSet::new())
    }

    /// Transform `h_s` with the bilinear transform and realize the result.
    pub fn from_laplace(context: Context, h_s: ExprId) -> Result<Self, FilterError> {
        Self::from_laplace_with(context, h_s, &TransformOptions::default())
    }

    pub fn from_laplace_with(
        mut context: Context,
        h_s: ExprId,
        options: &TransformOptions,
    ) -> Result<Self, FilterError> {
        let fraction = bilinear_transform_with(&mut context, h_s, options)?;
        let mut laplace_symbols = collect_symbols(&context, h_s);
        laplace_symbols.remove(&LAPLACE_SYMBOL);
        Self::with_extra_symbols(context, fraction, laplace_symbols)
    }

    fn with_extra_symbols(
        context: Context,
        fraction: RationalFraction,
        mut symbols: BTreeSet<SymbolId>,
    ) -> Result<Self, FilterError> {
        let mut coeffs = fraction
            .numerator
            .coeffs()
            .iter()
            .chain(fraction.denominator.coeffs());
        if let Some(&foreign) = coeffs.find(|&&c| !context.contains_id(c)) {
            return Err(MathError::UnsupportedExpression(foreign).into());
        }
        if !fraction.is_causal() {
            return Err(FilterError::NonCausal {
                numerator_degree: fraction.numerator.degree(),
                denominator_degree: fraction.denominator.degree(),
            });
        }

        symbols.extend(fraction.free_symbols(&context));
        symbols.remove(&Z_SYMBOL);
        symbols.insert(SAMPLE_PERIOD_SYMBOL);

        let order = fraction.denominator.degree();
        let store = VariableStore::new(&context, symbols);
        tracing::debug!(
            order,
            variables = store.len(),
            fraction = %fraction.display(&context).with_indeterminate("Z"),
            "built IIR filter"
        );

        Ok(IirFilter {
            context,
            fraction,
            store,
            inputs: HistoryRing::new(order),
            outputs: HistoryRing::new(order),
        })
    }

    /// Filter order `N`, the denominator degree.
    pub fn order(&self) -> usize {
        self.fraction.denominator.degree()
    }

    pub fn fraction(&self) -> &RationalFraction {
        &self.fraction
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn store(&self) -> &VariableStore<F> {
        &self.store
    }

    pub fn set_variable(&mut self, sym: SymbolId, value: F) -> Result<(), FilterError> {
        if !self.store.contains(sym) {
            return Err(FilterError::UnknownVariable(
                self.context.sym_name(sym).to_string(),
            ));
        }
        self.store.set(sym, value)
    }

    pub fn set_variable_by_name(&mut self, name: &str, value: F) -> Result<(), FilterError> {
        let sym = self
            .context
            .lookup_symbol(name)
            .ok_or_else(|| FilterError::UnknownVariable(name.to_string()))?;
        self.set_variable(sym, value)
    }

    pub fn set_sample_period(&mut self, value: F) -> Result<(), FilterError> {
        self.set_variable(SAMPLE_PERIOD_SYMBOL, value)
    }

    /// Numerator and denominator coefficients under the current bindings.
    pub fn coefficients(&self) -> Result<(Vec<F>, Vec<F>), FilterError> {
        let num = self.fraction.numerator.evaluate_coeffs(&self.context, &self.store)?;
        let den = self.fraction.denominator.evaluate_coeffs(&self.context, &self.store)?;
        Ok((num, den))
    }

    /// The fraction with every bound variable replaced by its value.
    pub fn bound_fraction(&mut self) -> Result<RationalFraction, FilterError> {
        let RationalFraction {
            numerator,
            denominator,
        } = self.fraction.clone();
        let numerator = self.bind_poly(&numerator)?;
        let denominator = self.bind_poly(&denominator)?;
        Ok(RationalFraction::new(numerator, denominator))
    }

    fn bind_poly(&mut self, p: &Polynomial) -> Result<Polynomial, FilterError> {
        let coeffs = p
            .coeffs()
            .iter()
            .map(|&c| self.store.bind_all(&mut self.context, c))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Polynomial::new(coeffs))
    }

    /// Run the recurrence for one input sample.
    ///
    /// History is only updated when the output was computed, so a failed
    /// call leaves the filter as it was.
    pub fn process_one_sample(&mut self, x: F) -> Result<F, FilterError> {
        let n = self.order();
        let (num, den) = self.coefficients()?;

        let lead = den
            .get(n)
            .copied()
            .filter(|c| !c.is_zero())
            .ok_or(FilterError::ZeroLeadingCoefficient)?;

        let mut acc = F::zero();
        for (i, &b) in num.iter().enumerate().take(n + 1) {
            let past = if i == n {
                x
            } else {
                self.inputs.get(i).unwrap_or_else(F::zero)
            };
            acc = acc + b * past;
        }
        for (i, &a) in den.iter().enumerate().take(n) {
            acc = acc - a * self.outputs.get(i).unwrap_or_else(F::zero);
        }
        let y = acc / lead;

        self.inputs.push(x);
        self.outputs.push(y);
        tracing::trace!(
            x = x.to_f64().unwrap_or(f64::NAN),
            y = y.to_f64().unwrap_or(f64::NAN),
            "sample"
        );
        Ok(y)
    }

    /// Process samples in order, stopping at the first error.
    pub fn process_block(&mut self, input: &[F]) -> Result<Vec<F>, FilterError> {
        input.iter().map(|&x| self.process_one_sample(x)).collect()
    }

    /// Zero both history buffers; bindings are kept.
    pub fn reset(&mut self) {
        self.inputs.reset();
        self.outputs.reset();
    }

    /// Buffered inputs, oldest first.
    pub fn input_history(&self) -> impl Iterator<Item = F> + '_ {
        self.inputs.iter()
    }

    /// Buffered outputs, oldest first.
    pub fn output_history(&self) -> impl Iterator<Item = F> + '_ {
        self.outputs.iter()
    }
}
