//! Error types for the zt_filter crate.

use thiserror::Error;
use zt_ast::{AstError, EvalError, SymbolId};
use zt_math::MathError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// The numerator outranks the denominator; no recurrence can realize it.
    #[error(
        "transfer function is not causal: numerator degree {numerator_degree} \
         exceeds denominator degree {denominator_degree}"
    )]
    NonCausal {
        numerator_degree: usize,
        denominator_degree: usize,
    },

    /// The variable is not part of this filter's store.
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    /// A symbol id outside the store's key set, reported where no name is at hand.
    #[error("symbol #{0} is not part of this store")]
    UnknownSymbol(SymbolId),

    #[error("value for '{name}' is not finite")]
    NonFiniteValue { name: String },

    /// The leading denominator coefficient evaluated to zero for the current bindings.
    #[error("leading denominator coefficient is zero")]
    ZeroLeadingCoefficient,

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Math(#[from] MathError),

    #[error(transparent)]
    Ast(#[from] AstError),
}
