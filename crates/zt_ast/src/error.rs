//! Error types for the zt_ast crate.

use crate::expression::ExprId;
use thiserror::Error;

/// Errors raised while building expressions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AstError {
    /// Constants must be finite to have an exact rational value.
    #[error("constant {0} is not finite")]
    NonFiniteConstant(f64),

    /// An id that was never issued by this context.
    #[error("expression {0:?} does not belong to this context")]
    UnknownExpr(ExprId),
}

/// Errors raised by numeric evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A variable with no value in the binding environment.
    #[error("variable '{name}' is not bound")]
    UnboundVariable { name: String },

    /// A divisor evaluated to exactly zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A constant has no representation in the target numeric type.
    #[error("constant {0} is not representable in the sample type")]
    NotRepresentable(String),

    #[error(transparent)]
    Ast(#[from] AstError),
}
