//! Error types for the zt_math crate.

use thiserror::Error;
use zt_ast::ExprId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    /// The expression (or one of its children) was not issued by the context
    /// passed in.
    #[error("unsupported expression {0}")]
    UnsupportedExpression(ExprId),

    /// Extraction allocated more arena nodes than the budget allows.
    #[error("node budget exceeded: created {created} nodes, limit {limit}")]
    BudgetExceeded { limit: usize, created: usize },
}
