//! Symbolic expression algebra over variables, exact constants and the four
//! arithmetic operators.
//!
//! Expressions are built programmatically into a [`Context`] arena and can be
//! substituted, evaluated against a binding environment, and printed.

pub mod build;
pub mod display;
pub mod error;
pub mod eval;
pub mod expression;
pub mod substitute;
pub mod symbol;
pub mod traversal;

pub use display::DisplayExpr;
pub use error::{AstError, EvalError};
pub use eval::{evaluate, Bindings, NoBindings};
pub use expression::{BinOp, Context, ContextStats, Expr, ExprId};
pub use substitute::{substitute, substitute_many};
pub use symbol::{
    SymbolId, SymbolTable, LAPLACE_SYMBOL, RESERVED_SYMBOLS, SAMPLE_PERIOD_SYMBOL, Z_SYMBOL,
};
pub use traversal::{collect_symbols, contains_symbol};
