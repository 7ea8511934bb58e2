//! Expression arena.
//!
//! Expressions are stored in a [`Context`] and referred to by [`ExprId`].
//! The context hash-conses nodes: inserting a node that already exists returns
//! the existing id, so shared sub-trees are stored once and repeated
//! polynomial convolution does not copy whole trees around. Nodes are never
//! mutated after insertion; every algebraic operation produces new ids.

use crate::error::AstError;
use crate::symbol::{
    SymbolId, SymbolTable, LAPLACE_SYMBOL, SAMPLE_PERIOD_SYMBOL, Z_SYMBOL,
};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use rustc_hash::FxHashMap;
use std::fmt;

/// Handle to a node stored in a [`Context`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The four arithmetic operators an expression can combine with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

/// A node of the expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Exact numeric literal.
    Number(BigRational),
    Variable(SymbolId),
    Add(ExprId, ExprId),
    Sub(ExprId, ExprId),
    Mul(ExprId, ExprId),
    Div(ExprId, ExprId),
}

impl Expr {
    pub fn binary(op: BinOp, lhs: ExprId, rhs: ExprId) -> Self {
        match op {
            BinOp::Add => Expr::Add(lhs, rhs),
            BinOp::Sub => Expr::Sub(lhs, rhs),
            BinOp::Mul => Expr::Mul(lhs, rhs),
            BinOp::Div => Expr::Div(lhs, rhs),
        }
    }

    /// Split an operation node into its operator and operands.
    pub fn as_binary(&self) -> Option<(BinOp, ExprId, ExprId)> {
        match *self {
            Expr::Add(l, r) => Some((BinOp::Add, l, r)),
            Expr::Sub(l, r) => Some((BinOp::Sub, l, r)),
            Expr::Mul(l, r) => Some((BinOp::Mul, l, r)),
            Expr::Div(l, r) => Some((BinOp::Div, l, r)),
            Expr::Number(_) | Expr::Variable(_) => None,
        }
    }
}

/// Allocation counters, used by growth budgets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextStats {
    /// Nodes actually pushed into the arena.
    pub nodes_created: usize,
    /// Insertions answered by an existing node.
    pub dedup_hits: usize,
}

/// Arena owning every expression node and the symbol table.
#[derive(Debug, Clone)]
pub struct Context {
    nodes: Vec<Expr>,
    dedup: FxHashMap<Expr, ExprId>,
    symbols: SymbolTable,
    stats: ContextStats,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create an empty arena whose symbol table already holds `s`, `Z` and `T`.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            dedup: FxHashMap::default(),
            symbols: SymbolTable::with_reserved(),
            stats: ContextStats::default(),
        }
    }

    /// Insert a node, returning the existing id when an identical node exists.
    pub fn add(&mut self, expr: Expr) -> ExprId {
        if let Some(&id) = self.dedup.get(&expr) {
            self.stats.dedup_hits += 1;
            return id;
        }
        let id = ExprId(self.nodes.len() as u32);
        self.nodes.push(expr.clone());
        self.dedup.insert(expr, id);
        self.stats.nodes_created += 1;
        id
    }

    /// Borrow a node.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this context.
    #[inline]
    pub fn get(&self, id: ExprId) -> &Expr {
        &self.nodes[id.index()]
    }

    pub fn try_get(&self, id: ExprId) -> Result<&Expr, AstError> {
        self.nodes.get(id.index()).ok_or(AstError::UnknownExpr(id))
    }

    #[inline]
    pub fn contains_id(&self, id: ExprId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn num(&mut self, n: i64) -> ExprId {
        self.add(Expr::Number(BigRational::from_integer(BigInt::from(n))))
    }

    pub fn rational(&mut self, q: BigRational) -> ExprId {
        self.add(Expr::Number(q))
    }

    pub fn zero(&mut self) -> ExprId {
        self.add(Expr::Number(BigRational::zero()))
    }

    pub fn one(&mut self) -> ExprId {
        self.add(Expr::Number(BigRational::one()))
    }

    /// Exact constant for a finite float.
    pub fn float(&mut self, value: f64) -> Result<ExprId, AstError> {
        let q = BigRational::from_float(value).ok_or(AstError::NonFiniteConstant(value))?;
        Ok(self.rational(q))
    }

    /// Variable node for `name`, interning the name on first use.
    pub fn var(&mut self, name: &str) -> ExprId {
        let sym = self.symbols.intern(name);
        self.add(Expr::Variable(sym))
    }

    /// Variable node for an already interned symbol.
    pub fn symbol(&mut self, sym: SymbolId) -> ExprId {
        self.add(Expr::Variable(sym))
    }

    /// The Laplace variable `s`.
    pub fn laplace(&mut self) -> ExprId {
        self.symbol(LAPLACE_SYMBOL)
    }

    /// The Z-domain placeholder `Z`.
    pub fn z(&mut self) -> ExprId {
        self.symbol(Z_SYMBOL)
    }

    /// The sample period `T`.
    pub fn sample_period(&mut self) -> ExprId {
        self.symbol(SAMPLE_PERIOD_SYMBOL)
    }

    pub fn intern_symbol(&mut self, name: &str) -> SymbolId {
        self.symbols.intern(name)
    }

    pub fn lookup_symbol(&self, name: &str) -> Option<SymbolId> {
        self.symbols.get_id(name)
    }

    /// Name of a symbol; `?` for ids this context never interned.
    pub fn sym_name(&self, sym: SymbolId) -> &str {
        self.symbols.try_resolve(sym).unwrap_or("?")
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn as_number(&self, id: ExprId) -> Option<&BigRational> {
        match self.nodes.get(id.index()) {
            Some(Expr::Number(q)) => Some(q),
            _ => None,
        }
    }

    pub fn stats(&self) -> ContextStats {
        self.stats
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
