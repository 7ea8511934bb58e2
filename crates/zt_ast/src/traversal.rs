//! Canonical AST traversal utilities.
//!
//! All traversals are iterative with explicit stacks, so arbitrarily deep
//! expressions cannot overflow the call stack. Because the arena shares
//! identical sub-trees, an expression is a DAG: [`post_order`] visits every
//! distinct node once, and the substitution and evaluation passes are built
//! on top of it.
//!
//! # Functions
//!
//! - [`post_order`]: distinct nodes, children before parents
//! - [`count_all_nodes`]: node count of the tree as written (shared nodes counted per use)
//! - [`count_nodes_and_max_depth`]: tree node count and depth
//! - [`collect_symbols`]: free-variable set
//! - [`contains_symbol`]: whether one variable occurs

use crate::expression::{Context, Expr, ExprId};
use crate::symbol::SymbolId;
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;

#[inline]
fn push_children(node: &Expr, stack: &mut Vec<ExprId>) {
    if let Some((_, l, r)) = node.as_binary() {
        stack.push(l);
        stack.push(r);
    }
}

/// Distinct nodes reachable from `root`, every child before its parents.
///
/// The last element is `root`.
pub fn post_order(ctx: &Context, root: ExprId) -> Vec<ExprId> {
    let mut order = Vec::new();
    let mut done: FxHashSet<ExprId> = FxHashSet::default();
    // (node, children already pushed)
    let mut stack: Vec<(ExprId, bool)> = vec![(root, false)];

    while let Some((id, expanded)) = stack.pop() {
        if done.contains(&id) {
            continue;
        }
        if expanded {
            done.insert(id);
            order.push(id);
            continue;
        }
        stack.push((id, true));
        if let Some((_, l, r)) = ctx.get(id).as_binary() {
            if !done.contains(&r) {
                stack.push((r, false));
            }
            if !done.contains(&l) {
                stack.push((l, false));
            }
        }
    }

    order
}

/// Count all nodes of the expression tree, shared sub-trees once per use.
pub fn count_all_nodes(ctx: &Context, root: ExprId) -> usize {
    count_nodes_matching(ctx, root, |_| true)
}

/// Count nodes matching a predicate, shared sub-trees once per use.
pub fn count_nodes_matching<F>(ctx: &Context, root: ExprId, mut pred: F) -> usize
where
    F: FnMut(&Expr) -> bool,
{
    let mut count = 0;
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        let node = ctx.get(id);
        if pred(node) {
            count += 1;
        }
        push_children(node, &mut stack);
    }

    count
}

/// Count nodes and compute maximum depth (root has depth 0).
pub fn count_nodes_and_max_depth(ctx: &Context, root: ExprId) -> (usize, usize) {
    let mut count = 0;
    let mut max_depth = 0;
    let mut stack: Vec<(ExprId, usize)> = vec![(root, 0)];

    while let Some((id, depth)) = stack.pop() {
        count += 1;
        max_depth = max_depth.max(depth);

        if let Some((_, l, r)) = ctx.get(id).as_binary() {
            stack.push((l, depth + 1));
            stack.push((r, depth + 1));
        }
    }

    (count, max_depth)
}

/// Number of distinct arena nodes reachable from `root`.
pub fn count_unique_nodes(ctx: &Context, root: ExprId) -> usize {
    post_order(ctx, root).len()
}

/// All variables occurring in the expression.
pub fn collect_symbols(ctx: &Context, root: ExprId) -> BTreeSet<SymbolId> {
    let mut symbols = BTreeSet::new();
    collect_symbols_into(ctx, root, &mut symbols);
    symbols
}

/// Add every variable of `root` to `out`.
pub fn collect_symbols_into(ctx: &Context, root: ExprId, out: &mut BTreeSet<SymbolId>) {
    let mut seen: FxHashSet<ExprId> = FxHashSet::default();
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        let node = ctx.get(id);
        if let Expr::Variable(sym) = node {
            out.insert(*sym);
        }
        push_children(node, &mut stack);
    }
}

/// Whether `sym` occurs anywhere in `root`.
pub fn contains_symbol(ctx: &Context, root: ExprId, sym: SymbolId) -> bool {
    let mut seen: FxHashSet<ExprId> = FxHashSet::default();
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        let node = ctx.get(id);
        if matches!(node, Expr::Variable(s) if *s == sym) {
            return true;
        }
        push_children(node, &mut stack);
    }

    false
}
