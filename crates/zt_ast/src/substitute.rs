//! Structural substitution of a variable by an expression.

use crate::error::AstError;
use crate::expression::{Context, Expr, ExprId};
use crate::symbol::SymbolId;
use crate::traversal::post_order;
use rustc_hash::FxHashMap;

/// Replace every occurrence of variable `target` in `root` by `replacement`.
///
/// Constants and other variables pass through unchanged; operation nodes are
/// rebuilt with their substituted operands in the same order. Returns `root`
/// itself when `target` does not occur.
pub fn substitute(
    ctx: &mut Context,
    root: ExprId,
    target: SymbolId,
    replacement: ExprId,
) -> Result<ExprId, AstError> {
    substitute_many(ctx, root, &[(target, replacement)])
}

/// Simultaneous substitution of several variables.
///
/// Replacements are not themselves rewritten, so `[(a, b), (b, a)]` swaps.
/// Fails with [`AstError::UnknownExpr`] when `root` or a replacement was not
/// issued by `ctx`.
pub fn substitute_many(
    ctx: &mut Context,
    root: ExprId,
    pairs: &[(SymbolId, ExprId)],
) -> Result<ExprId, AstError> {
    ctx.try_get(root)?;
    for &(_, replacement) in pairs {
        ctx.try_get(replacement)?;
    }
    if pairs.is_empty() {
        return Ok(root);
    }

    let mut rewritten: FxHashMap<ExprId, ExprId> = FxHashMap::default();

    for id in post_order(ctx, root) {
        let node = ctx.get(id).clone();
        let new_id = match node.as_binary() {
            Some((op, l, r)) => {
                let new_l = rewritten.get(&l).copied().unwrap_or(l);
                let new_r = rewritten.get(&r).copied().unwrap_or(r);
                if new_l == l && new_r == r {
                    id
                } else {
                    ctx.add(Expr::binary(op, new_l, new_r))
                }
            }
            None => match node {
                Expr::Variable(sym) => pairs
                    .iter()
                    .find(|(target, _)| *target == sym)
                    .map_or(id, |&(_, replacement)| replacement),
                _ => id,
            },
        };
        if new_id != id {
            rewritten.insert(id, new_id);
        }
    }

    Ok(rewritten.get(&root).copied().unwrap_or(root))
}
