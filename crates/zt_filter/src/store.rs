//! Runtime values for the free variables of a transfer function.

use crate::error::FilterError;
use num_traits::Float;
use std::collections::BTreeMap;
use zt_ast::traversal::collect_symbols;
use zt_ast::{substitute_many, Bindings, Context, ExprId, SymbolId};

#[derive(Debug, Clone, PartialEq)]
struct Slot<F> {
    name: String,
    value: Option<F>,
}

/// Binding environment with a key set fixed at construction.
///
/// Every slot starts unset. Only [`VariableStore::set`] changes a value, and
/// only for symbols in the key set.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableStore<F> {
    slots: BTreeMap<SymbolId, Slot<F>>,
}

impl<F: Float> VariableStore<F> {
    pub fn new<I>(ctx: &Context, symbols: I) -> Self
    where
        I: IntoIterator<Item = SymbolId>,
    {
        let slots = symbols
            .into_iter()
            .map(|sym| {
                let slot = Slot {
                    name: ctx.sym_name(sym).to_string(),
                    value: None,
                };
                (sym, slot)
            })
            .collect();
        VariableStore { slots }
    }

    pub fn contains(&self, sym: SymbolId) -> bool {
        self.slots.contains_key(&sym)
    }

    pub fn get(&self, sym: SymbolId) -> Option<F> {
        self.slots.get(&sym).and_then(|slot| slot.value)
    }

    pub fn set(&mut self, sym: SymbolId, value: F) -> Result<(), FilterError> {
        let slot = self
            .slots
            .get_mut(&sym)
            .ok_or(FilterError::UnknownSymbol(sym))?;
        if !value.is_finite() {
            return Err(FilterError::NonFiniteValue {
                name: slot.name.clone(),
            });
        }
        slot.value = Some(value);
        Ok(())
    }

    pub fn is_bound(&self, sym: SymbolId) -> bool {
        self.get(sym).is_some()
    }

    /// Key set, in ascending id order.
    pub fn symbols(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.slots.keys().copied()
    }

    /// Names of the keys that have not been set yet.
    pub fn unbound(&self) -> Vec<&str> {
        self.slots
            .values()
            .filter(|slot| slot.value.is_none())
            .map(|slot| slot.name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Replace every bound variable occurring in `expr` by its exact value.
    ///
    /// Unset variables stay symbolic, so the result is fully numeric once
    /// every free variable of `expr` is bound.
    pub fn bind_all(&self, ctx: &mut Context, expr: ExprId) -> Result<ExprId, FilterError> {
        ctx.try_get(expr)?;
        let mut pairs = Vec::new();
        for sym in collect_symbols(ctx, expr) {
            let Some(slot) = self.slots.get(&sym) else {
                continue;
            };
            let Some(value) = slot.value else {
                continue;
            };
            let exact = value
                .to_f64()
                .ok_or_else(|| FilterError::NonFiniteValue {
                    name: slot.name.clone(),
                })?;
            pairs.push((sym, ctx.float(exact)?));
        }
        Ok(substitute_many(ctx, expr, &pairs)?)
    }
}

impl<F: Float> Bindings<F> for VariableStore<F> {
    fn value_of(&self, sym: SymbolId) -> Option<F> {
        self.get(sym)
    }
}
