//! Growth limits for extraction.
//!
//! Fractions are never reduced, so nesting many operators multiplies
//! polynomial lengths. The limit is measured in arena nodes created since the
//! operation began, read from `Context::stats`.

use crate::error::MathError;
use serde::{Deserialize, Serialize};
use zt_ast::Context;

/// Default cap on nodes created by a single extraction.
pub const DEFAULT_MAX_NODES_CREATED: usize = 250_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractBudget {
    /// 0 means unlimited.
    pub max_nodes_created: usize,
}

impl Default for ExtractBudget {
    fn default() -> Self {
        Self {
            max_nodes_created: DEFAULT_MAX_NODES_CREATED,
        }
    }
}

impl ExtractBudget {
    pub fn unlimited() -> Self {
        Self {
            max_nodes_created: 0,
        }
    }

    pub fn with_max_nodes(max_nodes_created: usize) -> Self {
        Self { max_nodes_created }
    }

    /// Start metering against `ctx`'s current allocation count.
    pub fn meter(&self, ctx: &Context) -> BudgetMeter {
        BudgetMeter {
            limit: self.max_nodes_created,
            baseline: ctx.stats().nodes_created,
        }
    }
}

/// Runtime half of [`ExtractBudget`].
#[derive(Debug, Clone, Copy)]
pub struct BudgetMeter {
    limit: usize,
    baseline: usize,
}

impl BudgetMeter {
    pub fn created(&self, ctx: &Context) -> usize {
        ctx.stats().nodes_created.saturating_sub(self.baseline)
    }

    pub fn check(&self, ctx: &Context) -> Result<(), MathError> {
        if self.limit == 0 {
            return Ok(());
        }
        let created = self.created(ctx);
        if created > self.limit {
            tracing::warn!(created, limit = self.limit, "extraction node budget exceeded");
            return Err(MathError::BudgetExceeded {
                limit: self.limit,
                created,
            });
        }
        Ok(())
    }
}

/// Options for the bilinear transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    pub budget: ExtractBudget,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_never_trips() {
        let mut ctx = Context::new();
        let meter = ExtractBudget::unlimited().meter(&ctx);
        for i in 0..100 {
            ctx.num(i);
        }
        assert!(meter.check(&ctx).is_ok());
    }

    #[test]
    fn test_limit_counts_only_new_nodes() {
        let mut ctx = Context::new();
        for i in 0..50 {
            ctx.num(i);
        }
        let meter = ExtractBudget::with_max_nodes(3).meter(&ctx);
        ctx.num(1000);
        ctx.num(1001);
        ctx.num(1002);
        assert!(meter.check(&ctx).is_ok());
        ctx.num(1003);
        assert_eq!(
            meter.check(&ctx),
            Err(MathError::BudgetExceeded {
                limit: 3,
                created: 4
            })
        );
    }
}
