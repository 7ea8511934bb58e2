//! Symbol interning for variable identities.
//!
//! Every logical symbol (the Laplace variable, the Z placeholder, the sample
//! period, each user parameter) is interned once and referred to by its
//! `SymbolId`. Two variables are the same variable exactly when their ids are
//! equal.

use rustc_hash::FxHashMap;

/// Unique identifier for an interned symbol.
///
/// Using usize for direct Vec indexing without casts.
pub type SymbolId = usize;

/// Laplace-domain variable `s`.
pub const LAPLACE_SYMBOL: SymbolId = 0;
/// Z-domain placeholder `Z`, only produced by the bilinear transform.
pub const Z_SYMBOL: SymbolId = 1;
/// Sample period `T`.
pub const SAMPLE_PERIOD_SYMBOL: SymbolId = 2;

/// Names of the reserved symbols, indexed by their `SymbolId`.
pub const RESERVED_SYMBOLS: [&str; 3] = ["s", "Z", "T"];

/// Symbol table for interning variable names.
///
/// # Design
/// - `strings`: canonical storage, indexed by SymbolId
/// - `lookup`: reverse map for O(1) intern check
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    strings: Vec<String>,
    lookup: FxHashMap<String, SymbolId>,
}

impl SymbolTable {
    /// Create an empty symbol table, without the reserved symbols.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table whose first ids are the reserved `s`, `Z`, `T`.
    pub fn with_reserved() -> Self {
        let mut table = Self::new();
        for name in RESERVED_SYMBOLS {
            table.intern(name);
        }
        table
    }

    /// Intern a string, returning its SymbolId.
    ///
    /// If the string is already interned, returns the existing id.
    pub fn intern(&mut self, s: &str) -> SymbolId {
        if let Some(&id) = self.lookup.get(s) {
            return id;
        }

        let id = self.strings.len();
        let owned = s.to_string();
        self.strings.push(owned.clone());
        self.lookup.insert(owned, id);
        id
    }

    /// Resolve a SymbolId back to its string.
    ///
    /// # Panics
    /// Panics if id is invalid (out of bounds).
    #[inline]
    pub fn resolve(&self, id: SymbolId) -> &str {
        &self.strings[id]
    }

    /// Resolve without panicking.
    #[inline]
    pub fn try_resolve(&self, id: SymbolId) -> Option<&str> {
        self.strings.get(id).map(String::as_str)
    }

    /// Get id for a string if it exists, without interning.
    #[inline]
    pub fn get_id(&self, s: &str) -> Option<SymbolId> {
        self.lookup.get(s).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_roundtrip() {
        let mut table = SymbolTable::new();
        let id = table.intern("tau");
        assert_eq!(table.resolve(id), "tau");
    }

    #[test]
    fn test_intern_deduplication() {
        let mut table = SymbolTable::new();
        let id1 = table.intern("R");
        let id2 = table.intern("R");
        assert_eq!(id1, id2);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_reserved_ids_are_stable() {
        let table = SymbolTable::with_reserved();
        assert_eq!(table.get_id("s"), Some(LAPLACE_SYMBOL));
        assert_eq!(table.get_id("Z"), Some(Z_SYMBOL));
        assert_eq!(table.get_id("T"), Some(SAMPLE_PERIOD_SYMBOL));
        assert_eq!(table.len(), RESERVED_SYMBOLS.len());
    }

    #[test]
    fn test_reserved_name_reuses_reserved_id() {
        let mut table = SymbolTable::with_reserved();
        assert_eq!(table.intern("T"), SAMPLE_PERIOD_SYMBOL);
        assert_ne!(table.intern("tau"), SAMPLE_PERIOD_SYMBOL);
    }

    #[test]
    fn test_try_resolve_out_of_range() {
        let table = SymbolTable::new();
        assert_eq!(table.try_resolve(7), None);
    }

    #[test]
    fn test_unicode_symbols() {
        let mut table = SymbolTable::new();
        let tau = table.intern("τ");
        let omega = table.intern("ω");
        assert_ne!(tau, omega);
        assert_eq!(table.resolve(tau), "τ");
    }
}
