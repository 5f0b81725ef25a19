// Copyright (c) 2016-2021 Fabian Schuiki

//! Sets of grammar symbols.
//!
//! FIRST, FOLLOW, and PREDICT sets are stored as bit sets indexed by symbol.
//! Iteration therefore always yields the symbols in table order, which keeps
//! the reports reproducible.

use crate::symbol::SymbolId;
use bit_set::BitSet;
use std::fmt;
use std::iter::FromIterator;

/// An unordered set of symbols without duplicates.
#[derive(Clone, Default)]
pub struct SymbolSet(BitSet);

impl SymbolSet {
    /// Create an empty set.
    pub fn new() -> SymbolSet {
        SymbolSet(BitSet::new())
    }

    /// Create a set containing a single symbol.
    pub fn singleton(id: SymbolId) -> SymbolSet {
        let mut set = SymbolSet::new();
        set.insert(id);
        set
    }

    /// Add a symbol. Returns `true` if it was not yet present.
    pub fn insert(&mut self, id: SymbolId) -> bool {
        self.0.insert(id.as_usize())
    }

    /// Remove a symbol. Returns `true` if it was present.
    pub fn remove(&mut self, id: SymbolId) -> bool {
        self.0.remove(id.as_usize())
    }

    pub fn contains(&self, id: SymbolId) -> bool {
        self.0.contains(id.as_usize())
    }

    /// Add all symbols of `other` to this set.
    pub fn union_with(&mut self, other: &SymbolSet) {
        self.0.union_with(&other.0)
    }

    /// Compute the symbols present in both sets.
    pub fn intersection(&self, other: &SymbolSet) -> SymbolSet {
        SymbolSet(self.0.intersection(&other.0).collect())
    }

    pub fn is_disjoint(&self, other: &SymbolSet) -> bool {
        self.0.is_disjoint(&other.0)
    }

    pub fn is_subset(&self, other: &SymbolSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the symbols in table order.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = SymbolId> + 'a {
        self.0.iter().map(SymbolId::new)
    }
}

// Bit sets of different capacity may hold the same symbols, so equality is
// decided on the members.
impl PartialEq for SymbolSet {
    fn eq(&self, other: &SymbolSet) -> bool {
        self.0.iter().eq(other.0.iter())
    }
}

impl Eq for SymbolSet {}

impl FromIterator<SymbolId> for SymbolSet {
    fn from_iter<I: IntoIterator<Item = SymbolId>>(iter: I) -> SymbolSet {
        let mut set = SymbolSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<SymbolId> for SymbolSet {
    fn extend<I: IntoIterator<Item = SymbolId>>(&mut self, iter: I) {
        for id in iter {
            self.insert(id);
        }
    }
}

impl fmt::Debug for SymbolSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
