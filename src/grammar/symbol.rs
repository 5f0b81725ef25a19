// Copyright (c) 2016-2021 Fabian Schuiki

//! The symbol table.
//!
//! Every terminal and nonterminal name is registered exactly once and is
//! referred to by a lightweight `SymbolId` from then on. The analysis results
//! for a symbol are stored alongside its name.

use crate::set::SymbolSet;
use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

/// The reserved name of the symbol denoting the empty string.
pub const EPSILON: &str = "%empty";

/// A reference to a symbol in a `SymbolTable`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(usize);

impl SymbolId {
    pub(crate) fn new(index: usize) -> SymbolId {
        SymbolId(index)
    }

    /// The position of the symbol in the table.
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// A terminal or nonterminal grammar symbol.
#[derive(Debug, Clone)]
pub struct Symbol {
    name: String,
    is_terminal: bool,
    pub(crate) derives_empty: bool,
    pub(crate) first: SymbolSet,
    pub(crate) follow: SymbolSet,
}

impl Symbol {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    /// Whether the symbol can derive the empty string in zero or more steps.
    pub fn derives_empty(&self) -> bool {
        self.derives_empty
    }

    /// The terminals that can begin a string derived from this symbol.
    pub fn first(&self) -> &SymbolSet {
        &self.first
    }

    /// The terminals that can immediately follow this symbol. Always empty
    /// for terminals.
    pub fn follow(&self) -> &SymbolSet {
        &self.follow
    }
}

/// The canonical registry of grammar symbols.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    map: HashMap<String, SymbolId>,
    symbols: Vec<Symbol>,
    epsilon: Option<SymbolId>,
}

impl SymbolTable {
    /// Create an empty symbol table.
    pub fn new() -> SymbolTable {
        Default::default()
    }

    /// Look up a symbol by name.
    pub fn find(&self, name: &str) -> Option<SymbolId> {
        self.map.get(name).copied()
    }

    /// Ensure a symbol called `name` exists and return its id.
    ///
    /// Registering an existing name never creates a duplicate. Instead the
    /// terminal flag is narrowed, such that a symbol declared as nonterminal
    /// anywhere remains a nonterminal.
    pub fn register(&mut self, name: &str, is_terminal: bool) -> SymbolId {
        if let Some(id) = self.find(name) {
            let sym = &mut self.symbols[id.0];
            if sym.is_terminal && !is_terminal {
                trace!("demoting `{}` to nonterminal", name);
            }
            sym.is_terminal &= is_terminal;
            return id;
        }
        let id = SymbolId(self.symbols.len());
        self.symbols.push(Symbol {
            name: name.to_string(),
            is_terminal: is_terminal,
            derives_empty: false,
            first: SymbolSet::new(),
            follow: SymbolSet::new(),
        });
        self.map.insert(name.to_string(), id);
        if name == EPSILON {
            self.epsilon = Some(id);
        }
        trace!(
            "registered {} `{}` as {:?}",
            if is_terminal { "terminal" } else { "nonterminal" },
            name,
            id
        );
        id
    }

    /// Check whether a symbol is the empty string.
    pub fn is_epsilon(&self, id: SymbolId) -> bool {
        self.epsilon == Some(id)
    }

    /// The epsilon symbol, if one has been registered.
    pub fn epsilon(&self) -> Option<SymbolId> {
        self.epsilon
    }

    /// Check whether an id refers to a symbol in this table.
    pub fn contains(&self, id: SymbolId) -> bool {
        id.0 < self.symbols.len()
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.0]
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate over all symbols in registration order.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (SymbolId, &'a Symbol)> + 'a {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (SymbolId(i), s))
    }

    pub(crate) fn iter_mut<'a>(
        &'a mut self,
    ) -> impl Iterator<Item = (SymbolId, &'a mut Symbol)> + 'a {
        self.symbols
            .iter_mut()
            .enumerate()
            .map(|(i, s)| (SymbolId(i), s))
    }

    /// Iterate over the terminals. The epsilon symbol is not included.
    pub fn terminals<'a>(&'a self) -> impl Iterator<Item = (SymbolId, &'a Symbol)> + 'a {
        self.iter()
            .filter(move |&(id, s)| s.is_terminal && !self.is_epsilon(id))
    }

    /// Iterate over the nonterminals.
    pub fn nonterminals<'a>(&'a self) -> impl Iterator<Item = (SymbolId, &'a Symbol)> + 'a {
        self.iter().filter(|&(_, s)| !s.is_terminal)
    }

    /// Remove the epsilon symbol from a set that is about to be stored.
    pub(crate) fn strip_epsilon(&self, mut set: SymbolSet) -> SymbolSet {
        if let Some(eps) = self.epsilon {
            set.remove(eps);
        }
        set
    }
}

impl Index<SymbolId> for SymbolTable {
    type Output = Symbol;

    fn index(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_is_idempotent() {
        let mut tbl = SymbolTable::new();
        let a = tbl.register("a", true);
        let b = tbl.register("b", false);
        assert_ne!(a, b);
        assert_eq!(tbl.register("a", true), a);
        assert_eq!(tbl.len(), 2);
        assert_eq!(tbl.find("b"), Some(b));
        assert_eq!(tbl.find("c"), None);
    }

    #[test]
    fn nonterminal_declaration_wins() {
        let mut tbl = SymbolTable::new();
        let x = tbl.register("x", true);
        assert!(tbl[x].is_terminal());
        tbl.register("x", false);
        assert!(!tbl[x].is_terminal());
        tbl.register("x", true);
        assert!(!tbl[x].is_terminal());
    }

    #[test]
    fn epsilon_detection() {
        let mut tbl = SymbolTable::new();
        let a = tbl.register("a", true);
        assert_eq!(tbl.epsilon(), None);
        let eps = tbl.register(EPSILON, true);
        assert!(tbl.is_epsilon(eps));
        assert!(!tbl.is_epsilon(a));
        let terms: Vec<_> = tbl.terminals().map(|(id, _)| id).collect();
        assert_eq!(terms, vec![a]);
    }
}
