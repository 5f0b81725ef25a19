// Copyright (c) 2016-2021 Fabian Schuiki

//! First set computation.
//!
//! The first set of a symbol lists all terminals that can appear as the first
//! token of a string derived from it. Rules may be recursive and contain
//! symbols that derive the empty string, so computing the set of a sequence
//! has to look past nullable symbols while making sure each nonterminal is
//! expanded only once.

use crate::grammar::Grammar;
use crate::set::SymbolSet;
use crate::symbol::SymbolId;
use bit_set::BitSet;

/// The first set of a symbol sequence, before epsilon has been stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FirstSet {
    /// The first terminals.
    pub symbols: SymbolSet,
    /// Whether the whole sequence can derive the empty string.
    pub has_epsilon: bool,
}

/// A single first set computation.
///
/// Keeps track of the nonterminals already expanded. A nonterminal reached a
/// second time contributes nothing new, since its productions have already
/// been added to the set under construction.
pub(crate) struct FirstWalk<'a> {
    grammar: &'a Grammar,
    visited: BitSet,
}

impl<'a> FirstWalk<'a> {
    /// Start a fresh computation. The `derives_empty` flags of the grammar
    /// must be up to date.
    pub(crate) fn new(grammar: &'a Grammar) -> FirstWalk<'a> {
        FirstWalk {
            grammar: grammar,
            visited: BitSet::with_capacity(grammar.symbols.len()),
        }
    }

    /// Compute the first set of a sequence of symbols.
    pub(crate) fn sequence(&mut self, seq: &[SymbolId]) -> FirstSet {
        let grammar = self.grammar;
        let mut result = FirstSet::default();
        for &head in seq {
            let sym = &grammar.symbols[head];
            if grammar.symbols.is_epsilon(head) {
                continue;
            }
            if sym.is_terminal() {
                result.symbols.insert(head);
                return result;
            }
            if self.visited.insert(head.as_usize()) {
                for (_, prod) in grammar.productions.of(head) {
                    let fi = self.sequence(prod.rhs());
                    result.symbols.union_with(&fi.symbols);
                }
            }
            if !sym.derives_empty() {
                return result;
            }
        }
        result.has_epsilon = true;
        result
    }
}

/// Compute the first sets of all symbols in the grammar.
pub fn compute(grammar: &mut Grammar) {
    let g: &Grammar = grammar;
    let firsts: Vec<SymbolSet> = g
        .symbols
        .iter()
        .map(|(id, _)| FirstWalk::new(g).sequence(&[id]).symbols)
        .collect();
    for ((_, sym), first) in grammar.symbols.iter_mut().zip(firsts) {
        trace!("first({}) = {:?}", sym.name(), first);
        sym.first = first;
    }
    debug!(
        "computed first sets of {} nonterminals",
        grammar.symbols.nonterminals().count()
    );
}
