// Copyright (c) 2016-2021 Fabian Schuiki

//! Follow set computation.
//!
//! The follow set of a nonterminal lists the terminals that can appear after
//! it. For every occurrence of the nonterminal on a right-hand side, the first
//! set of the symbol immediately after it is added. If the rest of the
//! production can vanish, the follow set of the production's left-hand side
//! is added as well.
//!
//! Only the symbol right after the occurrence contributes its first set. In
//! `S : A B 'c'` with a nullable `B`, the `'c'` reaches the follow set of `A`
//! only through `B`'s own follow set, never directly.

use crate::grammar::Grammar;
use crate::production::ProductionId;
use crate::set::SymbolSet;
use crate::symbol::SymbolId;
use bit_set::BitSet;

/// A single follow set computation.
///
/// Like `FirstWalk`, each nonterminal is expanded at most once per walk. A
/// cycle through the left-hand sides of productions therefore terminates,
/// and since all partial results are merged into the one set being built,
/// nothing is lost by cutting it.
pub(crate) struct FollowWalk<'a> {
    grammar: &'a Grammar,
    occurrences: &'a [Vec<(ProductionId, usize)>],
    visited: BitSet,
}

impl<'a> FollowWalk<'a> {
    /// Start a fresh computation. The `derives_empty` flags and first sets of
    /// the grammar must be up to date.
    pub(crate) fn new(
        grammar: &'a Grammar,
        occurrences: &'a [Vec<(ProductionId, usize)>],
    ) -> FollowWalk<'a> {
        FollowWalk {
            grammar: grammar,
            occurrences: occurrences,
            visited: BitSet::with_capacity(grammar.symbols.len()),
        }
    }

    /// Compute the follow set of a nonterminal.
    pub(crate) fn follow_of(&mut self, sym: SymbolId) -> SymbolSet {
        let grammar = self.grammar;
        let mut result = SymbolSet::new();
        if !self.visited.insert(sym.as_usize()) {
            return result;
        }
        for &(pid, pos) in &self.occurrences[sym.as_usize()] {
            let prod = &grammar.productions[pid];
            let tail = &prod.rhs()[pos + 1..];
            if let Some(&next) = tail.first() {
                result.union_with(grammar.symbols[next].first());
            }
            if tail_derives_empty(grammar, tail) {
                let outer = self.follow_of(prod.lhs());
                result.union_with(&outer);
            }
        }
        result
    }
}

/// Check whether a tail sequence can vanish. Holds for the empty tail, and
/// otherwise only if every symbol is a nonterminal or epsilon and derives
/// empty.
pub(crate) fn tail_derives_empty(grammar: &Grammar, tail: &[SymbolId]) -> bool {
    tail.iter().all(|&id| {
        let sym = &grammar.symbols[id];
        (!sym.is_terminal() || grammar.symbols.is_epsilon(id)) && sym.derives_empty()
    })
}

/// Compute the follow sets of all nonterminals in the grammar.
pub fn compute(grammar: &mut Grammar) {
    let occurrences = grammar.occurrences();
    let g: &Grammar = grammar;
    let follows: Vec<Option<SymbolSet>> = g
        .symbols
        .iter()
        .map(|(id, sym)| {
            if sym.is_terminal() {
                None
            } else {
                let raw = FollowWalk::new(g, &occurrences).follow_of(id);
                Some(g.symbols.strip_epsilon(raw))
            }
        })
        .collect();
    for ((_, sym), follow) in grammar.symbols.iter_mut().zip(follows) {
        if let Some(follow) = follow {
            trace!("follow({}) = {:?}", sym.name(), follow);
            sym.follow = follow;
        }
    }
    debug!(
        "computed follow sets of {} nonterminals",
        grammar.symbols.nonterminals().count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{empty, first};
    use crate::symbol::EPSILON;

    fn ids(g: &Grammar, names: &[&str]) -> SymbolSet {
        names.iter().map(|n| g.symbols.find(n).unwrap()).collect()
    }

    fn run(g: &mut Grammar) {
        empty::compute(g);
        first::compute(g);
        compute(g);
    }

    #[test]
    fn only_next_symbol_contributes_first() {
        // S : A B 'c' ; A : 'a' ; B : 'b' | %empty ;
        let mut g = Grammar::new();
        let s = g.register_symbol("S", false);
        let a = g.register_symbol("A", false);
        let b = g.register_symbol("B", false);
        let ta = g.register_symbol("'a'", true);
        let tb = g.register_symbol("'b'", true);
        let tc = g.register_symbol("'c'", true);
        let eps = g.register_symbol(EPSILON, true);
        g.add_production(s, vec![vec![a, b, tc]]).unwrap();
        g.add_production(a, vec![vec![ta]]).unwrap();
        g.add_production(b, vec![vec![tb], vec![eps]]).unwrap();
        run(&mut g);
        assert_eq!(g.symbols[a].follow(), &ids(&g, &["'b'"]));
        assert_eq!(g.symbols[b].follow(), &ids(&g, &["'c'"]));
        assert!(g.symbols[s].follow().is_empty());
    }

    #[test]
    fn nullable_neighbours_stay_ll1() {
        // S : A B 'c' ; A : 'c' | %empty ; B : 'b' | %empty ;
        let mut g = Grammar::new();
        let s = g.register_symbol("S", false);
        let a = g.register_symbol("A", false);
        let b = g.register_symbol("B", false);
        let tc = g.register_symbol("'c'", true);
        let tb = g.register_symbol("'b'", true);
        let eps = g.register_symbol(EPSILON, true);
        g.add_production(s, vec![vec![a, b, tc]]).unwrap();
        let ps = g.add_production(a, vec![vec![tc], vec![eps]]).unwrap();
        g.add_production(b, vec![vec![tb], vec![eps]]).unwrap();
        let analysis = g.analyze();
        assert_eq!(g.symbols[a].follow(), &SymbolSet::singleton(tb));
        assert_eq!(g.productions[ps[0]].predict(), &SymbolSet::singleton(tc));
        assert_eq!(g.productions[ps[1]].predict(), &SymbolSet::singleton(tb));
        assert!(analysis.is_ll1());
    }

    #[test]
    fn all_nullable_tail_reaches_lhs() {
        // S : 'x' T 'y' ; T : A B ; A : 'a' | %empty ; B : 'b' | %empty ;
        let mut g = Grammar::new();
        let s = g.register_symbol("S", false);
        let t = g.register_symbol("T", false);
        let a = g.register_symbol("A", false);
        let b = g.register_symbol("B", false);
        let x = g.register_symbol("'x'", true);
        let y = g.register_symbol("'y'", true);
        let ta = g.register_symbol("'a'", true);
        let tb = g.register_symbol("'b'", true);
        let eps = g.register_symbol(EPSILON, true);
        g.add_production(s, vec![vec![x, t, y]]).unwrap();
        g.add_production(t, vec![vec![a, b]]).unwrap();
        g.add_production(a, vec![vec![ta], vec![eps]]).unwrap();
        g.add_production(b, vec![vec![tb], vec![eps]]).unwrap();
        run(&mut g);
        assert_eq!(g.symbols[t].follow(), &ids(&g, &["'y'"]));
        assert_eq!(g.symbols[a].follow(), &ids(&g, &["'y'", "'b'"]));
        assert_eq!(g.symbols[b].follow(), &ids(&g, &["'y'"]));
    }

    #[test]
    fn inherits_from_lhs_through_cycles() {
        // S : A 'x' ; A : 'a' B ; B : 'b' A | %empty ;
        let mut g = Grammar::new();
        let s = g.register_symbol("S", false);
        let a = g.register_symbol("A", false);
        let b = g.register_symbol("B", false);
        let x = g.register_symbol("'x'", true);
        let ta = g.register_symbol("'a'", true);
        let tb = g.register_symbol("'b'", true);
        let eps = g.register_symbol(EPSILON, true);
        g.add_production(s, vec![vec![a, x]]).unwrap();
        g.add_production(a, vec![vec![ta, b]]).unwrap();
        g.add_production(b, vec![vec![tb, a], vec![eps]]).unwrap();
        run(&mut g);
        assert_eq!(g.symbols[a].follow(), &ids(&g, &["'x'"]));
        assert_eq!(g.symbols[b].follow(), &ids(&g, &["'x'"]));
    }

    #[test]
    fn tail_helper() {
        let mut g = Grammar::new();
        let a = g.register_symbol("A", false);
        let t = g.register_symbol("'t'", true);
        let eps = g.register_symbol(EPSILON, true);
        g.add_production(a, vec![vec![eps]]).unwrap();
        run(&mut g);
        assert!(tail_derives_empty(&g, &[]));
        assert!(tail_derives_empty(&g, &[a, eps]));
        assert!(!tail_derives_empty(&g, &[a, t, a]));
        assert!(!tail_derives_empty(&g, &[t]));
    }
}
