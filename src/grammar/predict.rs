// Copyright (c) 2016-2021 Fabian Schuiki

//! Predict sets and conflict detection.

use crate::first::FirstWalk;
use crate::grammar::Grammar;
use crate::production::ProductionId;
use crate::set::SymbolSet;
use crate::symbol::SymbolId;
use itertools::Itertools;

/// Two productions of the same nonterminal whose predict sets overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// The nonterminal both productions belong to.
    pub lhs: SymbolId,
    /// The production that comes first in the list.
    pub first: ProductionId,
    /// The production that comes second in the list.
    pub second: ProductionId,
    /// The lookahead terminals that select both productions.
    pub overlap: SymbolSet,
}

/// Compute the predict sets of all productions in the grammar.
///
/// The predict set of a production is the first set of its right-hand side,
/// plus the follow set of its left-hand side if the production derives empty.
pub fn compute(grammar: &mut Grammar) {
    let g: &Grammar = grammar;
    let predicts: Vec<SymbolSet> = g
        .productions
        .iter()
        .map(|(_, prod)| {
            let first = FirstWalk::new(g).sequence(prod.rhs());
            debug_assert_eq!(first.has_epsilon, prod.derives_empty());
            let mut set = first.symbols;
            if prod.derives_empty() {
                set.union_with(g.symbols[prod.lhs()].follow());
            }
            g.symbols.strip_epsilon(set)
        })
        .collect();
    for ((pid, prod), predict) in grammar.productions.iter_mut().zip(predicts) {
        trace!("predict({:?}) = {:?}", pid, predict);
        prod.predict = predict;
    }
    debug!("computed {} predict sets", grammar.productions.len());
}

/// Find all pairs of productions of the same nonterminal whose predict sets
/// intersect.
///
/// Conflicts are listed by nonterminal in table order, and for each
/// nonterminal by pair in production order.
pub fn conflicts(grammar: &Grammar) -> Vec<Conflict> {
    let mut result = Vec::new();
    for (lhs, sym) in grammar.symbols.nonterminals() {
        for ((p1, a), (p2, b)) in grammar.productions.of(lhs).tuple_combinations() {
            let overlap = a.predict().intersection(b.predict());
            if !overlap.is_empty() {
                trace!(
                    "conflict in `{}` between {:?} and {:?} on {:?}",
                    sym.name(),
                    p1,
                    p2,
                    overlap
                );
                result.push(Conflict {
                    lhs: lhs,
                    first: p1,
                    second: p2,
                    overlap: overlap,
                });
            }
        }
    }
    debug!("found {} conflicts", result.len());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::EPSILON;
    use crate::{empty, first, follow};

    fn run(g: &mut Grammar) -> Vec<Conflict> {
        empty::compute(g);
        first::compute(g);
        follow::compute(g);
        compute(g);
        conflicts(g)
    }

    #[test]
    fn common_prefix_conflicts() {
        // A : 'x' | 'x' 'y' ;
        let mut g = Grammar::new();
        let a = g.register_symbol("A", false);
        let x = g.register_symbol("'x'", true);
        let y = g.register_symbol("'y'", true);
        let ps = g.add_production(a, vec![vec![x], vec![x, y]]).unwrap();
        let cs = run(&mut g);
        assert_eq!(
            cs,
            vec![Conflict {
                lhs: a,
                first: ps[0],
                second: ps[1],
                overlap: SymbolSet::singleton(x),
            }]
        );
    }

    #[test]
    fn empty_alternative_predicts_follow() {
        // S : A 'c' ; A : 'a' | %empty ;
        let mut g = Grammar::new();
        let s = g.register_symbol("S", false);
        let a = g.register_symbol("A", false);
        let c = g.register_symbol("'c'", true);
        let ta = g.register_symbol("'a'", true);
        let eps = g.register_symbol(EPSILON, true);
        g.add_production(s, vec![vec![a, c]]).unwrap();
        let ps = g.add_production(a, vec![vec![ta], vec![eps]]).unwrap();
        assert!(run(&mut g).is_empty());
        assert_eq!(g.productions[ps[0]].predict(), &SymbolSet::singleton(ta));
        assert_eq!(g.productions[ps[1]].predict(), &SymbolSet::singleton(c));
    }

    #[test]
    fn every_overlapping_pair_is_listed() {
        // A : 'x' | 'x' | 'x' ;
        let mut g = Grammar::new();
        let a = g.register_symbol("A", false);
        let x = g.register_symbol("'x'", true);
        let ps = g
            .add_production(a, vec![vec![x], vec![x], vec![x]])
            .unwrap();
        let pairs: Vec<_> = run(&mut g).iter().map(|c| (c.first, c.second)).collect();
        assert_eq!(pairs, vec![(ps[0], ps[1]), (ps[0], ps[2]), (ps[1], ps[2])]);
    }
}
