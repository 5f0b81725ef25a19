// Copyright (c) 2016-2021 Fabian Schuiki

//! Empty derivation analysis.
//!
//! Determines which symbols and productions can derive the empty string in
//! zero or more steps. Every production keeps a count of the right-hand side
//! symbols not yet known to derive empty. Whenever a symbol is proven to
//! derive empty, the counts of all productions mentioning it are decremented.
//! A production whose count drops to zero derives empty, and so does its
//! left-hand side, which is in turn queued for propagation. Every symbol is
//! queued at most once, so the computation terminates regardless of
//! recursion in the grammar.

use crate::grammar::Grammar;
use crate::production::ProductionId;
use crate::symbol::SymbolId;

/// Compute the `derives_empty` flags and `yield` counts of a grammar.
pub fn compute(grammar: &mut Grammar) {
    let occurrences = grammar.occurrences();
    let epsilon = grammar.symbols.epsilon();
    let mut work = Vec::new();

    for (id, sym) in grammar.symbols.iter_mut() {
        sym.derives_empty = Some(id) == epsilon;
    }

    let mut seeded = Vec::new();
    for (pid, prod) in grammar.productions.iter_mut() {
        prod.yield_count = prod.rhs().iter().filter(|&&s| Some(s) != epsilon).count();
        prod.derives_empty = false;
        if prod.yield_count == 0 {
            seeded.push(pid);
        }
    }
    for pid in seeded {
        check_production(grammar, pid, &mut work);
    }

    while let Some(k) = work.pop() {
        for &(pid, _) in &occurrences[k.as_usize()] {
            grammar.productions.get_mut(pid).yield_count -= 1;
            check_production(grammar, pid, &mut work);
        }
    }

    debug!(
        "{} of {} symbols derive empty",
        grammar.empty_symbols().count(),
        grammar.symbols.len()
    );
}

/// Mark a production as deriving empty if all its symbols do, and queue its
/// left-hand side if that is new information.
fn check_production(grammar: &mut Grammar, pid: ProductionId, work: &mut Vec<SymbolId>) {
    let prod = grammar.productions.get_mut(pid);
    if prod.yield_count != 0 {
        return;
    }
    prod.derives_empty = true;
    let lhs = prod.lhs();
    let sym = grammar.symbols.get_mut(lhs);
    if !sym.derives_empty {
        sym.derives_empty = true;
        trace!("`{}` derives empty", sym.name());
        work.push(lhs);
    }
}
