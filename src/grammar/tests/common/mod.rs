// Copyright (c) 2016-2021 Fabian Schuiki
#![allow(dead_code)]

//! Utilities for grammar analysis tests.

pub use ll1check_common;
pub use ll1check_grammar::*;

/// Build a grammar from a list of rules.
///
/// Each rule is a left-hand side and its alternatives, every alternative a
/// whitespace-separated list of symbol names. An empty alternative stands for
/// the empty string. All left-hand sides are nonterminals; every other name
/// is a terminal.
pub fn build(rules: &[(&str, &[&str])]) -> Grammar {
    let mut g = Grammar::new();
    for &(lhs, _) in rules {
        g.register_symbol(lhs, false);
    }
    for &(lhs, alts) in rules {
        let lhs = g.register_symbol(lhs, false);
        let alts = alts
            .iter()
            .map(|alt| {
                let mut rhs: Vec<_> = alt
                    .split_whitespace()
                    .map(|name| g.register_symbol(name, true))
                    .collect();
                if rhs.is_empty() {
                    rhs.push(g.register_symbol(EPSILON, true));
                }
                rhs
            })
            .collect();
        if let Err(diag) = g.add_production(lhs, alts) {
            panic!("{}", diag);
        }
    }
    g
}

/// Look up a symbol by name.
pub fn sym(g: &Grammar, name: &str) -> SymbolId {
    match g.symbols().find(name) {
        Some(id) => id,
        None => panic!("no symbol `{}`", name),
    }
}

/// Build a symbol set from names.
pub fn set(g: &Grammar, names: &[&str]) -> SymbolSet {
    names.iter().map(|n| sym(g, n)).collect()
}

/// The productions of a nonterminal, in order.
pub fn prods(g: &Grammar, name: &str) -> Vec<ProductionId> {
    g.productions()
        .of(sym(g, name))
        .map(|(id, _)| id)
        .collect()
}
