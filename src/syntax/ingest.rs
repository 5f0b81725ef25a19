// Copyright (c) 2016-2021 Fabian Schuiki

//! Building a grammar from the parsed items.
//!
//! Symbols are registered in the order they first appear. Names declared with
//! `%token`, character literals, and names used on a right-hand side are
//! registered as terminals; rule names and names declared with `%nterm` are
//! registered as nonterminals. A name that is both used and defined by a rule
//! ends up a nonterminal.

use crate::ast::*;
use crate::parser::ReportedResult;
use ll1check_common::errors::*;
use ll1check_common::source::Span;
use ll1check_grammar::{Grammar, SymbolId, EPSILON};
use std::collections::{HashMap, HashSet};

/// Build a grammar from a list of parsed items.
///
/// Warnings about suspicious but valid input are passed to `emitter`. Fails
/// if the grammar model rejects a production, which is reported as a bug.
pub fn ingest(items: &[Item], emitter: &dyn DiagEmitter) -> ReportedResult<Grammar> {
    let mut grammar = Grammar::new();
    let mut declared = HashSet::new();
    let mut defined = HashSet::new();
    let mut used: Vec<(&str, Span)> = Vec::new();
    let mut failed = false;

    for item in items {
        match item {
            Item::Tokens(decls) => {
                for decl in decls {
                    grammar.register_symbol(&decl.name.value, true);
                    declared.insert(decl.name.value.as_str());
                    if let Some(ref alias) = decl.alias {
                        grammar.register_alias(decl.name.value.as_str(), alias.value.as_str());
                    }
                }
            }
            Item::Nonterminals(names) => {
                for name in names {
                    grammar.register_symbol(&name.value, false);
                    declared.insert(name.value.as_str());
                }
            }
            Item::Rule(rule) => {
                let lhs = grammar.register_symbol(&rule.name.value, false);
                defined.insert(rule.name.value.as_str());
                let mut alts = Vec::with_capacity(rule.alts.len());
                for alt in &rule.alts {
                    alts.push(ingest_alt(&mut grammar, alt, &mut used));
                }
                if let Err(diag) = grammar.add_production(lhs, alts) {
                    emitter.emit(diag.span(rule.name.span));
                    failed = true;
                }
            }
        }
    }

    let mut warned = HashSet::new();
    for (name, span) in used {
        if !declared.contains(&name) && !defined.contains(&name) && warned.insert(name) {
            emitter.emit(
                DiagBuilder2::warning(format!(
                    "`{}` is neither declared as a token nor defined by a rule",
                    name
                ))
                .span(span)
                .add_note(format!("`{}` is treated as a terminal", name)),
            );
        }
    }
    check_grammar(&grammar, emitter);

    debug!(
        "ingested {} symbols and {} productions",
        grammar.symbols().len(),
        grammar.productions().len()
    );
    if failed {
        Err(())
    } else {
        Ok(grammar)
    }
}

/// Register the symbols of an alternative and resolve them to ids.
fn ingest_alt<'a>(
    grammar: &mut Grammar,
    alt: &'a Alt,
    used: &mut Vec<(&'a str, Span)>,
) -> Vec<SymbolId> {
    let mut rhs: Vec<SymbolId> = alt
        .symbols
        .iter()
        .map(|sym| match sym.value {
            Sym::Ident(ref name) => {
                used.push((name.as_str(), sym.span));
                grammar.register_symbol(name, true)
            }
            Sym::Char(ref lit) => grammar.register_symbol(lit, true),
            Sym::Alias(ref text) => {
                let name = grammar.aliases().aliased_from(text).to_string();
                grammar.register_symbol(&name, true)
            }
            Sym::Empty => grammar.register_symbol(EPSILON, true),
        })
        .collect();
    if rhs.is_empty() {
        rhs.push(grammar.register_symbol(EPSILON, true));
    }
    rhs
}

/// Warn about nonterminals that have no productions.
///
/// Such a nonterminal derives nothing at all. The analysis handles it fine,
/// but it usually indicates a missing rule. In a grammar file this happens
/// when a name is declared with `%nterm` but no rule defines it.
pub fn check_grammar(grammar: &Grammar, emitter: &dyn DiagEmitter) {
    let mut counts: HashMap<SymbolId, usize> = HashMap::new();
    for (_, prod) in grammar.productions().iter() {
        *counts.entry(prod.lhs()).or_insert(0) += 1;
    }
    for (id, sym) in grammar.symbols().nonterminals() {
        if !counts.contains_key(&id) {
            emitter.emit(DiagBuilder2::warning(format!(
                "nonterminal `{}` has no productions",
                sym.name()
            )));
        }
    }
}
