// Copyright (c) 2016-2021 Fabian Schuiki

//! Printing the results of a grammar analysis.
//!
//! The report lists the symbols and productions of a grammar, followed by
//! the computed sets and the conflicts. Each section can be enabled
//! individually through `Sections`.

use crate::common::Sections;
use crate::common::errors::DiagBuilder2;
use crate::grammar::{Analysis, Grammar, ProductionId, SymbolSet, EPSILON};
use std::io::{self, Write};

/// The column at which symbol sets are wrapped.
const WRAP_COLUMN: usize = 76;

/// Write the report of an analyzed grammar.
///
/// Fails with `InvalidInput` if `analysis` refers to productions that are
/// not part of `grammar`.
pub fn write_report<W: Write>(
    out: &mut W,
    grammar: &Grammar,
    analysis: &Analysis,
    sections: Sections,
) -> io::Result<()> {
    if sections.contains(Sections::TERMINALS) {
        writeln!(out, "Terminal symbols:")?;
        writeln!(out)?;
        for (_, sym) in grammar.symbols().terminals() {
            write!(out, "  {}", sym.name())?;
            for alias in grammar.aliases().aliases_of(sym.name()) {
                write!(out, " (aliases to \"{}\")", alias)?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;
    }

    if sections.contains(Sections::NONTERMINALS) {
        writeln!(out, "Non-terminal symbols:")?;
        writeln!(out)?;
        for (_, sym) in grammar.symbols().nonterminals() {
            writeln!(out, "  {}", sym.name())?;
        }
        writeln!(out)?;
    }

    if sections.contains(Sections::GRAMMAR) {
        writeln!(out, "Grammar:")?;
        write_productions(out, grammar)?;
        writeln!(out)?;
    }

    if sections.contains(Sections::EMPTY) {
        writeln!(out, "Empty derivations:")?;
        writeln!(out)?;
        let width = grammar
            .symbols()
            .iter()
            .map(|(_, s)| s.name().chars().count())
            .max()
            .unwrap_or(0);
        for (_, sym) in grammar.empty_symbols() {
            writeln!(out, "  {:>2$} -->* {}", sym.name(), EPSILON, width)?;
        }
        writeln!(out)?;
    }

    if sections.contains(Sections::FIRST) {
        writeln!(out, "First sets:")?;
        writeln!(out)?;
        for (_, sym) in grammar.symbols().nonterminals() {
            if !sym.first().is_empty() {
                write!(out, "  first({}):", sym.name())?;
                write_set(out, grammar, sym.first())?;
            }
        }
    }

    if sections.contains(Sections::FOLLOW) {
        writeln!(out, "Follow sets:")?;
        writeln!(out)?;
        for (_, sym) in grammar.symbols().nonterminals() {
            if !sym.follow().is_empty() {
                write!(out, "  follow({}):", sym.name())?;
                write_set(out, grammar, sym.follow())?;
            }
        }
    }

    if sections.contains(Sections::PREDICT) {
        writeln!(out, "Predict sets:")?;
        writeln!(out)?;
        for (id, prod) in grammar.productions().iter() {
            write!(out, "  {}", production(grammar, id)?)?;
            write_set(out, grammar, prod.predict())?;
        }
    }

    if sections.contains(Sections::CONFLICTS) {
        if !analysis.is_ll1() {
            writeln!(out, "Conflicts:")?;
            writeln!(out)?;
        }
        for conflict in analysis.conflicts() {
            writeln!(out, "  {}", production(grammar, conflict.first)?)?;
            write!(out, "  {}", production(grammar, conflict.second)?)?;
            write_set(out, grammar, &conflict.overlap)?;
        }
        if analysis.is_ll1() {
            writeln!(out, "No conflicts, grammar is LL(1)")?;
        } else {
            writeln!(out, "There were conflicts.")?;
            writeln!(out, "Grammar is not LL(1)")?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Format a production, turning a foreign id into an I/O error.
fn production(grammar: &Grammar, id: ProductionId) -> io::Result<String> {
    grammar
        .display_production(id)
        .map(|p| p.to_string())
        .map_err(invalid)
}

fn invalid(diag: DiagBuilder2) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, diag.to_string())
}

/// Write the productions grouped by left-hand side, in bison layout.
fn write_productions<W: Write>(out: &mut W, grammar: &Grammar) -> io::Result<()> {
    let mut prev = None;
    for (_, prod) in grammar.productions().iter() {
        let lhs = grammar.name(prod.lhs()).map_err(invalid)?;
        if prev == Some(prod.lhs()) {
            write!(out, "{:width$}|", "", width = lhs.chars().count() + 3)?;
        } else {
            writeln!(out)?;
            write!(out, "  {} :", lhs)?;
            prev = Some(prod.lhs());
        }
        for &sym in prod.rhs() {
            write!(out, " {}", grammar.name(sym).map_err(invalid)?)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write a symbol set on the lines following the current one, laid out in
/// columns, and terminate it with an empty line.
fn write_set<W: Write>(out: &mut W, grammar: &Grammar, set: &SymbolSet) -> io::Result<()> {
    let names = set
        .iter()
        .map(|id| grammar.name(id).map_err(invalid))
        .collect::<io::Result<Vec<&str>>>()?;
    let width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0) + 2;
    let per_line = std::cmp::max(WRAP_COLUMN / width, 1);
    writeln!(out)?;
    for chunk in names.chunks(per_line) {
        let line: String = chunk
            .iter()
            .map(|name| format!("{:<1$}", name, width))
            .collect();
        writeln!(out, "    {}", line.trim_end())?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(grammar: &mut Grammar, sections: Sections) -> String {
        let analysis = grammar.analyze();
        let mut buf = Vec::new();
        write_report(&mut buf, grammar, &analysis, sections).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn optional_suffix() -> Grammar {
        // S : 'a' A ; A : 'b' | %empty ;
        let mut g = Grammar::new();
        let s = g.register_symbol("S", false);
        let a = g.register_symbol("A", false);
        let ta = g.register_symbol("'a'", true);
        let tb = g.register_symbol("'b'", true);
        let eps = g.register_symbol(EPSILON, true);
        g.add_production(s, vec![vec![ta, a]]).unwrap();
        g.add_production(a, vec![vec![tb], vec![eps]]).unwrap();
        g.register_alias("'a'", "a");
        g
    }

    #[test]
    fn symbols() {
        let mut g = optional_suffix();
        let text = report(&mut g, Sections::TERMINALS | Sections::NONTERMINALS);
        assert_eq!(
            text,
            "Terminal symbols:\n\n  'a' (aliases to \"a\")\n  'b'\n\n\
             Non-terminal symbols:\n\n  S\n  A\n\n"
        );
    }

    #[test]
    fn grammar_layout() {
        let mut g = optional_suffix();
        let text = report(&mut g, Sections::GRAMMAR);
        assert_eq!(
            text,
            "Grammar:\n\n  S : 'a' A\n\n  A : 'b'\n    | %empty\n\n"
        );
    }

    #[test]
    fn empty_and_sets() {
        let mut g = optional_suffix();
        let text = report(
            &mut g,
            Sections::EMPTY | Sections::FIRST | Sections::FOLLOW | Sections::PREDICT,
        );
        assert_eq!(
            text,
            "Empty derivations:\n\n       A -->* %empty\n\n\
             First sets:\n\n  first(S):\n    'a'\n\n  first(A):\n    'b'\n\n\
             Follow sets:\n\n\
             Predict sets:\n\n  S : 'a' A\n    'a'\n\n  A : 'b'\n    'b'\n\n  A : %empty\n\n"
        );
    }

    #[test]
    fn conflicts() {
        // A : 'x' | 'x' 'y' ;
        let mut g = Grammar::new();
        let a = g.register_symbol("A", false);
        let x = g.register_symbol("'x'", true);
        let y = g.register_symbol("'y'", true);
        g.add_production(a, vec![vec![x], vec![x, y]]).unwrap();
        let text = report(&mut g, Sections::CONFLICTS);
        assert_eq!(
            text,
            "Conflicts:\n\n  A : 'x'\n  A : 'x' 'y'\n    'x'\n\n\
             There were conflicts.\nGrammar is not LL(1)\n\n"
        );
        let mut ok = optional_suffix();
        assert_eq!(
            report(&mut ok, Sections::CONFLICTS),
            "No conflicts, grammar is LL(1)\n\n"
        );
    }

    #[test]
    fn foreign_analysis_is_rejected() {
        let mut g = Grammar::new();
        let a = g.register_symbol("A", false);
        let x = g.register_symbol("'x'", true);
        g.add_production(a, vec![vec![x], vec![x]]).unwrap();
        let analysis = g.analyze();
        let mut small = Grammar::new();
        let s = small.register_symbol("S", false);
        let t = small.register_symbol("'t'", true);
        small.add_production(s, vec![vec![t]]).unwrap();
        let mut buf = Vec::new();
        let err = write_report(&mut buf, &small, &analysis, Sections::CONFLICTS).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn sets_wrap() {
        let mut g = Grammar::new();
        let s = g.register_symbol("S", false);
        let alts: Vec<Vec<_>> = (0..20)
            .map(|i| vec![g.register_symbol(&format!("T{:02}", i), true)])
            .collect();
        g.add_production(s, alts).unwrap();
        let text = report(&mut g, Sections::FIRST);
        let lines: Vec<_> = text.lines().collect();
        // Names are 3 characters wide, so columns are 5 wide and 15 fit a line.
        assert_eq!(lines[2], "  first(S):");
        assert_eq!(
            lines[3],
            "    T00  T01  T02  T03  T04  T05  T06  T07  T08  T09  T10  T11  T12  T13  T14"
        );
        assert_eq!(lines[4], "    T15  T16  T17  T18  T19");
        assert!(lines[3].len() <= WRAP_COLUMN + 4);
    }
}
