// Copyright (c) 2016-2021 Fabian Schuiki

//! The grammar aggregate.

use crate::alias::AliasTable;
use crate::analysis::{self, Analysis};
use crate::production::{Production, ProductionId, ProductionList};
use crate::set::SymbolSet;
use crate::symbol::{Symbol, SymbolId, SymbolTable};
use ll1check_common::errors::*;
use std::fmt;

/// A context-free grammar: symbols, productions, and display aliases.
///
/// The analysis results are stored in the symbols and productions themselves
/// and are filled in by `analyze`.
#[derive(Debug, Default, Clone)]
pub struct Grammar {
    pub(crate) symbols: SymbolTable,
    pub(crate) productions: ProductionList,
    pub(crate) aliases: AliasTable,
}

impl Grammar {
    /// Create an empty grammar.
    pub fn new() -> Grammar {
        Default::default()
    }

    /// Register a symbol declaration. See `SymbolTable::register`.
    pub fn register_symbol(&mut self, name: &str, is_terminal: bool) -> SymbolId {
        self.symbols.register(name, is_terminal)
    }

    /// Add a rule block `lhs : alt | alt | ...`.
    pub fn add_production(
        &mut self,
        lhs: SymbolId,
        alternatives: Vec<Vec<SymbolId>>,
    ) -> DiagResult2<Vec<ProductionId>> {
        self.productions.add(&self.symbols, lhs, alternatives)
    }

    /// Record a display alias for a symbol name.
    pub fn register_alias<F: Into<String>, T: Into<String>>(&mut self, from: F, to: T) {
        self.aliases.add(from, to)
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn productions(&self) -> &ProductionList {
        &self.productions
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Run the full analysis pipeline on this grammar.
    pub fn analyze(&mut self) -> Analysis {
        analysis::analyze(self)
    }

    /// Look up a symbol, failing if the id does not belong to this grammar.
    pub fn symbol(&self, id: SymbolId) -> DiagResult2<&Symbol> {
        self.symbols.get(id).ok_or_else(|| {
            DiagBuilder2::bug(format!(
                "symbol {:?} out of range; the grammar has {} symbols",
                id,
                self.symbols.len()
            ))
        })
    }

    /// Look up a production, failing if the id does not belong to this
    /// grammar.
    pub fn production(&self, id: ProductionId) -> DiagResult2<&Production> {
        self.productions.get(id).ok_or_else(|| {
            DiagBuilder2::bug(format!(
                "production {:?} out of range; the grammar has {} productions",
                id,
                self.productions.len()
            ))
        })
    }

    /// The name of a symbol.
    pub fn name(&self, id: SymbolId) -> DiagResult2<&str> {
        self.symbol(id).map(|s| s.name())
    }

    pub fn derives_empty(&self, id: SymbolId) -> DiagResult2<bool> {
        self.symbol(id).map(|s| s.derives_empty())
    }

    pub fn first(&self, id: SymbolId) -> DiagResult2<&SymbolSet> {
        self.symbol(id).map(|s| s.first())
    }

    pub fn follow(&self, id: SymbolId) -> DiagResult2<&SymbolSet> {
        let sym = self.symbol(id)?;
        if sym.is_terminal() {
            return Err(DiagBuilder2::bug(format!(
                "follow set of terminal `{}` requested",
                sym.name()
            )));
        }
        Ok(sym.follow())
    }

    pub fn predict(&self, id: ProductionId) -> DiagResult2<&SymbolSet> {
        self.production(id).map(|p| p.predict())
    }

    /// Iterate over the symbols that derive the empty string, excluding the
    /// epsilon symbol itself.
    pub fn empty_symbols<'a>(&'a self) -> impl Iterator<Item = (SymbolId, &'a Symbol)> + 'a {
        self.symbols
            .iter()
            .filter(move |&(id, s)| s.derives_empty() && !self.symbols.is_epsilon(id))
    }

    /// Format a production as `lhs : rhs...`.
    pub fn display_production(&self, id: ProductionId) -> DiagResult2<DisplayProduction> {
        let prod = self.production(id)?;
        Ok(DisplayProduction {
            symbols: &self.symbols,
            prod,
        })
    }

    /// For every symbol, the productions and positions at which it occurs on
    /// a right-hand side. A symbol occurring twice in one production is
    /// listed twice.
    pub(crate) fn occurrences(&self) -> Vec<Vec<(ProductionId, usize)>> {
        let mut occ = vec![Vec::new(); self.symbols.len()];
        for (pid, prod) in self.productions.iter() {
            for (pos, &sym) in prod.rhs().iter().enumerate() {
                occ[sym.as_usize()].push((pid, pos));
            }
        }
        occ
    }
}

/// Displays a production of a grammar.
///
/// Only created for productions of the grammar, whose symbols have all been
/// checked by `ProductionList::add`.
pub struct DisplayProduction<'a> {
    symbols: &'a SymbolTable,
    prod: &'a Production,
}

impl fmt::Display for DisplayProduction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} :", self.symbols[self.prod.lhs()].name())?;
        for &sym in self.prod.rhs() {
            write!(f, " {}", self.symbols[sym].name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::EPSILON;

    #[test]
    fn accessors_check_bounds() {
        let mut small = Grammar::new();
        small.register_symbol("S", false);
        let mut big = Grammar::new();
        big.register_symbol("S", false);
        big.register_symbol("T", false);
        let t = big.register_symbol("t", true);
        let pid = big.add_production(t, vec![vec![t]]);
        assert!(pid.is_err());
        assert_eq!(small.symbol(t).unwrap_err().get_severity(), Severity::Bug);
        assert!(small.first(t).is_err());
        assert!(small.follow(t).is_err());
        assert!(big.follow(t).is_err());
    }

    #[test]
    fn display() {
        let mut g = Grammar::new();
        let s = g.register_symbol("S", false);
        let a = g.register_symbol("'a'", true);
        let eps = g.register_symbol(EPSILON, true);
        let ids = g.add_production(s, vec![vec![a, s], vec![eps]]).unwrap();
        assert_eq!(g.display_production(ids[0]).unwrap().to_string(), "S : 'a' S");
        assert_eq!(g.display_production(ids[1]).unwrap().to_string(), "S : %empty");
        assert_eq!(g.name(a).unwrap(), "'a'");
        let other = Grammar::new();
        assert!(other.predict(ids[0]).is_err());
        assert!(other.display_production(ids[0]).is_err());
        assert_eq!(other.name(a).unwrap_err().get_severity(), Severity::Bug);
    }
}
