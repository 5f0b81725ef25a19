// Copyright (c) 2016-2021 Fabian Schuiki

//! The production list.

use crate::set::SymbolSet;
use crate::symbol::{SymbolId, SymbolTable};
use ll1check_common::errors::*;
use std::fmt;
use std::ops::Index;

/// A reference to a production in a `ProductionList`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductionId(usize);

impl ProductionId {
    /// The position of the production in the list.
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Debug for ProductionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// A single alternative `lhs : rhs` of a rule.
#[derive(Debug, Clone)]
pub struct Production {
    lhs: SymbolId,
    rhs: Vec<SymbolId>,
    pub(crate) yield_count: usize,
    pub(crate) derives_empty: bool,
    pub(crate) predict: SymbolSet,
}

impl Production {
    pub fn lhs(&self) -> SymbolId {
        self.lhs
    }

    pub fn rhs(&self) -> &[SymbolId] {
        &self.rhs
    }

    /// The number of right-hand side symbols not yet known to derive the
    /// empty string.
    pub fn yield_count(&self) -> usize {
        self.yield_count
    }

    pub fn derives_empty(&self) -> bool {
        self.derives_empty
    }

    /// The lookahead terminals that select this production.
    pub fn predict(&self) -> &SymbolSet {
        &self.predict
    }
}

/// The ordered list of all productions of a grammar.
#[derive(Debug, Default, Clone)]
pub struct ProductionList {
    prods: Vec<Production>,
}

impl ProductionList {
    pub fn new() -> ProductionList {
        Default::default()
    }

    /// Add one production per alternative, all sharing the left-hand side
    /// `lhs`. The productions are appended in the order given.
    ///
    /// Every symbol must be registered in `symbols`, and `lhs` must be a
    /// nonterminal other than the epsilon symbol. Violations are reported as
    /// bugs and leave the list unchanged.
    pub fn add(
        &mut self,
        symbols: &SymbolTable,
        lhs: SymbolId,
        alternatives: Vec<Vec<SymbolId>>,
    ) -> DiagResult2<Vec<ProductionId>> {
        let lhs_sym = symbols.get(lhs).ok_or_else(|| {
            DiagBuilder2::bug(format!("production lhs {:?} is not a registered symbol", lhs))
        })?;
        if lhs_sym.is_terminal() || symbols.is_epsilon(lhs) {
            return Err(DiagBuilder2::bug(format!(
                "production lhs `{}` is not a nonterminal",
                lhs_sym.name()
            )));
        }
        if alternatives.is_empty() {
            return Err(DiagBuilder2::bug(format!(
                "no alternatives given for `{}`",
                lhs_sym.name()
            )));
        }
        for rhs in &alternatives {
            if let Some(bad) = rhs.iter().find(|&&id| !symbols.contains(id)) {
                return Err(DiagBuilder2::bug(format!(
                    "production of `{}` refers to unregistered symbol {:?}",
                    lhs_sym.name(),
                    bad
                )));
            }
        }

        let mut ids = Vec::with_capacity(alternatives.len());
        for rhs in alternatives {
            let yield_count = rhs.iter().filter(|&&id| !symbols.is_epsilon(id)).count();
            let id = ProductionId(self.prods.len());
            self.prods.push(Production {
                lhs: lhs,
                rhs: rhs,
                yield_count: yield_count,
                derives_empty: false,
                predict: SymbolSet::new(),
            });
            ids.push(id);
        }
        trace!("added {} productions for `{}`", ids.len(), lhs_sym.name());
        Ok(ids)
    }

    pub fn contains(&self, id: ProductionId) -> bool {
        id.0 < self.prods.len()
    }

    pub fn get(&self, id: ProductionId) -> Option<&Production> {
        self.prods.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: ProductionId) -> &mut Production {
        &mut self.prods[id.0]
    }

    pub fn len(&self) -> usize {
        self.prods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prods.is_empty()
    }

    /// Iterate over all productions in the order they were added.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (ProductionId, &'a Production)> + 'a {
        self.prods
            .iter()
            .enumerate()
            .map(|(i, p)| (ProductionId(i), p))
    }

    pub(crate) fn iter_mut<'a>(
        &'a mut self,
    ) -> impl Iterator<Item = (ProductionId, &'a mut Production)> + 'a {
        self.prods
            .iter_mut()
            .enumerate()
            .map(|(i, p)| (ProductionId(i), p))
    }

    /// Iterate over the productions of a single nonterminal, in list order.
    pub fn of<'a>(
        &'a self,
        lhs: SymbolId,
    ) -> impl Iterator<Item = (ProductionId, &'a Production)> + Clone + 'a {
        self.prods
            .iter()
            .enumerate()
            .filter(move |(_, p)| p.lhs == lhs)
            .map(|(i, p)| (ProductionId(i), p))
    }
}

impl Index<ProductionId> for ProductionList {
    type Output = Production;

    fn index(&self, id: ProductionId) -> &Production {
        &self.prods[id.0]
    }
}
