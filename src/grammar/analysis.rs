// Copyright (c) 2016-2021 Fabian Schuiki

//! The analysis pipeline.
//!
//! Runs the empty derivation, first, follow, and predict computations in
//! order, each stage relying on the results of the previous ones, and then
//! collects the conflicts. Every run starts from scratch, so analyzing a
//! grammar twice yields the same results.

use crate::grammar::Grammar;
use crate::predict::{self, Conflict};
use crate::{empty, first, follow};

/// The outcome of analyzing a grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    conflicts: Vec<Conflict>,
}

impl Analysis {
    /// The conflicts found, by nonterminal and then by production pair.
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    /// Whether the grammar is LL(1), i.e. has no conflicts.
    pub fn is_ll1(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Analyze a grammar, storing the results in its symbols and productions.
pub fn analyze(grammar: &mut Grammar) -> Analysis {
    info!(
        "analyzing grammar with {} symbols and {} productions",
        grammar.symbols().len(),
        grammar.productions().len()
    );
    empty::compute(grammar);
    first::compute(grammar);
    follow::compute(grammar);
    predict::compute(grammar);
    let conflicts = predict::conflicts(grammar);
    if conflicts.is_empty() {
        info!("grammar is LL(1)");
    } else {
        info!("grammar has {} conflicts", conflicts.len());
    }
    Analysis { conflicts }
}
