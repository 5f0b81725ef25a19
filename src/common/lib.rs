// Copyright (c) 2016-2021 Fabian Schuiki

//! This crate contains the fundamental utilities used by the rest of the
//! ll1check grammar analyzer.

#[macro_use]
extern crate bitflags;

pub mod errors;
pub mod source;

use crate::errors::{DiagBuilder2, DiagEmitter, Severity};
use std::cell::Cell;

/// Global analysis session.
///
/// Carries the options of a single run and keeps track of whether any error
/// was reported while ingesting the grammar.
pub struct Session {
    pub opts: SessionOptions,
    /// Whether any error diagnostics were produced.
    pub failed: Cell<bool>,
}

impl Session {
    /// Create a new session.
    pub fn new() -> Session {
        Session {
            opts: Default::default(),
            failed: Cell::new(false),
        }
    }

    /// Check whether any errors have been reported.
    pub fn failed(&self) -> bool {
        self.failed.get()
    }
}

impl DiagEmitter for Session {
    fn emit(&self, diag: DiagBuilder2) {
        let sev = diag.get_severity();
        if sev >= Severity::Error {
            self.failed.set(true);
        }
        eprintln!("{}", diag);
    }
}

/// A set of options for a session.
#[derive(Debug)]
pub struct SessionOptions {
    /// The report sections to print.
    pub sections: Sections,
}

impl Default for SessionOptions {
    fn default() -> SessionOptions {
        SessionOptions {
            sections: Sections::all(),
        }
    }
}

bitflags! {
    /// Report sections.
    #[derive(Default)]
    pub struct Sections: u32 {
        const TERMINALS = 1 << 0;
        const NONTERMINALS = 1 << 1;
        const GRAMMAR = 1 << 2;
        const EMPTY = 1 << 3;
        const FIRST = 1 << 4;
        const FOLLOW = 1 << 5;
        const PREDICT = 1 << 6;
        const CONFLICTS = 1 << 7;
    }
}

impl Sections {
    /// Look up a section by the name used on the command line.
    pub fn from_name(name: &str) -> Option<Sections> {
        Some(match name {
            "terminals" => Sections::TERMINALS,
            "nonterminals" => Sections::NONTERMINALS,
            "grammar" => Sections::GRAMMAR,
            "empty" => Sections::EMPTY,
            "first" => Sections::FIRST,
            "follow" => Sections::FOLLOW,
            "predict" => Sections::PREDICT,
            "conflicts" => Sections::CONFLICTS,
            _ => return None,
        })
    }

    /// The names accepted by `from_name`.
    pub const NAMES: &'static [&'static str] = &[
        "terminals",
        "nonterminals",
        "grammar",
        "empty",
        "first",
        "follow",
        "predict",
        "conflicts",
    ];
}
