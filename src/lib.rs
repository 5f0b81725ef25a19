// Copyright (c) 2016-2021 Fabian Schuiki

//! An LL(1) analyzer for context-free grammars.

#[macro_use]
extern crate log;

// Re-export everything from the common crate.
pub extern crate ll1check_common as common;
pub use crate::common::*;

// Pull in subcrates.
pub extern crate ll1check_grammar as grammar;
pub extern crate ll1check_syntax as syntax;

pub mod report;

use crate::errors::*;
use crate::grammar::{Analysis, Grammar};

/// Read and analyze a grammar description file.
///
/// Problems with the file are reported to `sess`. Fails if the file cannot
/// be read or contains errors.
pub fn analyze_file(sess: &Session, filename: &str) -> Result<(Grammar, Analysis), ()> {
    let sm = source::get_source_manager();
    let source = match sm.open(filename) {
        Ok(s) => s,
        Err(e) => {
            sess.emit(DiagBuilder2::fatal(format!(
                "unable to open input file `{}`: {}",
                filename, e
            )));
            return Err(());
        }
    };
    let mut grammar = syntax::parse_grammar(source, sess)?;
    if sess.failed() {
        return Err(());
    }
    info!("read grammar from `{}`", filename);
    let analysis = grammar.analyze();
    Ok((grammar, analysis))
}
