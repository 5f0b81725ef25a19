// Copyright (c) 2016-2021 Fabian Schuiki

//! This crate implements reading grammar description files into a grammar
//! model that can be analyzed.

#[macro_use]
extern crate log;

pub mod ast;
pub mod ingest;
pub mod lexer;
pub mod parser;
pub mod token;

use ll1check_common::errors::DiagEmitter;
use ll1check_common::source::Source;
use ll1check_grammar::Grammar;

pub use crate::parser::ReportedResult;

/// Read a grammar from a source file.
///
/// Diagnostics are passed to `emitter`. Fails if any error was reported.
pub fn parse_grammar(source: Source, emitter: &dyn DiagEmitter) -> ReportedResult<Grammar> {
    let lexer = lexer::Lexer::new(source);
    let items = parser::parse(lexer, emitter)?;
    ingest::ingest(&items, emitter)
}
