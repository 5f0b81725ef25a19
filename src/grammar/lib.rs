// Copyright (c) 2016-2021 Fabian Schuiki

//! This crate implements the grammar model and the LL(1) analysis.
//!
//! A `Grammar` is built by registering symbols and adding productions. Its
//! `analyze` method then determines which symbols derive the empty string,
//! computes first, follow, and predict sets, and lists the conflicts that
//! keep the grammar from being LL(1).

#[macro_use]
extern crate log;

pub mod alias;
pub mod analysis;
pub mod empty;
pub mod first;
pub mod follow;
mod grammar;
pub mod predict;
pub mod production;
pub mod set;
pub mod symbol;

pub use crate::alias::AliasTable;
pub use crate::analysis::Analysis;
pub use crate::grammar::{DisplayProduction, Grammar};
pub use crate::predict::Conflict;
pub use crate::production::{Production, ProductionId, ProductionList};
pub use crate::set::SymbolSet;
pub use crate::symbol::{Symbol, SymbolId, SymbolTable, EPSILON};
