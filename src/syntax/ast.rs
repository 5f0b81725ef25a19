// Copyright (c) 2016-2021 Fabian Schuiki

//! The syntax tree of a grammar description file.

use ll1check_common::source::{Span, Spanned};

/// A top-level item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// A `%token` declaration.
    Tokens(Vec<TokenDecl>),
    /// A `%nterm` declaration.
    Nonterminals(Vec<Spanned<String>>),
    /// A rule `name : alt | alt ;`.
    Rule(Rule),
}

/// A single name in a `%token` declaration, with its optional alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDecl {
    pub name: Spanned<String>,
    pub alias: Option<Spanned<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: Spanned<String>,
    pub alts: Vec<Alt>,
}

/// One alternative of a rule. An alternative without symbols derives the
/// empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alt {
    pub span: Span,
    pub symbols: Vec<Spanned<Sym>>,
}

/// A symbol on the right-hand side of a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sym {
    /// A named symbol, e.g. `expr` or `NUMBER`.
    Ident(String),
    /// A character literal, e.g. `'+'`.
    Char(String),
    /// An alias string, e.g. `"->"`.
    Alias(String),
    /// The explicit empty string, `%empty`.
    Empty,
}
