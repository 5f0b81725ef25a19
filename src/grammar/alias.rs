// Copyright (c) 2016-2021 Fabian Schuiki

//! Display aliases of symbols, as introduced by `%token NAME "alias"`.
//!
//! The aliases only affect how a grammar is read and presented. None of the
//! analyses look at them.

/// A single `from -> to` alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Default, Clone)]
pub struct AliasTable {
    aliases: Vec<Alias>,
}

impl AliasTable {
    pub fn new() -> AliasTable {
        Default::default()
    }

    /// Record that the symbol called `from` may also be written as `to`.
    pub fn add<F: Into<String>, T: Into<String>>(&mut self, from: F, to: T) {
        self.aliases.push(Alias {
            from: from.into(),
            to: to.into(),
        });
    }

    /// Resolve an alias to the name of the symbol it stands for. Returns
    /// `name` itself if it is not an alias.
    pub fn aliased_from<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases
            .iter()
            .find(|a| a.to == name)
            .map(|a| a.from.as_str())
            .unwrap_or(name)
    }

    /// Iterate over the aliases of a symbol.
    pub fn aliases_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.aliases
            .iter()
            .filter(move |a| a.from == name)
            .map(|a| a.to.as_str())
    }
}
