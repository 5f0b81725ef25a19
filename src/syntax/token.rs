// Copyright (c) 2016-2021 Fabian Schuiki

//! Defines all tokens that may result from performing lexical analysis on a
//! grammar description file.

pub use self::Token::*;
use std::fmt;

/// A token emitted by the lexer.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Token {
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `|`
    Pipe,
    /// An identifier such as `expr`.
    Ident(String),
    /// A character literal such as `'+'`, including the quotes.
    CharLit(String),
    /// A string literal such as `"->"`, without the quotes.
    StrLit(String),
    /// A known directive.
    Directive(Dir),
    /// A directive that is not understood, such as `%left`, without the
    /// percent sign.
    UnknownDirective(String),
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Colon => write!(f, ":"),
            Semicolon => write!(f, ";"),
            Pipe => write!(f, "|"),
            Ident(ref name) => write!(f, "{}", name),
            CharLit(ref lit) => write!(f, "{}", lit),
            StrLit(ref lit) => write!(f, "\"{}\"", lit),
            Directive(dir) => write!(f, "%{}", dir),
            UnknownDirective(ref name) => write!(f, "%{}", name),
            Eof => write!(f, "end of file"),
        }
    }
}

macro_rules! declare_directives {
    ($(($konst: ident, $string: expr))*) => {
        /// A directive understood by the parser.
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        pub enum Dir {
            $($konst,)*
        }

        impl Dir {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Dir::$konst => $string,)*
                }
            }
        }

        impl fmt::Display for Dir {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        /// Look up a directive by its name, without the leading `%`.
        pub fn find_directive<S: AsRef<str>>(name: S) -> Option<Dir> {
            use once_cell::sync::Lazy;
            use std::collections::HashMap;
            static TBL: Lazy<HashMap<&'static str, Dir>> = Lazy::new(|| {
                let mut tbl = HashMap::new();
                $(tbl.insert($string, Dir::$konst);)*
                tbl
            });
            TBL.get(name.as_ref()).copied()
        }
    }
}

declare_directives! {
    (Empty, "empty")
    (Nterm, "nterm")
    (Token, "token")
}
