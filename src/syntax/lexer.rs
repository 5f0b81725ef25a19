// Copyright (c) 2016-2021 Fabian Schuiki

//! A lexical analyzer for grammar description files.

pub use crate::token::*;
use ll1check_common::errors::*;
use ll1check_common::source::*;
use std::rc::Rc;

pub type TokenAndSpan = (Token, Span);

/// A lexical analyzer for grammar description files.
pub struct Lexer {
    source: Source,
    content: Rc<dyn SourceContent>,
    pos: usize,
}

impl Lexer {
    pub fn new(source: Source) -> Lexer {
        Lexer {
            source: source,
            content: source.get_content(),
            pos: 0,
        }
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.content.as_str()[self.pos..].chars().nth(offset)
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek_char(0) {
            self.pos += c.len_utf8();
        }
    }

    fn span_from(&self, begin: usize) -> Span {
        Span::new(self.source, begin, self.pos)
    }

    /// Skip whitespace and comments.
    fn skip_noise(&mut self) -> DiagResult2<()> {
        loop {
            match (self.peek_char(0), self.peek_char(1)) {
                (Some(c), _) if c.is_whitespace() => self.bump(),
                (Some('/'), Some('/')) => {
                    while let Some(c) = self.peek_char(0) {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                (Some('/'), Some('*')) => {
                    let begin = self.pos;
                    self.bump();
                    self.bump();
                    loop {
                        match (self.peek_char(0), self.peek_char(1)) {
                            (Some('*'), Some('/')) => {
                                self.bump();
                                self.bump();
                                break;
                            }
                            (Some(_), _) => self.bump(),
                            (None, _) => {
                                return Err(DiagBuilder2::fatal("unterminated block comment")
                                    .span(Span::new(self.source, begin, begin + 2)))
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// Eat a sequence of identifier characters.
    fn eat_ident_body(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek_char(0) {
            if !(c.is_ascii_alphanumeric() || c == '_') {
                break;
            }
            name.push(c);
            self.bump();
        }
        name
    }

    pub fn next_token(&mut self) -> DiagResult2<TokenAndSpan> {
        self.skip_noise()?;
        let begin = self.pos;
        let c = match self.peek_char(0) {
            Some(c) => c,
            None => return Ok((Eof, self.span_from(begin))),
        };

        // Match punctuation.
        let sym = match c {
            ':' => Some(Colon),
            ';' => Some(Semicolon),
            '|' => Some(Pipe),
            _ => None,
        };
        if let Some(tkn) = sym {
            self.bump();
            return Ok((tkn, self.span_from(begin)));
        }

        match c {
            // Character literals such as 'x'.
            '\'' => {
                self.bump();
                let inner = match self.peek_char(0) {
                    Some(c) if c != '\n' => c,
                    _ => {
                        return Err(DiagBuilder2::error("unterminated character literal")
                            .span(self.span_from(begin)))
                    }
                };
                self.bump();
                if self.peek_char(0) != Some('\'') {
                    while let Some(c) = self.peek_char(0) {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                        if c == '\'' {
                            break;
                        }
                    }
                    return Err(DiagBuilder2::error(
                        "character literal must contain exactly one character",
                    )
                    .span(self.span_from(begin))
                    .add_note("Use an identifier declared with %token for longer tokens"));
                }
                self.bump();
                Ok((CharLit(format!("'{}'", inner)), self.span_from(begin)))
            }

            // String literals such as "->".
            '"' => {
                self.bump();
                let mut text = String::new();
                loop {
                    match self.peek_char(0) {
                        Some('"') => {
                            self.bump();
                            return Ok((StrLit(text), self.span_from(begin)));
                        }
                        Some('\n') | None => {
                            return Err(DiagBuilder2::error("unterminated string literal")
                                .span(self.span_from(begin)))
                        }
                        Some(c) => {
                            text.push(c);
                            self.bump();
                        }
                    }
                }
            }

            // Directives such as %token, and the %% section separator.
            '%' => {
                self.bump();
                let name = if self.peek_char(0) == Some('%') {
                    self.bump();
                    String::from("%")
                } else {
                    self.eat_ident_body()
                };
                let span = self.span_from(begin);
                if name.is_empty() {
                    return Err(DiagBuilder2::error("expected directive name after `%`").span(span));
                }
                match find_directive(&name) {
                    Some(dir) => Ok((Directive(dir), span)),
                    None => Ok((UnknownDirective(name), span)),
                }
            }

            // Identifiers.
            c if c.is_ascii_alphabetic() => {
                let name = self.eat_ident_body();
                Ok((Ident(name), self.span_from(begin)))
            }

            c => {
                self.bump();
                Err(DiagBuilder2::error(format!("unexpected character `{}`", c))
                    .span(self.span_from(begin)))
            }
        }
    }
}

impl Iterator for Lexer {
    type Item = DiagResult2<TokenAndSpan>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok((Eof, _)) => None,
            x => Some(x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Lexer {
        use std::cell::Cell;
        thread_local!(static INDEX: Cell<usize> = Cell::new(0));
        let sm = get_source_manager();
        let idx = INDEX.with(|i| {
            let v = i.get();
            i.set(v + 1);
            v
        });
        let source = sm.add(&format!("lexer_test_{}.y", idx), input);
        Lexer::new(source)
    }

    fn check(input: &str, expected: &[Token]) {
        let actual: Vec<_> = lex(input).map(|x| x.unwrap().0).collect();
        assert_eq!(actual, expected);
    }

    fn ident(n: &str) -> Token {
        Ident(n.to_string())
    }

    #[test]
    fn punctuation_and_idents() {
        check(
            "expr : expr '+' term | term ;",
            &[
                ident("expr"),
                Colon,
                ident("expr"),
                CharLit("'+'".to_string()),
                ident("term"),
                Pipe,
                ident("term"),
                Semicolon,
            ],
        );
        check("a_1:b2;", &[ident("a_1"), Colon, ident("b2"), Semicolon]);
    }

    #[test]
    fn comments() {
        check(
            "// line comment\nA /* block\ncomment */ : %empty ; // trailing",
            &[ident("A"), Colon, Directive(Dir::Empty), Semicolon],
        );
    }

    #[test]
    fn directives_and_literals() {
        check(
            "%token ARROW \"->\" %left %%",
            &[
                Directive(Dir::Token),
                ident("ARROW"),
                StrLit("->".to_string()),
                UnknownDirective("left".to_string()),
                UnknownDirective("%".to_string()),
            ],
        );
    }

    #[test]
    fn spans() {
        let mut lexer = lex("A :\n  'x' ;");
        let (_, sp) = lexer.next_token().unwrap();
        assert_eq!((sp.begin, sp.end), (0, 1));
        lexer.next_token().unwrap();
        let (tkn, sp) = lexer.next_token().unwrap();
        assert_eq!(tkn, CharLit("'x'".to_string()));
        assert_eq!(sp.extract(), "'x'");
        assert_eq!(sp.begin().human_line(), 2);
        assert_eq!(sp.begin().human_column(), 3);
    }

    #[test]
    fn errors_do_not_stop_lexing() {
        let results: Vec<_> = lex("A # : 'xy' ; \"open").collect();
        assert_eq!(results.len(), 6);
        assert!(matches!(&results[0], Ok((Ident(n), _)) if n == "A"));
        assert!(results[1].is_err());
        assert_eq!(results[1].as_ref().unwrap_err().get_severity(), Severity::Error);
        assert!(matches!(results[2], Ok((Colon, _))));
        assert!(results[3].is_err());
        assert!(matches!(results[4], Ok((Semicolon, _))));
        assert!(results[5].is_err());
    }

    #[test]
    fn unterminated_comment() {
        let mut lexer = lex("A /* never closed");
        assert_eq!(lexer.next_token().unwrap().0, ident("A"));
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.get_severity(), Severity::Fatal);
    }
}
