// Copyright (c) 2016-2021 Fabian Schuiki

//! A parser for grammar description files.
//!
//! The accepted syntax is a subset of the bison rule syntax:
//!
//! ```text
//! %token NUMBER PLUS "+"
//! expr : expr "+" term | term ;
//! term : NUMBER | '(' expr ')' ;
//! ```

use crate::ast::*;
use crate::lexer::{Lexer, TokenAndSpan};
use crate::token::*;
use ll1check_common::errors::*;
use ll1check_common::source::*;
use std::collections::VecDeque;

/// Return type of the lower parse primitives, allowing for further adjustment
/// of the diagnostic message that would be generated.
type ParseResult<T> = Result<T, DiagBuilder2>;

/// Return type of functions that emit diagnostic messages and only need to
/// communicate success to the parent.
pub type ReportedResult<T> = Result<T, ()>;

/// An abstraction around concrete parsers.
trait AbstractParser {
    fn peek(&mut self, offset: usize) -> TokenAndSpan;
    fn bump(&mut self);
    fn last_span(&self) -> Span;
    fn add_diag(&mut self, diag: DiagBuilder2);
    fn severity(&self) -> Severity;

    fn try_eat_ident(&mut self) -> Option<Spanned<String>> {
        match self.peek(0) {
            (Ident(name), span) => {
                self.bump();
                Some(Spanned::new(name, span))
            }
            _ => None,
        }
    }

    fn require(&mut self, expect: Token) -> ParseResult<()> {
        match self.peek(0) {
            (actual, _) if actual == expect => {
                self.bump();
                Ok(())
            }
            (wrong, span) => Err(DiagBuilder2::error(format!(
                "expected `{}`, but found `{}` instead",
                expect, wrong
            ))
            .span(span)),
        }
    }

    fn require_reported(&mut self, expect: Token) -> ReportedResult<()> {
        match self.require(expect) {
            Ok(x) => Ok(x),
            Err(e) => {
                self.add_diag(e);
                Err(())
            }
        }
    }

    fn try_eat(&mut self, expect: Token) -> bool {
        match self.peek(0) {
            (ref actual, _) if *actual == expect => {
                self.bump();
                true
            }
            _ => false,
        }
    }

    /// Skip tokens until one of `terminators` or the end of the file is
    /// reached.
    fn recover(&mut self, terminators: &[Token], eat_terminator: bool) {
        loop {
            let (tkn, _) = self.peek(0);
            if tkn == Eof {
                return;
            }
            if terminators.contains(&tkn) {
                if eat_terminator {
                    self.bump();
                }
                return;
            }
            self.bump();
        }
    }

    fn is_error(&self) -> bool {
        self.severity() >= Severity::Error
    }
}

struct Parser<'a> {
    input: Lexer,
    queue: VecDeque<TokenAndSpan>,
    emitter: &'a dyn DiagEmitter,
    last_span: Span,
    severity: Severity,
}

impl AbstractParser for Parser<'_> {
    fn peek(&mut self, offset: usize) -> TokenAndSpan {
        self.ensure_queue_filled(offset);
        if offset < self.queue.len() {
            self.queue[offset].clone()
        } else {
            match self.queue.back() {
                Some(last) => last.clone(),
                None => (Eof, self.last_span),
            }
        }
    }

    fn bump(&mut self) {
        if self.queue.is_empty() {
            self.ensure_queue_filled(1);
        }
        if let Some((_, sp)) = self.queue.pop_front() {
            self.last_span = sp;
        }
    }

    fn last_span(&self) -> Span {
        self.last_span
    }

    fn add_diag(&mut self, diag: DiagBuilder2) {
        // Emit a backtrace for this diagnostic.
        if diag.get_severity() >= Severity::Warning {
            trace!(
                "Diagnostic triggered here:\n{:?}",
                backtrace::Backtrace::new()
            );
        }

        // Keep track of the worst diagnostic severity we've encountered, such
        // that the caller can tell whether parsing failed.
        if diag.get_severity() > self.severity {
            self.severity = diag.get_severity();
        }
        self.emitter.emit(diag);
    }

    fn severity(&self) -> Severity {
        self.severity
    }
}

impl<'a> Parser<'a> {
    fn new(input: Lexer, emitter: &'a dyn DiagEmitter) -> Parser<'a> {
        Parser {
            input: input,
            queue: VecDeque::new(),
            emitter: emitter,
            last_span: INVALID_SPAN,
            severity: Severity::Note,
        }
    }

    fn ensure_queue_filled(&mut self, min_tokens: usize) {
        if let Some(&(Eof, _)) = self.queue.back() {
            return;
        }
        while self.queue.len() <= min_tokens {
            match self.input.next_token() {
                Ok((Eof, sp)) => {
                    self.queue.push_back((Eof, sp));
                    return;
                }
                Ok((UnknownDirective(name), sp)) => self.add_diag(
                    DiagBuilder2::warning(format!("unknown directive `%{}` ignored", name))
                        .span(sp),
                ),
                Ok(tkn) => self.queue.push_back(tkn),
                Err(x) => self.add_diag(x),
            }
        }
    }
}

/// Parse a grammar description into a list of items.
///
/// All diagnostics are passed to `emitter`. Parsing continues after errors so
/// that as many problems as possible are reported, but the result is only
/// returned if no errors occurred.
pub fn parse(input: Lexer, emitter: &dyn DiagEmitter) -> ReportedResult<Vec<Item>> {
    let mut p = Parser::new(input, emitter);
    let items = parse_items(&mut p);
    if p.is_error() {
        Err(())
    } else {
        Ok(items)
    }
}

fn parse_items(p: &mut dyn AbstractParser) -> Vec<Item> {
    let mut items = Vec::new();
    loop {
        match p.peek(0) {
            (Eof, _) => break,
            (Directive(Dir::Token), _) => items.push(Item::Tokens(parse_token_decl(p))),
            (Directive(Dir::Nterm), _) => items.push(Item::Nonterminals(parse_nterm_decl(p))),
            (Ident(_), _) => match parse_rule(p) {
                Ok(rule) => items.push(Item::Rule(rule)),
                Err(()) => p.recover(&[Semicolon], true),
            },
            (tkn, sp) => {
                p.add_diag(
                    DiagBuilder2::error(format!(
                        "expected a rule or a declaration, but found `{}` instead",
                        tkn
                    ))
                    .span(sp),
                );
                p.recover(&[Semicolon], true);
            }
        }
    }
    debug!("parsed {} items", items.len());
    items
}

/// Parse a `%token` declaration.
///
/// The list of names extends up to the first name that is immediately
/// followed by a `:`, since that name starts a rule.
fn parse_token_decl(p: &mut dyn AbstractParser) -> Vec<TokenDecl> {
    let (_, kw_span) = p.peek(0);
    p.bump();
    let mut decls = Vec::new();
    loop {
        match (p.peek(0), p.peek(1).0) {
            ((Ident(_), _), Colon) => break,
            ((Ident(_), _), _) => {
                let name = match p.try_eat_ident() {
                    Some(n) => n,
                    None => break,
                };
                let alias = match p.peek(0) {
                    (StrLit(text), span) => {
                        p.bump();
                        Some(Spanned::new(text, span))
                    }
                    _ => None,
                };
                decls.push(TokenDecl { name, alias });
            }
            ((StrLit(text), span), _) => {
                p.add_diag(
                    DiagBuilder2::error(format!("alias \"{}\" does not follow a token name", text))
                        .span(span),
                );
                p.bump();
            }
            _ => break,
        }
    }
    if decls.is_empty() {
        p.add_diag(DiagBuilder2::error("expected token names after `%token`").span(kw_span));
    }
    decls
}

/// Parse a `%nterm` declaration. The list of names ends like the one of
/// `%token`.
fn parse_nterm_decl(p: &mut dyn AbstractParser) -> Vec<Spanned<String>> {
    let (_, kw_span) = p.peek(0);
    p.bump();
    let mut names = Vec::new();
    loop {
        match (p.peek(0).0, p.peek(1).0) {
            (Ident(_), Colon) => break,
            (Ident(_), _) => match p.try_eat_ident() {
                Some(n) => names.push(n),
                None => break,
            },
            _ => break,
        }
    }
    if names.is_empty() {
        p.add_diag(DiagBuilder2::error("expected nonterminal names after `%nterm`").span(kw_span));
    }
    names
}

/// Parse a rule `name : alt | alt ;`.
fn parse_rule(p: &mut dyn AbstractParser) -> ReportedResult<Rule> {
    let name = match p.try_eat_ident() {
        Some(n) => n,
        None => return Err(()),
    };
    p.require_reported(Colon)?;
    let mut alts = vec![parse_alt(p, &name.value)?];
    while p.try_eat(Pipe) {
        alts.push(parse_alt(p, &name.value)?);
    }
    p.require_reported(Semicolon)?;
    Ok(Rule { name, alts })
}

/// Parse the symbols of a single alternative, up to the next `|` or `;`.
fn parse_alt(p: &mut dyn AbstractParser, rule: &str) -> ReportedResult<Alt> {
    let (_, first_span) = p.peek(0);
    let mut span = Span::new(first_span.source, first_span.begin, first_span.begin);
    let mut symbols = Vec::new();
    loop {
        let (tkn, sp) = p.peek(0);
        let sym = match tkn {
            Pipe | Semicolon => break,
            Ident(name) => Sym::Ident(name),
            CharLit(lit) => Sym::Char(lit),
            StrLit(text) => Sym::Alias(text),
            Directive(Dir::Empty) => Sym::Empty,
            Eof => {
                p.add_diag(
                    DiagBuilder2::error(format!(
                        "expected `;` at the end of the rule for `{}`",
                        rule
                    ))
                    .span(p.last_span()),
                );
                return Err(());
            }
            Colon => {
                p.add_diag(
                    DiagBuilder2::error(format!(
                        "unexpected `:` in the rule for `{}`",
                        rule
                    ))
                    .span(sp)
                    .add_note("The previous rule may be missing its terminating `;`"),
                );
                return Err(());
            }
            tkn => {
                p.add_diag(
                    DiagBuilder2::error(format!(
                        "unexpected `{}` in the rule for `{}`",
                        tkn, rule
                    ))
                    .span(sp),
                );
                return Err(());
            }
        };
        p.bump();
        span.expand(sp);
        symbols.push(Spanned::new(sym, sp));
    }
    Ok(Alt { span, symbols })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Collect(RefCell<Vec<DiagBuilder2>>);

    impl DiagEmitter for Collect {
        fn emit(&self, diag: DiagBuilder2) {
            self.0.borrow_mut().push(diag);
        }
    }

    fn parse_str(input: &str) -> (ReportedResult<Vec<Item>>, Vec<DiagBuilder2>) {
        use std::cell::Cell;
        thread_local!(static INDEX: Cell<usize> = Cell::new(0));
        let idx = INDEX.with(|i| {
            let v = i.get();
            i.set(v + 1);
            v
        });
        let source = get_source_manager().add(&format!("parser_test_{}.y", idx), input);
        let diags = Collect::default();
        let result = parse(Lexer::new(source), &diags);
        (result, diags.0.into_inner())
    }

    fn rule(item: &Item) -> &Rule {
        match item {
            Item::Rule(r) => r,
            x => panic!("expected rule, got {:?}", x),
        }
    }

    #[test]
    fn rules_and_alternatives() {
        let (items, diags) = parse_str("S : 'a' A ;\nA : 'b' | %empty | ;");
        let items = items.unwrap();
        assert!(diags.is_empty());
        assert_eq!(items.len(), 2);
        let s = rule(&items[0]);
        assert_eq!(s.name.value, "S");
        assert_eq!(s.alts.len(), 1);
        let syms: Vec<_> = s.alts[0].symbols.iter().map(|s| s.value.clone()).collect();
        assert_eq!(
            syms,
            vec![Sym::Char("'a'".to_string()), Sym::Ident("A".to_string())]
        );
        let a = rule(&items[1]);
        assert_eq!(a.alts.len(), 3);
        assert_eq!(a.alts[1].symbols[0].value, Sym::Empty);
        assert!(a.alts[2].symbols.is_empty());
    }

    #[test]
    fn token_list_ends_at_rule() {
        let (items, _) = parse_str("%token PLUS \"+\" NUM\nexpr : NUM \"+\" NUM ;");
        let items = items.unwrap();
        assert_eq!(items.len(), 2);
        match &items[0] {
            Item::Tokens(decls) => {
                assert_eq!(decls.len(), 2);
                assert_eq!(decls[0].name.value, "PLUS");
                assert_eq!(decls[0].alias.as_ref().map(|a| a.value.as_str()), Some("+"));
                assert_eq!(decls[1].name.value, "NUM");
                assert!(decls[1].alias.is_none());
            }
            x => panic!("expected tokens, got {:?}", x),
        }
        assert_eq!(rule(&items[1]).name.value, "expr");
    }

    #[test]
    fn nterm_list_ends_at_rule() {
        let (items, diags) = parse_str("%nterm A B
S : A ;");
        let items = items.unwrap();
        assert!(diags.is_empty());
        match &items[0] {
            Item::Nonterminals(names) => {
                let names: Vec<_> = names.iter().map(|n| n.value.as_str()).collect();
                assert_eq!(names, vec!["A", "B"]);
            }
            x => panic!("expected nonterminals, got {:?}", x),
        }
        assert_eq!(rule(&items[1]).name.value, "S");

        let (items, diags) = parse_str("%nterm
S : 'x' ;");
        assert!(items.is_err());
        assert!(diags[0].get_message().contains("%nterm"));
    }

    #[test]
    fn unknown_directives_warn() {
        let (items, diags) = parse_str("%left PLUS\n%%\nS : 'x' ;");
        assert!(items.is_err());
        assert!(diags.len() >= 2);
        assert_eq!(diags[0].get_severity(), Severity::Warning);
        assert_eq!(diags[1].get_severity(), Severity::Warning);
    }

    #[test]
    fn skipped_directives_between_rules() {
        let (items, diags) = parse_str("S : 'x' ;\n%%\nT : 'y' ;");
        assert_eq!(items.unwrap().len(), 2);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].get_severity(), Severity::Warning);
    }

    #[test]
    fn recovers_at_semicolon() {
        let (items, diags) = parse_str("S : 'x' : ;\nT : 'y' # ;\nU : 'z' ;");
        assert!(items.is_err());
        let errors: Vec<_> = diags
            .iter()
            .filter(|d| d.get_severity() >= Severity::Error)
            .collect();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].get_segments().len(), 2);
    }

    #[test]
    fn missing_semicolon_at_end() {
        let (items, diags) = parse_str("S : 'x'");
        assert!(items.is_err());
        assert_eq!(diags.len(), 1);
        assert!(diags[0].get_message().contains("expected `;`"));
    }
}
