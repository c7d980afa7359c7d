//! Recursive-descent parser for Soda.
//!
//! Builds the token buffer up front (one [`Lexer`](soda_lex::Lexer) pass),
//! then walks it with a simple index cursor. The grammar needs exactly one
//! place where a parse must be attempted speculatively and rewound — the
//! shared `specifiers type-ident ident` prefix of `var-decl` and `func-def`
//! versus a bare call expression used as a statement — and the cursor's
//! `mark`/`reset` pair exists only to serve that one case.

pub mod ast;
pub mod error;
pub mod expr;
pub mod items;
pub mod stmt;

#[cfg(test)]
mod edge_cases;

use soda_lex::{Lexer, Token, TokenKind};
use soda_util::diagnostic::Handler;
use soda_util::span::SourceRange;
use soda_util::symbol::Symbol;

pub use ast::Tu;
pub use error::{PResult, SyntaxError};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    file: Symbol,
}

impl Parser {
    /// Tokenizes `source` in full (reporting lexical errors into `handler`)
    /// before parsing starts. The lexer's `Iterator` impl stops before
    /// yielding `Eof`, so the buffer is built by calling `next_token`
    /// directly and keeping the trailing `Eof` token as an always-valid
    /// sentinel the cursor can read once every real token is consumed.
    pub fn new(source: &str, file: Symbol, handler: &mut Handler) -> Self {
        let mut lexer = Lexer::new(source, handler);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Parser {
            tokens,
            pos: 0,
            file,
        }
    }

    /// Parses a full translation unit.
    pub fn parse(&mut self) -> PResult<Tu> {
        self.parse_tu()
    }

    // --------------------------------------------------------------- cursor

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    fn current_range(&self) -> SourceRange {
        self.current().range
    }

    fn lookahead(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn is_eof(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    /// Advances past the current token and returns it.
    fn bump(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// True when the current token is the keyword spelled `word`.
    fn at_keyword(&self, word: &str) -> bool {
        self.at(TokenKind::Keyword) && self.current().text == word
    }

    fn accept(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn accept_keyword(&mut self, word: &str) -> bool {
        if self.at_keyword(word) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> PResult<Token> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.unexpected(what))
        }
    }

    fn unexpected(&self, what: &str) -> SyntaxError {
        let found = if self.is_eof() {
            "end of input".to_string()
        } else {
            format!("'{}'", self.current().text)
        };
        SyntaxError::new(
            format!("expected {what}, found {found}"),
            self.current_range(),
        )
    }

    /// Saves the cursor position for a speculative parse.
    fn mark(&self) -> usize {
        self.pos
    }

    fn reset(&mut self, mark: usize) {
        self.pos = mark;
    }

    /// `fq-ident ::= ident { "." ident }`, joined into a single dotted name.
    /// Shared by expression primaries, `type-ident`, namespace names, and
    /// import/alias targets.
    fn parse_dotted_name(&mut self) -> PResult<(Symbol, SourceRange)> {
        let first = self.expect(TokenKind::Ident, "an identifier")?;
        let mut text = first.text.clone();
        let mut range = first.range;
        while self.at(TokenKind::Dot) {
            self.bump();
            let seg = self.expect(TokenKind::Ident, "an identifier after '.'")?;
            text.push('.');
            text.push_str(&seg.text);
            range = range.join(seg.range);
        }
        Ok((Symbol::intern(&text), range))
    }
}
