//! Core lexer implementation: the `Lexer` struct and its dispatch table.

use soda_util::{Diagnostic, Handler, SourceRange};

use crate::reader::Reader;
use crate::token::{Token, TokenKind};
use crate::unicode::is_ascii_ident_start;

/// Tokenizes Soda source text.
///
/// Consumes code points from a [`Reader`] and emits one [`Token`] per call to
/// [`Lexer::next_token`]. Knows nothing of grammar — it hands the parser a
/// flat token stream and reports lexical errors (unterminated literals,
/// invalid starting code points, malformed numeric literals) to the shared
/// [`Handler`].
pub struct Lexer<'a> {
    pub(crate) reader: Reader<'a>,
    pub(crate) handler: &'a mut Handler,
    pub(crate) token_start: soda_util::Position,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, handler: &'a mut Handler) -> Self {
        Lexer {
            reader: Reader::new(source),
            handler,
            token_start: soda_util::Position::START,
        }
    }

    /// Skips whitespace and comments, then reads and returns the next token.
    /// End of input yields a zero-width [`TokenKind::Eof`] token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        self.token_start = self.reader.position();

        let Some(c) = self.reader.peek() else {
            return self.make_token(TokenKind::Eof, String::new());
        };

        match c {
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            ',' => self.single(TokenKind::Comma),
            ';' => self.single(TokenKind::Semicolon),
            '~' => self.single(TokenKind::Tilde),
            '?' => self.single(TokenKind::Question),
            '.' => self.lex_dot(),
            ':' => self.single(TokenKind::Colon),
            '+' => self.lex_plus(),
            '-' => self.lex_minus(),
            '*' => self.lex_star(),
            '/' => self.lex_slash(),
            '%' => self.lex_percent(),
            '=' => self.lex_equals(),
            '!' => self.lex_bang(),
            '<' => self.lex_less(),
            '>' => self.lex_greater(),
            '&' => self.lex_ampersand(),
            '|' => self.lex_pipe(),
            '^' => self.lex_caret(),
            '"' => self.lex_string(),
            '\'' => self.lex_char(),
            c if is_ascii_ident_start(c) => self.lex_identifier(),
            c if c.is_ascii_digit() => self.lex_number(),
            c => {
                self.reader.next();
                self.report_error(format!("unexpected character '{c}'"));
                self.make_token(TokenKind::Error, c.to_string())
            },
        }
    }

    /// Builds a token from `self.token_start` through the reader's current
    /// position, with `text` as its lexeme.
    pub(crate) fn make_token(&self, kind: TokenKind, text: impl Into<String>) -> Token {
        let range = SourceRange::new(self.token_start, self.reader.position());
        Token::new(kind, range, text)
    }

    /// Consumes exactly one code point and produces a single-character token
    /// whose text is that code point.
    pub(crate) fn single(&mut self, kind: TokenKind) -> Token {
        let c = self.reader.next().expect("caller checked peek()");
        self.make_token(kind, c.to_string())
    }

    pub(crate) fn report_error(&mut self, message: impl Into<String>) {
        let range = SourceRange::new(self.token_start, self.reader.position());
        self.handler.emit(Diagnostic::error(message, range));
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.is_eof() {
            None
        } else {
            Some(token)
        }
    }
}
