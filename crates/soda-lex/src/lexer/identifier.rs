//! Identifier and keyword lexing.

use soda_util::Symbol;

use crate::token::{Token, TokenKind};
use crate::unicode::is_ascii_ident_continue;

use super::core::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes `[A-Za-z_][A-Za-z0-9_]*` and classifies it as a keyword or a
    /// plain identifier by looking it up in the reserved-word table.
    pub fn lex_identifier(&mut self) -> Token {
        let mut text = String::new();
        text.push(self.reader.next().expect("caller checked is_ascii_ident_start"));
        while matches!(self.reader.peek(), Some(c) if is_ascii_ident_continue(c)) {
            text.push(self.reader.next().unwrap());
        }

        if Symbol::lookup_keyword(&text).is_some() {
            self.make_token(TokenKind::Keyword, text)
        } else {
            self.make_token(TokenKind::Ident, text)
        }
    }
}
