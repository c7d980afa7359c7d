//! String and character literal lexing.
//!
//! Both literal kinds use the same minimal escaping rule: a backslash
//! escapes the very next code point (so `\'`/`\"` don't terminate the
//! literal early) but the escape is never interpreted — the token's text is
//! the raw lexeme with only the outer quotes stripped.

use crate::token::{Token, TokenKind};

use super::core::Lexer;

impl<'a> Lexer<'a> {
    pub fn lex_string(&mut self) -> Token {
        self.lex_quoted('"', TokenKind::StrLit, "string")
    }

    pub fn lex_char(&mut self) -> Token {
        self.lex_quoted('\'', TokenKind::CharLit, "character")
    }

    fn lex_quoted(&mut self, quote: char, kind: TokenKind, name: &str) -> Token {
        self.reader.next();
        let mut text = String::new();
        let mut closed = false;

        loop {
            match self.reader.peek() {
                None => break,
                Some(c) if c == quote => {
                    self.reader.next();
                    closed = true;
                    break;
                },
                Some('\\') => {
                    text.push(self.reader.next().unwrap());
                    if let Some(escaped) = self.reader.next() {
                        text.push(escaped);
                    }
                },
                Some(c) => {
                    text.push(c);
                    self.reader.next();
                },
            }
        }

        if !closed {
            self.report_error(format!("unterminated {name} literal"));
            return self.make_token(TokenKind::Error, text);
        }
        self.make_token(kind, text)
    }
}
