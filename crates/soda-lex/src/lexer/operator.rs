//! Operator and single-character punctuation lexing: maximal munch.
//!
//! Each method consumes the operator's lead character itself (mirroring
//! [`Lexer::single`], but these may consume one or two more), so every
//! `lex_*` method here is self-contained and callable straight from
//! [`Lexer::next_token`]'s dispatch.

use crate::token::{Token, TokenKind};

use super::core::Lexer;

impl<'a> Lexer<'a> {
    pub fn lex_dot(&mut self) -> Token {
        if matches!(self.reader.peek2(), Some(c) if c.is_ascii_digit()) {
            return self.lex_number();
        }
        self.reader.next();
        self.make_token(TokenKind::Dot, ".")
    }

    pub fn lex_plus(&mut self) -> Token {
        self.reader.next();
        if self.reader.eat('+') {
            self.make_token(TokenKind::PlusPlus, "++")
        } else if self.reader.eat('=') {
            self.make_token(TokenKind::PlusAssign, "+=")
        } else {
            self.make_token(TokenKind::Plus, "+")
        }
    }

    pub fn lex_minus(&mut self) -> Token {
        self.reader.next();
        if self.reader.eat('>') {
            self.make_token(TokenKind::Arrow, "->")
        } else if self.reader.eat('-') {
            self.make_token(TokenKind::MinusMinus, "--")
        } else if self.reader.eat('=') {
            self.make_token(TokenKind::MinusAssign, "-=")
        } else {
            self.make_token(TokenKind::Minus, "-")
        }
    }

    pub fn lex_star(&mut self) -> Token {
        self.reader.next();
        if self.reader.eat('=') {
            self.make_token(TokenKind::StarAssign, "*=")
        } else {
            self.make_token(TokenKind::Star, "*")
        }
    }

    pub fn lex_slash(&mut self) -> Token {
        self.reader.next();
        if self.reader.eat('=') {
            self.make_token(TokenKind::SlashAssign, "/=")
        } else {
            self.make_token(TokenKind::Slash, "/")
        }
    }

    pub fn lex_percent(&mut self) -> Token {
        self.reader.next();
        if self.reader.eat('=') {
            self.make_token(TokenKind::PercentAssign, "%=")
        } else {
            self.make_token(TokenKind::Percent, "%")
        }
    }

    pub fn lex_equals(&mut self) -> Token {
        self.reader.next();
        if self.reader.eat('=') {
            self.make_token(TokenKind::EqOp, "==")
        } else {
            self.make_token(TokenKind::Assign, "=")
        }
    }

    pub fn lex_bang(&mut self) -> Token {
        self.reader.next();
        if self.reader.eat('=') {
            self.make_token(TokenKind::NeOp, "!=")
        } else {
            self.make_token(TokenKind::Bang, "!")
        }
    }

    pub fn lex_less(&mut self) -> Token {
        self.reader.next();
        if self.reader.eat('=') {
            self.make_token(TokenKind::LeOp, "<=")
        } else if self.reader.eat('<') {
            if self.reader.eat('=') {
                self.make_token(TokenKind::ShlAssign, "<<=")
            } else {
                self.make_token(TokenKind::Shl, "<<")
            }
        } else {
            self.make_token(TokenKind::Lt, "<")
        }
    }

    pub fn lex_greater(&mut self) -> Token {
        self.reader.next();
        if self.reader.eat('=') {
            self.make_token(TokenKind::GeOp, ">=")
        } else if self.reader.eat('>') {
            if self.reader.eat('=') {
                self.make_token(TokenKind::ShrAssign, ">>=")
            } else {
                self.make_token(TokenKind::Shr, ">>")
            }
        } else {
            self.make_token(TokenKind::Gt, ">")
        }
    }

    pub fn lex_ampersand(&mut self) -> Token {
        self.reader.next();
        if self.reader.eat('&') {
            self.make_token(TokenKind::AndAnd, "&&")
        } else if self.reader.eat('=') {
            self.make_token(TokenKind::AmpAssign, "&=")
        } else {
            self.make_token(TokenKind::Amp, "&")
        }
    }

    pub fn lex_pipe(&mut self) -> Token {
        self.reader.next();
        if self.reader.eat('|') {
            self.make_token(TokenKind::OrOr, "||")
        } else if self.reader.eat('=') {
            self.make_token(TokenKind::PipeAssign, "|=")
        } else {
            self.make_token(TokenKind::Pipe, "|")
        }
    }

    pub fn lex_caret(&mut self) -> Token {
        self.reader.next();
        if self.reader.eat('=') {
            self.make_token(TokenKind::CaretAssign, "^=")
        } else {
            self.make_token(TokenKind::Caret, "^")
        }
    }
}

#[cfg(test)]
mod tests {
    use soda_util::Handler;

    use super::*;

    fn lex_one(source: &str) -> Token {
        let mut handler = Handler::new();
        Lexer::new(source, &mut handler).next_token()
    }

    #[test]
    fn maximal_munch_worked_example() {
        let mut handler = Handler::new();
        let mut lexer = Lexer::new(">>= >> >= >", &mut handler);
        let kinds: Vec<_> = std::iter::from_fn(|| {
            let tok = lexer.next_token();
            (!tok.is_eof()).then_some(tok.kind)
        })
        .collect();
        assert_eq!(
            kinds,
            vec![TokenKind::ShrAssign, TokenKind::Shr, TokenKind::GeOp, TokenKind::Gt]
        );
    }

    #[test]
    fn arrow_and_minus_minus() {
        assert_eq!(lex_one("->").kind, TokenKind::Arrow);
        assert_eq!(lex_one("--").kind, TokenKind::MinusMinus);
        assert_eq!(lex_one("-").kind, TokenKind::Minus);
    }

    #[test]
    fn lone_dot_is_its_own_token() {
        let tok = lex_one(".");
        assert_eq!(tok.kind, TokenKind::Dot);
        assert_eq!(tok.text, ".");
    }
}
