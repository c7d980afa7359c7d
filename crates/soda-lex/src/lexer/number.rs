//! Numeric literal lexing: multi-radix integers and decimal floats.

use crate::token::{Token, TokenKind};
use crate::unicode::is_digit_in_base;

use super::core::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a numeric literal starting at the current code point, which is
    /// either an ASCII digit or (for a leading-dot float like `.456`) a `.`
    /// known by the caller to be followed by a digit.
    ///
    /// `0x`/`0X`, `0b`/`0B`, `0o`/`0O` prefixes are consumed and the token's
    /// range is restarted so it covers only the digit portion, per the radix
    /// literal's text-excludes-prefix rule. Unprefixed numbers are decimal
    /// integers unless a `.` is seen, which switches the token to a float; a
    /// second `.` is left for the next token rather than consumed.
    pub fn lex_number(&mut self) -> Token {
        if self.reader.peek() == Some('0') {
            if let Some(base) = self.reader.peek2().and_then(radix_for) {
                self.reader.next();
                self.reader.next();
                return self.lex_radix_integer(base);
            }
        }
        self.lex_decimal_or_float()
    }

    fn lex_radix_integer(&mut self, base: u32) -> Token {
        let digit_start = self.reader.position();
        let mut digits = String::new();
        while matches!(self.reader.peek(), Some(c) if is_digit_in_base(c, base)) {
            digits.push(self.reader.next().unwrap());
        }

        let range = soda_util::SourceRange::new(digit_start, self.reader.position());
        if digits.is_empty() {
            self.report_error(format!("no digits after base-{base} prefix"));
        }

        let kind = match base {
            16 => TokenKind::HexIconst,
            2 => TokenKind::BinIconst,
            8 => TokenKind::OctIconst,
            _ => unreachable!("radix_for only returns 2, 8, 16"),
        };
        Token::new(kind, range, digits)
    }

    fn lex_decimal_or_float(&mut self) -> Token {
        let mut text = String::new();
        let mut is_float = false;

        if self.reader.peek() == Some('.') {
            is_float = true;
            text.push(self.reader.next().unwrap());
        }

        while matches!(self.reader.peek(), Some(c) if c.is_ascii_digit()) {
            text.push(self.reader.next().unwrap());
        }

        if !is_float && self.reader.peek() == Some('.') {
            is_float = true;
            text.push(self.reader.next().unwrap());
            while matches!(self.reader.peek(), Some(c) if c.is_ascii_digit()) {
                text.push(self.reader.next().unwrap());
            }
        }

        let kind = if is_float {
            TokenKind::FConst
        } else {
            TokenKind::DecIconst
        };
        self.make_token(kind, text)
    }
}

fn radix_for(prefix: char) -> Option<u32> {
    match prefix {
        'x' | 'X' => Some(16),
        'b' | 'B' => Some(2),
        'o' | 'O' => Some(8),
        _ => None,
    }
}
