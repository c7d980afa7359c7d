//! Whitespace and comment skipping.
//!
//! Called once at the top of [`Lexer::next_token`]; comments are discarded
//! entirely rather than becoming tokens, so a comment followed immediately
//! by another comment or more whitespace is handled by this same loop
//! without returning to the caller.

use crate::reader::is_whitespace;

use super::core::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.reader.peek() {
                Some(c) if is_whitespace(c) => {
                    self.reader.next();
                },
                Some('/') if self.reader.peek2() == Some('/') => self.skip_line_comment(),
                Some('/') if self.reader.peek2() == Some('*') => self.skip_block_comment(),
                _ => return,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        self.reader.next();
        self.reader.next();
        while matches!(self.reader.peek(), Some(c) if !is_line_terminator_char(c)) {
            self.reader.next();
        }
    }

    fn skip_block_comment(&mut self) {
        let start = self.reader.position();
        self.reader.next();
        self.reader.next();

        loop {
            match self.reader.peek() {
                None => {
                    self.token_start = start;
                    self.report_error("unterminated block comment");
                    return;
                },
                Some('*') if self.reader.peek2() == Some('/') => {
                    self.reader.next();
                    self.reader.next();
                    return;
                },
                Some(_) => {
                    self.reader.next();
                },
            }
        }
    }
}

fn is_line_terminator_char(c: char) -> bool {
    matches!(
        c,
        '\u{000A}' | '\u{000B}' | '\u{000C}' | '\u{000D}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}
