//! Character classification the tokenizer consults while scanning a lexeme.
//!
//! Identifiers are ASCII-only: `[A-Za-z_][A-Za-z0-9_]*`. Soda has no notion
//! of a non-ASCII identifier, so only the ASCII classification functions
//! live here.

/// Valid identifier start: ASCII letter or underscore.
pub fn is_ascii_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Valid identifier continuation: ASCII letter, digit, or underscore.
pub fn is_ascii_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// True if `c` is a valid digit in the given numeric base (2, 8, 10, or 16).
pub fn is_digit_in_base(c: char, base: u32) -> bool {
    match base {
        2 => matches!(c, '0' | '1'),
        8 => matches!(c, '0'..='7'),
        10 => c.is_ascii_digit(),
        16 => c.is_ascii_hexdigit(),
        _ => false,
    }
}
