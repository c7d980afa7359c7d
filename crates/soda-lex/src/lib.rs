//! The Soda tokenizer: converts a UTF-8 source string into a stream of
//! [`Token`]s, each carrying a [`soda_util::SourceRange`] and raw lexeme
//! text.
//!
//! Layered on top of a code-point [`Reader`] (see the `reader` module): the
//! reader knows nothing about tokens, and the lexer knows nothing about
//! grammar — it only classifies lexemes and reports lexical errors through a
//! shared [`soda_util::Handler`].

pub mod lexer;
pub mod reader;
pub mod token;
pub mod unicode;

pub use lexer::Lexer;
pub use reader::Reader;
pub use token::{Token, TokenKind};

#[cfg(test)]
mod tests {
    use soda_util::Handler;

    use super::*;

    fn tokens(source: &str) -> Vec<(TokenKind, String)> {
        let mut handler = Handler::new();
        Lexer::new(source, &mut handler)
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn numeric_lexing_worked_example() {
        let got = tokens("0x00ff 0b1001 0o755 0755 123.456 .456 123.");
        assert_eq!(
            got,
            vec![
                (TokenKind::HexIconst, "00ff".into()),
                (TokenKind::BinIconst, "1001".into()),
                (TokenKind::OctIconst, "755".into()),
                (TokenKind::DecIconst, "0755".into()),
                (TokenKind::FConst, "123.456".into()),
                (TokenKind::FConst, ".456".into()),
                (TokenKind::FConst, "123.".into()),
            ]
        );
    }

    #[test]
    fn keywords_and_identifiers_mix() {
        let got = tokens("namespace a { class B { var:int x; } }");
        let kinds: Vec<_> = got.into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword,
                TokenKind::Ident,
                TokenKind::LBrace,
                TokenKind::Keyword,
                TokenKind::Ident,
                TokenKind::LBrace,
                TokenKind::Keyword,
                TokenKind::Colon,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Semicolon,
                TokenKind::RBrace,
                TokenKind::RBrace,
            ]
        );
    }

    #[test]
    fn tokenization_is_a_pure_function_of_input() {
        let source = "fun main() { return 1 + 2 * 3; }";
        assert_eq!(tokens(source), tokens(source));
    }

    #[test]
    fn token_ranges_never_go_backward() {
        let mut handler = Handler::new();
        let lexer = Lexer::new("var:int x = 1 + 2;", &mut handler);
        let mut last_end = soda_util::Position::START;
        for tok in lexer {
            assert!(tok.range.start >= last_end);
            assert!(tok.range.start <= tok.range.end);
            last_end = tok.range.end;
        }
    }
}
