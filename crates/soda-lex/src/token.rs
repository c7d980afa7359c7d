//! The token stream's element type.

use soda_util::SourceRange;

/// What kind of lexeme a [`Token`] represents.
///
/// Every literal punctuator is its own kind, per the one-token-per-punctuator
/// rule; compound assignment and comparison operators get their own kind
/// rather than being represented as a base operator plus an `=` flag, so the
/// parser never has to reconstruct "was this `>>=`?" from two fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Eof,
    Error,

    Ident,
    Keyword,

    DecIconst,
    HexIconst,
    OctIconst,
    BinIconst,
    FConst,
    CharLit,
    StrLit,

    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Colon,
    Dot,
    Tilde,
    Question,

    Plus,
    PlusAssign,
    PlusPlus,
    Minus,
    MinusAssign,
    MinusMinus,
    Arrow,
    Star,
    StarAssign,
    Slash,
    SlashAssign,
    Percent,
    PercentAssign,

    Amp,
    AmpAssign,
    AndAnd,
    Pipe,
    PipeAssign,
    OrOr,
    Caret,
    CaretAssign,
    Bang,
    NeOp,
    Assign,
    EqOp,

    Lt,
    LeOp,
    Shl,
    ShlAssign,
    Gt,
    GeOp,
    Shr,
    ShrAssign,
}

/// A single lexeme: its kind, the source range it spans, and its raw text.
///
/// `text` is the literal lexeme with outer quote delimiters stripped for
/// [`TokenKind::CharLit`]/[`TokenKind::StrLit`] and the base prefix stripped
/// for radix-prefixed integers; escape sequences are left unprocessed. For
/// single- and multi-character punctuation `text` is the operator spelling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub range: SourceRange,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, range: SourceRange, text: impl Into<String>) -> Self {
        Token {
            kind,
            range,
            text: text.into(),
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}
