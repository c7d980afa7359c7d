//! Shared foundation types for the Soda front-end: source positions, interned
//! symbols, diagnostics, and the typed-index arena pattern the semantic
//! passes build declaration tables on top of.
//!
//! Nothing in this crate knows about tokens, grammar, or scopes — it is pure
//! plumbing shared by `soda-lex`, `soda-par`, and `soda-sem`.

pub mod diagnostic;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, Handler, Level};
pub use index_vec::{Idx, IndexVec};
pub use span::{Position, SourceRange};
pub use symbol::Symbol;
