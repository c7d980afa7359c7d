//! Decorates a parsed translation unit with the information downstream
//! consumers need but the grammar itself can't express: which declaration a
//! name refers to, and which declaration a type name refers to.
//!
//! The crate runs two passes over the AST in place, in a fixed order:
//!
//! 1. [`scope`] walks every scope-bearing node, assigns each declaration a
//!    [`DefId`](soda_par::ast::DefId), fills in that node's `symbols`
//!    table, and reports a redefinition whenever a name is declared twice
//!    in the same table.
//! 2. [`typeref`] walks the same tree again and resolves every `TypeIdent`
//!    the grammar treats as a type reference against the declaration arena
//!    the first pass produced, reporting an unknown type name wherever
//!    nothing in scope matches.
//!
//! Both passes decorate the AST in place and report diagnostics to the same
//! [`Handler`](soda_util::diagnostic::Handler) rather than stopping at the
//! first error — a translation unit with several unresolved types is
//! reported in full, not one error at a time across repeated invocations.

pub mod scope;
pub mod typeref;

#[cfg(test)]
mod edge_cases;

pub use scope::{DefInfo, DefKind, DefTable};

use soda_par::ast::Tu;
use soda_util::diagnostic::Handler;

/// Runs both passes over `tu` and returns the declaration arena they
/// produced. `tu` is mutated in place: every scope-bearing node's `symbols`
/// table and every covered `TypeIdent.resolved_decl` reflects the result.
/// Redefinitions and unknown type names are reported to `handler`; callers
/// check `handler.has_errors()` to tell a clean analysis from one that
/// found problems.
pub fn analyze(tu: &mut Tu, handler: &mut Handler) -> DefTable {
    let defs = scope::run(tu, handler);
    typeref::run(tu, &defs, handler);
    defs
}
