//! Parser-level failures.
//!
//! The parser performs no error recovery: the grammar has no synchronization
//! points defined, so the first malformed construct aborts the translation
//! unit. `SyntaxError` is an explicit `Result` payload rather than a panic or
//! an exception-style unwind, matching the redesign away from the reference
//! implementation's throw-based error flow.

use soda_util::diagnostic::Diagnostic;
use soda_util::span::SourceRange;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    pub range: SourceRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: SourceRange) -> Self {
        SyntaxError {
            message: message.into(),
            range,
        }
    }

    /// Renders this failure as a diagnostic for the driver to print.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.message.clone(), self.range)
    }
}

pub type PResult<T> = Result<T, SyntaxError>;
