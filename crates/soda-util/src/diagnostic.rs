//! Diagnostic reporting.
//!
//! Every compiler phase surfaces user-facing failures through a
//! [`Diagnostic`]; there is no logging framework in this workspace, because
//! the front-end has no running service to instrument — the diagnostic
//! stream *is* its observability surface. `soda-drv` is the only crate that
//! prints diagnostics; every other crate just produces them.

use crate::span::SourceRange;
use std::fmt;

/// Severity of a [`Diagnostic`]. The front-end only ever emits `Error`
/// today (spec's error-handling design stops at "first syntax/semantic
/// error with location"), but `Warning` is kept so a future lint pass has
/// somewhere to report into without changing this type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// A single diagnostic: a severity, a message, and the source range it
/// points at.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub range: SourceRange,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, range: SourceRange) -> Self {
        Diagnostic {
            level: Level::Error,
            message: message.into(),
            range,
        }
    }

    pub fn warning(message: impl Into<String>, range: SourceRange) -> Self {
        Diagnostic {
            level: Level::Warning,
            message: message.into(),
            range,
        }
    }

    /// Render as `<level>:<file>:<line>[-<line>]:<col>[-<col>]: <message>`.
    ///
    /// A point range collapses to a single line/column pair; a range
    /// spanning more than one position prints `start-end` on both line and
    /// column.
    pub fn render(&self, file: &str) -> String {
        let start = self.range.start;
        let end = self.range.end;
        if self.range.is_point() {
            format!(
                "{}:{}:{}:{}: {}",
                self.level,
                file,
                start.display_line(),
                start.display_column(),
                self.message
            )
        } else {
            format!(
                "{}:{}:{}-{}:{}-{}: {}",
                self.level,
                file,
                start.display_line(),
                end.display_line(),
                start.display_column(),
                end.display_column(),
                self.message
            )
        }
    }
}

/// Collects diagnostics emitted during one compilation. The scope and
/// type-reference passes each hold a `&mut Handler`; the driver prints
/// everything the handler accumulated and exits non-zero if any are
/// errors.
#[derive(Default)]
pub struct Handler {
    diagnostics: Vec<Diagnostic>,
}

impl Handler {
    pub fn new() -> Self {
        Handler::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level == Level::Error)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Position;

    fn range_at(line: u32, col: u32) -> SourceRange {
        SourceRange::point(Position::new(0, line, col))
    }

    #[test]
    fn point_range_renders_single_position() {
        let d = Diagnostic::error("unexpected token", range_at(2, 4));
        assert_eq!(d.render("main.soda"), "error:main.soda:3:5: unexpected token");
    }

    #[test]
    fn multi_line_range_renders_start_end() {
        let range = SourceRange::new(Position::new(0, 1, 0), Position::new(10, 3, 2));
        let d = Diagnostic::warning("unreachable code", range);
        assert_eq!(
            d.render("main.soda"),
            "warning:main.soda:2-4:1-3: unreachable code"
        );
    }

    #[test]
    fn handler_tracks_errors() {
        let mut handler = Handler::new();
        assert!(!handler.has_errors());
        handler.emit(Diagnostic::warning("note", range_at(0, 0)));
        assert!(!handler.has_errors());
        handler.emit(Diagnostic::error("bad", range_at(0, 0)));
        assert!(handler.has_errors());
        assert_eq!(handler.diagnostics().len(), 2);
    }
}
