//! Context types for rule execution.

use crate::syntax::Span;
use crate::types::Location;
use std::path::Path;

/// Context provided to rules for the file being checked.
#[derive(Debug, Clone, Copy)]
pub struct FileContext<'a> {
    /// Path of the file, as given to the analyzer.
    pub path: &'a Path,
    /// File contents.
    pub content: &'a str,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str) -> Self {
        Self { path, content }
    }

    /// Location of `span` in this file.
    #[must_use]
    pub fn location(&self, span: Span) -> Location {
        Location::from_span(self.path.to_path_buf(), span)
    }

    /// Text of line `line` (1-indexed) without its line break.
    #[must_use]
    pub fn line_text(&self, line: usize) -> Option<&'a str> {
        self.content.lines().nth(line.checked_sub(1)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Position;

    #[test]
    fn location_uses_span_start() {
        let ctx = FileContext::new(Path::new("a.scss"), "a {\n  b: c;\n}");
        let span = Span::new(
            Position {
                offset: 6,
                line: 2,
                column: 3,
            },
            Position {
                offset: 7,
                line: 2,
                column: 4,
            },
        );
        let location = ctx.location(span);
        assert_eq!((location.line, location.column), (2, 3));
        assert_eq!((location.offset, location.length), (6, 1));
    }

    #[test]
    fn line_text_is_one_indexed() {
        let ctx = FileContext::new(Path::new("a.scss"), "first\nsecond");
        assert_eq!(ctx.line_text(2), Some("second"));
        assert_eq!(ctx.line_text(0), None);
        assert_eq!(ctx.line_text(3), None);
    }
}
