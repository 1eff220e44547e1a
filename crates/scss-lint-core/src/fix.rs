//! Text edits produced by fixable rules.
//!
//! Every fix is a set of byte-range replacements against the serialized tree.
//! Replacing a node, inserting trivia and reordering children all reduce to
//! this form, so bytes outside the edited ranges are never touched.

use crate::syntax::Token;
use std::ops::Range;

/// Replacement of a byte range with new text. An empty range is an insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Byte range of the current text.
    pub range: Range<usize>,
    /// Text to put in its place.
    pub replacement: String,
}

impl Edit {
    /// Replaces `range` with `text`.
    #[must_use]
    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            replacement: text.into(),
        }
    }

    /// Inserts `text` at `offset`.
    #[must_use]
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::replace(offset..offset, text)
    }

    /// Removes `range`.
    #[must_use]
    pub fn delete(range: Range<usize>) -> Self {
        Self::replace(range, String::new())
    }

    /// Replaces a run of trivia with `text`, or inserts `text` at `offset`
    /// when the run is empty.
    #[must_use]
    pub fn replace_trivia(trivia: &[Token<'_>], offset: usize, text: impl Into<String>) -> Self {
        match (trivia.first(), trivia.last()) {
            (Some(first), Some(last)) => Self::replace(first.start()..last.end(), text),
            _ => Self::insert(offset, text),
        }
    }

    /// Whether this edit only inserts text.
    #[must_use]
    pub fn is_insertion(&self) -> bool {
        self.range.is_empty()
    }

    /// Whether applying both edits would be ambiguous.
    ///
    /// Ranges that merely touch do not conflict. An insertion conflicts with
    /// a range that strictly contains its offset and with another insertion
    /// at the same offset.
    #[must_use]
    pub fn conflicts_with(&self, other: &Self) -> bool {
        match (self.is_insertion(), other.is_insertion()) {
            (true, true) => self.range.start == other.range.start,
            (true, false) => strictly_inside(self.range.start, &other.range),
            (false, true) => strictly_inside(other.range.start, &self.range),
            (false, false) => {
                self.range.start < other.range.end && other.range.start < self.range.end
            }
        }
    }
}

fn strictly_inside(offset: usize, range: &Range<usize>) -> bool {
    range.start < offset && offset < range.end
}

/// An automatic fix: a message and the edits that implement it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    /// What the fix does.
    pub message: String,
    /// Edits, non-conflicting among themselves.
    pub edits: Vec<Edit>,
}

impl Fix {
    /// Creates a fix from edits.
    #[must_use]
    pub fn new(message: impl Into<String>, edits: Vec<Edit>) -> Self {
        Self {
            message: message.into(),
            edits,
        }
    }

    /// A fix with a single replacement.
    #[must_use]
    pub fn replace(message: impl Into<String>, range: Range<usize>, text: impl Into<String>) -> Self {
        Self::new(message, vec![Edit::replace(range, text)])
    }

    /// A fix with a single insertion.
    #[must_use]
    pub fn insert(message: impl Into<String>, offset: usize, text: impl Into<String>) -> Self {
        Self::new(message, vec![Edit::insert(offset, text)])
    }

    /// Smallest range covering every edit.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        let start = self.edits.iter().map(|e| e.range.start).min().unwrap_or(0);
        let end = self.edits.iter().map(|e| e.range.end).max().unwrap_or(start);
        start..end
    }

    /// Whether any edit of `self` conflicts with any edit of `other`.
    #[must_use]
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.edits
            .iter()
            .any(|a| other.edits.iter().any(|b| a.conflicts_with(b)))
    }
}

/// Applies non-conflicting edits to `text`.
///
/// Edits are applied from the end of the text backwards so earlier offsets
/// stay valid; a replacement starting at an offset is applied before an
/// insertion at that offset, so the inserted text ends up in front of it.
/// Returns `None` if an edit is out of bounds or splits a character.
#[must_use]
pub fn apply_edits<'e>(text: &str, edits: impl IntoIterator<Item = &'e Edit>) -> Option<String> {
    let mut edits: Vec<&Edit> = edits.into_iter().collect();
    edits.sort_by(|a, b| {
        (b.range.start, b.range.end).cmp(&(a.range.start, a.range.end))
    });
    let mut out = text.to_string();
    for edit in edits {
        let Range { start, end } = edit.range;
        if start > end
            || end > text.len()
            || !text.is_char_boundary(start)
            || !text.is_char_boundary(end)
        {
            return None;
        }
        out.replace_range(start..end, &edit.replacement);
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_ranges_do_not_conflict() {
        let a = Edit::replace(0..3, "x");
        let b = Edit::replace(3..5, "y");
        assert!(!a.conflicts_with(&b));
        assert!(a.conflicts_with(&Edit::replace(2..4, "z")));
    }

    #[test]
    fn insertions_conflict_at_same_offset_or_inside_range() {
        let insert = Edit::insert(3, "x");
        assert!(insert.conflicts_with(&Edit::insert(3, "y")));
        assert!(!insert.conflicts_with(&Edit::insert(4, "y")));
        assert!(insert.conflicts_with(&Edit::replace(1..5, "y")));
        assert!(!insert.conflicts_with(&Edit::replace(3..5, "y")));
        assert!(!insert.conflicts_with(&Edit::replace(1..3, "y")));
    }

    #[test]
    fn applies_edits_back_to_front() {
        let edits = [
            Edit::replace(0..1, "A"),
            Edit::insert(3, " "),
            Edit::replace(3..4, "D"),
            Edit::delete(5..6),
        ];
        assert_eq!(apply_edits("abcdef", &edits).as_deref(), Some("Abc De"));
    }

    #[test]
    fn rejects_out_of_bounds_and_split_characters() {
        assert_eq!(apply_edits("abc", &[Edit::replace(2..9, "x")]), None);
        assert_eq!(apply_edits("é", &[Edit::insert(1, "x")]), None);
    }

    #[test]
    fn replace_trivia_inserts_when_empty() {
        let tokens: Vec<_> = crate::syntax::tokenize("a  b").collect();
        assert_eq!(Edit::replace_trivia(&tokens[1..2], 1, " "), Edit::replace(1..3, " "));
        assert_eq!(Edit::replace_trivia(&[], 4, ";"), Edit::insert(4, ";"));
    }

    #[test]
    fn fix_span_covers_all_edits() {
        let fix = Fix::new(
            "swap",
            vec![Edit::replace(10..12, "a"), Edit::replace(2..4, "b")],
        );
        assert_eq!(fix.span(), 2..12);
        assert!(fix.conflicts_with(&Fix::insert("x", 11, "y")));
        assert!(!fix.conflicts_with(&Fix::insert("x", 6, "y")));
    }
}
