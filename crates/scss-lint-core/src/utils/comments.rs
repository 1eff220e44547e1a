//! Comment text helpers.

const BANNER_CHARS: &[char] = &['=', '-', '*', '#', '~', '/'];

/// Comment text without its `//` or `/* */` delimiters.
#[must_use]
pub fn comment_body(text: &str) -> &str {
    if let Some(rest) = text.strip_prefix("//") {
        return rest;
    }
    let Some(rest) = text.strip_prefix("/*") else {
        return text;
    };
    rest.strip_suffix("*/").unwrap_or(rest)
}

/// Whether a comment is a section heading: any of its lines is a banner of
/// three or more repeats of a single `=`, `-`, `*`, `#`, `~` or `/`.
///
/// ```text
/// /* ==========================
///    Navigation
///    ========================== */
/// ```
#[must_use]
pub fn is_heading_comment(text: &str) -> bool {
    comment_body(text).lines().any(is_banner_line)
}

fn is_banner_line(line: &str) -> bool {
    let line = line.trim();
    let mut chars = line.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    BANNER_CHARS.contains(&first) && line.chars().count() >= 3 && chars.all(|c| c == first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_delimiters() {
        assert_eq!(comment_body("// note"), " note");
        assert_eq!(comment_body("/* note */"), " note ");
        assert_eq!(comment_body("/* open"), " open");
    }

    #[test]
    fn detects_banners() {
        assert!(is_heading_comment("/* ==========\n   Header\n   ========== */"));
        assert!(is_heading_comment("/* ---------- */"));
        assert!(is_heading_comment("//////////"));
        assert!(is_heading_comment("// ====="));
    }

    #[test]
    fn ordinary_comments_are_not_headings() {
        assert!(!is_heading_comment("/* a note */"));
        assert!(!is_heading_comment("/* == */"));
        assert!(!is_heading_comment("/* =-=-= */"));
        assert!(!is_heading_comment("/**/"));
    }
}
