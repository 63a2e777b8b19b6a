//! Text normalization and pagination.
//!
//! Upstream text production (native PDF text or OCR) emits a mix of unicode
//! dashes and spaces, ragged column padding, and literal `=== PAGE N ===`
//! markers between pages. Every heuristic downstream works line by line, so
//! normalization collapses horizontal whitespace only and never touches
//! newlines.

use regex::Regex;
use std::sync::LazyLock;

/// Runs of two or more spaces/tabs.
static HORIZONTAL_WS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("valid regex"));

/// Page boundary marker written by the text producer.
static PAGE_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"=== PAGE \d+ ===").expect("valid regex"));

/// Any whitespace run, newlines included.
static ANY_WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Maps non-ASCII dash and space variants to their ASCII equivalents.
const fn ascii_equivalent(c: char) -> char {
    match c {
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}' => '-',
        '\u{a0}' | '\u{2007}' | '\u{2009}' | '\u{202f}' => ' ',
        other => other,
    }
}

/// Replaces unicode dash/space variants with ASCII and collapses runs of
/// horizontal whitespace into a single space. Line breaks are preserved.
#[must_use]
pub fn normalize_text(raw: &str) -> String {
    let ascii: String = raw.chars().map(ascii_equivalent).collect();
    HORIZONTAL_WS_RE.replace_all(&ascii, " ").into_owned()
}

/// Splits normalized text on page markers, trimming each page and dropping
/// blank segments (including any preamble before the first marker that is
/// only whitespace).
#[must_use]
pub fn split_pages(text: &str) -> Vec<String> {
    PAGE_MARKER_RE
        .split(text)
        .map(str::trim)
        .filter(|page| !page.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Collapses every whitespace run (newlines included) into one space.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    ANY_WS_RE.replace_all(text, " ").into_owned()
}

/// A normalized input document and its pages, in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
    pages: Vec<String>,
}

impl Document {
    /// Normalizes `raw` and splits it into pages.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let text = normalize_text(raw);
        let pages = split_pages(&text);
        log::trace!("Split document into {} page(s)", pages.len());
        Self { text, pages }
    }

    /// The full normalized text, page markers included.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Non-empty pages in document order.
    #[must_use]
    pub fn pages(&self) -> &[String] {
        &self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_unicode_dashes_and_spaces() {
        assert_eq!(
            normalize_text("34\u{2013}3H\u{a0}Well\u{2014}File"),
            "34-3H Well-File"
        );
    }

    #[test]
    fn collapses_horizontal_runs_but_keeps_newlines() {
        assert_eq!(
            normalize_text("Operator:   Hess\t\tBakken\n\nNext  line"),
            "Operator: Hess Bakken\n\nNext line"
        );
    }

    #[test]
    fn splits_on_page_markers_and_drops_blank_pages() {
        let text = "=== PAGE 1 ===\n\nfirst page\n\n=== PAGE 2 ===\n   \n=== PAGE 3 ===\nthird";
        assert_eq!(split_pages(text), vec!["first page", "third"]);
    }

    #[test]
    fn text_without_markers_is_one_page() {
        assert_eq!(split_pages("  just text \n"), vec!["just text"]);
    }

    #[test]
    fn document_keeps_full_text_and_pages() {
        let doc = Document::parse("=== PAGE 1 ===\nA  B\n=== PAGE 2 ===\nC");
        assert_eq!(doc.pages(), ["A B", "C"]);
        assert!(doc.text().contains("=== PAGE 2 ==="));
    }

    #[test]
    fn collapse_whitespace_joins_lines() {
        assert_eq!(collapse_whitespace("Lat:\n47.1234\t N"), "Lat: 47.1234 N");
    }
}
