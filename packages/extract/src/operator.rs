//! Operating company extraction.
//!
//! The operator appears in a handful of layouts: an inline `Operator:`
//! label, a standalone `Operator` label with the company on the next line,
//! an `Operator` column header followed by the value row, or simply a
//! company name with its phone number. The patterns are tried in that order.

use regex::Regex;
use std::sync::LazyLock;

use crate::vocabulary::NOISE_LINE_RE;

/// Phone-number suffix (optionally labelled) and everything after it.
static PHONE_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+(?:Rig|Telephone|Phone)?[:\s]*\(?\d{3}\)?[\s\-.]\d{3}[\s\-.]\d{4}.*$")
        .expect("valid regex")
});

static INLINE_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bOperator\b\s*:\s*(.+)").expect("valid regex"));

static STANDALONE_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^[ \t]*Operator[ \t]*$").expect("valid regex"));

static COLUMN_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^[ \t]*Operator\b[^\n]+").expect("valid regex"));

static NAME_WITH_PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(.+?)\s+\(?\d{3}\)?[\s\-.]\d{3}[\s\-.]\d{4}").expect("valid regex")
});

static OPERATOR_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bOperator\b").expect("valid regex"));

static LETTER_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]{3,}").expect("valid regex"));

fn strip_phone(s: &str) -> String {
    PHONE_SUFFIX_RE.replace(s, "").trim().to_owned()
}

/// Returns `true` if `s` could be a company name: capitalized, not form
/// boilerplate, and containing a real word.
#[must_use]
pub fn looks_like_company(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_uppercase)
        && !NOISE_LINE_RE.is_match(s)
        && LETTER_RUN_RE.is_match(s)
}

/// Extracts the operator from `text`, which should be the page carrying the
/// well-name label when there is one.
#[must_use]
pub fn extract_operator(text: &str) -> Option<String> {
    let strategies: [(&str, fn(&str) -> Option<String>); 4] = [
        ("inline label", from_inline_label),
        ("standalone label", from_standalone_label),
        ("column header", from_column_header),
        ("name with phone", from_name_with_phone),
    ];

    strategies.iter().find_map(|(name, strategy)| {
        let operator = strategy(text)?;
        log::debug!("Operator '{operator}' matched via {name}");
        Some(operator)
    })
}

/// The first non-empty line after byte offset `end`, accepted only if it
/// looks like a company. A non-company line ends the search for that label.
fn next_line_company(text: &str, end: usize) -> Option<String> {
    let line = text[end..].lines().map(str::trim).find(|l| !l.is_empty())?;
    looks_like_company(line).then(|| strip_phone(line))
}

/// Pattern 1: `Operator: <company>`.
fn from_inline_label(text: &str) -> Option<String> {
    INLINE_LABEL_RE.captures_iter(text).find_map(|caps| {
        let cleaned = strip_phone(&caps[1]);
        let value = cleaned.split("  ").next().unwrap_or_default().trim();
        (!value.is_empty() && looks_like_company(value)).then(|| value.to_owned())
    })
}

/// Pattern 2: `Operator` alone on its line, company on the next.
fn from_standalone_label(text: &str) -> Option<String> {
    STANDALONE_LABEL_RE
        .find_iter(text)
        .find_map(|m| next_line_company(text, m.end()))
}

/// Pattern 3: `Operator` heading a row of column labels (no colon), company
/// on the next line.
fn from_column_header(text: &str) -> Option<String> {
    COLUMN_HEADER_RE
        .find_iter(text)
        .filter(|m| !m.as_str().contains(':'))
        .find_map(|m| next_line_company(text, m.end()))
}

/// Pattern 4: `<company> <phone>` on any line that is not itself a label.
fn from_name_with_phone(text: &str) -> Option<String> {
    NAME_WITH_PHONE_RE.captures_iter(text).find_map(|caps| {
        let candidate = caps[1].trim();
        (looks_like_company(candidate) && !OPERATOR_WORD_RE.is_match(candidate))
            .then(|| candidate.to_owned())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_label_strips_phone() {
        assert_eq!(
            extract_operator("Operator:   Hess Bakken Investments   (701) 555-0100").as_deref(),
            Some("Hess Bakken Investments")
        );
    }

    #[test]
    fn inline_label_splits_at_column_gap() {
        assert_eq!(
            extract_operator("Operator: Oasis Petroleum  Field: Baker").as_deref(),
            Some("Oasis Petroleum")
        );
    }

    #[test]
    fn standalone_label_takes_next_line() {
        let text = "Operator\n\nContinental Resources 405-234-9000\nAddress";
        assert_eq!(
            extract_operator(text).as_deref(),
            Some("Continental Resources")
        );
    }

    #[test]
    fn standalone_label_with_noise_line_does_not_fall_through_to_next_line() {
        let text = "Operator\nTelephone Number\nWhiting Oil\n";
        assert_eq!(extract_operator(text), None);
    }

    #[test]
    fn column_header_takes_value_row() {
        let text = "Operator Telephone Number\nWhiting Petroleum (303) 837-1661\n";
        assert_eq!(extract_operator(text).as_deref(), Some("Whiting Petroleum"));
    }

    #[test]
    fn name_with_phone_ignores_label_lines() {
        let text = "Contact: Operator desk (701) 328-8020\nXTO Energy 817-870-2800\n";
        assert_eq!(extract_operator(text).as_deref(), Some("XTO Energy"));
    }

    #[test]
    fn company_test_rejects_noise_and_lowercase() {
        assert!(looks_like_company("Hess Bakken Investments"));
        assert!(!looks_like_company("hess"));
        assert!(!looks_like_company("City State Zip"));
        assert!(!looks_like_company("AB 12"));
        assert!(!looks_like_company(""));
    }

    #[test]
    fn nothing_found() {
        assert_eq!(extract_operator("no operator here"), None);
    }
}
