//! API well number extraction.
//!
//! The API number is a 10-digit state-county-well identifier written as
//! `NN-NNN-NNNNN`. OCR frequently misreads its digits as letters (`O` for
//! `0`, `l` for `1`) and forms carry other hyphenated numbers nearby (well
//! numbers like `34-3H`, state well-file numbers), so four strategies are
//! tried in order of confidence and the first hit wins.

use regex::Regex;
use std::sync::LazyLock;

use crate::vocabulary::WELL_FILE_RE;

/// Characters of context inspected on either side of a labelled match.
const CONTEXT_CHARS: usize = 80;

/// Highest valid API state code.
const MAX_STATE_CODE: u32 = 56;

/// `API`, `API No.`, `API #`, `API Number:` followed by a digit-ish token.
static LABELLED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bAPI\s*(?:No\.?|#|Number)?\s*[:\s]?\s*([0-9\-OIli]{8,15})")
        .expect("valid regex")
});

/// Well-number-like tokens (`34-3`, `1-11H`). More than one near a label
/// means the label is probably sitting in a table of well numbers.
static HYPHENATED_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{1,3}-[0-9]{1,3}[A-Za-z0-9]?").expect("valid regex"));

static FORMATTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-9]{2})-([0-9]{3})-([0-9]{5})\b").expect("valid regex"));

static BARE_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-9]{10})\b").expect("valid regex"));

static SPACED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{2})\s*[- ]\s*([0-9]{3})\s*[- ]\s*([0-9]{5})").expect("valid regex")
});

/// Replaces OCR-confusable letters with the digits they usually are.
#[must_use]
pub fn ocr_fix_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'O' | 'o' => '0',
            'I' | 'l' | 'i' => '1',
            other => other,
        })
        .collect()
}

/// Formats the first ten characters of an ASCII digit string as
/// `NN-NNN-NNNNN`. Returns `None` for fewer than ten digits.
#[must_use]
pub fn format_api(digits: &str) -> Option<String> {
    let d = digits.get(..10)?;
    if !d.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!("{}-{}-{}", &d[0..2], &d[2..5], &d[5..10]))
}

/// Extracts the API number from the full document text.
#[must_use]
pub fn extract_api(text: &str) -> Option<String> {
    let strategies: [(&str, fn(&str) -> Option<String>); 4] = [
        ("labelled token", from_label),
        ("formatted NN-NNN-NNNNN", from_formatted),
        ("bare 10-digit run", from_bare_digits),
        ("spaced digits", from_spaced),
    ];

    strategies.iter().find_map(|(name, strategy)| {
        let api = strategy(text)?;
        log::debug!("API {api} matched via {name}");
        Some(api)
    })
}

/// Returns `text` widened by up to `radius` characters on each side of
/// `start..end`, respecting char boundaries.
fn context_window(text: &str, start: usize, end: usize, radius: usize) -> &str {
    let lo = text[..start]
        .char_indices()
        .rev()
        .nth(radius.saturating_sub(1))
        .map_or(0, |(i, _)| i);
    let hi = text[end..]
        .char_indices()
        .nth(radius)
        .map_or(text.len(), |(i, _)| end + i);
    &text[lo..hi]
}

/// Strategy 1: labelled token, OCR-corrected, rejected when its context
/// mentions a well file or holds several well-number-like tokens.
fn from_label(text: &str) -> Option<String> {
    for caps in LABELLED_RE.captures_iter(text) {
        let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        let context = context_window(text, whole.start(), whole.end(), CONTEXT_CHARS);
        if WELL_FILE_RE.is_match(context) {
            log::trace!("Skipping API candidate '{}' next to a well file number", token.as_str());
            continue;
        }
        if HYPHENATED_NUMBER_RE.find_iter(context).count() > 1 {
            log::trace!("Skipping API candidate '{}' among well numbers", token.as_str());
            continue;
        }

        let digits: String = ocr_fix_digits(token.as_str())
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        if digits.len() >= 10 {
            return format_api(&digits);
        }
    }

    None
}

/// Strategy 2: the first exact `NN-NNN-NNNNN`.
fn from_formatted(text: &str) -> Option<String> {
    let caps = FORMATTED_RE.captures(text)?;
    format_api(&format!("{}{}{}", &caps[1], &caps[2], &caps[3]))
}

/// Strategy 3: a bare 10-digit run (after OCR correction) whose first two
/// digits are a valid state code.
fn from_bare_digits(text: &str) -> Option<String> {
    let fixed = ocr_fix_digits(text);
    BARE_DIGITS_RE
        .captures_iter(&fixed)
        .map(|caps| caps[1].to_owned())
        .find(|digits| {
            digits
                .get(..2)
                .and_then(|code| code.parse::<u32>().ok())
                .is_some_and(|state| (1..=MAX_STATE_CODE).contains(&state))
        })
        .and_then(|digits| format_api(&digits))
}

/// Strategy 4: digits separated by spaces or dashes (`33 053 06056`).
fn from_spaced(text: &str) -> Option<String> {
    let caps = SPACED_RE.captures(text)?;
    format_api(&format!("{}{}{}", &caps[1], &caps[2], &caps[3]))
}
