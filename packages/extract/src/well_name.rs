//! Well name and number extraction.
//!
//! Two strategies, tried in order:
//!
//! 1. **Label-anchored**: find the `Well (or Facility) Name (and Number)`
//!    label and take the inline text after it, or the first qualifying line
//!    below it (skipping column-header continuations).
//! 2. **Pattern fallback**: the first line anywhere in the document that
//!    carries a hyphenated well number such as `34-3H`.
//!
//! Candidates are screened by [`is_well_name`] and trimmed of OCR column
//! bleed-through by [`clean_well_name`].

use regex::Regex;
use std::sync::LazyLock;

use crate::vocabulary::{COMPANY_SUFFIX_RE, DATE_RE, NOISE_LINE_RE, WELL_FILE_RE};

/// Maximum length of a plausible well-name line, in characters.
const MAX_WELL_NAME_CHARS: usize = 100;

/// How many non-empty lines below a label are considered.
const LABEL_LOOKAHEAD_LINES: usize = 5;

/// The well-name label as it appears on the forms.
static WELL_NAME_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Well\s+(?:or\s+Facility\s+)?Name\s+(?:and\s+Number)?").expect("valid regex")
});

/// The same label anchored at the start of a candidate and followed by a
/// colon or dash.
static LEADING_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*Well\s+(?:or\s+Facility\s+)?Name(?:\s+and\s+Number)?\s*[:\-]+\s*")
        .expect("valid regex")
});

/// Lines beginning with a state file number (`SFN 2468`).
static SFN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^SFN\s+\d").expect("valid regex"));

static STARTS_WITH_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z]").expect("valid regex"));

static LETTER_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]{2,}").expect("valid regex"));

/// Column headers that wrap onto the line after the label.
static COLUMN_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:Footages?|Qtr|Section|Township|Range|County|Field|Pool|24-HOUR)")
        .expect("valid regex")
});

/// Letters followed somewhere by a hyphenated well number (`34-3H`).
static HYPHENATED_WELL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z]{2,}.*\d{1,4}-\d{1,3}[A-Za-z0-9]?").expect("valid regex")
});

/// Characters OCR produces from table rules and stray marks. A name never
/// contains them, so everything from the first one on is dropped.
static DISALLOWED_SYMBOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[|\[\]{}@$%^*+=~`<>]").expect("valid regex"));

/// Leader dots or dashes (`.....`) and whatever follows them.
static LEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+[-.]{3,}.*$").expect("valid regex"));

/// Bare section / township / range numbers after the well number,
/// e.g. the ` 2 153 N 101` in `Basic Game & Fish 34-3 2 153 N 101`.
static TRAILING_LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+\d{1,3}\s+\d{1,3}\s+[NS]\s+\d{1,3}.*$").expect("valid regex")
});

/// Quarter-quarter (`NWNW`, `SE NE`), lot, or township-range descriptors.
static TRAILING_QTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\s+(?:[NS][EW][NS][EW]|[NS][EW]\s+[NS][EW]|LOT\s*\d|",
        r"\d{1,3}\s+[NS]\s+\d{1,3}(?:\s+[EW])?).*$",
    ))
    .expect("valid regex")
});

/// North Dakota oil-patch county names (and the bare word `County`).
static TRAILING_COUNTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\s+(?:McKenzie|Williams|Mountrail|Divide|Burke|Bottineau|Ward|Dunn|Billings|Stark|",
        r"Renville|McLean|Mercer|Morton|Grant|Adams|Hettinger|Bowman|Slope|Sioux|Emmons|",
        r"Oliver|Golden\s+Valley|County)\b.*$",
    ))
    .expect("valid regex")
});

/// Well-type suffixes that are part of the name despite having no digit.
static WELL_TYPE_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:SWD|WD|WI|HR?|TR?|ST|TA|CBM|B)$").expect("valid regex")
});

/// Returns `true` if `line` looks like a well name: a word-initial line
/// with a number component that is not a form header, agency boilerplate,
/// company name, or dated entry.
#[must_use]
pub fn is_well_name(line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() || line.chars().count() > MAX_WELL_NAME_CHARS {
        return false;
    }
    if SFN_RE.is_match(line)
        || NOISE_LINE_RE.is_match(line)
        || COMPANY_SUFFIX_RE.is_match(line)
        || DATE_RE.is_match(line)
    {
        return false;
    }

    STARTS_WITH_WORD_RE.is_match(line)
        && LETTER_RUN_RE.is_match(line)
        && line.chars().any(|c| c.is_ascii_digit())
}

/// Strips a leading label and trailing OCR noise from a candidate name.
#[must_use]
pub fn clean_well_name(name: &str) -> String {
    let name = LEADING_LABEL_RE.replace(name, "");
    let mut name = name.trim();

    if let Some(m) = DISALLOWED_SYMBOL_RE.find(name) {
        name = &name[..m.start()];
    }

    let name = LEADER_RE.replace(name, "");
    let name = TRAILING_LOCATION_RE.replace(&name, "");
    let name = TRAILING_QTR_RE.replace(&name, "");
    let name = TRAILING_COUNTY_RE.replace(&name, "");

    let mut tokens: Vec<&str> = name.split_whitespace().collect();
    while tokens.len() > 1 {
        let last = tokens[tokens.len() - 1];
        if has_digit(last) || WELL_TYPE_SUFFIX_RE.is_match(last) {
            break;
        }
        if !tokens[..tokens.len() - 1].iter().any(|t| has_digit(t)) {
            break;
        }
        tokens.pop();
    }

    tokens
        .join(" ")
        .trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '-' | ';' | ',' | '.' | '|'))
        .to_owned()
}

fn has_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}

/// Returns the first page containing the well-name label.
#[must_use]
pub fn find_label_page(pages: &[String]) -> Option<&str> {
    pages
        .iter()
        .find(|page| WELL_NAME_LABEL_RE.is_match(page))
        .map(String::as_str)
}

/// Extracts the well name and number, or `None` if neither strategy finds
/// one.
#[must_use]
pub fn extract_well_name(pages: &[String]) -> Option<String> {
    let strategies: [(&str, fn(&[String]) -> Option<String>); 2] = [
        ("label", from_label),
        ("hyphenated well number", from_hyphenated_number),
    ];

    strategies.iter().find_map(|(name, strategy)| {
        let found = strategy(pages)?;
        log::debug!("Well name '{found}' matched via {name} strategy");
        Some(found)
    })
}

/// Strategy 1: label-anchored search, inline text first.
fn from_label(pages: &[String]) -> Option<String> {
    for page in pages {
        let lines: Vec<&str> = page.lines().map(str::trim_end).collect();

        for (i, line) in lines.iter().enumerate() {
            let Some(label) = WELL_NAME_LABEL_RE.find(line) else {
                continue;
            };

            let inline = line[label.end()..].trim_matches(|c: char| matches!(c, ' ' | ':' | '-'));
            if !inline.is_empty() && is_well_name(inline) {
                return Some(clean_well_name(inline));
            }

            let found = lines[i + 1..]
                .iter()
                .map(|l| l.trim())
                .filter(|l| !l.is_empty())
                .take(LABEL_LOOKAHEAD_LINES)
                .filter(|l| !COLUMN_HEADER_RE.is_match(l))
                .find(|l| is_well_name(l));

            if let Some(candidate) = found {
                return Some(clean_well_name(candidate));
            }
        }
    }

    None
}

/// Strategy 2: any line carrying a hyphenated well number.
fn from_hyphenated_number(pages: &[String]) -> Option<String> {
    pages
        .iter()
        .flat_map(|page| page.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| HYPHENATED_WELL_RE.is_match(line) && !WELL_FILE_RE.is_match(line))
        .filter(|line| is_well_name(line))
        .map(clean_well_name)
        .find(|cleaned| has_digit(cleaned))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| (*t).to_string()).collect()
    }

    #[test]
    fn accepts_plain_well_names() {
        assert!(is_well_name("Basic Game & Fish 34-3"));
        assert!(is_well_name("Lindvig 1-11HR"));
    }

    #[test]
    fn rejects_noise_company_date_and_digitless_lines() {
        assert!(!is_well_name("Telephone Number 701-555-0100"));
        assert!(!is_well_name("Hess Bakken Investments II, LLC 2"));
        assert!(!is_well_name("Spud 3/14/2015 Lot 1"));
        assert!(!is_well_name("Basic Game And Fish"));
        assert!(!is_well_name("SFN 2468 (04-2010)"));
        assert!(!is_well_name("34-3H Atlanta"));
        assert!(!is_well_name(""));
        assert!(!is_well_name(&format!("Long {}", "x1".repeat(60))));
    }

    #[test]
    fn strips_trailing_section_township_range() {
        assert_eq!(
            clean_well_name("Basic Game & Fish 34-3 2 153 N 101"),
            "Basic Game & Fish 34-3"
        );
    }

    #[test]
    fn strips_label_symbols_and_leader_dots() {
        assert_eq!(
            clean_well_name("Well Name and Number: Skaar Federal 1-2H ........ page"),
            "Skaar Federal 1-2H"
        );
        assert_eq!(
            clean_well_name("Sakakawea 1-30H | 30 | 152"),
            "Sakakawea 1-30H"
        );
    }

    #[test]
    fn strips_quarter_quarter_and_county() {
        assert_eq!(clean_well_name("Lindvig 1-11HR NWNW"), "Lindvig 1-11HR");
        assert_eq!(clean_well_name("Bravo 12-34 McKenzie"), "Bravo 12-34");
    }

    #[test]
    fn drops_trailing_words_but_keeps_well_type_suffixes() {
        assert_eq!(clean_well_name("Johnson 5-22H Horizontal well"), "Johnson 5-22H");
        assert_eq!(clean_well_name("Rolfson 2 SWD"), "Rolfson 2 SWD");
        assert_eq!(clean_well_name("Ernie 4 H"), "Ernie 4 H");
    }

    #[test]
    fn inline_label_text_wins_over_following_lines() {
        let doc = pages(&["Well Name and Number: Alpha 1-2H\nBravo 3-4H"]);
        assert_eq!(extract_well_name(&doc).as_deref(), Some("Alpha 1-2H"));
    }

    #[test]
    fn label_scan_skips_column_headers() {
        let doc = pages(&[concat!(
            "Well Name and Number Qtr-Qtr Section Township Range\n",
            "Footages Qtr-Qtr\n",
            "\n",
            "Lindvig 1-11HR NWNW 11 153 N 101 W\n",
        )]);
        assert_eq!(extract_well_name(&doc).as_deref(), Some("Lindvig 1-11HR"));
    }

    #[test]
    fn label_scan_continues_past_non_qualifying_lines() {
        let doc = pages(&["Well Name and Number\nSee attached\nAnderson Federal 2\n"]);
        assert_eq!(
            extract_well_name(&doc).as_deref(),
            Some("Anderson Federal 2")
        );
    }

    #[test]
    fn label_line_picks_up_basic_game_and_fish() {
        let doc = pages(&[
            "NOTICE OF INTENT",
            "Well Name and Number\nBasic Game & Fish 34-3 2 153 N 101\nField",
        ]);
        assert_eq!(
            extract_well_name(&doc).as_deref(),
            Some("Basic Game & Fish 34-3")
        );
    }

    #[test]
    fn falls_back_to_hyphenated_number_lines() {
        let doc = pages(&[
            "SUNDRY NOTICES\nWell File No. 28557-1\nAtlanta Federal 34-3H\n",
        ]);
        assert_eq!(
            extract_well_name(&doc).as_deref(),
            Some("Atlanta Federal 34-3H")
        );
    }

    #[test]
    fn returns_none_when_nothing_qualifies() {
        let doc = pages(&["INDUSTRIAL COMMISSION\nno names here"]);
        assert_eq!(extract_well_name(&doc), None);
    }

    #[test]
    fn finds_label_page() {
        let doc = pages(&["cover", "Well Name and Number\nX 1-2"]);
        assert_eq!(find_label_page(&doc), Some("Well Name and Number\nX 1-2"));
        assert_eq!(find_label_page(&doc[..1]), None);
    }
}
