//! County/state, coordinate, and datum extraction.
//!
//! Coordinates are matched against whitespace-collapsed text so a value
//! wrapped across lines still matches, and the matched text is returned
//! verbatim (`47° 48' 12.34" N` stays in DMS form).

use regex::Regex;
use std::sync::LazyLock;

/// `McKenzie County, North Dakota` on one line.
static INLINE_COUNTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][A-Za-z]+\s+County,\s+[A-Za-z\s]+?)(?:\n|$)").expect("valid regex")
});

/// `County/State: <value>`, `County, State - <value>`.
static COUNTY_STATE_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)County\s*[/,]?\s*State\s*[:\-]?\s*(.+)").expect("valid regex")
});

static LATITUDE_DMS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)Lat(?:itude)?\s*[:\-]?\s*(\d+°\s*\d+['′][\d.]+["″]?\s*[NS]?)"#)
        .expect("valid regex")
});

/// Decimal latitude with magnitude below 90 and at least four decimals.
static LATITUDE_DECIMAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Lat(?:itude)?\s*[:\-]?\s*([-+]?[1-8]?\d\.\d{4,})").expect("valid regex")
});

static LONGITUDE_DMS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)Lon(?:g(?:itude)?)?\s*[:\-]?\s*(\d+°\s*\d+['′][\d.]+["″]?\s*[EW]?)"#)
        .expect("valid regex")
});

/// Decimal longitude with magnitude below 180 and at least four decimals.
static LONGITUDE_DECIMAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Lon(?:g(?:itude)?)?\s*[:\-]?\s*([-+]?(?:1[0-7]\d|\d{1,2})\.\d{4,})")
        .expect("valid regex")
});

static DATUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bDatum\s*[:\-]?\s*([^\n]+)").expect("valid regex"));

fn first_capture(patterns: &[&Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|re| {
        let value = re.captures(text)?.get(1)?.as_str().trim();
        (!value.is_empty()).then(|| value.to_owned())
    })
}

/// Extracts `<County> County, <State>` from the full text, falling back to
/// a `County/State:` label.
#[must_use]
pub fn extract_county_state(text: &str) -> Option<String> {
    let value = first_capture(&[&INLINE_COUNTY_RE, &COUNTY_STATE_LABEL_RE], text);
    if let Some(value) = &value {
        log::debug!("County/state '{value}'");
    }
    value
}

/// Extracts the latitude from whitespace-collapsed text, DMS first.
#[must_use]
pub fn extract_latitude(collapsed: &str) -> Option<String> {
    first_capture(&[&LATITUDE_DMS_RE, &LATITUDE_DECIMAL_RE], collapsed)
}

/// Extracts the longitude from whitespace-collapsed text, DMS first.
#[must_use]
pub fn extract_longitude(collapsed: &str) -> Option<String> {
    first_capture(&[&LONGITUDE_DMS_RE, &LONGITUDE_DECIMAL_RE], collapsed)
}

/// Extracts the rest of the line after a `Datum` label.
#[must_use]
pub fn extract_datum(text: &str) -> Option<String> {
    first_capture(&[&DATUM_RE], text)
}
