//! Shared pattern tables for regulatory well-file forms.
//!
//! These are the fixed vocabularies several extractors consult: the
//! form-boilerplate noise words that are never a well or company name,
//! company suffixes, dates, and numeric tokens. They compile once per
//! process.

use regex::Regex;
use std::sync::LazyLock;

use well_record_extract_models::Quantity;

/// Form headers, agency boilerplate, contact labels, and location column
/// labels. A line containing any of these is not a well name and not a
/// company name.
pub static NOISE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:Telephone|Phone|Fax|Email|Address|City|State|Zip|County|Field|Pool|",
        r"Township|Range|Section|Footage|Qtr|Datum|Operator|FOR\s+STATE\s+USE|",
        r"PLEASE\s+READ|SUBMIT|Notice\s+of|Report\s+of|Drilling\s+Prognosis|",
        r"Casing|Plug\s+Well|Fracture|Redrilling|Shooting|Acidizing|",
        r"Reclamation|Workover|Tax\s+Exemption|NDCC|",
        r"INDUSTRIAL\s+COMMISSION|OIL\s+AND\s+GAS|BISMARCK|BOULEVARD|",
        r"SUNDRY|NOTICES|REPORTS|FORM\s+\d|24-HOUR\s+PRODUCTION)\b",
    ))
    .expect("valid regex")
});

/// Corporate suffixes. Their presence marks a company name.
pub static COMPANY_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:LLC|Inc\.?|Corp\.?|Ltd\.?|L\.P\.?|LLP|Co\.?|Company|",
        r"Corporation|Incorporated|Limited|Partnership|Operating)\b",
    ))
    .expect("valid regex")
});

/// Numeric dates such as `3/14/2015` or `03/14/15`.
pub static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2}/\d{1,2}/\d{2,4})\b").expect("valid regex"));

/// Numeric tokens with optional thousands separators and decimal part.
pub static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:,\d{3})*(?:\.\d+)?").expect("valid regex"));

/// Case-insensitive `Well File` mention. Used to reject state well-file
/// numbers that look like well numbers or API numbers.
pub static WELL_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Well\s+File\b").expect("valid regex"));

/// Parses a numeric token after removing thousands separators. Tokens with a
/// decimal point become [`Quantity::Fractional`]; anything unparseable is
/// `None`.
#[must_use]
pub fn parse_quantity(token: &str) -> Option<Quantity> {
    let cleaned = token.replace(',', "");
    if cleaned.contains('.') {
        cleaned.parse::<f64>().ok().map(Quantity::Fractional)
    } else {
        cleaned.parse::<u64>().ok().map(Quantity::Whole)
    }
}
