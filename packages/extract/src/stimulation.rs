//! Well-specific stimulation table extraction.
//!
//! The completion report carries a two-row table:
//!
//! ```text
//! Date Stimulated | Stimulated Formation | Top (Ft) | Bottom (Ft) | Stimulation Stages | Volume | Volume Units
//! <date>          | <formation>          | <top>    | <bottom>    | <stages>           | <vol>  | <units>
//! Type Treatment | Acid% | Lbs Proppant | Maximum Treatment Pressure (PSI) | Maximum Treatment Rate (BBLS/Min)
//! <type>         |       | <lbs>        | <psi>                            | <rate>
//! Details
//! <free text>
//! ```
//!
//! OCR keeps the row order but loses the column boundaries, so each data
//! row is parsed positionally from its numeric tokens. Only the first
//! populated row is extracted.

use regex::{Match, Regex};
use std::sync::LazyLock;

use well_record_extract_models::{Quantity, StimulatedIn, StimulationRecord, VolumeUnits};

use crate::vocabulary::{DATE_RE, NUMBER_RE, parse_quantity};

/// Lines after row 1 searched for the second header row.
const SECOND_HEADER_LOOKAHEAD: usize = 10;

/// Maximum number of free-text detail lines collected.
const MAX_DETAIL_LINES: usize = 4;

/// Stages above this are read as a volume instead.
const MAX_STAGES: u64 = 1000;

/// A lone depth followed by a number this large or larger is a volume.
const MIN_VOLUME: u64 = 1000;

/// Treatment pressures outside this band are logged as suspect.
const PLAUSIBLE_PRESSURE_PSI: std::ops::RangeInclusive<u32> = 100..=20_000;

/// Treatment rates above this are logged as suspect.
const MAX_PLAUSIBLE_RATE_BBLS_MIN: f64 = 200.0;

/// Section heading or first-row header.
static SECTION_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Well\s+Spec\w*\s+Stimulation|Date\s+Stimulated").expect("valid regex")
});

/// Second-row header.
static SECOND_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Type\s+Treatment|Lbs\s+Proppant|Maximum\s+Treatment").expect("valid regex")
});

/// Column labels, possibly wrapped onto their own lines.
static COLUMN_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^[\s|]*(?:Date\s+Stimulated|Stimulated\s+Formation|Top\s*\(?Ft|Bottom\s*\(?Ft|",
        r"Stimulation\s+Stages|Volume|Type\s+Treatment|Lbs\s+Proppant|Maximum\s+Treatment|Acid\s*%)",
    ))
    .expect("valid regex")
});

/// The next section of the form, which ends the details block.
static STOP_SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)ADDITIONAL INFORMATION|I hereby swear|DETAILS OF WORK|^DATE\b")
        .expect("valid regex")
});

static DETAILS_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*Details?\b").expect("valid regex"));

static UNIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(Barrels?|BBL[Ss]?|MCF)\b").expect("valid regex"));

/// A comma-grouped volume directly followed by its unit (`12,000 BBLS`).
static VOLUME_WITH_UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,3}(?:,\d{3})+)\s*(?:Barrels?|BBL[Ss]?|MCF)\b").expect("valid regex")
});

static STIMULATED_IN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(Cased\s+Hole|Open\s+Hole)\b").expect("valid regex"));

/// Digits and table punctuation that bleed into the formation column.
static FORMATION_NOISE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\d|\-/()\[\]:]+").expect("valid regex"));

/// The located rows of a stimulation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRows<'a> {
    /// Date / formation / depths / stages / volume row.
    pub row1: &'a str,
    /// Treatment type / proppant / pressure / rate row.
    pub row2: Option<&'a str>,
    /// Free-text detail lines.
    pub details: Option<String>,
}

/// Extracts the stimulation record from the first page carrying a
/// stimulation section. Returns an all-absent record if there is none.
#[must_use]
pub fn extract_stimulation(pages: &[String]) -> StimulationRecord {
    let Some(page) = pages.iter().find(|p| SECTION_HEADER_RE.is_match(p)) else {
        log::debug!("No stimulation section found");
        return StimulationRecord::default();
    };

    let lines: Vec<&str> = page.lines().map(str::trim_end).collect();
    let Some(rows) = locate_rows(&lines) else {
        log::debug!("Stimulation section has no data row");
        return StimulationRecord::default();
    };

    log::trace!("Stimulation row 1: {:?}, row 2: {:?}", rows.row1, rows.row2);

    let first = parse_row1(rows.row1);
    let second = rows.row2.map(parse_row2).unwrap_or_default();

    StimulationRecord {
        type_treatment: second.type_treatment,
        lbs_proppant: second.lbs_proppant,
        max_treatment_pressure_psi: second.max_treatment_pressure_psi,
        max_treatment_rate_bbls_min: second.max_treatment_rate_bbls_min,
        details: rows.details,
        ..first
    }
}

/// Finds row 1, row 2, and the details block on a page split into lines.
#[must_use]
pub fn locate_rows<'a>(lines: &[&'a str]) -> Option<TableRows<'a>> {
    let header = lines.iter().position(|l| SECTION_HEADER_RE.is_match(l))?;

    let row1 = (header + 1..lines.len()).find(|&j| {
        let line = lines[j].trim();
        !line.is_empty() && !SECTION_HEADER_RE.is_match(line) && !COLUMN_LABEL_RE.is_match(lines[j])
    })?;

    let second_header = (row1 + 1..lines.len())
        .take(SECOND_HEADER_LOOKAHEAD)
        .find(|&j| SECOND_HEADER_RE.is_match(lines[j]));
    let row2 = next_non_blank(lines, second_header.unwrap_or(row1) + 1);

    Some(TableRows {
        row1: lines[row1].trim(),
        row2: row2.map(|j| lines[j].trim()),
        details: row2.and_then(|j| collect_details(lines, j + 1)),
    })
}

fn next_non_blank(lines: &[&str], from: usize) -> Option<usize> {
    (from..lines.len()).find(|&j| !lines[j].trim().is_empty())
}

/// Collects up to four free-text lines starting at `from`, after skipping
/// blank lines and an optional `Details` label. Stops at a blank line, the
/// next form section, or a column label.
#[must_use]
pub fn collect_details(lines: &[&str], from: usize) -> Option<String> {
    let mut k = next_non_blank(lines, from)?;
    if DETAILS_LABEL_RE.is_match(lines[k]) {
        k += 1;
    }

    let collected: Vec<&str> = lines[k..]
        .iter()
        .take_while(|raw| {
            let line = raw.trim();
            !line.is_empty() && !STOP_SECTION_RE.is_match(line) && !COLUMN_LABEL_RE.is_match(raw)
        })
        .take(MAX_DETAIL_LINES)
        .map(|raw| raw.trim())
        .collect();

    (!collected.is_empty()).then(|| collected.join("\n"))
}

fn is_depth(token: &str) -> bool {
    (3..=6).contains(&token.len()) && token.bytes().all(|b| b.is_ascii_digit())
}

fn parse_depth(token: &Match<'_>) -> Option<u32> {
    token.as_str().parse().ok()
}

fn volume_units(text: &str) -> Option<VolumeUnits> {
    UNIT_RE
        .captures(text)
        .map(|caps| VolumeUnits::from_token(&caps[1]))
}

/// Parses the first data row: date, formation, top, bottom, stages, volume,
/// and units. Fields that cannot be placed are left `None`.
#[must_use]
pub fn parse_row1(row: &str) -> StimulationRecord {
    let mut record = StimulationRecord::default();

    let remaining = match DATE_RE.captures(row) {
        Some(caps) => {
            record.date_stimulated = Some(caps[1].to_owned());
            let end = caps.get(0).map_or(0, |m| m.end());
            row[end..].trim_matches(|c: char| c == ' ' || c == '|')
        }
        None => row,
    };

    let tokens: Vec<Match<'_>> = NUMBER_RE.find_iter(remaining).collect();
    let depths: Vec<usize> = (0..tokens.len())
        .filter(|&i| is_depth(tokens[i].as_str()))
        .collect();

    if let Some(&first) = depths.first() {
        let raw = remaining[..tokens[first].start()]
            .trim_matches(|c: char| matches!(c, ' ' | '|' | ',' | '-' | '.'));
        if !raw.is_empty() {
            let formation = FORMATION_NOISE_RE.replace_all(raw, " ");
            let formation = formation.trim();
            if !formation.is_empty() {
                record.stimulated_formation = Some(formation.to_owned());
            }
        }
    }

    let top = depths.first().and_then(|&i| parse_depth(&tokens[i]));
    let bottom = depths.get(1).and_then(|&i| parse_depth(&tokens[i]));

    match (depths.as_slice(), top, bottom) {
        ([first, second, ..], Some(top), Some(bottom)) if bottom >= top => {
            record.top_ft = Some(top);
            record.bottom_ft = Some(bottom);

            let after = &tokens[second + 1..];
            let values: Vec<Option<Quantity>> =
                after.iter().map(|m| parse_quantity(m.as_str())).collect();
            match values.first() {
                Some(Some(Quantity::Whole(n))) if *n < MAX_STAGES => {
                    record.stimulation_stages = u32::try_from(*n).ok();
                    record.volume = values.get(1).copied().flatten();
                }
                Some(v0) => record.volume = *v0,
                None => {}
            }
            record.volume_units = volume_units(&remaining[tokens[*second].end()..]);

            log::trace!("Row 1 depths {top}..{bottom} (first token #{first})");
        }
        ([first, ..], Some(top), _) => {
            if let Some(bottom) = bottom {
                log::debug!("Ignoring second depth {bottom} above top {top}");
            }
            record.top_ft = Some(top);
            record.volume = tokens[first + 1..]
                .iter()
                .filter_map(|m| parse_quantity(m.as_str()))
                .find(|q| matches!(q, Quantity::Whole(n) if *n >= MIN_VOLUME));
            record.volume_units = volume_units(&remaining[tokens[*first].end()..]);
        }
        _ => {
            if let Some(caps) = VOLUME_WITH_UNIT_RE.captures(row) {
                record.volume = parse_quantity(&caps[1]);
                let start = caps.get(0).map_or(0, |m| m.start());
                record.volume_units = volume_units(&row[start..]);
            }
        }
    }

    if let Some(caps) = STIMULATED_IN_RE.captures(row) {
        record.stimulated_in = Some(if caps[1].to_ascii_lowercase().starts_with("cased") {
            StimulatedIn::CasedHole
        } else {
            StimulatedIn::OpenHole
        });
    }

    record
}

/// Parses the second data row: treatment type, then the remaining numbers
/// mapped left to right onto proppant, pressure, and rate. The Acid% column
/// is never assigned.
#[must_use]
pub fn parse_row2(row: &str) -> StimulationRecord {
    let tokens: Vec<Match<'_>> = NUMBER_RE.find_iter(row).collect();

    let type_text = tokens.first().map_or_else(
        || row.trim(),
        |m| row[..m.start()].trim_matches(|c: char| matches!(c, ' ' | '|' | ':' | ',' | '-')),
    );

    let mut values = tokens.iter().map(|m| parse_quantity(m.as_str()));
    let lbs_proppant = values.next().flatten().and_then(Quantity::truncated);
    let max_treatment_pressure_psi = values
        .next()
        .flatten()
        .and_then(Quantity::truncated)
        .and_then(|p| u32::try_from(p).ok());
    let max_treatment_rate_bbls_min = values.next().flatten().map(Quantity::as_f64);

    if let Some(psi) = max_treatment_pressure_psi
        && !PLAUSIBLE_PRESSURE_PSI.contains(&psi)
    {
        log::debug!("Suspect treatment pressure {psi} psi in row {row:?}");
    }
    if let Some(rate) = max_treatment_rate_bbls_min
        && rate > MAX_PLAUSIBLE_RATE_BBLS_MIN
    {
        log::debug!("Suspect treatment rate {rate} bbl/min in row {row:?}");
    }

    StimulationRecord {
        type_treatment: (!type_text.is_empty()).then(|| type_text.to_owned()),
        lbs_proppant,
        max_treatment_pressure_psi,
        max_treatment_rate_bbls_min,
        ..StimulationRecord::default()
    }
}
