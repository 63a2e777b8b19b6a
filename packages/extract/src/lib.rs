#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Heuristic field extraction from OCR'd regulatory well-file text.
//!
//! A well file is a stack of scanned state forms (permits, sundry notices,
//! completion reports) run through OCR and concatenated with
//! `=== PAGE n ===` markers. OCR text has no reliable layout, so every field
//! is recovered by an ordered set of pattern strategies:
//!
//! - [`well_name`]: label-anchored search, then any hyphenated well number
//! - [`api`]: labelled token, formatted number, bare digits, spaced digits
//! - [`operator`]: inline label, standalone label, column header, name with
//!   phone number
//! - [`location`]: county/state, latitude, longitude, datum
//! - [`stimulation`]: the first populated row of the stimulation table
//!
//! Every extractor is a pure function over the normalized [`Document`].
//! Nothing here fails: a field that cannot be found is simply absent.

pub mod api;
pub mod location;
pub mod normalize;
pub mod operator;
pub mod stimulation;
pub mod vocabulary;
pub mod well_name;

pub use normalize::Document;

use well_record_extract_models::{WellInfo, WellRecord};

/// Extracts the identity and location fields of a document.
///
/// The operator is searched on the page carrying the well-name label, or
/// the whole text when no page carries it.
#[must_use]
pub fn extract_well_info(document: &Document) -> WellInfo {
    let text = document.text();
    let collapsed = normalize::collapse_whitespace(text);
    let operator_text = well_name::find_label_page(document.pages()).unwrap_or(text);

    WellInfo {
        well_name_and_number: well_name::extract_well_name(document.pages()),
        api: api::extract_api(text),
        operator: operator::extract_operator(operator_text),
        county_state: location::extract_county_state(text),
        datum: location::extract_datum(text),
        latitude: location::extract_latitude(&collapsed),
        longitude: location::extract_longitude(&collapsed),
    }
}

/// Extracts a complete record from the raw text of the document named
/// `file`.
#[must_use]
pub fn extract_document(file: &str, raw: &str) -> WellRecord {
    let document = Document::parse(raw);

    let record = WellRecord {
        file: file.to_owned(),
        well_info: extract_well_info(&document),
        stimulation_data: stimulation::extract_stimulation(document.pages()),
    };

    log::debug!(
        "{file}: well={:?} api={:?} stimulation={}",
        record.well_info.well_name_and_number,
        record.well_info.api,
        if record.stimulation_data.is_empty() {
            "absent"
        } else {
            "present"
        },
    );

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use well_record_extract_models::{Quantity, VolumeUnits};

    const WELL_FILE: &str = "\
=== PAGE 1 ===
INDUSTRIAL COMMISSION OF NORTH DAKOTA
OIL AND GAS DIVISION
Well File No. 28557

=== PAGE 2 ===
WELL COMPLETION OR RECOMPLETION REPORT - FORM 6
Well Name and Number
Basic Game & Fish 34-3H
Operator Telephone Number
Whiting Petroleum (303) 837-1661
McKenzie County, North Dakota
Latitude: 47\u{b0} 48' 12.34\" N
Longitude: 103\u{b0} 12' 45.6\" W
Datum: NAD 83
API Number: 3305306056

=== PAGE 3 ===
Well Specific Stimulations
Date Stimulated Stimulated Formation Top (Ft) Bottom (Ft) Stimulation Stages Volume Volume Units
3/14/2015 Bakken 10955 20450 36 98,432 Barrels
Type Treatment Acid% Lbs Proppant Maximum Treatment Pressure (PSI) Maximum Treatment Rate (BBLS/Min)
Sand Frac 3,702,460 8942 35.0
Details
40/70 White: 3,404,460

ADDITIONAL INFORMATION
";

    #[test]
    fn extracts_complete_record() {
        let record = extract_document("W28557.txt", WELL_FILE);
        let info = &record.well_info;

        assert_eq!(record.file, "W28557.txt");
        assert_eq!(info.well_name_and_number.as_deref(), Some("Basic Game & Fish 34-3H"));
        assert_eq!(info.api.as_deref(), Some("33-053-06056"));
        assert_eq!(info.operator.as_deref(), Some("Whiting Petroleum"));
        assert_eq!(info.county_state.as_deref(), Some("McKenzie County, North Dakota"));
        assert_eq!(info.latitude.as_deref(), Some("47\u{b0} 48' 12.34\" N"));
        assert_eq!(info.longitude.as_deref(), Some("103\u{b0} 12' 45.6\" W"));
        assert_eq!(info.datum.as_deref(), Some("NAD 83"));

        let stim = &record.stimulation_data;
        assert_eq!(stim.date_stimulated.as_deref(), Some("3/14/2015"));
        assert_eq!(stim.top_ft, Some(10955));
        assert_eq!(stim.bottom_ft, Some(20450));
        assert_eq!(stim.volume, Some(Quantity::Whole(98_432)));
        assert_eq!(stim.volume_units, Some(VolumeUnits::Barrels));
        assert_eq!(stim.lbs_proppant, Some(3_702_460));
        assert_eq!(stim.details.as_deref(), Some("40/70 White: 3,404,460"));
    }

    #[test]
    fn unicode_dashes_are_normalized_before_extraction() {
        let record = extract_document("W1.txt", "Record for 33\u{2013}053\u{2013}06056 approved");
        assert_eq!(record.well_info.api.as_deref(), Some("33-053-06056"));
    }

    #[test]
    fn empty_document_yields_empty_keys() {
        let record = extract_document("blank.txt", "");
        assert_eq!(record.well_info, WellInfo::default());
        assert!(record.stimulation_data.is_empty());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["well_info"]["well_name_and_number"], "");
        assert_eq!(json["well_info"]["api"], "");
        assert!(json["stimulation_data"]["volume"].is_null());
    }
}
