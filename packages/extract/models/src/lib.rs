#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Output types for well-file extraction.
//!
//! Every document produces exactly one [`WellRecord`]: the well's identity
//! and location ([`WellInfo`]) plus the first populated row of its
//! stimulation table ([`StimulationRecord`]). Fields the extractor could not
//! recover are `None`. The JSON field names match the record contract
//! consumed downstream, so these types serialize as-is.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{Display, EnumString};

/// One extracted record per input document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellRecord {
    /// File name of the source text document (e.g. `"W28557.txt"`).
    pub file: String,
    /// Identity and location fields.
    pub well_info: WellInfo,
    /// Stimulation table fields.
    pub stimulation_data: StimulationRecord,
}

/// Well identity and location.
///
/// `well_name_and_number` and `api` are keys for downstream consumers and
/// must never be null, so an absent value is written as `""`. All other
/// absent fields are written as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellInfo {
    /// Well name and number (e.g. `"Basic Game & Fish 34-3"`).
    #[serde(
        serialize_with = "empty_if_none",
        deserialize_with = "none_if_empty",
        default
    )]
    pub well_name_and_number: Option<String>,
    /// API well number formatted as `NN-NNN-NNNNN`.
    #[serde(
        serialize_with = "empty_if_none",
        deserialize_with = "none_if_empty",
        default
    )]
    pub api: Option<String>,
    /// Operating company name.
    pub operator: Option<String>,
    /// County and state (e.g. `"McKenzie County, North Dakota"`).
    pub county_state: Option<String>,
    /// Geodetic datum text as written on the form.
    pub datum: Option<String>,
    /// Latitude, verbatim (DMS or decimal degrees).
    pub latitude: Option<String>,
    /// Longitude, verbatim (DMS or decimal degrees).
    pub longitude: Option<String>,
}

#[allow(clippy::ref_option)]
fn empty_if_none<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_deref().unwrap_or_default())
}

fn none_if_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// Where the stimulation was performed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
pub enum StimulatedIn {
    /// Stimulated through casing.
    #[serde(rename = "Cased Hole")]
    #[strum(serialize = "Cased Hole")]
    CasedHole,
    /// Stimulated in an uncased section.
    #[serde(rename = "Open Hole")]
    #[strum(serialize = "Open Hole")]
    OpenHole,
}

/// Units of the treatment volume. Always one of the two canonical literals,
/// regardless of how the source text spelled them.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
pub enum VolumeUnits {
    /// Barrels (`Barrels`, `Barrel`, `BBL`, `BBLS`).
    Barrels,
    /// Thousand cubic feet.
    #[serde(rename = "MCF")]
    #[strum(serialize = "MCF")]
    Mcf,
}

impl VolumeUnits {
    /// Maps a raw unit token to its canonical unit: anything mentioning
    /// `MCF` is [`Self::Mcf`], everything else is [`Self::Barrels`].
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        if token.to_ascii_uppercase().contains("MCF") {
            Self::Mcf
        } else {
            Self::Barrels
        }
    }
}

/// A numeric token read from the table. Tokens written without a decimal
/// point stay whole so they render as JSON integers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    /// Integral token (e.g. `4,500`).
    Whole(u64),
    /// Token with a fractional part (e.g. `45.5`).
    Fractional(f64),
}

impl Quantity {
    /// Returns the value as a float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Whole(n) => n as f64,
            Self::Fractional(f) => f,
        }
    }

    /// Returns the value truncated toward zero. Negative or non-finite
    /// fractions yield `None`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn truncated(self) -> Option<u64> {
        match self {
            Self::Whole(n) => Some(n),
            Self::Fractional(f) if f.is_finite() && f >= 0.0 => Some(f.trunc() as u64),
            Self::Fractional(_) => None,
        }
    }
}

/// The first populated row of a well's stimulation table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StimulationRecord {
    /// Date as written (e.g. `"3/14/2015"`).
    pub date_stimulated: Option<String>,
    /// Formation name (e.g. `"Bakken"`).
    pub stimulated_formation: Option<String>,
    /// Top of the stimulated interval, feet.
    pub top_ft: Option<u32>,
    /// Bottom of the stimulated interval, feet.
    pub bottom_ft: Option<u32>,
    /// Cased or open hole.
    pub stimulated_in: Option<StimulatedIn>,
    /// Number of stages.
    pub stimulation_stages: Option<u32>,
    /// Treatment volume.
    pub volume: Option<Quantity>,
    /// Treatment volume units.
    pub volume_units: Option<VolumeUnits>,
    /// Treatment type (e.g. `"Sand Frac"`).
    pub type_treatment: Option<String>,
    /// Acid percentage. Never populated: the column is blank on every
    /// known form, so any number in that position belongs to a neighbour.
    pub acid_pct: Option<f64>,
    /// Pounds of proppant.
    pub lbs_proppant: Option<u64>,
    /// Maximum treatment pressure, psi.
    pub max_treatment_pressure_psi: Option<u32>,
    /// Maximum treatment rate, barrels per minute.
    pub max_treatment_rate_bbls_min: Option<f64>,
    /// Free-text detail lines following the table, newline-joined.
    pub details: Option<String>,
}

impl StimulationRecord {
    /// Returns `true` when no field was recovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
