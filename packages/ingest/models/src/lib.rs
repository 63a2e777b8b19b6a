#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Batch ingestion configuration and summary types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for a batch extraction run.
///
/// Every key is optional in the TOML form; missing keys take the
/// [`Default`] values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Directory holding the OCR'd text documents.
    pub input_dir: PathBuf,
    /// Directory the JSON results are written to.
    pub output_dir: PathBuf,
    /// File extension of input documents, without the dot.
    pub extension: String,
    /// Maximum number of documents extracted at once.
    pub concurrency: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("./raw-txt"),
            output_dir: PathBuf::from("./output"),
            extension: "txt".to_string(),
            concurrency: std::thread::available_parallelism().map_or(1, std::num::NonZero::get),
        }
    }
}

impl IngestConfig {
    /// Parses a TOML configuration, clamping a zero concurrency to one.
    ///
    /// # Errors
    ///
    /// Returns an error if `s` is not valid TOML or a key has the wrong
    /// type.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Self>(s).map(Self::clamped)
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if a path is not valid UTF-8.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Returns the configuration with `concurrency` raised to at least one.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        if self.concurrency == 0 {
            self.concurrency = 1;
        }
        self
    }
}

/// Outcome counts of a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Documents discovered in the input directory.
    pub found: usize,
    /// Documents extracted successfully.
    pub extracted: usize,
    /// Documents that could not be read.
    pub failed: usize,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}
