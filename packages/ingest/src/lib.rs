#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Batch extraction of OCR'd well-file text documents.
//!
//! Discovers the text documents in a directory, runs
//! [`well_record_extract::extract_document`] over each on a bounded pool of
//! blocking tasks, and writes the records as JSON. A document that cannot
//! be read is logged and counted, never fatal to the batch.

pub mod progress;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use well_record_extract_models::WellRecord;
use well_record_ingest_models::{BatchSummary, IngestConfig};

use crate::progress::ProgressCallback;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "WELL_RECORD_CONFIG";

/// Configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "well_record.toml";

/// File name of batch output.
pub const BATCH_RESULTS_FILE: &str = "results.json";

/// File name of single-document output.
pub const SINGLE_RESULT_FILE: &str = "result.json";

/// Errors from reading documents, configuration, or writing results.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// I/O error on a file or directory.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path that caused the error.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A document is not valid UTF-8.
    #[error("{} is not valid UTF-8: {source}", path.display())]
    Decode {
        /// Path of the document.
        path: PathBuf,
        /// Underlying decode error.
        source: std::string::FromUtf8Error,
    },

    /// A requested document does not exist.
    #[error("Document not found: {}", .0.display())]
    NotFound(PathBuf),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration file could not be parsed.
    #[error("Invalid config {}: {source}", path.display())]
    Config {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// A blocking extraction task panicked or was cancelled.
    #[error("Extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> IngestError + '_ {
    move |source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Returns the configuration file to load: `explicit` if given, else the
/// file named by [`CONFIG_ENV_VAR`], else [`DEFAULT_CONFIG_FILE`] if it
/// exists.
#[must_use]
pub fn config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
        .or_else(|| {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            local.is_file().then_some(local)
        })
}

/// Loads the configuration at `path`, or the defaults when there is none.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid
/// configuration.
pub fn load_config(path: Option<&Path>) -> Result<IngestConfig, IngestError> {
    let Some(path) = path else {
        log::debug!("No config file, using defaults");
        return Ok(IngestConfig::default());
    };

    log::debug!("Loading config from {}", path.display());
    let text = std::fs::read_to_string(path).map_err(io_error(path))?;
    IngestConfig::from_toml_str(&text).map_err(|source| IngestError::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Lists the files in `dir` with the given extension, sorted by file name.
///
/// # Errors
///
/// Returns an error if `dir` cannot be read.
pub fn discover_documents(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, IngestError> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error(dir))? {
        let path = entry.map_err(io_error(dir))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            paths.push(path);
        }
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Reads a document as UTF-8 text.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if the file cannot be read and
/// [`IngestError::Decode`] if it is not valid UTF-8.
pub fn read_document(path: &Path) -> Result<String, IngestError> {
    let bytes = std::fs::read(path).map_err(io_error(path))?;
    String::from_utf8(bytes).map_err(|source| IngestError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Reads and extracts a single document.
///
/// # Errors
///
/// Returns an error if the document cannot be read.
pub fn extract_file(path: &Path) -> Result<WellRecord, IngestError> {
    let raw = read_document(path)?;
    Ok(well_record_extract::extract_document(&file_name(path), &raw))
}

/// Extracts every document in `config.input_dir`, at most
/// `config.concurrency` at a time. Records come back in discovery order.
///
/// # Errors
///
/// Returns an error if the input directory cannot be listed. Failures on
/// individual documents are logged and counted in the summary.
pub async fn extract_all(
    config: &IngestConfig,
    progress: Option<Arc<dyn ProgressCallback>>,
) -> Result<(Vec<WellRecord>, BatchSummary), IngestError> {
    use futures::stream::{self, StreamExt as _};

    let started_at = chrono::Utc::now();
    let start = Instant::now();

    let paths = discover_documents(&config.input_dir, &config.extension)?;
    let found = paths.len();
    let concurrency = config.concurrency.max(1);

    log::info!(
        "Found {found} document(s) in {} (concurrency={concurrency})",
        config.input_dir.display()
    );
    if let Some(p) = &progress {
        p.set_total(found as u64);
    }

    let mut results = stream::iter(paths.into_iter().map(|path| async move {
        let name = file_name(&path);
        let result = tokio::task::spawn_blocking(move || extract_file(&path))
            .await
            .map_err(IngestError::from)
            .and_then(|r| r);
        (name, result)
    }))
    .buffered(concurrency);

    let mut records = Vec::with_capacity(found);
    let mut failed = 0;

    while let Some((name, result)) = results.next().await {
        match result {
            Ok(record) => {
                log::info!("Extracted: {name}");
                records.push(record);
            }
            Err(e) => {
                log::warn!("Failed: {name} | {e}");
                failed += 1;
            }
        }

        if let Some(p) = &progress {
            p.set_message(name);
            p.inc(1);
        }
    }

    let summary = BatchSummary {
        found,
        extracted: records.len(),
        failed,
        started_at,
        elapsed: start.elapsed(),
    };

    if let Some(p) = &progress {
        p.finish(format!("{} extracted, {failed} failed", summary.extracted));
    }

    Ok((records, summary))
}

/// Resolves `name` to a document path. `name` may be a path, a file name
/// inside `config.input_dir`, or a bare stem (`W28557` resolves to
/// `<input_dir>/W28557.txt`).
///
/// # Errors
///
/// Returns [`IngestError::NotFound`] if no candidate exists.
pub fn resolve_single(config: &IngestConfig, name: &str) -> Result<PathBuf, IngestError> {
    let with_extension = config
        .input_dir
        .join(format!("{name}.{}", config.extension));
    let candidates = [
        PathBuf::from(name),
        config.input_dir.join(name),
        with_extension.clone(),
    ];

    candidates
        .into_iter()
        .find(|p| p.is_file())
        .ok_or(IngestError::NotFound(with_extension))
}

/// Writes `value` as pretty-printed JSON to `path`, creating parent
/// directories.
///
/// # Errors
///
/// Returns an error if serialization or any filesystem write fails.
pub fn write_results<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<(), IngestError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_error(parent))?;
    }

    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).map_err(io_error(path))?;

    log::info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const DOC: &str = "=== PAGE 1 ===\nWell Name and Number\nLindvig 1-11HR\nAPI #: 33-053-02102\n";

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn config_for(dir: &Path) -> IngestConfig {
        IngestConfig {
            input_dir: dir.to_path_buf(),
            output_dir: dir.join("out"),
            extension: "txt".to_string(),
            concurrency: 2,
        }
    }

    #[test]
    fn discovers_matching_files_sorted() {
        let dir = scratch("well_record_ingest_discover");
        fs::write(dir.join("W200.txt"), DOC).unwrap();
        fs::write(dir.join("W100.txt"), DOC).unwrap();
        fs::write(dir.join("notes.md"), "skip").unwrap();

        let names: Vec<String> = discover_documents(&dir, "txt")
            .unwrap()
            .iter()
            .map(|p| file_name(p))
            .collect();
        assert_eq!(names, vec!["W100.txt", "W200.txt"]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn distinguishes_io_and_decode_errors() {
        let dir = scratch("well_record_ingest_read");
        fs::write(dir.join("bad.txt"), [0xff, 0xfe, 0x00]).unwrap();

        assert!(matches!(
            read_document(&dir.join("bad.txt")),
            Err(IngestError::Decode { .. })
        ));
        assert!(matches!(
            read_document(&dir.join("missing.txt")),
            Err(IngestError::Io { .. })
        ));

        let _ = fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn batch_continues_past_failures_in_order() {
        let dir = scratch("well_record_ingest_batch");
        fs::write(dir.join("W3.txt"), DOC).unwrap();
        fs::write(dir.join("W1.txt"), DOC).unwrap();
        fs::write(dir.join("W2.txt"), [0xc3, 0x28]).unwrap();

        let (records, summary) = extract_all(&config_for(&dir), Some(progress::null_progress()))
            .await
            .unwrap();

        let files: Vec<&str> = records.iter().map(|r| r.file.as_str()).collect();
        assert_eq!(files, vec!["W1.txt", "W3.txt"]);
        assert_eq!(summary.found, 3);
        assert_eq!(summary.extracted, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(
            records[0].well_info.well_name_and_number.as_deref(),
            Some("Lindvig 1-11HR")
        );
        assert_eq!(records[0].well_info.api.as_deref(), Some("33-053-02102"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn missing_input_dir_is_an_error() {
        let dir = std::env::temp_dir().join("well_record_ingest_no_such_dir");
        let _ = fs::remove_dir_all(&dir);
        assert!(matches!(
            extract_all(&config_for(&dir), None).await,
            Err(IngestError::Io { .. })
        ));
    }

    #[test]
    fn resolves_stems_and_reports_missing() {
        let dir = scratch("well_record_ingest_resolve");
        fs::write(dir.join("W28557.txt"), DOC).unwrap();
        let config = config_for(&dir);

        assert_eq!(resolve_single(&config, "W28557").unwrap(), dir.join("W28557.txt"));
        assert_eq!(
            resolve_single(&config, "W28557.txt").unwrap(),
            dir.join("W28557.txt")
        );
        assert!(matches!(
            resolve_single(&config, "W99999"),
            Err(IngestError::NotFound(_))
        ));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn writes_pretty_json_creating_directories() {
        let dir = scratch("well_record_ingest_write");
        let path = dir.join("nested").join(BATCH_RESULTS_FILE);
        let record = extract_file(&{
            let doc = dir.join("W1.txt");
            fs::write(&doc, DOC).unwrap();
            doc
        })
        .unwrap();

        write_results(&[record], &path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("[\n"));
        assert!(written.contains("\"file\": \"W1.txt\""));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn loads_config_file_and_reports_bad_toml() {
        let dir = scratch("well_record_ingest_config");
        let good = dir.join("good.toml");
        let bad = dir.join("bad.toml");
        fs::write(&good, "extension = \"text\"\nconcurrency = 0\n").unwrap();
        fs::write(&bad, "extension = [").unwrap();

        let config = load_config(Some(&good)).unwrap();
        assert_eq!(config.extension, "text");
        assert_eq!(config.concurrency, 1);
        assert!(matches!(
            load_config(Some(&bad)),
            Err(IngestError::Config { .. })
        ));
        assert_eq!(load_config(None).unwrap(), IngestConfig::default());

        let _ = fs::remove_dir_all(&dir);
    }
}
