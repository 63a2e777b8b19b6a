#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command line for extracting well records from OCR'd well files.
//!
//! Uses `indicatif-log-bridge` (via [`well_record_cli_utils::init_logger`])
//! so `RUST_LOG` output and the batch progress bar share the terminal.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use well_record_cli_utils::IndicatifProgress;
use well_record_ingest::{
    BATCH_RESULTS_FILE, SINGLE_RESULT_FILE, config_path, extract_all, extract_file, load_config,
    resolve_single, write_results,
};
use well_record_ingest_models::IngestConfig;

#[derive(Parser)]
#[command(name = "well_record", about = "Well-file record extraction tool")]
struct Cli {
    /// Configuration file (overrides `WELL_RECORD_CONFIG` and `./well_record.toml`)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

/// Flags that override configuration file values.
#[derive(Args)]
struct Overrides {
    /// Directory holding the text documents
    #[arg(long)]
    input_dir: Option<PathBuf>,
    /// Directory the JSON results are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Input file extension, without the dot
    #[arg(long)]
    extension: Option<String>,
    /// Maximum number of documents extracted at once
    #[arg(long)]
    concurrency: Option<usize>,
}

impl Overrides {
    fn apply(self, config: IngestConfig) -> IngestConfig {
        IngestConfig {
            input_dir: self.input_dir.unwrap_or(config.input_dir),
            output_dir: self.output_dir.unwrap_or(config.output_dir),
            extension: self.extension.unwrap_or(config.extension),
            concurrency: self.concurrency.unwrap_or(config.concurrency),
        }
        .clamped()
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every document in the input directory into `results.json`
    ExtractAll {
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Extract a single document (path, file name, or stem like `W28557`)
    Extract {
        /// Document path, file name, or stem
        target: String,
        /// Print the record instead of writing `result.json`
        #[arg(long)]
        stdout: bool,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Print the effective configuration as TOML
    ShowConfig {
        #[command(flatten)]
        overrides: Overrides,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = well_record_cli_utils::init_logger();
    let cli = Cli::parse();

    let file_config = load_config(config_path(cli.config).as_deref())?;

    match cli.command {
        Commands::ExtractAll { overrides } => {
            let config = overrides.apply(file_config);
            let progress = IndicatifProgress::documents_bar(&multi, "Discovering documents...");

            let (records, summary) = extract_all(&config, Some(progress)).await?;
            write_results(&records, &config.output_dir.join(BATCH_RESULTS_FILE))?;

            log::info!(
                "Batch started {}: {} found, {} extracted, {} failed in {:.1}s",
                summary.started_at.to_rfc3339(),
                summary.found,
                summary.extracted,
                summary.failed,
                summary.elapsed.as_secs_f64()
            );
        }
        Commands::Extract {
            target,
            stdout,
            overrides,
        } => {
            let config = overrides.apply(file_config);
            let path = resolve_single(&config, &target)?;
            let record = extract_file(&path)?;

            if stdout {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                write_results(&record, &config.output_dir.join(SINGLE_RESULT_FILE))?;
            }
        }
        Commands::ShowConfig { overrides } => {
            print!("{}", overrides.apply(file_config).to_toml_string()?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_file_values() {
        let cli = Cli::parse_from([
            "well_record",
            "extract-all",
            "--input-dir",
            "/scans",
            "--concurrency",
            "0",
        ]);
        let Commands::ExtractAll { overrides } = cli.command else {
            panic!("expected extract-all");
        };

        let config = overrides.apply(IngestConfig {
            extension: "text".to_string(),
            ..IngestConfig::default()
        });
        assert_eq!(config.input_dir, PathBuf::from("/scans"));
        assert_eq!(config.extension, "text");
        assert_eq!(config.concurrency, 1);
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["well_record", "extract", "W28557", "--stdout", "--config", "a.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("a.toml")));
        assert!(matches!(cli.command, Commands::Extract { stdout: true, .. }));
    }
}
