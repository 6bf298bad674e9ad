//! Command-line argument definitions for sprint ingestion
//!
//! Defines the CLI interface using the clap derive API. Admission gates
//! (file extension, size) live in the command layer; the pipeline itself
//! accepts whatever the caller admits.

use crate::config::{Config, StorageConfig};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the sprint CSV importer
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sprint-ingest",
    version,
    about = "Import Azure DevOps sprint CSV exports into a work item store",
    long_about = "Parses, validates and transforms Azure DevOps query exports and reconciles \
                  them against stored work items. Re-importing the same file is safe: existing \
                  (sprint, work item) pairs are updated in place, never duplicated."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Import a CSV export into a sprint (parse, validate, transform, store)
    Import(ImportArgs),
    /// Parse and validate a CSV export without storing anything
    Validate(ValidateArgs),
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// Path to the CSV export file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Sprint the work items belong to
    #[arg(short = 's', long = "sprint", value_name = "ID")]
    pub sprint_id: String,

    /// Directory holding the JSON work item store
    #[arg(long = "data-dir", value_name = "PATH", default_value = "./sprint-data")]
    pub data_dir: PathBuf,

    /// Register the sprint if it does not exist yet
    #[arg(long = "create-sprint")]
    pub create_sprint: bool,

    /// Delete the sprint's existing work items before importing
    #[arg(long)]
    pub replace: bool,

    /// Records per storage round-trip
    #[arg(long = "chunk-size", value_name = "N")]
    pub chunk_size: Option<usize>,

    /// Report output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Path to the CSV export file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Report output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Report output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Machine-readable JSON report
    Json,
}

impl Args {
    /// Validate flag combinations
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            return Err(Error::configuration(
                "--verbose and --quiet are mutually exclusive",
            ));
        }
        Ok(())
    }

    /// Log level implied by the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

impl ImportArgs {
    /// Build a pipeline configuration from the flags
    pub fn to_config(&self) -> Config {
        let mut config = Config {
            replace_existing: self.replace,
            ..Config::default()
        };
        if let Some(chunk_size) = self.chunk_size {
            config.storage = StorageConfig { chunk_size };
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_and_quiet_conflict() {
        let args = Args {
            command: None,
            verbose: true,
            quiet: true,
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn log_level_follows_flags() {
        let base = Args {
            command: None,
            verbose: false,
            quiet: false,
        };
        assert_eq!(base.log_level(), "info");

        let verbose = Args {
            verbose: true,
            ..base.clone()
        };
        assert_eq!(verbose.log_level(), "debug");

        let quiet = Args {
            quiet: true,
            verbose: false,
            command: None,
        };
        assert_eq!(quiet.log_level(), "warn");
    }

    #[test]
    fn import_args_map_to_config() {
        let args = ImportArgs {
            file: PathBuf::from("export.csv"),
            sprint_id: "sprint-1".to_string(),
            data_dir: PathBuf::from("./sprint-data"),
            create_sprint: false,
            replace: true,
            chunk_size: Some(50),
            format: OutputFormat::Text,
        };

        let config = args.to_config();
        assert!(config.replace_existing);
        assert_eq!(config.storage.chunk_size, 50);
        assert!(config.validate().is_ok());
    }
}
