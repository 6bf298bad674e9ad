//! Command implementations for the sprint ingestion CLI
//!
//! Contains command execution, upload admission gates, progress reporting
//! and report formatting. Admission checks (extension, size, emptiness)
//! happen here because they are caller responsibilities; the pipeline
//! behaves correctly for any admitted input.

use crate::app::adapters::json_file::JsonFileStore;
use crate::app::services::csv_parser;
use crate::cli::args::{Args, Commands, ImportArgs, OutputFormat, ValidateArgs};
use crate::constants::MAX_UPLOAD_BYTES;
use crate::pipeline::{self, ImportPipeline, ImportReport, ParsingReport, PreviewReport};
use crate::{Error, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Entry point for all subcommands
pub async fn run(args: Args) -> Result<()> {
    setup_logging(&args);
    args.validate()?;

    // main shows help when no subcommand was given
    let Some(command) = args.command.as_ref() else {
        return Ok(());
    };

    match command {
        Commands::Import(import_args) => run_import(import_args).await,
        Commands::Validate(validate_args) => run_validate(validate_args),
    }
}

/// Set up tracing output to stderr based on verbosity flags
fn setup_logging(args: &Args) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sprint_ingest={}", args.log_level())));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("Logging initialized at level: {}", args.log_level());
}

/// Run the full import pipeline against a JSON file store
async fn run_import(args: &ImportArgs) -> Result<()> {
    let content = admit_file(&args.file)?;

    let store = Arc::new(JsonFileStore::open(&args.data_dir)?);
    if args.create_sprint {
        store.create_sprint(&args.sprint_id)?;
    }

    let config = args.to_config();
    let pipeline = ImportPipeline::new(store, config)?;

    let estimated_rows = csv_parser::estimate_row_count(&content);
    let spinner = progress_spinner(&format!(
        "Importing {} (~{} rows) into sprint {}...",
        args.file.display(),
        estimated_rows,
        args.sprint_id
    ));
    let report = pipeline.import(&args.sprint_id, &content).await?;
    spinner.finish_and_clear();

    info!(
        "Import finished: {} inserted, {} updated, {} failed",
        report.storage.inserted, report.storage.updated, report.storage.failed
    );

    match args.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => print_import_report(&report),
    }
    Ok(())
}

/// Run parse + validation only and report what would be imported
fn run_validate(args: &ValidateArgs) -> Result<()> {
    let content = admit_file(&args.file)?;
    let report = pipeline::preview(&content, &crate::Config::default());

    match args.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => print_preview_report(&report),
    }
    Ok(())
}

/// Caller-side admission gates: extension, size, emptiness
fn admit_file(path: &Path) -> Result<String> {
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if !is_csv {
        return Err(Error::configuration(format!(
            "Only .csv files are accepted: {}",
            path.display()
        )));
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| Error::io(format!("Cannot access {}", path.display()), e))?;
    if metadata.len() > MAX_UPLOAD_BYTES {
        return Err(Error::configuration(format!(
            "File exceeds the {}MB upload limit: {:.2}MB",
            MAX_UPLOAD_BYTES / (1024 * 1024),
            metadata.len() as f64 / 1024.0 / 1024.0
        )));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;
    if content.trim().is_empty() {
        return Err(Error::configuration(format!(
            "File is empty: {}",
            path.display()
        )));
    }
    Ok(content)
}

fn progress_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("static template is valid"),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn print_json<T: serde::Serialize>(report: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn print_import_report(report: &ImportReport) {
    println!();
    if report.storage.failed == 0 && report.parsing.invalid_rows == 0 {
        println!("{}", "Import complete".green().bold());
    } else {
        println!("{}", "Import complete with problems".yellow().bold());
    }

    print_parsing_section(&report.parsing);
    println!(
        "  {} {} work items transformed",
        "Transform:".bold(),
        report.transformation.record_count
    );
    println!(
        "  {} {} inserted, {} updated, {} failed",
        "Storage:".bold(),
        report.storage.inserted.to_string().green(),
        report.storage.updated.to_string().cyan(),
        report.storage.failed.to_string().red()
    );

    for failure in &report.storage.errors {
        println!(
            "    {} work item {}: {}",
            "✗".red(),
            failure.work_item_id,
            failure.message
        );
    }
}

fn print_preview_report(report: &PreviewReport) {
    println!();
    if report.parsing.invalid_rows == 0 {
        println!("{}", "Validation passed".green().bold());
    } else {
        println!("{}", "Validation found problems".yellow().bold());
    }

    print_parsing_section(&report.parsing);

    if !report.sample.is_empty() {
        println!("  {}", "Sample:".bold());
        for row in &report.sample {
            println!(
                "    {} [{}] {} ({})",
                row.work_item_id, row.work_item_type, row.title, row.state
            );
        }
    }
}

fn print_parsing_section(parsing: &ParsingReport) {
    println!(
        "  {} {} total, {} valid, {} invalid, {} skipped",
        "Rows:".bold(),
        parsing.total_rows,
        parsing.valid_rows.to_string().green(),
        parsing.invalid_rows.to_string().red(),
        parsing.skipped_rows
    );

    if !parsing.missing_headers.is_empty() {
        println!(
            "    {} missing required columns: {}",
            "✗".red(),
            parsing.missing_headers.join(", ")
        );
    }

    for error in &parsing.errors {
        match &error.field {
            Some(field) => println!(
                "    {} row {} [{}]: {}",
                "✗".red(),
                error.row,
                field,
                error.message
            ),
            None => println!("    {} row {}: {}", "✗".red(), error.row, error.message),
        }
    }
}
