use clap::Parser;
use sprint_ingest::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the command
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    match runtime.block_on(commands::run(args)) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    }
}

/// Show help information when no subcommand is provided
fn show_help_and_commands() {
    println!("Sprint Ingest - Azure DevOps Sprint CSV Importer");
    println!("================================================");
    println!();
    println!("Parse, validate and transform sprint CSV exports and reconcile them");
    println!("against stored work items with idempotent, per-row auditable imports.");
    println!();
    println!("USAGE:");
    println!("    sprint-ingest <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    import      Import a CSV export into a sprint (main command)");
    println!("    validate    Parse and validate a CSV export without storing anything");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Enable debug logging");
    println!("    -q, --quiet      Suppress all output except warnings and errors");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Validate an export before importing");
    println!("    sprint-ingest validate export.csv");
    println!();
    println!("    # Import into a sprint, creating it on first use");
    println!("    sprint-ingest import export.csv --sprint sprint-42 --create-sprint");
    println!();
    println!("    # Re-import from scratch, replacing existing work items");
    println!("    sprint-ingest import export.csv --sprint sprint-42 --replace");
}
