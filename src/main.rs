use clap::Parser;
use std::process;
use tool_cbd::cli::{args::Args, commands};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show an overview of the commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    eprintln!("Failed to listen for CTRL+C: {}", e);
                }
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(tool_cbd::Error::processing_interrupted("Interrupted by user"))
            }
        }
    });

    match result {
        // Results have already been printed by the command
        Ok(status) => process::exit(status.exit_code()),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show an overview when no subcommand is provided
fn show_help_and_commands() {
    println!("Tool CBD - Tooling Cost Breakdown Quotations");
    println!("============================================");
    println!();
    println!("Parse supplier quotation CSV exports, store quotations in a local");
    println!("SQLite database, compute their cost breakdown and compare them");
    println!("side by side.");
    println!();
    println!("USAGE:");
    println!("    tool_cbd <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    upload      Parse a quotation CSV export into form fields");
    println!("    save        Save a quotation form payload from a JSON file");
    println!("    options     List stored values of the six quotation key fields");
    println!("    record      Look up one stored quotation by its six key fields");
    println!("    delete      Delete a stored quotation by id");
    println!("    mapping     Print the CSV label to form key table");
    println!("    dropdowns   Print the dropdown lists of a tool type's form");
    println!("    compare     Compare two to five exported quotations side by side");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Parse an export and show the form keys it fills:");
    println!("    tool_cbd upload quotation.csv --mapped");
    println!();
    println!("    # Compare supplier quotations and export the table:");
    println!("    tool_cbd compare acme.csv brio.csv --export comparison.csv");
    println!();
    println!("    # Save a filled-in form and look it up again:");
    println!("    tool_cbd save quotation.json");
    println!("    tool_cbd record --tool-type Injection --program-name X1 --part-name Bezel \\");
    println!("                    --part-version B --quotation-date 2024-05-01 \\");
    println!("                    --supplier-name \"Acme Mold\" --output-format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    tool_cbd <COMMAND> --help");
}
