//! Command-line argument definitions for the Tool CBD tool
//!
//! This module defines the complete CLI interface using the clap derive API.
//! Every subcommand shares the same configuration, logging and output flags.

use crate::Result;
use crate::app::models::QuotationKey;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the tooling cost quotation tool
///
/// Parses quotation CSV exports, stores quotations in a local SQLite
/// database and reports the dropdown lists of the injection form.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tool_cbd",
    version,
    about = "Capture and look up injection-mold tooling cost breakdown quotations",
    long_about = "Parses supplier quotation CSV exports into form fields, stores submitted \
                  quotations in a local SQLite database keyed by tool type, program, part, \
                  version, quotation date and supplier, computes their cost breakdown, \
                  compares supplier exports side by side and lists the form dropdown values \
                  from the reference workbook."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse a quotation CSV export into form fields
    Upload(UploadArgs),
    /// Save a quotation form payload from a JSON file
    Save(SaveArgs),
    /// List stored values of the six quotation key fields
    Options(OptionsArgs),
    /// Look up one stored quotation by its six key fields
    Record(RecordArgs),
    /// Delete a stored quotation by id
    Delete(DeleteArgs),
    /// Print the CSV label to form key table
    Mapping(MappingArgs),
    /// Print the dropdown lists of a tool type's form
    Dropdowns(DropdownsArgs),
    /// Compare two to five exported quotations side by side
    Compare(CompareArgs),
}

impl Commands {
    /// Flags shared by every subcommand
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Upload(args) => &args.common,
            Commands::Save(args) => &args.common,
            Commands::Options(args) => &args.common,
            Commands::Record(args) => &args.common,
            Commands::Delete(args) => &args.common,
            Commands::Mapping(args) => &args.common,
            Commands::Dropdowns(args) => &args.common,
            Commands::Compare(args) => &args.common,
        }
    }
}

/// Configuration, logging and output flags
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct CommonArgs {
    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// `<config dir>/tool-cbd/config.toml`.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Directory holding the quotation database and the reference workbook
    #[arg(
        long = "data-dir",
        value_name = "PATH",
        help = "Directory holding tool_cost.db and Tool_CBD.xlsx"
    )]
    pub data_dir: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

impl CommonArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Whether results are printed as JSON
    pub fn json_output(&self) -> bool {
        self.output_format == OutputFormat::Json
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Arguments for the upload command
#[derive(Debug, Clone, Parser)]
pub struct UploadArgs {
    /// Quotation CSV export to parse
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Also translate parsed labels into form keys
    #[arg(
        long = "mapped",
        help = "Also print parsed fields translated to form keys and their cost breakdown"
    )]
    pub mapped: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the save command
#[derive(Debug, Clone, Parser)]
pub struct SaveArgs {
    /// JSON file holding the quotation form payload
    #[arg(value_name = "JSON_FILE")]
    pub payload_file: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the options command
#[derive(Debug, Clone, Parser)]
pub struct OptionsArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the record command
///
/// All six key fields are required for a lookup. They are optional here so a
/// missing field is reported the same way as any other failed lookup.
#[derive(Debug, Clone, Parser)]
pub struct RecordArgs {
    #[arg(long = "tool-type", value_name = "TEXT")]
    pub tool_type: Option<String>,

    #[arg(long = "program-name", value_name = "TEXT")]
    pub program_name: Option<String>,

    #[arg(long = "part-name", value_name = "TEXT")]
    pub part_name: Option<String>,

    #[arg(long = "part-version", value_name = "TEXT")]
    pub part_version: Option<String>,

    #[arg(long = "quotation-date", value_name = "TEXT")]
    pub quotation_date: Option<String>,

    #[arg(long = "supplier-name", value_name = "TEXT")]
    pub supplier_name: Option<String>,

    /// Also compute the cost breakdown of the stored form
    #[arg(long = "breakdown", help = "Also print the cost breakdown of the quotation")]
    pub breakdown: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl RecordArgs {
    /// Build the lookup key, failing if any field is absent or empty
    pub fn key(&self) -> Result<QuotationKey> {
        QuotationKey::from_fields(|field| {
            let value = match field {
                "tool_type" => &self.tool_type,
                "program_name" => &self.program_name,
                "part_name" => &self.part_name,
                "part_version" => &self.part_version,
                "quotation_date" => &self.quotation_date,
                "supplier_name" => &self.supplier_name,
                _ => &None,
            };
            value.clone()
        })
    }
}

/// Arguments for the delete command
#[derive(Debug, Clone, Parser)]
pub struct DeleteArgs {
    /// Row id of the quotation to delete
    #[arg(value_name = "ID")]
    pub id: i64,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the mapping command
#[derive(Debug, Clone, Parser)]
pub struct MappingArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the dropdowns command
#[derive(Debug, Clone, Parser)]
pub struct DropdownsArgs {
    /// Tool type whose form is requested
    #[arg(
        long = "tool-type",
        value_name = "TYPE",
        default_value = "injection",
        help = "Tool type whose form dropdowns are listed"
    )]
    pub tool_type: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the compare command
#[derive(Debug, Clone, Parser)]
pub struct CompareArgs {
    /// Exported quotation CSVs to compare
    ///
    /// Non-CSV files and repeated file names are skipped; at most five
    /// files take part.
    #[arg(value_name = "FILE", required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Write the summary and field rows to a CSV file
    #[arg(
        long = "export",
        value_name = "PATH",
        help = "Write the comparison (summary and field rows) to a CSV file"
    )]
    pub export: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}
