//! Command implementations for the Tool CBD CLI
//!
//! Each command is implemented in its own module. Commands print their own
//! results and report whether the requested operation succeeded.

pub mod compare;
pub mod records;
pub mod reference;
pub mod shared;
pub mod upload;

#[cfg(test)]
pub mod test_support;

pub use shared::CommandStatus;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Main command runner
///
/// Sets up logging from the subcommand's flags, then dispatches to its
/// handler:
/// - `upload`: CSV export parsing, label translation and cost breakdown
/// - `save`, `options`, `record`, `delete`: quotation store operations
/// - `mapping`, `dropdowns`: reference data
/// - `compare`: side-by-side comparison of exported quotations
pub async fn run(args: Args) -> Result<CommandStatus> {
    let command = args
        .command
        .ok_or_else(|| Error::configuration("No command given"))?;
    shared::setup_logging(command.common());

    match command {
        Commands::Upload(upload_args) => upload::run_upload(upload_args).await,
        Commands::Save(save_args) => records::run_save(save_args).await,
        Commands::Options(options_args) => records::run_options(options_args).await,
        Commands::Record(record_args) => records::run_record(record_args).await,
        Commands::Delete(delete_args) => records::run_delete(delete_args).await,
        Commands::Mapping(mapping_args) => reference::run_mapping(mapping_args).await,
        Commands::Dropdowns(dropdowns_args) => reference::run_dropdowns(dropdowns_args).await,
        Commands::Compare(compare_args) => compare::run_compare(compare_args).await,
    }
}
