//! Compare command: side-by-side view of exported quotations

use colored::*;
use tracing::info;

use super::shared::{CommandStatus, load_configuration, print_json, print_status};
use crate::app::models::StatusResponse;
use crate::app::services::quote_comparison::{
    Comparison, ComparisonCell, Highlight, RowGroup, compare_uploads,
};
use crate::app::services::upload::{UploadLimits, UploadedFile};
use crate::cli::args::CompareArgs;
use crate::{Error, Result};

/// Run the compare command
pub async fn run_compare(args: CompareArgs) -> Result<CommandStatus> {
    let config = load_configuration(&args.common)?;
    let limits = UploadLimits {
        max_upload_bytes: config.upload.max_upload_bytes,
    };

    let mut files = Vec::with_capacity(args.files.len());
    for path in &args.files {
        files.push(UploadedFile::from_path(path).await?);
    }

    let comparison = match compare_uploads(files, &limits) {
        Ok(comparison) => comparison,
        Err(
            e @ (Error::DataValidation { .. }
            | Error::UploadTooLarge { .. }
            | Error::Decoding { .. }),
        ) => {
            if args.common.json_output() {
                print_json(&StatusResponse::failed(e.to_string()))?;
            } else {
                print_status(false, &e.to_string());
            }
            return Ok(CommandStatus::Failed);
        }
        Err(e) => return Err(e),
    };

    if let Some(path) = &args.export {
        let content = comparison.to_csv()?;
        tokio::fs::write(path, content)
            .await
            .map_err(|e| Error::io(format!("Failed to write export {}", path.display()), e))?;
        info!("Exported comparison to {}", path.display());
    }

    if args.common.json_output() {
        print_json(&comparison)?;
    } else {
        print_comparison(&comparison);
        print_status(true, &format!("Compared {} files", comparison.files.len()));
    }

    Ok(CommandStatus::Succeeded)
}

/// Print one coloured table per section; lowest values green, highest red
fn print_comparison(comparison: &Comparison) {
    for section in &comparison.sections {
        let title = if section.name.is_empty() {
            "(unnamed section)"
        } else {
            section.name.as_str()
        };
        println!("\n{}", title.bright_green().bold());

        print!("  {:<36}", "Field".bold());
        for file in &comparison.files {
            print!(" {:<20}", file.bold());
        }
        println!();

        for row in &section.rows {
            let label = match row.group {
                RowGroup::Summary => row.label.bold(),
                RowGroup::Field | RowGroup::Component => row.label.bright_white(),
            };
            print!("  {:<36}", label);
            for cell in &row.cells {
                print!(" {:<20}", render_cell(cell));
            }
            println!();
        }
    }
}

fn render_cell(cell: &ComparisonCell) -> ColoredString {
    let text = cell.value.as_deref().unwrap_or("-");
    match (cell.highlight, &cell.value) {
        (_, None) => text.dimmed(),
        (Some(Highlight::Min), _) => text.bright_green(),
        (Some(Highlight::Max), _) => text.bright_red(),
        (None, _) => text.normal(),
    }
}
