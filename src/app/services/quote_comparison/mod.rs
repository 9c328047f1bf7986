//! Multi-quotation comparison
//!
//! Compares between two and five exported quotation CSVs side by side. Each
//! export is split into `# <name>` sections, and every section present in
//! any file becomes one comparison table with a column per file.
//!
//! ## Architecture
//!
//! - [`parser`] - Splits one export into sections of fields, summary figures and component rows
//! - [`table`] - Builds the per-section comparison rows, min/max marks and the CSV export
//!
//! ## Usage
//!
//! ```rust
//! use tool_cbd::app::services::quote_comparison::compare_uploads;
//! use tool_cbd::app::services::upload::{UploadLimits, UploadedFile};
//!
//! # fn example() -> tool_cbd::Result<()> {
//! let files = vec![
//!     UploadedFile::new("a.csv", "# Summary\nTool Total Cost,1000\n"),
//!     UploadedFile::new("b.csv", "# Summary\nTool Total Cost,1200\n"),
//! ];
//! let comparison = compare_uploads(files, &UploadLimits::default())?;
//!
//! let row = comparison.section("Summary").unwrap().row("Tool Total Cost").unwrap();
//! assert_eq!(row.cells[0].value.as_deref(), Some("1000"));
//! # Ok(())
//! # }
//! ```

pub mod parser;
pub mod table;

#[cfg(test)]
pub mod tests;

pub use parser::{ComponentEntry, ParsedQuote, QuoteSection, parse_quote};
pub use table::{
    Comparison, ComparisonCell, ComparisonRow, Highlight, QuoteFile, RowGroup, SectionComparison,
};

use tracing::{info, warn};

use super::upload::{UploadLimits, UploadedFile, decode_content};
use crate::constants::{CSV_EXTENSION, MAX_COMPARISON_FILES, MIN_COMPARISON_FILES};
use crate::{Error, Result};

/// Pick the files taking part in a comparison
///
/// Files without a `.csv` name are skipped, as are files whose name was
/// already picked. At most five files are kept, in the order given.
pub fn select_files(files: Vec<UploadedFile>) -> Vec<UploadedFile> {
    let mut selected: Vec<UploadedFile> = Vec::with_capacity(MAX_COMPARISON_FILES);

    for file in files {
        if !file.filename.to_lowercase().ends_with(CSV_EXTENSION) {
            warn!("Skipping '{}': not a CSV file", file.filename);
        } else if selected.len() >= MAX_COMPARISON_FILES {
            warn!(
                "Skipping '{}': at most {} files can be compared",
                file.filename, MAX_COMPARISON_FILES
            );
        } else if selected.iter().any(|f| f.filename == file.filename) {
            warn!("Skipping '{}': already selected", file.filename);
        } else {
            selected.push(file);
        }
    }

    selected
}

/// Select, decode and parse uploads, then compare them
pub fn compare_uploads(files: Vec<UploadedFile>, limits: &UploadLimits) -> Result<Comparison> {
    let selected = select_files(files);
    if selected.len() < MIN_COMPARISON_FILES {
        return Err(Error::data_validation(
            "Please upload at least 2 CSV files to compare",
        ));
    }

    let mut quotes = Vec::with_capacity(selected.len());
    for file in selected {
        if file.content.len() > limits.max_upload_bytes {
            return Err(Error::upload_too_large(
                file.content.len(),
                limits.max_upload_bytes,
            ));
        }

        let quote = parse_quote(decode_content(&file.content)?);
        quotes.push(QuoteFile {
            filename: file.filename,
            quote,
        });
    }

    let comparison = Comparison::build(&quotes);
    info!(
        "Compared {} quotations across {} sections",
        comparison.files.len(),
        comparison.sections.len()
    );
    Ok(comparison)
}
