//! Core quotation CSV parser implementation
//!
//! This module tokenizes upload content with the `csv` crate and folds the
//! classified rows into a record in a single left-to-right pass.

use tracing::{debug, trace};

use super::row::{RowKind, classify_row};
use super::stats::{ParseResult, ParseStats};
use crate::app::models::ParsedRecord;
use crate::constants::CSV_DELIMITER;
use crate::{Error, Result};

/// Parser for quotation CSV exports
///
/// Rows may have any number of cells. Parsing has no side effects, so the
/// same content always yields the same record.
#[derive(Debug, Clone)]
pub struct CsvRecordParser {
    delimiter: u8,
}

impl Default for CsvRecordParser {
    fn default() -> Self {
        Self {
            delimiter: CSV_DELIMITER,
        }
    }
}

impl CsvRecordParser {
    /// Create a new parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse CSV content into a record with statistics
    ///
    /// Later rows with a duplicate label overwrite earlier ones. A row the
    /// tokenizer cannot split fails the whole parse.
    pub fn parse_content(&self, content: &str) -> Result<ParseResult> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(content.as_bytes());

        let mut record = ParsedRecord::new();
        let mut stats = ParseStats::new();

        for (index, result) in reader.records().enumerate() {
            let row = result.map_err(|e| {
                Error::csv_parsing(format!("Failed to parse CSV row {}: {}", index + 1, e), Some(e))
            })?;

            let kind = classify_row(&row);
            trace!("Row {}: {:?}", index + 1, kind);
            stats.record(&kind);

            match kind {
                RowKind::Component(component) => component.apply(&mut record),
                RowKind::Field(field) => field.apply(&mut record),
                RowKind::Skipped(_) => {}
            }
        }

        debug!(
            "Parsed {} fields from {} rows ({} component, {} field, {} skipped)",
            record.len(),
            stats.total_rows,
            stats.component_rows,
            stats.field_rows,
            stats.rows_skipped()
        );

        Ok(ParseResult { record, stats })
    }
}

/// Parse CSV content into a label/value record with the default parser
pub fn parse_csv_data(content: &str) -> Result<ParsedRecord> {
    CsvRecordParser::new()
        .parse_content(content)
        .map(|result| result.record)
}
