//! Parsing statistics and result structures for quotation CSV uploads
//!
//! Statistics are diagnostic only: they describe how rows were classified
//! and never influence the produced record.

use super::row::{RowKind, SkipReason};
use crate::app::models::ParsedRecord;

/// Parsing result with the record and basic statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Label to value record
    pub record: ParsedRecord,

    /// Row classification statistics
    pub stats: ParseStats,
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Number of rows produced by the tokenizer
    pub total_rows: usize,

    /// Tool component rows
    pub component_rows: usize,

    /// Generic label/value rows that set a field
    pub field_rows: usize,

    /// Comment rows
    pub comment_rows: usize,

    /// Empty, blank-label and component header rows
    pub blank_or_header_rows: usize,

    /// Single-cell rows
    pub short_rows: usize,

    /// Field rows without a usable value
    pub empty_value_rows: usize,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one classified row
    pub fn record(&mut self, kind: &RowKind) {
        self.total_rows += 1;
        match kind {
            RowKind::Component(_) => self.component_rows += 1,
            RowKind::Field(_) => self.field_rows += 1,
            RowKind::Skipped(SkipReason::Comment) => self.comment_rows += 1,
            RowKind::Skipped(SkipReason::Empty | SkipReason::BlankOrHeader) => {
                self.blank_or_header_rows += 1
            }
            RowKind::Skipped(SkipReason::TooShort) => self.short_rows += 1,
            RowKind::Skipped(SkipReason::NoValue) => self.empty_value_rows += 1,
        }
    }

    /// Rows that contributed nothing to the record
    pub fn rows_skipped(&self) -> usize {
        self.comment_rows + self.blank_or_header_rows + self.short_rows + self.empty_value_rows
    }
}
