//! CSV record parser for quotation uploads
//!
//! This module turns a human-authored quotation CSV export into a flat
//! label/value record. Exports mix free-form `label,value` rows with a tool
//! component table whose rows (Cavity, Core, Slider, ...) carry a material
//! and a treatment column; those are unpacked into per-component
//! `<Component> Material` / `<Component> Treatment` labels.
//!
//! ## Architecture
//!
//! - [`parser`] - Tokenization and the single left-to-right pass building the record
//! - [`row`] - Classification of one tokenized row (skip, component, field)
//! - [`stats`] - Per-parse row statistics and the parse result
//!
//! ## Usage
//!
//! ```rust
//! use tool_cbd::app::services::csv_record_parser::parse_csv_data;
//!
//! # fn example() -> tool_cbd::Result<()> {
//! let record = parse_csv_data("Part Name,Widget A\ncavity,Steel,Nitride\n")?;
//!
//! assert_eq!(record["Part Name"], "Widget A");
//! assert_eq!(record["Cavity Material"], "Steel");
//! assert_eq!(record["Cavity Treatment"], "Nitride");
//! # Ok(())
//! # }
//! ```

pub mod parser;
pub mod row;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use parser::{CsvRecordParser, parse_csv_data};
pub use row::{ComponentRow, FieldRow, RowKind, SkipReason, classify_row, component_label};
pub use stats::{ParseResult, ParseStats};
