//! Side-by-side comparison of parsed quotations
//!
//! Each section present in any file becomes one comparison table. Its rows
//! come in three groups: summary figures, remaining fields sorted by label,
//! then one row per component table column. Numeric rows mark the lowest and
//! highest value across the files.

use serde::Serialize;
use std::io::Write;
use tracing::debug;

use super::parser::{ParsedQuote, is_summary_label};
use crate::constants::{COMPONENT_PROPERTIES, NUMERIC_KEYWORDS};
use crate::{Error, Result};

/// A parsed quotation and the file it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteFile {
    pub filename: String,
    pub quote: ParsedQuote,
}

/// Row group within a section table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowGroup {
    Summary,
    Field,
    Component,
}

/// Extreme of a numeric row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    Min,
    Max,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonCell {
    /// Value in this file, absent when the file has none
    pub value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Highlight>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub label: String,
    pub group: RowGroup,

    /// One cell per compared file, in file order
    pub cells: Vec<ComparisonCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionComparison {
    pub name: String,
    pub rows: Vec<ComparisonRow>,
}

impl SectionComparison {
    pub fn row(&self, label: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|row| row.label == label)
    }
}

/// Comparison of two or more quotations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Compared file names, one per cell column
    pub files: Vec<String>,

    /// Section tables sorted by section name
    pub sections: Vec<SectionComparison>,
}

impl Comparison {
    pub fn build(files: &[QuoteFile]) -> Self {
        let mut names: Vec<&String> = files
            .iter()
            .flat_map(|file| file.quote.sections.keys())
            .collect();
        names.sort();
        names.dedup();

        let sections: Vec<SectionComparison> = names
            .into_iter()
            .map(|name| compare_section(name, files))
            .collect();

        debug!(
            "Compared {} files across {} sections",
            files.len(),
            sections.len()
        );

        Self {
            files: files.iter().map(|file| file.filename.clone()).collect(),
            sections,
        }
    }

    pub fn section(&self, name: &str) -> Option<&SectionComparison> {
        self.sections.iter().find(|section| section.name == name)
    }

    /// Render summary and field rows as CSV, one `# <name>` block per section
    ///
    /// Component rows are left out of the export.
    pub fn to_csv(&self) -> Result<String> {
        let mut out: Vec<u8> = Vec::new();

        for section in &self.sections {
            write!(out, "\n# {}\n", section.name)
                .map_err(|e| Error::io("Failed to write comparison export", e))?;

            let mut writer = csv::WriterBuilder::new().from_writer(&mut out);
            let header = std::iter::once("Field").chain(self.files.iter().map(String::as_str));
            writer.write_record(header)?;

            for row in section.rows.iter().filter(|row| row.group != RowGroup::Component) {
                let values = row
                    .cells
                    .iter()
                    .map(|cell| cell.value.as_deref().unwrap_or(""));
                writer.write_record(std::iter::once(row.label.as_str()).chain(values))?;
            }

            writer
                .flush()
                .map_err(|e| Error::io("Failed to write comparison export", e))?;
        }

        String::from_utf8(out).map_err(|e| {
            Error::decoding("Comparison export is not valid UTF-8", e.utf8_error())
        })
    }
}

fn compare_section(name: &str, files: &[QuoteFile]) -> SectionComparison {
    let sections: Vec<_> = files
        .iter()
        .map(|file| file.quote.sections.get(name))
        .collect();
    let mut rows = Vec::new();

    let mut summary_labels: Vec<&str> = Vec::new();
    for section in sections.iter().flatten() {
        for (label, _) in &section.summary {
            if !summary_labels.contains(&label.as_str()) {
                summary_labels.push(label);
            }
        }
    }
    for label in summary_labels {
        let values = sections
            .iter()
            .map(|section| section.and_then(|s| s.summary_value(label)))
            .collect();
        rows.push(make_row(label.to_string(), RowGroup::Summary, values, is_numeric_label(label)));
    }

    let mut field_labels: Vec<&str> = sections
        .iter()
        .flatten()
        .flat_map(|section| section.fields.keys())
        .map(String::as_str)
        .filter(|label| !is_summary_label(label))
        .collect();
    field_labels.sort();
    field_labels.dedup();
    for label in field_labels {
        let values = sections
            .iter()
            .map(|section| section.and_then(|s| s.fields.get(label)).map(String::as_str))
            .collect();
        rows.push(make_row(label.to_string(), RowGroup::Field, values, is_numeric_label(label)));
    }

    let mut components: Vec<&str> = Vec::new();
    for section in sections.iter().flatten() {
        for entry in &section.components {
            if !components.contains(&entry.component.as_str()) {
                components.push(&entry.component);
            }
        }
    }
    for component in components {
        for property in COMPONENT_PROPERTIES {
            let values = sections
                .iter()
                .map(|section| {
                    section
                        .and_then(|s| s.component(component))
                        .and_then(|entry| entry.property(property))
                })
                .collect();
            let numeric = property.contains("Cost") || property.contains("Qty");
            rows.push(make_row(
                format!("{} {}", component, property),
                RowGroup::Component,
                values,
                numeric,
            ));
        }
    }

    SectionComparison {
        name: name.to_string(),
        rows,
    }
}

fn make_row(label: String, group: RowGroup, values: Vec<Option<&str>>, numeric: bool) -> ComparisonRow {
    let mut cells: Vec<ComparisonCell> = values
        .into_iter()
        .map(|value| ComparisonCell {
            value: value.filter(|v| !v.is_empty()).map(str::to_string),
            highlight: None,
        })
        .collect();

    if numeric {
        highlight_extremes(&mut cells);
    }

    ComparisonRow {
        label,
        group,
        cells,
    }
}

/// Whether a field label names a numeric quantity
pub fn is_numeric_label(label: &str) -> bool {
    let lower = label.to_lowercase();
    NUMERIC_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Mark the lowest and highest numeric cells when at least two differ
fn highlight_extremes(cells: &mut [ComparisonCell]) {
    let numbers: Vec<Option<f64>> = cells
        .iter()
        .map(|cell| cell.value.as_deref().and_then(cell_number))
        .collect();

    let present: Vec<f64> = numbers.iter().flatten().copied().collect();
    if present.len() < 2 {
        return;
    }

    let min = present.iter().copied().fold(f64::INFINITY, f64::min);
    let max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        return;
    }

    for (cell, number) in cells.iter_mut().zip(numbers) {
        cell.highlight = match number {
            Some(n) if n == min => Some(Highlight::Min),
            Some(n) if n == max => Some(Highlight::Max),
            _ => None,
        };
    }
}

/// Leading number of a cell, ignoring thousands separators, `%` and spaces
pub fn cell_number(value: &str) -> Option<f64> {
    let cleaned: String = value
        .chars()
        .filter(|c| *c != ',' && *c != '%' && !c.is_whitespace())
        .collect();
    leading_number(&cleaned)
}

fn leading_number(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - digits_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while fraction_end < bytes.len() && bytes[fraction_end].is_ascii_digit() {
            fraction_end += 1;
        }
        digits += fraction_end - fraction_start;
        end = fraction_end;
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits = exponent_end;
        while exponent_end < bytes.len() && bytes[exponent_end].is_ascii_digit() {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits {
            end = exponent_end;
        }
    }

    text[..end].parse().ok()
}
