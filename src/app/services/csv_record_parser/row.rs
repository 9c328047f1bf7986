//! Row classification for quotation CSV uploads
//!
//! Every tokenized row is classified exactly once, in this order: skipped
//! (empty, comment, blank or header), tool component row, generic field row.
//! Component rows never fall through to generic field handling.

use csv::StringRecord;

use crate::app::models::ParsedRecord;
use crate::constants::{
    COMMENT_PREFIX, COMPONENT_HEADER_MARKER, COMPONENT_NAMES, MATERIAL_SUFFIX, TREATMENT_SUFFIX,
};

/// Why a row contributed nothing to the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Row had no cells at all
    Empty,
    /// First cell starts with `#`
    Comment,
    /// First cell is empty or is the component table header
    BlankOrHeader,
    /// Field row with a single cell
    TooShort,
    /// Field row whose value is empty or whose label starts with the header marker
    NoValue,
}

/// A tool component row (Cavity, Core, Slider, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRow {
    /// Lower-case component key with spaces replaced by underscores
    pub key: String,
    pub material: String,
    pub treatment: String,
}

/// A generic `label,value` row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    pub label: String,
    pub value: String,
}

/// Classification of one tokenized row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Skipped(SkipReason),
    Component(ComponentRow),
    Field(FieldRow),
}

impl ComponentRow {
    /// Record label of this component's material
    pub fn material_label(&self) -> String {
        component_label(&self.key, MATERIAL_SUFFIX)
    }

    /// Record label of this component's treatment
    pub fn treatment_label(&self) -> String {
        component_label(&self.key, TREATMENT_SUFFIX)
    }

    /// Write the non-empty material and treatment entries into the record
    pub fn apply(&self, record: &mut ParsedRecord) {
        if !self.material.is_empty() {
            record.insert(self.material_label(), self.material.clone());
        }
        if !self.treatment.is_empty() {
            record.insert(self.treatment_label(), self.treatment.clone());
        }
    }
}

impl FieldRow {
    pub fn apply(self, record: &mut ParsedRecord) {
        record.insert(self.label, self.value);
    }
}

/// Build the record label for a component key, e.g. `std_components` + `Material`
///
/// Only the first character of the key is upper-cased (`Std_components`, not
/// `Std_Components`). The field mapping table is keyed on exactly these labels.
pub fn component_label(component_key: &str, suffix: &str) -> String {
    format!("{} {}", capitalize(component_key), suffix)
}

/// Upper-case the first character and lower-case the rest
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Strip wrapping double quotes, then surrounding whitespace
fn unquote(text: &str) -> &str {
    text.trim_matches('"').trim()
}

/// Classify a tokenized row
pub fn classify_row(record: &StringRecord) -> RowKind {
    let Some(first_cell) = record.get(0) else {
        return RowKind::Skipped(SkipReason::Empty);
    };

    let first = unquote(first_cell);
    if first.starts_with(COMMENT_PREFIX) {
        return RowKind::Skipped(SkipReason::Comment);
    }
    if first.is_empty() || first == COMPONENT_HEADER_MARKER {
        return RowKind::Skipped(SkipReason::BlankOrHeader);
    }

    let normalized = first.to_lowercase();
    if COMPONENT_NAMES.contains(&normalized.as_str()) {
        let cell = |index: usize| record.get(index).map(str::trim).unwrap_or_default();
        return RowKind::Component(ComponentRow {
            key: normalized.replace(' ', "_"),
            material: cell(1).to_string(),
            treatment: cell(2).to_string(),
        });
    }

    if record.len() < 2 {
        return RowKind::Skipped(SkipReason::TooShort);
    }

    // Unquoted values may themselves contain commas and arrive split
    let joined = record.iter().skip(1).collect::<Vec<_>>().join(",");
    let value = unquote(&joined);
    if value.is_empty() || first.starts_with(COMPONENT_HEADER_MARKER) {
        return RowKind::Skipped(SkipReason::NoValue);
    }

    RowKind::Field(FieldRow {
        label: first.to_string(),
        value: value.to_string(),
    })
}
