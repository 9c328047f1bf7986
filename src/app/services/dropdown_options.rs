//! Quotation form dropdown lists
//!
//! Values come from the list sheet of the reference workbook. When no
//! workbook is present, built-in demo values keep the form usable.

use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::constants::{SUPPORTED_TOOL_TYPES, dropdown_columns, fallback_dropdowns};
use crate::{Error, Result};

/// Selectable values for each dropdown of the injection form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DropdownOptions {
    pub tool_types: Vec<String>,
    pub injection_systems: Vec<String>,
    pub mold_types: Vec<String>,
    pub hot_runner_systems: Vec<String>,
    pub cold_runner_systems: Vec<String>,
    pub gate_types: Vec<String>,
    pub hot_runner_gate_types: Vec<String>,
}

impl DropdownOptions {
    /// Built-in values used without a reference workbook
    pub fn fallback() -> Self {
        let owned = |values: &[&str]| values.iter().map(|v| v.to_string()).collect();
        Self {
            tool_types: owned(fallback_dropdowns::TOOL_TYPES),
            injection_systems: owned(fallback_dropdowns::INJECTION_SYSTEMS),
            mold_types: owned(fallback_dropdowns::MOLD_TYPES),
            hot_runner_systems: owned(fallback_dropdowns::HOT_RUNNER_SYSTEMS),
            cold_runner_systems: owned(fallback_dropdowns::COLD_RUNNER_SYSTEMS),
            gate_types: owned(fallback_dropdowns::GATE_TYPES),
            hot_runner_gate_types: owned(fallback_dropdowns::HOT_RUNNER_GATE_TYPES),
        }
    }

    /// Load the lists from a workbook sheet, or the fallback if the file is absent
    pub fn load(workbook_path: &Path, sheet: &str) -> Result<Self> {
        if !workbook_path.exists() {
            warn!(
                "Reference workbook {} not found, using built-in dropdown values",
                workbook_path.display()
            );
            return Ok(Self::fallback());
        }

        let path_text = workbook_path.display().to_string();
        let mut workbook: Xlsx<_> = open_workbook(workbook_path)
            .map_err(|e| Error::workbook(&path_text, format!("Failed to open workbook: {}", e)))?;

        let range = workbook
            .worksheet_range(sheet)
            .map_err(|e| Error::workbook(&path_text, format!("Failed to read sheet '{}': {}", sheet, e)))?;

        let options = Self::from_range(&range);
        info!(
            "Loaded dropdown lists from {} (sheet '{}', {} rows)",
            path_text,
            sheet,
            range.height()
        );
        Ok(options)
    }

    /// Extract the lists from a sheet whose first row holds column headers
    pub fn from_range(range: &Range<Data>) -> Self {
        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .map(|row| row.iter().map(|cell| cell_text(cell).unwrap_or_default()).collect())
            .unwrap_or_default();
        let body: Vec<&[Data]> = rows.collect();

        let column = |name: &str| -> Vec<String> {
            let Some(index) = headers.iter().position(|header| header == name) else {
                debug!("Dropdown column '{}' not present in sheet", name);
                return Vec::new();
            };

            let mut values: Vec<String> = Vec::new();
            for value in body.iter().filter_map(|row| row.get(index).and_then(cell_text)) {
                if !values.contains(&value) {
                    values.push(value);
                }
            }
            values
        };

        Self {
            tool_types: column(dropdown_columns::TOOL_TYPE),
            injection_systems: column(dropdown_columns::INJECTION_SYSTEM),
            mold_types: column(dropdown_columns::MOLD_TYPE),
            hot_runner_systems: column(dropdown_columns::HOT_RUNNER_SYSTEM),
            cold_runner_systems: column(dropdown_columns::COLD_RUNNER_SYSTEM),
            gate_types: column(dropdown_columns::GATE_TYPE),
            hot_runner_gate_types: column(dropdown_columns::HOT_RUNNER_GATE_TYPE),
        }
    }
}

/// Dropdown lists for a tool type's form
///
/// Only injection tooling has a form; other tool types are reported as
/// under development.
pub fn form_options(tool_type: &str, workbook_path: &Path, sheet: &str) -> Result<DropdownOptions> {
    if !SUPPORTED_TOOL_TYPES.contains(&tool_type) {
        return Err(Error::unsupported_tool_type(display_tool_type(tool_type)));
    }
    DropdownOptions::load(workbook_path, sheet)
}

/// Non-empty text of a cell
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        other => {
            let text = other.to_string();
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
    }
}

/// `hot_stamping` becomes `Hot Stamping`
fn display_tool_type(tool_type: &str) -> String {
    tool_type
        .replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(rows: &[&[&str]]) -> Range<Data> {
        let height = rows.len() as u32;
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if !cell.is_empty() {
                    range.set_value((r as u32, c as u32), Data::String(cell.to_string()));
                }
            }
        }
        range
    }

    #[test]
    fn test_fallback_values() {
        let options = DropdownOptions::fallback();

        assert_eq!(options.tool_types, vec!["Injection"]);
        assert_eq!(options.injection_systems, vec!["Hot Runner", "Cold Runner"]);
        assert_eq!(options.hot_runner_gate_types, vec!["Direct"]);
    }

    #[test]
    fn test_missing_workbook_uses_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let options = DropdownOptions::load(&dir.path().join("Tool_CBD.xlsx"), "List").unwrap();

        assert_eq!(options, DropdownOptions::fallback());
    }

    #[test]
    fn test_unreadable_workbook_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Tool_CBD.xlsx");
        std::fs::write(&path, "not a workbook").unwrap();

        let err = DropdownOptions::load(&path, "List").unwrap_err();
        assert!(matches!(err, Error::Workbook { .. }));
    }

    #[test]
    fn test_columns_deduplicated_in_first_occurrence_order() {
        let range = sheet(&[
            &["Tool type", "Mold type", "Gate type"],
            &["Injection", "3 Plate", "Edge"],
            &["Injection", "2 Plate", ""],
            &["", "3 Plate", "Submarine"],
        ]);
        let options = DropdownOptions::from_range(&range);

        assert_eq!(options.tool_types, vec!["Injection"]);
        assert_eq!(options.mold_types, vec!["3 Plate", "2 Plate"]);
        assert_eq!(options.gate_types, vec!["Edge", "Submarine"]);
        assert!(options.hot_runner_systems.is_empty());
    }

    #[test]
    fn test_numeric_cells_use_text_form() {
        let mut range = sheet(&[&["Mold type"], &[""]]);
        range.set_value((1, 0), Data::Int(2));

        let options = DropdownOptions::from_range(&range);
        assert_eq!(options.mold_types, vec!["2"]);
    }

    #[test]
    fn test_only_injection_has_a_form() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Tool_CBD.xlsx");

        assert!(form_options("injection", &path, "List").is_ok());

        let err = form_options("hot_stamping", &path, "List").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Hot Stamping form is under development, please check back later"
        );
    }
}
