//! Section parser for exported quotation CSVs
//!
//! Exports written by the quotation form group their rows under `# <name>`
//! section headers. Each section carries free-form fields, a tool component
//! table and the subset of fields that hold totals, sums or percentages.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, trace};

use crate::constants::{
    COMMENT_PREFIX, COMPARISON_COMPONENTS, COMPONENT_HEADER_MARKER, COMPONENT_TABLE_HEADER,
    SUMMARY_KEYWORDS,
};

/// One row of a section's tool component table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentEntry {
    pub component: String,
    pub material: String,
    pub treatment: String,
    pub qty: String,
    pub unit_cost: String,
    pub total_cost: String,
}

impl ComponentEntry {
    /// Value of a component table column by its header text
    pub fn property(&self, property: &str) -> Option<&str> {
        match property {
            "Material" => Some(&self.material),
            "Treatment" => Some(&self.treatment),
            "Qty/Set" => Some(&self.qty),
            "Unit Cost(RMB)" => Some(&self.unit_cost),
            "Total Cost(RMB)" => Some(&self.total_cost),
            _ => None,
        }
    }
}

/// Contents of one `# <name>` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuoteSection {
    /// Every field row, keyed by label
    pub fields: BTreeMap<String, String>,

    /// Component table rows in file order
    pub components: Vec<ComponentEntry>,

    /// Summary fields in first-seen order
    pub summary: Vec<(String, String)>,
}

impl QuoteSection {
    /// First component table row for a component name
    pub fn component(&self, name: &str) -> Option<&ComponentEntry> {
        self.components.iter().find(|c| c.component == name)
    }

    /// Value of a summary field
    pub fn summary_value(&self, label: &str) -> Option<&str> {
        self.summary
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    fn set_summary(&mut self, label: &str, value: &str) {
        match self.summary.iter_mut().find(|(l, _)| l == label) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.summary.push((label.to_string(), value.to_string())),
        }
    }
}

/// A parsed quotation export, sections keyed by name
///
/// Rows that precede the first section header belong to the unnamed
/// section `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedQuote {
    pub sections: BTreeMap<String, QuoteSection>,
}

/// Whether a field label names a total, sum or percentage
pub fn is_summary_label(label: &str) -> bool {
    let lower = label.to_lowercase();
    SUMMARY_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Parse an exported quotation into sections
///
/// Lines are trimmed and blank lines dropped. A repeated section header
/// starts that section afresh.
pub fn parse_quote(content: &str) -> ParsedQuote {
    let mut quote = ParsedQuote::default();
    let mut current = String::new();

    for line in content.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if let Some(name) = line.strip_prefix(COMMENT_PREFIX) {
            current = name.trim().to_string();
            quote.sections.insert(current.clone(), QuoteSection::default());
            continue;
        }

        if line.contains(COMPONENT_TABLE_HEADER) {
            continue;
        }

        let parts = split_line(line);
        if parts.len() < 2 {
            continue;
        }

        let section = quote.sections.entry(current.clone()).or_default();
        apply_line(section, line, &parts);
    }

    debug!("Parsed quotation export into {} sections", quote.sections.len());
    quote
}

fn apply_line(section: &mut QuoteSection, line: &str, parts: &[String]) {
    let key = parts[0].as_str();

    if COMPARISON_COMPONENTS.contains(&key) && parts.len() >= 6 {
        trace!("Component row: {}", key);
        section.components.push(ComponentEntry {
            component: key.to_string(),
            material: parts[1].clone(),
            treatment: parts[2].clone(),
            qty: parts[3].clone(),
            unit_cost: parts[4].clone(),
            total_cost: parts[5].clone(),
        });
        return;
    }

    if key.is_empty() || is_table_header(line) {
        return;
    }

    let value = parts[1..].join(",").trim().to_string();
    if is_summary_label(key) {
        section.set_summary(key, &value);
    }
    section.fields.insert(key.to_string(), value);
}

/// Component table headers, regardless of quoting or letter case
fn is_table_header(line: &str) -> bool {
    let bare = line.replace('"', "");
    let bare = bare.trim().to_lowercase();
    bare.starts_with("material")
        || bare.starts_with(COMPONENT_HEADER_MARKER)
        || bare.contains("material,treatment")
}

/// Split one line into trimmed cells
///
/// A `"` toggles quoting anywhere in the line and is never kept, so a
/// quoted cell may follow spaces after the comma.
pub fn split_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => quoted = !quoted,
            ',' if !quoted => cells.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }
    cells.push(current.trim().to_string());

    cells
}
