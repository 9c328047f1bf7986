//! Label to form key mapping for parsed quotation records
//!
//! The table is built once on first use from the literal entries below plus
//! the Material/Treatment pairs derived for every tool component, and is
//! read-only afterwards.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;
use tracing::debug;

use super::csv_record_parser::component_label;
use crate::app::models::ParsedRecord;
use crate::constants::{COMPONENT_NAMES, MATERIAL_SUFFIX, TREATMENT_SUFFIX};

/// Literal label to key entries, grouped by form section
const LITERAL_ENTRIES: &[(&str, &str)] = &[
    // Basic info
    ("Tool Type", "tool_type"),
    ("Program Name", "program_name"),
    ("Part Name", "part_name"),
    ("Part Number", "part_num"),
    ("Part Version", "part_version"),
    ("Supplier Name", "supplier_name"),
    ("Quotation Date", "quotation_date"),
    ("Part Raw Material", "part_raw_material"),
    ("Resin Type", "resin_type"),
    ("Resin Manufacturer", "resin_manufacturer"),
    ("Resin Grade", "resin_grade"),
    ("Moldbase size(L)/cm", "moldbase_l"),
    ("Moldbase size(W)/cm", "moldbase_w"),
    ("Moldbase size(H)/cm", "moldbase_h"),
    ("Injection System", "injection_system"),
    ("Mold Type", "mold_type"),
    ("Hot Runner System", "hot_runner_system"),
    ("Hot Runner Gate Type", "hot_runner_gate_type"),
    ("Cold runner System", "cold_runner_system"),
    ("Gate Type", "gate_type"),
    // Design & engineering
    ("CAE design Hrs", "cae_design_hrs"),
    ("CAE Rate (RMB/Hrs)", "cae_rate"),
    ("Tool design Hrs", "tool_design_hrs"),
    ("Tool design Rate (RMB/Hrs)", "tool_design_rate"),
    // Hot runner
    ("Supplier", "hr_supplier"),
    ("Hot Drop Qty", "hr_qty"),
    ("Drop Pitch (X)/mm", "hr_pitch_x"),
    ("Drop Pitch (Y)/mm", "hr_pitch_y"),
    ("HR Cost (RMB)", "hr_cost"),
    // Assembly & fitting
    ("Tool Maker Qty", "tool_maker_qty"),
    ("Tool Assy Hrs", "tool_assy_hrs"),
    ("Assy Working Rate/hr (RMB)", "assy_rate"),
    // Molding trial
    ("Labor: Trial Pers", "trial_pers"),
    ("Labor: Trial Rate (RMB/Hrs)", "trial_rate"),
    ("Labor: Trial Hrs", "trial_hrs_labor"),
    ("Machine: Machines Used", "machine_qty"),
    ("Machine: Machine Rate (RMB/Hrs)", "machine_rate"),
    ("Machine: Trial Hrs", "trial_hrs_machine"),
    // Others & profit
    ("Description", "others_description"),
    ("Cost (RMB)", "others_cost"),
    ("Profit Cost (RMB)", "profit_cost"),
];

static FIELD_MAPPING: LazyLock<HashMap<String, String>> = LazyLock::new(|| {
    let mut mapping: HashMap<String, String> = LITERAL_ENTRIES
        .iter()
        .map(|(label, key)| (label.to_string(), key.to_string()))
        .collect();

    for name in COMPONENT_NAMES {
        let component_key = name.replace(' ', "_");
        mapping.insert(
            component_label(&component_key, MATERIAL_SUFFIX),
            format!("{}_material", component_key),
        );
        mapping.insert(
            component_label(&component_key, TREATMENT_SUFFIX),
            format!("{}_treatment", component_key),
        );
    }

    debug!("Field mapping table built with {} entries", mapping.len());
    mapping
});

/// Parsed record split into form keys and labels the table does not know
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MappedRecord {
    /// Form key to value
    pub mapped: BTreeMap<String, String>,

    /// Unknown label to value, passed through for the caller to decide on
    pub unmapped: BTreeMap<String, String>,
}

/// The full label to key table
pub fn field_mapping() -> &'static HashMap<String, String> {
    &FIELD_MAPPING
}

/// Form key for a label, if the label is known
pub fn lookup(label: &str) -> Option<&'static str> {
    FIELD_MAPPING.get(label).map(String::as_str)
}

/// Translate a parsed record into form keys
pub fn map_record(record: &ParsedRecord) -> MappedRecord {
    let mut result = MappedRecord::default();

    for (label, value) in record {
        match lookup(label) {
            Some(key) => {
                result.mapped.insert(key.to_string(), value.clone());
            }
            None => {
                debug!("No form key for label '{}'", label);
                result.unmapped.insert(label.clone(), value.clone());
            }
        }
    }

    result
}
