//! Application constants for Tool CBD
//!
//! This module contains the fixed vocabularies, markers, default values
//! and file names used throughout the quotation tool.

// =============================================================================
// CSV Upload Vocabulary
// =============================================================================

/// Tool component names recognized in the first cell of a row (lower-case)
pub const COMPONENT_NAMES: &[&str] = &[
    "cavity",
    "core",
    "slider",
    "lifter",
    "insert",
    "others",
    "moldbase",
    "std components",
    "ejector components",
];

/// Header label of the tool component table ("component")
pub const COMPONENT_HEADER_MARKER: &str = "组件";

/// Prefix marking a comment row
pub const COMMENT_PREFIX: char = '#';

/// Field delimiter of uploaded CSV files
pub const CSV_DELIMITER: u8 = b',';

/// Accepted upload file extension (compared case-insensitively)
pub const CSV_EXTENSION: &str = ".csv";

/// Suffix of the per-component material label
pub const MATERIAL_SUFFIX: &str = "Material";

/// Suffix of the per-component treatment label
pub const TREATMENT_SUFFIX: &str = "Treatment";

/// Byte-order mark some spreadsheet exports prepend to UTF-8 files
pub const UTF8_BOM: char = '\u{feff}';

// =============================================================================
// Quotation Storage
// =============================================================================

/// Form fields that together identify a quotation, in reporting order
pub const REQUIRED_FIELDS: [&str; 6] = [
    "tool_type",
    "program_name",
    "part_name",
    "part_version",
    "quotation_date",
    "supplier_name",
];

/// Name of the quotation table
pub const QUOTATION_TABLE: &str = "tool_cost";

/// Reported after a quotation is stored
pub const SAVED_MESSAGE: &str = "Saved successfully";

/// Reported when a lookup does not name all six key fields
pub const INCOMPLETE_KEY_MESSAGE: &str = "All six key fields must be provided";

// =============================================================================
// Cost Breakdown
// =============================================================================

/// Form keys feeding the cost breakdown
pub mod cost_fields {
    pub const CAE_DESIGN_HRS: &str = "cae_design_hrs";
    pub const CAE_RATE: &str = "cae_rate";
    pub const TOOL_DESIGN_HRS: &str = "tool_design_hrs";
    pub const TOOL_DESIGN_RATE: &str = "tool_design_rate";
    pub const HR_COST: &str = "hr_cost";
    pub const TOOL_MAKER_QTY: &str = "tool_maker_qty";
    pub const TOOL_ASSY_HRS: &str = "tool_assy_hrs";
    pub const ASSY_RATE: &str = "assy_rate";
    pub const TRIAL_PERS: &str = "trial_pers";
    pub const TRIAL_RATE: &str = "trial_rate";
    pub const TRIAL_HRS_LABOR: &str = "trial_hrs_labor";
    pub const MACHINE_QTY: &str = "machine_qty";
    pub const MACHINE_RATE: &str = "machine_rate";
    pub const TRIAL_HRS_MACHINE: &str = "trial_hrs_machine";
    pub const OTHERS_COST: &str = "others_cost";
    pub const PROFIT_COST: &str = "profit_cost";
}

// =============================================================================
// Quotation Comparison
// =============================================================================

/// Maximum number of quotation files compared at once
pub const MAX_COMPARISON_FILES: usize = 5;

/// Minimum number of quotation files needed for a comparison
pub const MIN_COMPARISON_FILES: usize = 2;

/// Header row of the component table in exported quotations
pub const COMPONENT_TABLE_HEADER: &str =
    "组件,Material,Treatment,Qty/Set,Unit Cost(RMB),Total Cost(RMB)";

/// Component names as written in exported quotations (case-sensitive)
pub const COMPARISON_COMPONENTS: &[&str] = &[
    "Cavity",
    "Core",
    "Slider",
    "Lifter",
    "Insert",
    "Others",
    "Moldbase",
    "Std components",
    "Ejector components",
];

/// Component table columns, in display order
pub const COMPONENT_PROPERTIES: &[&str] = &[
    "Material",
    "Treatment",
    "Qty/Set",
    "Unit Cost(RMB)",
    "Total Cost(RMB)",
];

/// Label fragments marking a field as a summary figure (lower-case)
pub const SUMMARY_KEYWORDS: &[&str] = &["total", "sum", "percentage"];

/// Label fragments marking a field as numeric (lower-case)
pub const NUMERIC_KEYWORDS: &[&str] = &[
    "cost",
    "rate",
    "hrs",
    "hours",
    "qty",
    "quantity",
    "pitch",
    "size",
    "total",
    "sum",
    "percentage",
    "price",
    "amount",
    "value",
    "weight",
    "time",
    "days",
    "weeks",
    "months",
];

// =============================================================================
// Reference Workbook
// =============================================================================

/// Tool types that have a quotation form
pub const SUPPORTED_TOOL_TYPES: &[&str] = &["injection"];

/// Dropdown columns read from the list sheet
pub mod dropdown_columns {
    pub const TOOL_TYPE: &str = "Tool type";
    pub const INJECTION_SYSTEM: &str = "Injection system";
    pub const MOLD_TYPE: &str = "Mold type";
    pub const HOT_RUNNER_SYSTEM: &str = "Hot runner system";
    pub const COLD_RUNNER_SYSTEM: &str = "Cold runner system";
    pub const GATE_TYPE: &str = "Gate type";
    pub const HOT_RUNNER_GATE_TYPE: &str = "Hot runner gate type";
}

/// Demo dropdown values used when no reference workbook is available
pub mod fallback_dropdowns {
    pub const TOOL_TYPES: &[&str] = &["Injection"];
    pub const INJECTION_SYSTEMS: &[&str] = &["Hot Runner", "Cold Runner"];
    pub const MOLD_TYPES: &[&str] = &["2 Plate", "3 Plate"];
    pub const HOT_RUNNER_SYSTEMS: &[&str] = &["Synventive", "Husky"];
    pub const COLD_RUNNER_SYSTEMS: &[&str] = &["Standard"];
    pub const GATE_TYPES: &[&str] = &["Edge", "Submarine"];
    pub const HOT_RUNNER_GATE_TYPES: &[&str] = &["Direct"];
}

// =============================================================================
// Configuration Defaults
// =============================================================================

/// Default directory holding the database and reference workbook
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default SQLite database file name
pub const DEFAULT_DATABASE_FILE: &str = "tool_cost.db";

/// Default reference workbook file name
pub const DEFAULT_WORKBOOK_FILE: &str = "Tool_CBD.xlsx";

/// Default sheet holding the dropdown lists
pub const DEFAULT_LIST_SHEET: &str = "List";

/// Default upload ceiling in bytes (16 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "TOOL_CBD_";

/// Application directory name under the user's config directory
pub const APP_CONFIG_DIR: &str = "tool-cbd";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";
