//! Test utilities for quotation CSV parser testing
//!
//! This module provides sample exports and helper functions used across the
//! parser test modules.

use csv::StringRecord;

mod row_tests;
mod stats_tests;

/// Build a tokenized row from cells
pub fn row(cells: &[&str]) -> StringRecord {
    StringRecord::from(cells.to_vec())
}

/// Helper to create a complete quotation export as produced by the team's template
pub fn create_sample_quotation_csv() -> String {
    r#"# Tool CBD export
Tool Type,Injection
Program Name,"X1"
Part Name,"Bezel, Front"
Part Version,B
Supplier Name,Acme Mold
Quotation Date,2024-05-01
CAE design Hrs,12
CAE Rate (RMB/Hrs),350

组件,Material,Treatment
Cavity,S136,Nitriding
Core,S136,
Slider,,Nitriding
STD Components,Misumi
Ejector Components,SKD61,Black oxide
Description,"Spare inserts, packing"
Cost (RMB),1500
LonelyLabel
"#
    .to_string()
}
