//! Test utilities for quotation comparison testing
//!
//! This module provides exported quotations from two suppliers used across
//! the comparison test modules.

use crate::app::services::upload::UploadedFile;

mod parser_tests;

/// Helper to create an export as written by the quotation form
pub fn create_quote_export(supplier: &str, design_hrs: &str, total: &str, cavity_cost: &str) -> String {
    format!(
        r#"# Basic Info
Supplier Name,{supplier}
Part Name,Bezel

# Design & Engineering
CAE design Hrs,{design_hrs}
CAE Rate (RMB/Hrs),350
Design Sum,"{total}"
Design Percentage,40%

# Tool Component
组件,Material,Treatment,Qty/Set,Unit Cost(RMB),Total Cost(RMB)
Cavity,S136,Nitriding,2,{cavity_cost},1000
Core,S136,,1,800,800
Tool Component Sum,1800
"#
    )
}

/// Helper to create an upload of an export
pub fn upload(filename: &str, content: String) -> UploadedFile {
    UploadedFile::new(filename, content)
}
