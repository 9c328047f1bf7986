//! Tests for splitting exported quotations into sections

use super::*;
use crate::app::services::quote_comparison::parser::{is_summary_label, split_line};
use crate::app::services::quote_comparison::parse_quote;

#[test]
fn test_sections_keyed_by_header() {
    let quote = parse_quote(&create_quote_export("Acme", "12", "4,200", "500"));

    let names: Vec<&str> = quote.sections.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Basic Info", "Design & Engineering", "Tool Component"]);

    let basic = &quote.sections["Basic Info"];
    assert_eq!(basic.fields["Supplier Name"], "Acme");
    assert!(basic.summary.is_empty());
    assert!(basic.components.is_empty());
}

#[test]
fn test_quoted_values_keep_commas() {
    let quote = parse_quote(&create_quote_export("Acme", "12", "4,200", "500"));

    let design = &quote.sections["Design & Engineering"];
    assert_eq!(design.fields["Design Sum"], "4,200");
    assert_eq!(design.summary_value("Design Sum"), Some("4,200"));
}

#[test]
fn test_summary_fields_grouped_in_file_order() {
    let quote = parse_quote(&create_quote_export("Acme", "12", "4200", "500"));

    let design = &quote.sections["Design & Engineering"];
    let labels: Vec<&str> = design.summary.iter().map(|(l, _)| l.as_str()).collect();
    assert_eq!(labels, vec!["Design Sum", "Design Percentage"]);

    // Summary figures stay in the field map too
    assert_eq!(design.fields.len(), 4);
}

#[test]
fn test_component_table_rows() {
    let quote = parse_quote(&create_quote_export("Acme", "12", "4200", "500"));

    let tool = &quote.sections["Tool Component"];
    assert_eq!(tool.components.len(), 2);

    let cavity = tool.component("Cavity").unwrap();
    assert_eq!(cavity.material, "S136");
    assert_eq!(cavity.treatment, "Nitriding");
    assert_eq!(cavity.qty, "2");
    assert_eq!(cavity.unit_cost, "500");
    assert_eq!(cavity.total_cost, "1000");
    assert_eq!(tool.component("Core").unwrap().treatment, "");

    // The header row is not a field
    assert!(!tool.fields.contains_key("组件"));
    assert_eq!(tool.summary_value("Tool Component Sum"), Some("1800"));
}

#[test]
fn test_component_names_are_case_sensitive() {
    let quote = parse_quote("# T\ncavity,S136,Nitriding,2,500,1000\n");

    let section = &quote.sections["T"];
    assert!(section.components.is_empty());
    assert_eq!(section.fields["cavity"], "S136,Nitriding,2,500,1000");
}

#[test]
fn test_short_component_row_is_a_field() {
    let quote = parse_quote("# T\nCavity,S136\n");

    let section = &quote.sections["T"];
    assert!(section.components.is_empty());
    assert_eq!(section.fields["Cavity"], "S136");
}

#[test]
fn test_table_headers_and_blank_keys_skipped() {
    let quote = parse_quote("# T\n\"Material\",\"Treatment\"\n组件,x\n,orphan\nKey,Value\n");

    let section = &quote.sections["T"];
    assert_eq!(section.fields.len(), 1);
    assert_eq!(section.fields["Key"], "Value");
    assert!(!section.fields.contains_key("Material"));
}

#[test]
fn test_single_cell_lines_ignored() {
    let quote = parse_quote("# T\nLonelyLabel\nKey,Value\n");
    assert_eq!(quote.sections["T"].fields.len(), 1);
}

#[test]
fn test_rows_before_first_header_use_unnamed_section() {
    let quote = parse_quote("Supplier Name,Acme\n# Named\nKey,Value\n");

    assert_eq!(quote.sections[""].fields["Supplier Name"], "Acme");
    assert_eq!(quote.sections["Named"].fields["Key"], "Value");
}

#[test]
fn test_repeated_header_restarts_section() {
    let quote = parse_quote("# T\nOld,1\n# T\nNew,2\n");

    let section = &quote.sections["T"];
    assert!(!section.fields.contains_key("Old"));
    assert_eq!(section.fields["New"], "2");
}

#[test]
fn test_split_line_strips_quotes_and_spaces() {
    assert_eq!(split_line(" a , \"b, c\" ,d"), vec!["a", "b, c", "d"]);
    assert_eq!(split_line("\"Tool\"\"s\",x"), vec!["Tools", "x"]);
}

#[test]
fn test_summary_labels() {
    assert!(is_summary_label("Tool Total Cost"));
    assert!(is_summary_label("Design SUM"));
    assert!(is_summary_label("Profit Percentage"));
    assert!(!is_summary_label("CAE Rate (RMB/Hrs)"));
}
