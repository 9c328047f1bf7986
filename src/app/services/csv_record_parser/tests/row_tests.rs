//! Tests for row classification and component labels

use super::*;
use crate::app::models::ParsedRecord;
use crate::app::services::csv_record_parser::row::{
    ComponentRow, FieldRow, RowKind, SkipReason, classify_row, component_label,
};

#[test]
fn test_component_labels_capitalize_first_character_only() {
    assert_eq!(component_label("cavity", "Material"), "Cavity Material");
    assert_eq!(
        component_label("std_components", "Material"),
        "Std_components Material"
    );
    assert_eq!(
        component_label("ejector_components", "Treatment"),
        "Ejector_components Treatment"
    );
    assert_eq!(component_label("", "Material"), " Material");
}

#[test]
fn test_classify_skips() {
    assert_eq!(
        classify_row(&row(&[])),
        RowKind::Skipped(SkipReason::Empty)
    );
    assert_eq!(
        classify_row(&row(&["#note", "x"])),
        RowKind::Skipped(SkipReason::Comment)
    );
    assert_eq!(
        classify_row(&row(&["  ", "x"])),
        RowKind::Skipped(SkipReason::BlankOrHeader)
    );
    assert_eq!(
        classify_row(&row(&["组件", "Material", "Treatment"])),
        RowKind::Skipped(SkipReason::BlankOrHeader)
    );
    assert_eq!(
        classify_row(&row(&["Part Name"])),
        RowKind::Skipped(SkipReason::TooShort)
    );
    assert_eq!(
        classify_row(&row(&["Part Name", "  "])),
        RowKind::Skipped(SkipReason::NoValue)
    );
}

#[test]
fn test_classify_component_with_extra_cells() {
    let kind = classify_row(&row(&["Std Components", " Misumi ", " Zinc ", "ignored"]));

    assert_eq!(
        kind,
        RowKind::Component(ComponentRow {
            key: "std_components".to_string(),
            material: "Misumi".to_string(),
            treatment: "Zinc".to_string(),
        })
    );
}

#[test]
fn test_classify_field_rejoins_value_cells() {
    let kind = classify_row(&row(&["Description", "\"foo", " bar\""]));

    assert_eq!(
        kind,
        RowKind::Field(FieldRow {
            label: "Description".to_string(),
            value: "foo, bar".to_string(),
        })
    );
}

#[test]
fn test_component_apply_skips_empty_columns() {
    let component = ComponentRow {
        key: "moldbase".to_string(),
        material: String::new(),
        treatment: "Painted".to_string(),
    };
    let mut record = ParsedRecord::new();
    component.apply(&mut record);

    assert_eq!(record.len(), 1);
    assert_eq!(record["Moldbase Treatment"], "Painted");
    assert_eq!(component.material_label(), "Moldbase Material");
}
