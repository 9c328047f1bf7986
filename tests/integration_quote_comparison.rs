//! Integration tests for comparing supplier quotations
//!
//! These tests write exports from several suppliers to disk, compare them
//! and export the comparison, the way a buyer would before awarding a tool.

use tool_cbd::app::services::quote_comparison::{Highlight, compare_uploads};
use tool_cbd::app::services::upload::{UploadLimits, UploadedFile};

fn export(supplier: &str, hr_cost: &str, total: &str) -> String {
    format!(
        "\
# Basic Info
Supplier Name,{supplier}
Lead Time (weeks),8

# Hot Runner
HR Cost (RMB),\"{hr_cost}\"
Hot Runner Percentage,20%

# Tool Total
Tool Total Cost,{total}
"
    )
}

async fn write_and_load(dir: &std::path::Path, name: &str, content: String) -> UploadedFile {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    UploadedFile::from_path(&path).await.unwrap()
}

/// Test three suppliers compared and exported from disk
///
/// Purpose: Validate selection, section tables and export end to end
/// Benefit: Catches drift between the comparison rows and the export layout
#[tokio::test]
async fn test_three_suppliers_compared_and_exported() {
    let dir = tempfile::tempdir().unwrap();
    let files = vec![
        write_and_load(dir.path(), "acme.csv", export("Acme", "12,000", "60000")).await,
        write_and_load(dir.path(), "brio.csv", export("Brio", "9,500", "52000")).await,
        write_and_load(dir.path(), "cora.csv", export("Cora", "11,000", "58000")).await,
        write_and_load(dir.path(), "notes.txt", "not a quotation".to_string()).await,
    ];

    let comparison = compare_uploads(files, &UploadLimits::default()).unwrap();
    assert_eq!(comparison.files, vec!["acme.csv", "brio.csv", "cora.csv"]);

    let hot_runner = comparison.section("Hot Runner").unwrap();
    let hr_cost = hot_runner.row("HR Cost (RMB)").unwrap();
    let marks: Vec<Option<Highlight>> = hr_cost.cells.iter().map(|c| c.highlight).collect();
    assert_eq!(marks, vec![Some(Highlight::Max), Some(Highlight::Min), None]);

    let total = comparison.section("Tool Total").unwrap().row("Tool Total Cost").unwrap();
    assert_eq!(total.cells[1].value.as_deref(), Some("52000"));

    let exported = comparison.to_csv().unwrap();
    assert!(exported.contains("\n# Hot Runner\nField,acme.csv,brio.csv,cora.csv\n"));
    assert!(exported.contains("Hot Runner Percentage,20%,20%,20%\n"));
    assert!(exported.contains("HR Cost (RMB),\"12,000\",\"9,500\",\"11,000\"\n"));
    assert!(exported.contains("Lead Time (weeks),8,8,8\n"));
}

/// Test that one supplier's export alone cannot be compared
///
/// Purpose: Validate the two-file minimum after duplicate names are dropped
/// Benefit: Prevents a one-column comparison that hides nothing
#[tokio::test]
async fn test_same_export_twice_is_not_a_comparison() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_and_load(dir.path(), "acme.csv", export("Acme", "1", "2")).await;
    let again = first.clone();

    let err = compare_uploads(vec![first, again], &UploadLimits::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Data validation error: Please upload at least 2 CSV files to compare"
    );
}
