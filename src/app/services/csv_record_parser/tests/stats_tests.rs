//! Tests for parsing statistics functionality

use super::*;
use crate::app::services::csv_record_parser::{CsvRecordParser, ParseStats};

#[test]
fn test_parse_stats_empty() {
    let stats = ParseStats::new();

    assert_eq!(stats.total_rows, 0);
    assert_eq!(stats.rows_skipped(), 0);
}

#[test]
fn test_parse_stats_for_sample_export() {
    let result = CsvRecordParser::new()
        .parse_content(&create_sample_quotation_csv())
        .unwrap();
    let stats = result.stats;

    // Blank lines never reach the classifier
    assert_eq!(stats.total_rows, 18);
    assert_eq!(stats.comment_rows, 1);
    assert_eq!(stats.blank_or_header_rows, 1);
    assert_eq!(stats.component_rows, 5);
    assert_eq!(stats.field_rows, 10);
    assert_eq!(stats.short_rows, 1);
    assert_eq!(stats.empty_value_rows, 0);
    assert_eq!(stats.rows_skipped(), 3);
}

#[test]
fn test_stats_do_not_change_record() {
    let with_noise = "# header\nA,1\n,orphan\nB\nC,\"\"\n";
    let result = CsvRecordParser::new().parse_content(with_noise).unwrap();

    assert_eq!(result.record.len(), 1);
    assert_eq!(result.stats.field_rows, 1);
    assert_eq!(result.stats.comment_rows, 1);
    assert_eq!(result.stats.blank_or_header_rows, 1);
    assert_eq!(result.stats.short_rows, 1);
    assert_eq!(result.stats.empty_value_rows, 1);
}
