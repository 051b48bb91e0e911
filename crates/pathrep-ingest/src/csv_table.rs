//! CSV reading and required-column extraction.
//!
//! Source exports vary in header spelling ("TestName", "Test Name",
//! "TESTNAME"), so required columns are located by a case- and
//! whitespace-insensitive header fold. Extra columns are ignored.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use tracing::debug;

use pathrep_model::RawRecord;

/// Header fold for the test name column.
const TEST_NAME_KEY: &str = "testname";
/// Header fold for the booking mode column.
const BOOKING_MODE_KEY: &str = "bookingmode";
/// Header fold for the subgroup column.
const SUBGROUP_KEY: &str = "subgroup";

#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn normalize_cell(raw: &str) -> String {
    raw.trim_matches('\u{feff}').trim().to_string()
}

/// Fold a header for matching: lowercase with all whitespace removed.
fn fold_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

/// Read a CSV file into headers plus trimmed rows, skipping blank lines.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }
    let Some((header_row, data_rows)) = raw_rows.split_first() else {
        return Ok(CsvTable {
            headers: Vec::new(),
            rows: Vec::new(),
        });
    };
    let headers = header_row.clone();
    let mut rows = Vec::with_capacity(data_rows.len());
    for record in data_rows {
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            let value = record.get(idx).map(String::as_str).unwrap_or("");
            row.push(normalize_cell(value));
        }
        rows.push(row);
    }
    Ok(CsvTable { headers, rows })
}

/// Locate the three required columns and project the table onto them.
///
/// Fails when a required column is missing entirely; rows with empty values
/// are kept here and dropped later by the normalizer.
pub fn extract_raw_records(table: &CsvTable) -> Result<Vec<RawRecord>> {
    let test_name_idx = find_column(table, TEST_NAME_KEY)?;
    let booking_mode_idx = find_column(table, BOOKING_MODE_KEY)?;
    let subgroup_idx = find_column(table, SUBGROUP_KEY)?;
    let records = table
        .rows
        .iter()
        .map(|row| RawRecord {
            test_name: cell(row, test_name_idx),
            booking_mode: cell(row, booking_mode_idx),
            subgroup: cell(row, subgroup_idx),
        })
        .collect();
    Ok(records)
}

/// Read a CSV file straight into raw records.
pub fn read_raw_records(path: &Path) -> Result<Vec<RawRecord>> {
    let table = read_csv_table(path)?;
    let records = extract_raw_records(&table)
        .with_context(|| format!("resolve columns: {}", path.display()))?;
    debug!(
        source_file = %path.display(),
        row_count = records.len(),
        "source table read"
    );
    Ok(records)
}

fn find_column(table: &CsvTable, key: &str) -> Result<usize> {
    table
        .headers
        .iter()
        .position(|header| fold_header(header) == key)
        .ok_or_else(|| anyhow!("missing required column: {key}"))
}

fn cell(row: &[String], idx: usize) -> String {
    row.get(idx).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_header_ignores_case_and_whitespace() {
        assert_eq!(fold_header(" Test Name "), "testname");
        assert_eq!(fold_header("BOOKINGMODE"), "bookingmode");
        assert_eq!(fold_header("\u{feff}subgroup"), "subgroup");
    }

    #[test]
    fn extract_requires_all_three_columns() {
        let table = CsvTable {
            headers: vec!["TestName".to_string(), "subgroup".to_string()],
            rows: vec![],
        };
        let error = extract_raw_records(&table).unwrap_err();
        assert!(error.to_string().contains("bookingmode"));
    }

    #[test]
    fn extract_ignores_extra_columns() {
        let table = CsvTable {
            headers: vec![
                "Patient".to_string(),
                "Test Name".to_string(),
                "BookingMode".to_string(),
                "SubGroup".to_string(),
            ],
            rows: vec![vec![
                "P-001".to_string(),
                "BLOOD GROUP".to_string(),
                "IPD".to_string(),
                "Routine".to_string(),
            ]],
        };
        let records = extract_raw_records(&table).expect("extract records");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].test_name, "BLOOD GROUP");
        assert_eq!(records[0].booking_mode, "IPD");
        assert_eq!(records[0].subgroup, "Routine");
    }
}
