//! File-backed ingestion tests.

use std::fs;

use pathrep_ingest::{read_csv_table, read_raw_records};
use tempfile::tempdir;

#[test]
fn reads_records_with_mixed_header_spelling() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("orders.csv");
    fs::write(
        &path,
        "Test Name,BOOKING MODE,subgroup\n\
         COMPLETE BLOOD COUNTS [CBC],IPD,Routine\n\
         Serum IGE,OPD,Allergy\n",
    )
    .expect("write csv");

    let records = read_raw_records(&path).expect("read records");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].test_name, "COMPLETE BLOOD COUNTS [CBC]");
    assert_eq!(records[1].booking_mode, "OPD");
    assert_eq!(records[1].subgroup, "Allergy");
}

#[test]
fn skips_blank_lines_and_trims_cells() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("orders.csv");
    fs::write(
        &path,
        "TestName,BookingMode,subgroup\n\
         ,,\n\
         \u{feff} BLOOD UREA ,  ipd , Routine \n",
    )
    .expect("write csv");

    let records = read_raw_records(&path).expect("read records");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].test_name, "BLOOD UREA");
    assert_eq!(records[0].booking_mode, "ipd");
}

#[test]
fn missing_required_column_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("orders.csv");
    fs::write(&path, "TestName,subgroup\nCBC,Routine\n").expect("write csv");

    let error = read_raw_records(&path).unwrap_err();
    assert!(format!("{error:#}").contains("bookingmode"));
}

#[test]
fn empty_file_yields_empty_table() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("orders.csv");
    fs::write(&path, "").expect("write csv");

    let table = read_csv_table(&path).expect("read table");
    assert!(table.headers.is_empty());
    assert!(table.rows.is_empty());
}
