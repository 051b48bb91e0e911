//! CSV export of the daily report tables.
//!
//! The core hands over two aggregate tables plus the decision log; this
//! module renders them as plain CSV files. Cell styling, colors, and column
//! widths belong to whatever opens the files, not to this crate.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use csv::WriterBuilder;
use tracing::info;

use pathrep_core::ReportTables;
use pathrep_model::{CategoryCountRow, ClassifiedRecord, TestCountRow};

/// File name for the per-test table.
const TEST_COUNTS_FILE: &str = "test_counts.csv";
/// File name for the per-category table.
const CATEGORY_COUNTS_FILE: &str = "category_counts.csv";
/// File name for the opt-in classification decision log.
const DECISIONS_FILE: &str = "decisions.csv";

/// Export configuration.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Also write the per-record classification decision log.
    pub decision_log: bool,
    /// Date stamped in the trailer; today when `None`.
    pub generated_on: Option<NaiveDate>,
}

/// Write the report tables under `dir`, returning the written paths.
pub fn write_report_csv(
    dir: &Path,
    tables: &ReportTables,
    options: &ExportOptions,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output dir: {}", dir.display()))?;
    let generated_on = options
        .generated_on
        .unwrap_or_else(|| Local::now().date_naive());
    let trailer = format!("Generated on: {}", generated_on.format("%d-%m-%Y"));

    let mut written = Vec::new();

    let test_path = dir.join(TEST_COUNTS_FILE);
    write_test_counts(&test_path, &tables.test_counts, &trailer)
        .with_context(|| format!("write {}", test_path.display()))?;
    written.push(test_path);

    let category_path = dir.join(CATEGORY_COUNTS_FILE);
    write_category_counts(&category_path, &tables.category_counts, &trailer)
        .with_context(|| format!("write {}", category_path.display()))?;
    written.push(category_path);

    if options.decision_log {
        let decisions_path = dir.join(DECISIONS_FILE);
        write_decisions(&decisions_path, &tables.decisions)
            .with_context(|| format!("write {}", decisions_path.display()))?;
        written.push(decisions_path);
    }

    info!(
        output_dir = %dir.display(),
        file_count = written.len(),
        "report export complete"
    );
    Ok(written)
}

fn write_test_counts(path: &Path, rows: &[TestCountRow], trailer: &str) -> Result<()> {
    // Flexible: the trailer row has a single field.
    let mut writer = WriterBuilder::new().flexible(true).from_path(path)?;
    writer.write_record(["TestName", "IPD", "OPD", "Total"])?;
    for row in rows {
        writer.write_record([
            row.test_name.as_str(),
            &row.inpatient.to_string(),
            &row.outpatient.to_string(),
            &row.total.to_string(),
        ])?;
    }
    writer.write_record([trailer])?;
    writer.flush()?;
    Ok(())
}

fn write_category_counts(path: &Path, rows: &[CategoryCountRow], trailer: &str) -> Result<()> {
    let mut writer = WriterBuilder::new().flexible(true).from_path(path)?;
    writer.write_record(["Category", "Count"])?;
    for row in rows {
        writer.write_record([row.category.as_str(), &row.count.to_string()])?;
    }
    writer.write_record([trailer])?;
    writer.flush()?;
    Ok(())
}

fn write_decisions(path: &Path, decisions: &[ClassifiedRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new().from_path(path)?;
    writer.write_record(["TestName", "Subgroup", "Admission", "Category", "Source"])?;
    for decision in decisions {
        writer.write_record([
            decision.record.test_name.as_str(),
            decision.record.subgroup.as_str(),
            decision.record.admission.label(),
            decision.category.label(),
            decision.source.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
