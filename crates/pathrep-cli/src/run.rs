//! End-to-end report run: ingest, pipeline, export.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info_span, warn};

use pathrep_classify::{CategoryOracle, CategoryRules, ChatOracle, NoopOracle, OracleConfig};
use pathrep_core::{ReportTables, run_pipeline};
use pathrep_ingest::read_raw_records;
use pathrep_report::{ExportOptions, write_report_csv};

/// One report run as requested by the caller.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Source CSV with the test orders.
    pub input: PathBuf,
    /// Output directory (default: `<input dir>/report`).
    pub output_dir: Option<PathBuf>,
    /// Oracle configuration; `None` disables the oracle entirely.
    pub oracle: Option<OracleConfig>,
    /// Also export the per-record decision log.
    pub decision_log: bool,
    /// Compute tables but write nothing.
    pub dry_run: bool,
}

/// Outcome of a report run.
#[derive(Debug)]
pub struct RunResult {
    pub tables: ReportTables,
    pub written: Vec<PathBuf>,
    pub output_dir: PathBuf,
}

/// Run the full report: read the source table, classify and aggregate,
/// export the CSV outputs.
pub fn run_report(options: &RunOptions) -> Result<RunResult> {
    let run_span = info_span!("report", input = %options.input.display());
    let _run_guard = run_span.enter();

    let raw = read_raw_records(&options.input)
        .with_context(|| format!("ingest {}", options.input.display()))?;

    let rules = CategoryRules::standard();
    let oracle: Box<dyn CategoryOracle> = match &options.oracle {
        Some(config) => match ChatOracle::new(config.clone()) {
            Ok(client) => Box::new(client),
            Err(error) => {
                warn!(
                    error = %error,
                    "oracle client could not be built, continuing without it"
                );
                Box::new(NoopOracle)
            }
        },
        None => Box::new(NoopOracle),
    };
    let tables = run_pipeline(&raw, &rules, oracle.as_ref());

    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&options.input));
    let written = if options.dry_run {
        Vec::new()
    } else {
        write_report_csv(
            &output_dir,
            &tables,
            &ExportOptions {
                decision_log: options.decision_log,
                generated_on: None,
            },
        )
        .context("export report")?
    };

    Ok(RunResult {
        tables,
        written,
        output_dir,
    })
}

fn default_output_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        .join("report")
}
