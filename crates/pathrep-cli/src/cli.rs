//! CLI argument definitions for the daily report generator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "pathrep",
    version,
    about = "Daily Pathology Report Generator",
    long_about = "Generate the daily pathology summary from a CSV of lab test orders.\n\n\
                  Produces per-test counts split by admission mode and per-category\n\
                  counts from keyword classification, each with a Grand Total row."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate the daily report from a CSV of test orders.
    Report(ReportArgs),

    /// List the category rule table.
    Categories,
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Path to the CSV file with TestName, BookingMode, and subgroup columns.
    #[arg(value_name = "INPUT_CSV")]
    pub input: PathBuf,

    /// Output directory for generated files (default: <INPUT dir>/report).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Consult the external classification oracle for tests no keyword
    /// matches.
    ///
    /// Requires OPENAI_API_KEY. Without this flag (or without the key)
    /// unmatched tests go to the default category.
    #[arg(long = "oracle")]
    pub oracle: bool,

    /// Also export a per-record classification decision log.
    #[arg(long = "decision-log")]
    pub decision_log: bool,

    /// Compute and print the tables without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
