//! Command implementations.

use anyhow::Result;
use comfy_table::Table;
use tracing::warn;

use pathrep_classify::{CategoryRules, OracleConfig};
use pathrep_cli::run::{RunOptions, RunResult, run_report};

use crate::cli::ReportArgs;
use crate::summary::apply_table_style;

pub fn run_report_command(args: &ReportArgs) -> Result<RunResult> {
    let oracle = if args.oracle {
        match std::env::var("OPENAI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Some(OracleConfig::new(key)),
            _ => {
                warn!("--oracle set but OPENAI_API_KEY is missing, continuing without oracle");
                None
            }
        }
    } else {
        None
    };
    run_report(&RunOptions {
        input: args.input.clone(),
        output_dir: args.output_dir.clone(),
        oracle,
        decision_log: args.decision_log,
        dry_run: args.dry_run,
    })
}

pub fn run_categories() -> Result<()> {
    let rules = CategoryRules::standard();
    let mut table = Table::new();
    table.set_header(vec!["Category", "Keywords"]);
    apply_table_style(&mut table);
    for rule in rules.rules() {
        table.add_row(vec![
            rule.category.label().to_string(),
            rule.keywords.join(", "),
        ]);
    }
    println!("{table}");
    println!("Default category: {}", rules.default_category());
    Ok(())
}
