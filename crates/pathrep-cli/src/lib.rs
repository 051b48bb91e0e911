//! CLI library components for the daily report generator.

pub mod logging;
pub mod run;
