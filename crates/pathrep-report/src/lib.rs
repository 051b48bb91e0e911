pub mod csv_export;

pub use csv_export::{ExportOptions, write_report_csv};
