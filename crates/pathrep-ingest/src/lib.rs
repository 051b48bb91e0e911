pub mod csv_table;

pub use csv_table::{CsvTable, extract_raw_records, read_csv_table, read_raw_records};
