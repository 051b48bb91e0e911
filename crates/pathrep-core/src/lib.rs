pub mod aggregate;
pub mod normalize;
pub mod pipeline;

pub use aggregate::{counts_by_category, counts_by_test};
pub use normalize::{Normalized, normalize};
pub use pipeline::{ReportTables, run_pipeline};
