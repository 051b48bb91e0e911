//! Aggregate table rows produced by the report pipeline.

use serde::{Deserialize, Serialize};

/// Label used for the synthetic totals row in both tables.
pub const GRAND_TOTAL_LABEL: &str = "Grand Total";

/// One row of the per-test table: counts split by admission mode.
///
/// The last row of the table is a synthetic [`GRAND_TOTAL_LABEL`] row whose
/// counts are column sums over the body rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCountRow {
    pub test_name: String,
    pub inpatient: usize,
    pub outpatient: usize,
    pub total: usize,
}

impl TestCountRow {
    #[must_use]
    pub fn is_grand_total(&self) -> bool {
        self.test_name == GRAND_TOTAL_LABEL
    }
}

/// One row of the per-category table.
///
/// `category` is a display label so the [`GRAND_TOTAL_LABEL`] row fits the
/// same shape as the category rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCountRow {
    pub category: String,
    pub count: usize,
}

impl CategoryCountRow {
    #[must_use]
    pub fn is_grand_total(&self) -> bool {
        self.category == GRAND_TOTAL_LABEL
    }
}
