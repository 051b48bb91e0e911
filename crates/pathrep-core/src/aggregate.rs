//! The two aggregate tables of the daily report.

use std::collections::BTreeMap;

use pathrep_model::{
    AdmissionTag, Category, CategoryCountRow, ClassifiedRecord, GRAND_TOTAL_LABEL, Record,
    TestCountRow,
};

/// Per-test counts split by admission mode, Grand Total last.
///
/// Body rows are grouped by verbatim test name and sorted ascending; the
/// trailing Grand Total row holds column-wise sums.
#[must_use]
pub fn counts_by_test(records: &[Record]) -> Vec<TestCountRow> {
    // BTreeMap keys give the lexicographic body order for free.
    let mut groups: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(record.test_name.as_str()).or_insert((0, 0));
        match record.admission {
            AdmissionTag::Inpatient => entry.0 += 1,
            AdmissionTag::OutpatientIndent => entry.1 += 1,
        }
    }
    let mut rows: Vec<TestCountRow> = groups
        .into_iter()
        .map(|(test_name, (inpatient, outpatient))| TestCountRow {
            test_name: test_name.to_string(),
            inpatient,
            outpatient,
            total: inpatient + outpatient,
        })
        .collect();
    let inpatient_total: usize = rows.iter().map(|row| row.inpatient).sum();
    let outpatient_total: usize = rows.iter().map(|row| row.outpatient).sum();
    rows.push(TestCountRow {
        test_name: GRAND_TOTAL_LABEL.to_string(),
        inpatient: inpatient_total,
        outpatient: outpatient_total,
        total: inpatient_total + outpatient_total,
    });
    rows
}

/// Per-category counts in enumeration order, Grand Total last.
///
/// The Grand Total is the number of records processed, which matches the
/// sum of category counts only because classification is total.
#[must_use]
pub fn counts_by_category(classified: &[ClassifiedRecord]) -> Vec<CategoryCountRow> {
    let mut rows: Vec<CategoryCountRow> = Category::ALL
        .into_iter()
        .map(|category| CategoryCountRow {
            category: category.label().to_string(),
            count: classified
                .iter()
                .filter(|record| record.category == category)
                .count(),
        })
        .collect();
    rows.push(CategoryCountRow {
        category: GRAND_TOTAL_LABEL.to_string(),
        count: classified.len(),
    });
    rows
}
