//! End-to-end report pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Normalize**: trim fields, derive admission tags, drop incomplete rows
//! 2. **Classify**: match the static keyword rule table
//! 3. **Resolve**: one oracle attempt for the unresolved batch, then defaults
//! 4. **Aggregate**: per-test and per-category count tables
//!
//! One run processes one record set start to finish, single-threaded, on its
//! own copy of the input. The only external call is the oracle's, and its
//! failures never escape the resolve stage.

use std::collections::BTreeSet;
use std::time::Instant;

use tracing::{info, info_span};

use pathrep_classify::{CategoryOracle, CategoryRules, TestKey, resolve};
use pathrep_model::{
    CategoryCountRow, ClassificationSource, ClassifiedRecord, RawRecord, TestCountRow,
};

use crate::aggregate::{counts_by_category, counts_by_test};
use crate::normalize::normalize;

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct ReportTables {
    pub test_counts: Vec<TestCountRow>,
    pub category_counts: Vec<CategoryCountRow>,
    /// Per-record classification decisions, in input order.
    pub decisions: Vec<ClassifiedRecord>,
    /// Rows dropped during normalization.
    pub dropped: usize,
}

/// Run the full pipeline over one raw record set.
///
/// Deterministic for a given input, rule table, and oracle behavior; a
/// second run over the same input yields identical tables.
#[must_use]
pub fn run_pipeline(
    raw: &[RawRecord],
    rules: &CategoryRules,
    oracle: &dyn CategoryOracle,
) -> ReportTables {
    let run_start = Instant::now();

    let normalized = info_span!("normalize").in_scope(|| {
        let start = Instant::now();
        let normalized = normalize(raw);
        info!(
            input_rows = raw.len(),
            record_count = normalized.records.len(),
            dropped = normalized.dropped,
            duration_ms = start.elapsed().as_millis(),
            "normalization complete"
        );
        normalized
    });

    // Rule pass: assign what the keyword table can, collect the rest.
    let (rule_decisions, unresolved) = info_span!("classify").in_scope(|| {
        let start = Instant::now();
        let mut decisions: Vec<Option<ClassifiedRecord>> =
            Vec::with_capacity(normalized.records.len());
        let mut unresolved_keys: BTreeSet<TestKey> = BTreeSet::new();
        for record in &normalized.records {
            match rules.classify(record) {
                Some(category) => decisions.push(Some(ClassifiedRecord {
                    record: record.clone(),
                    category,
                    source: ClassificationSource::Rule,
                })),
                None => {
                    unresolved_keys.insert(TestKey::for_record(record));
                    decisions.push(None);
                }
            }
        }
        info!(
            record_count = normalized.records.len(),
            rule_resolved = decisions.iter().filter(|d| d.is_some()).count(),
            unresolved = unresolved_keys.len(),
            duration_ms = start.elapsed().as_millis(),
            "rule classification complete"
        );
        (decisions, unresolved_keys)
    });

    let resolved = info_span!("resolve").in_scope(|| {
        let batch: Vec<TestKey> = unresolved.into_iter().collect();
        resolve(&batch, oracle, rules)
    });

    // Fill the gaps; resolution is total, so every record ends classified.
    let mut decisions = Vec::with_capacity(normalized.records.len());
    for (record, decision) in normalized.records.iter().zip(rule_decisions) {
        match decision {
            Some(classified) => decisions.push(classified),
            None => {
                let key = TestKey::for_record(record);
                let (category, source) = resolved
                    .get(&key)
                    .copied()
                    .unwrap_or((rules.default_category(), ClassificationSource::Default));
                decisions.push(ClassifiedRecord {
                    record: record.clone(),
                    category,
                    source,
                });
            }
        }
    }

    let (test_counts, category_counts) = info_span!("aggregate").in_scope(|| {
        let start = Instant::now();
        let test_counts = counts_by_test(&normalized.records);
        let category_counts = counts_by_category(&decisions);
        info!(
            test_rows = test_counts.len(),
            category_rows = category_counts.len(),
            duration_ms = start.elapsed().as_millis(),
            "aggregation complete"
        );
        (test_counts, category_counts)
    });

    info!(
        record_count = normalized.records.len(),
        dropped = normalized.dropped,
        duration_ms = run_start.elapsed().as_millis(),
        "report pipeline complete"
    );

    ReportTables {
        test_counts,
        category_counts,
        decisions,
        dropped: normalized.dropped,
    }
}
