//! Pipeline-level behavior and aggregation invariants.

use pathrep_classify::{CategoryRule, CategoryRules, NoopOracle};
use pathrep_core::run_pipeline;
use pathrep_model::{Category, ClassificationSource, GRAND_TOTAL_LABEL, RawRecord};
use proptest::prelude::{ProptestConfig, Strategy, prop, proptest};

fn raw(test_name: &str, booking_mode: &str, subgroup: &str) -> RawRecord {
    RawRecord {
        test_name: test_name.to_string(),
        booking_mode: booking_mode.to_string(),
        subgroup: subgroup.to_string(),
    }
}

/// Small rule table where the short "CBC" spelling is itself a keyword.
fn short_name_rules() -> CategoryRules {
    CategoryRules::new(
        vec![
            CategoryRule {
                category: Category::Biochemistry,
                keywords: vec!["BLOOD UREA".to_string()],
            },
            CategoryRule {
                category: Category::Clinical,
                keywords: vec!["URINE ANALYSIS".to_string()],
            },
            CategoryRule {
                category: Category::Hematology,
                keywords: vec!["CBC".to_string()],
            },
            CategoryRule {
                category: Category::Immunology,
                keywords: vec!["Serum IGE".to_string()],
            },
        ],
        Category::Biochemistry,
    )
}

#[test]
fn worked_example_matches_expected_tables() {
    let rows = vec![
        raw("CBC", "IPD", "Routine"),
        raw("CBC", "OPD", "Routine"),
        raw("Serum IGE", "IPD", "Allergy"),
    ];
    let tables = run_pipeline(&rows, &short_name_rules(), &NoopOracle);

    let test_rows: Vec<(String, usize, usize, usize)> = tables
        .test_counts
        .iter()
        .map(|row| {
            (
                row.test_name.clone(),
                row.inpatient,
                row.outpatient,
                row.total,
            )
        })
        .collect();
    assert_eq!(
        test_rows,
        vec![
            ("CBC".to_string(), 1, 1, 2),
            ("Serum IGE".to_string(), 1, 0, 1),
            (GRAND_TOTAL_LABEL.to_string(), 2, 1, 3),
        ]
    );

    let category_rows: Vec<(String, usize)> = tables
        .category_counts
        .iter()
        .map(|row| (row.category.clone(), row.count))
        .collect();
    assert_eq!(
        category_rows,
        vec![
            ("Biochemistry".to_string(), 0),
            ("Clinical".to_string(), 0),
            ("Hematology".to_string(), 2),
            ("Immunology".to_string(), 1),
            (GRAND_TOTAL_LABEL.to_string(), 3),
        ]
    );
}

#[test]
fn keyword_classified_example_fills_hematology() {
    let rows = vec![
        raw("COMPLETE BLOOD COUNTS [CBC]", "IPD", "Routine"),
        raw("COMPLETE BLOOD COUNTS [CBC]", "OPD", "Routine"),
        raw("Serum IGE", "IPD", "Allergy"),
    ];
    let tables = run_pipeline(&rows, &CategoryRules::standard(), &NoopOracle);
    let category_rows: Vec<(String, usize)> = tables
        .category_counts
        .iter()
        .map(|row| (row.category.clone(), row.count))
        .collect();
    assert_eq!(
        category_rows,
        vec![
            ("Biochemistry".to_string(), 0),
            ("Clinical".to_string(), 0),
            ("Hematology".to_string(), 2),
            ("Immunology".to_string(), 1),
            (GRAND_TOTAL_LABEL.to_string(), 3),
        ]
    );
}

#[test]
fn classification_is_total_and_default_is_observable() {
    let rows = vec![raw("STOOL CULTURE", "OPD", "Micro")];
    let tables = run_pipeline(&rows, &CategoryRules::standard(), &NoopOracle);
    assert_eq!(tables.decisions.len(), 1);
    let decision = &tables.decisions[0];
    assert_eq!(decision.category, Category::Biochemistry);
    assert_eq!(decision.source, ClassificationSource::Default);
}

#[test]
fn incomplete_rows_are_dropped_not_fatal() {
    let rows = vec![
        raw("CBC", "IPD", "Routine"),
        raw("", "IPD", "Routine"),
        raw("CBC", "IPD", ""),
    ];
    let tables = run_pipeline(&rows, &CategoryRules::standard(), &NoopOracle);
    assert_eq!(tables.dropped, 2);
    assert_eq!(tables.decisions.len(), 1);
    let grand = tables.test_counts.last().expect("grand total");
    assert_eq!(grand.total, 1);
}

#[test]
fn pipeline_is_idempotent() {
    let rows = vec![
        raw("BLOOD UREA", "IPD", "Routine"),
        raw("STOOL CULTURE", "walk-in", "Micro"),
        raw("Serum IGE", "ipd ward", "Allergy"),
    ];
    let rules = CategoryRules::standard();
    let first = run_pipeline(&rows, &rules, &NoopOracle);
    let second = run_pipeline(&rows, &rules, &NoopOracle);
    assert_eq!(first.test_counts, second.test_counts);
    assert_eq!(first.category_counts, second.category_counts);
    assert_eq!(first.decisions, second.decisions);
}

fn raw_record_strategy() -> impl Strategy<Value = RawRecord> {
    let test_name = prop::sample::select(vec![
        "CBC",
        "BLOOD UREA",
        "Serum IGE",
        "STOOL CULTURE",
        "URINE ANALYSIS",
        "THYROID FUNCTION TEST",
        "",
    ]);
    let booking_mode = prop::sample::select(vec!["IPD", "OPD", "opd indent", "walk-in", ""]);
    let subgroup = prop::sample::select(vec!["Routine", "Allergy", "Micro", ""]);
    (test_name, booking_mode, subgroup).prop_map(|(t, b, s)| RawRecord {
        test_name: t.to_string(),
        booking_mode: b.to_string(),
        subgroup: s.to_string(),
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn grand_totals_equal_cleaned_record_count(
        rows in prop::collection::vec(raw_record_strategy(), 0..40)
    ) {
        let tables = run_pipeline(&rows, &CategoryRules::standard(), &NoopOracle);
        let cleaned = tables.decisions.len();

        let test_grand = tables.test_counts.last().expect("grand total row");
        assert!(test_grand.is_grand_total());
        assert_eq!(test_grand.total, cleaned);
        assert_eq!(test_grand.inpatient + test_grand.outpatient, test_grand.total);

        let category_grand = tables.category_counts.last().expect("grand total row");
        assert!(category_grand.is_grand_total());
        assert_eq!(category_grand.count, cleaned);
        let body_sum: usize = tables.category_counts
            [..tables.category_counts.len() - 1]
            .iter()
            .map(|row| row.count)
            .sum();
        assert_eq!(body_sum, cleaned);

        assert_eq!(cleaned + tables.dropped, rows.len());
    }

    #[test]
    fn test_table_body_is_sorted(
        rows in prop::collection::vec(raw_record_strategy(), 0..40)
    ) {
        let tables = run_pipeline(&rows, &CategoryRules::standard(), &NoopOracle);
        let body = &tables.test_counts[..tables.test_counts.len() - 1];
        for pair in body.windows(2) {
            assert!(pair[0].test_name < pair[1].test_name);
        }
    }
}
