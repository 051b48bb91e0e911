//! Clinical categories and classification provenance.

use serde::{Deserialize, Serialize};

/// Fixed set of clinical categories for the daily report.
///
/// The declaration order is the report order and the rule-matching
/// tie-break order; keep new variants in sync with [`Category::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Biochemistry,
    Clinical,
    Hematology,
    Immunology,
}

impl Category {
    /// Every category in report order.
    pub const ALL: [Category; 4] = [
        Category::Biochemistry,
        Category::Clinical,
        Category::Hematology,
        Category::Immunology,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Biochemistry => "Biochemistry",
            Category::Clinical => "Clinical",
            Category::Hematology => "Hematology",
            Category::Immunology => "Immunology",
        }
    }

    /// Parse a category label, case-insensitively.
    ///
    /// Returns `None` for anything outside the fixed set; callers use this
    /// to discard out-of-set answers from the external oracle.
    #[must_use]
    pub fn from_label(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(trimmed))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which mechanism decided a record's category.
///
/// Recorded per decision so the silent default policy stays observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassificationSource {
    /// Matched a keyword in the static rule table.
    Rule,
    /// Resolved by the external classification oracle.
    Oracle,
    /// Fell through to the configured default category.
    Default,
}

impl ClassificationSource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ClassificationSource::Rule => "rule",
            ClassificationSource::Oracle => "oracle",
            ClassificationSource::Default => "default",
        }
    }
}
