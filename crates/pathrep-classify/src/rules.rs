//! Static keyword rules for category assignment.

use serde::{Deserialize, Serialize};

use pathrep_model::{Category, Record};

/// One category with the keywords that select it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: Vec<String>,
}

/// Ordered rule table plus the default for anything nothing resolves.
///
/// The order of `rules` is the tie-break: the first category with a
/// matching keyword wins, so a test whose text matches two categories is
/// always assigned deterministically. An unordered map would not give
/// that guarantee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRules {
    rules: Vec<CategoryRule>,
    default_category: Category,
}

impl CategoryRules {
    #[must_use]
    pub fn new(rules: Vec<CategoryRule>, default_category: Category) -> Self {
        Self {
            rules,
            default_category,
        }
    }

    /// The standard daily-report rule table.
    ///
    /// Default category is Biochemistry, the first-listed category: a test
    /// that matches no keyword and gets no oracle answer lands there.
    #[must_use]
    pub fn standard() -> Self {
        let rules = vec![
            CategoryRule {
                category: Category::Biochemistry,
                keywords: keywords(&[
                    "RENAL FUNCTION TEST",
                    "LIVER FUNCTION TEST",
                    "BLOOD GLUCOSE",
                    "GLYCOSYLATED HB",
                    "SGOT",
                    "SGPT",
                    "BLOOD UREA",
                    "VIRAL MARKER",
                    "PREOPERATIVE PROFILE",
                    "SEROLOGY",
                    "PT/INR",
                ]),
            },
            CategoryRule {
                category: Category::Clinical,
                keywords: keywords(&[
                    "URINE ANALYSIS",
                    "PLEURAL FLUID EXAMINATION",
                    "Plural Fluid for R/E Biochemistry / ADA",
                ]),
            },
            CategoryRule {
                category: Category::Hematology,
                keywords: keywords(&[
                    "COMPLETE BLOOD COUNTS [CBC]",
                    "TOTAL LEUCOCYTE COUNT",
                    "FLUID DLC",
                    "COMPLETE HEMOGRAM WITH ESR",
                    "BLOOD GROUP",
                ]),
            },
            CategoryRule {
                category: Category::Immunology,
                keywords: keywords(&[
                    "Hormone Assays Report",
                    "Serum IGE",
                    "VDRL TITER",
                    "HBsAg",
                    "HCV ANTIBODY TEST",
                    "CA-125",
                    "THYROID FUNCTION TEST",
                    "THYROID STIMULATING HORMONE",
                    "TOTAL THYROID PROFILE",
                    "IgG IgM S Typhe",
                    "C-REACTIVE PROTEIN",
                ]),
            },
        ];
        Self::new(rules, Category::Biochemistry)
    }

    #[must_use]
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    #[must_use]
    pub fn default_category(&self) -> Category {
        self.default_category
    }

    /// Match a record against the rule table.
    ///
    /// `None` means unresolved, a normal outcome handled downstream by the
    /// fallback resolver.
    #[must_use]
    pub fn classify(&self, record: &Record) -> Option<Category> {
        self.classify_text(&record.test_name, &record.subgroup)
    }

    /// Match raw test text: case-insensitive substring over name + subgroup.
    #[must_use]
    pub fn classify_text(&self, test_name: &str, subgroup: &str) -> Option<Category> {
        let search = format!("{test_name} {subgroup}").to_uppercase();
        self.rules
            .iter()
            .find(|rule| {
                rule.keywords
                    .iter()
                    .any(|keyword| search.contains(&keyword.to_uppercase()))
            })
            .map(|rule| rule.category)
    }
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self::standard()
    }
}

fn keywords(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_match_is_case_insensitive() {
        let rules = CategoryRules::standard();
        assert_eq!(
            rules.classify_text("complete blood counts [cbc]", "routine"),
            Some(Category::Hematology)
        );
        assert_eq!(
            rules.classify_text("Serum ige", "Allergy"),
            Some(Category::Immunology)
        );
    }

    #[test]
    fn subgroup_participates_in_matching() {
        let rules = CategoryRules::standard();
        assert_eq!(
            rules.classify_text("Panel 12", "BLOOD GLUCOSE fasting"),
            Some(Category::Biochemistry)
        );
    }

    #[test]
    fn first_matching_category_wins() {
        let rules = CategoryRules::standard();
        // Matches both a Biochemistry keyword (SEROLOGY) and an Immunology
        // keyword (VDRL TITER); Biochemistry is listed first.
        assert_eq!(
            rules.classify_text("VDRL TITER", "SEROLOGY"),
            Some(Category::Biochemistry)
        );
    }

    #[test]
    fn no_keyword_is_unresolved() {
        let rules = CategoryRules::standard();
        assert_eq!(rules.classify_text("STOOL CULTURE", "Micro"), None);
    }
}
